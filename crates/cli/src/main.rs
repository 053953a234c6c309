//! # ovenlog-cli
//!
//! Command-line front end for the production-log analyzer.

mod report;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use ovenlog_core::{AnalysisCache, Analyzer, LayoutConfig, SheetOutcome, SheetReport};
use ovenlog_sheet::{Book, SourceFormat};
use report::{Section, SortKey, TotalPlacement};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

const DEFAULT_CACHE_DIR: &str = ".ovenlog";

/// ovenlog - weekday/weekend sales and waste from bakery production logs
#[derive(Parser)]
#[command(name = "ovenlog")]
#[command(author, version, about = "Weekday/weekend sales and waste from bakery production logs", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Layout config file (.yaml, .yml or .json)
    #[arg(short, long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze production logs
    Analyze {
        /// CSV, TSV or spreadsheet files
        #[arg(value_name = "FILE", required = true)]
        files: Vec<PathBuf>,

        /// Only analyze this sheet
        #[arg(short, long)]
        sheet: Option<String>,

        /// Sort key
        #[arg(long, value_enum, default_value_t = SortKey::default())]
        sort: SortKey,

        /// Sort ascending instead of descending
        #[arg(long)]
        ascending: bool,

        /// Where to put the grand-total row
        #[arg(long, value_enum, default_value_t = TotalPlacement::default())]
        total: TotalPlacement,

        /// Output format (table, json, csv)
        #[arg(short = 'f', long = "format", default_value = "table")]
        format: OutputFormat,

        /// Also write the report to a .csv or .xlsx file
        #[arg(short, long, value_name = "PATH")]
        output: Option<PathBuf>,

        /// Reuse results cached in this directory
        #[arg(long, value_name = "DIR")]
        cache: Option<PathBuf>,

        /// Show a detail card for one item instead of the table
        #[arg(long, value_name = "NAME")]
        item: Option<String>,
    },

    /// List the sheets of a file
    Sheets {
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },

    /// Inspect or clear the analysis cache
    Cache {
        /// Cache directory
        #[arg(short, long, value_name = "DIR")]
        dir: Option<PathBuf>,

        /// Show cache information
        #[arg(long)]
        info: bool,

        /// Delete the cache
        #[arg(long)]
        clear: bool,
    },

    /// Show or create a layout config
    Config {
        /// Print the effective config
        #[arg(long)]
        show: bool,

        /// Write a default config to this path
        #[arg(long, value_name = "PATH")]
        init: Option<PathBuf>,
    },
}

/// Output format for results.
#[derive(Clone, Copy, Default, clap::ValueEnum)]
enum OutputFormat {
    /// JSON output
    Json,
    /// CSV output
    Csv,
    /// Pretty table output (default)
    #[default]
    Table,
}

/// Options shared by every analyzed sheet.
struct AnalyzeOptions {
    sheet: Option<String>,
    sort: SortKey,
    ascending: bool,
    total: TotalPlacement,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "info" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Analyze {
            files,
            sheet,
            sort,
            ascending,
            total,
            format,
            output,
            cache,
            item,
        } => {
            let options = AnalyzeOptions {
                sheet,
                sort,
                ascending,
                total,
            };
            let sections = run_analyze(&files, config, &options, cache.as_deref())?;

            if let Some(name) = item {
                print_item(&sections, &name)?;
            } else {
                print_sections(&sections, format)?;
            }
            if let Some(path) = output {
                write_output(&path, &sections)?;
                eprintln!("{} {}", "Wrote".green().bold(), path.display());
            }
            Ok(())
        }
        Commands::Sheets { file } => list_sheets(&file),
        Commands::Cache { dir, info, clear } => {
            let dir = dir.unwrap_or_else(|| PathBuf::from(DEFAULT_CACHE_DIR));
            manage_cache(&dir, &config, info, clear)
        }
        Commands::Config { show, init } => {
            if let Some(path) = &init {
                init_config(path)?;
            }
            if show || init.is_none() {
                print!("{}", config.to_yaml()?);
            }
            Ok(())
        }
    }
}

/// Effective layout config: the given file, or the defaults.
fn load_config(path: Option<&Path>) -> Result<LayoutConfig> {
    match path {
        Some(path) => LayoutConfig::from_path(path)
            .with_context(|| format!("Failed to load config: {}", path.display())),
        None => Ok(LayoutConfig::default()),
    }
}

/// Analyze every sheet of every file. A file or sheet that fails is reported
/// and skipped.
fn run_analyze(
    files: &[PathBuf],
    config: LayoutConfig,
    options: &AnalyzeOptions,
    cache_dir: Option<&Path>,
) -> Result<Vec<Section>> {
    let analyzer = Analyzer::new(config);
    let mut cache = cache_dir.map(|dir| AnalysisCache::load(dir, analyzer.config()));
    let mut sections = Vec::new();

    for path in files {
        let file = path
            .file_name()
            .map_or_else(|| path.display().to_string(), |n| n.to_string_lossy().into_owned());

        let (bytes, book) = match load_file(path, &file) {
            Ok(loaded) => loaded,
            Err(e) => {
                eprintln!("{} {e:#}", "Error:".red().bold());
                continue;
            }
        };
        tracing::debug!("Loaded {} with {} sheets", file, book.sheet_count());

        if let Some(only) = &options.sheet {
            if !book.has_sheet(only) {
                eprintln!(
                    "{} {}: no sheet named '{}'",
                    "Warning:".yellow().bold(),
                    file,
                    only
                );
                continue;
            }
        }

        for (name, sheet) in book.sheets() {
            if options.sheet.as_deref().is_some_and(|only| only != name) {
                continue;
            }

            let result = match cache.as_mut() {
                Some(cache) => cache.get_or_analyze(&bytes, name, || analyzer.analyze(sheet)),
                None => analyzer.analyze(sheet),
            };
            let report = SheetReport {
                sheet: name.to_string(),
                result,
            };
            print_outcome(&file, &report);

            if let Ok(result) = &report.result {
                sections.push(Section::arrange(
                    &file,
                    result,
                    options.sort,
                    options.ascending,
                    options.total,
                ));
            }
        }
    }

    if let (Some(cache), Some(dir)) = (&cache, cache_dir) {
        cache
            .save(dir)
            .with_context(|| format!("Failed to save cache in {}", dir.display()))?;
        tracing::info!("Cache saved with {} sheet results", cache.len());
    }

    if sections.is_empty() {
        bail!("No sheet could be analyzed");
    }
    Ok(sections)
}

fn load_file(path: &Path, file_name: &str) -> Result<(Vec<u8>, Book)> {
    let bytes = std::fs::read(path)
        .with_context(|| format!("Failed to read file: {}", path.display()))?;
    let book = Book::from_bytes(file_name, &bytes)
        .with_context(|| format!("Failed to load {}", path.display()))?;
    Ok((bytes, book))
}

fn print_outcome(file: &str, report: &SheetReport) {
    let label = format!("{file}:{}", report.sheet);
    match report.outcome() {
        SheetOutcome::Items(n) => eprintln!("{} {label}: {n} items", "✔".green()),
        SheetOutcome::NoItems => {
            eprintln!("{} {label}: no valid items", "Warning:".yellow().bold());
        }
        SheetOutcome::LayoutNotFound => {
            eprintln!(
                "{} {label}: weekday header not found",
                "Warning:".yellow().bold()
            );
        }
        SheetOutcome::Failed => {
            if let Err(e) = &report.result {
                eprintln!("{} {e}", "Error:".red().bold());
            }
        }
    }
}

fn print_sections(sections: &[Section], format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Table => {
            for section in sections {
                println!("{}", section.label().cyan().bold());
                println!("{}", report::render_table(section));
            }
        }
        OutputFormat::Json => {
            let json: Vec<serde_json::Value> = sections
                .iter()
                .map(|s| {
                    serde_json::json!({
                        "file": s.file,
                        "sheet": s.sheet,
                        "rows": s.rows,
                    })
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&json)?);
        }
        OutputFormat::Csv => {
            print!("{}", report::to_sheet("report", sections).to_csv_string()?);
        }
    }
    Ok(())
}

fn print_item(sections: &[Section], name: &str) -> Result<()> {
    let mut found = false;
    for section in sections {
        for record in section.rows.iter().filter(|r| r.name == name) {
            println!("{}", report::detail_card(section, record));
            found = true;
        }
    }
    if !found {
        bail!("No item named '{name}'");
    }
    Ok(())
}

fn write_output(path: &Path, sections: &[Section]) -> Result<()> {
    let sheet = report::to_sheet("report", sections);
    let file_name = path.to_string_lossy();

    match SourceFormat::from_file_name(&file_name)? {
        SourceFormat::Delimited { .. } => sheet.save_as_csv(path),
        SourceFormat::Workbook => sheet.save_as_xlsx(path),
    }
    .with_context(|| format!("Failed to write {}", path.display()))
}

fn list_sheets(path: &Path) -> Result<()> {
    let file_name = path.to_string_lossy();
    let names = match SourceFormat::from_file_name(&file_name)? {
        SourceFormat::Workbook => Book::workbook_sheet_names(path)
            .with_context(|| format!("Failed to open {}", path.display()))?,
        SourceFormat::Delimited { .. } => Book::from_path(path)
            .with_context(|| format!("Failed to open {}", path.display()))?
            .sheet_names()
            .into_iter()
            .map(str::to_string)
            .collect(),
    };

    for name in names {
        println!("{name}");
    }
    Ok(())
}

fn manage_cache(dir: &Path, config: &LayoutConfig, info: bool, clear: bool) -> Result<()> {
    let cache_path = AnalysisCache::path(dir);

    if info || !clear {
        if cache_path.exists() {
            let cache = AnalysisCache::load(dir, config);
            println!("{}", "Cache:".cyan().bold());
            println!("  Path: {}", cache_path.display());
            println!("  Files: {}", cache.file_count());
            println!("  Sheets: {}", cache.len());
            if let Ok(meta) = std::fs::metadata(&cache_path) {
                println!("  Size: {} bytes", meta.len());
            }
        } else {
            println!("No cache at {}", cache_path.display());
        }
    }

    if clear {
        if AnalysisCache::remove(dir)? {
            println!("{} {}", "Removed".green().bold(), cache_path.display());
        } else {
            println!("No cache at {}", cache_path.display());
        }
    }
    Ok(())
}

fn init_config(path: &Path) -> Result<()> {
    if path.exists() {
        bail!("{} already exists", path.display());
    }
    let defaults = LayoutConfig::default();
    let content = match path.extension().and_then(|e| e.to_str()) {
        Some("json") => serde_json::to_string_pretty(&defaults)?,
        Some("yaml" | "yml") => defaults.to_yaml()?,
        _ => bail!("Config path must end in .yaml, .yml or .json"),
    };
    std::fs::write(path, content)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    eprintln!("{} {}", "Wrote".green().bold(), path.display());
    Ok(())
}
