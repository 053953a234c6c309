//! Sorting, total placement and rendering of analysis results.

use colored::Colorize;
use comfy_table::presets::ASCII_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, Table};
use ovenlog_core::{AnalysisResult, ItemRecord};
use ovenlog_sheet::{CellValue, Sheet};
use std::cmp::Ordering;

/// Column the report is ordered by.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum SortKey {
    /// Weekend sales (default)
    #[default]
    WeekendSales,
    /// Weekday sales
    WeekdaySales,
    /// Weekday waste rate
    WeekdayWasteRate,
    /// Weekend waste rate
    WeekendWasteRate,
    /// Item name
    Name,
}

/// Where the grand-total row goes in the report.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum TotalPlacement {
    /// Above the items
    Top,
    /// Below the items (default)
    #[default]
    Bottom,
    /// Leave it out
    Hide,
}

pub const COLUMNS: [&str; 7] = [
    "Item",
    "Weekday production",
    "Weekday sales",
    "Weekday waste %",
    "Weekend production",
    "Weekend sales",
    "Weekend waste %",
];

/// One analyzed sheet as it will be shown.
#[derive(Debug, Clone)]
pub struct Section {
    pub file: String,
    pub sheet: String,
    pub rows: Vec<ItemRecord>,
}

impl Section {
    /// Sort the items and place the totals.
    pub fn arrange(
        file: &str,
        result: &AnalysisResult,
        key: SortKey,
        ascending: bool,
        placement: TotalPlacement,
    ) -> Self {
        let mut items = result.items.clone();
        sort_items(&mut items, key, ascending);

        let totals = result
            .total
            .iter()
            .chain(result.extra_totals.iter())
            .cloned();

        let rows = match placement {
            TotalPlacement::Top => totals.chain(items).collect(),
            TotalPlacement::Bottom => items.into_iter().chain(totals).collect(),
            TotalPlacement::Hide => items,
        };

        Self {
            file: file.to_string(),
            sheet: result.sheet.clone(),
            rows,
        }
    }

    /// Label used when several sections share one grid
    pub fn label(&self) -> String {
        format!("{}:{}", self.file, self.sheet)
    }
}

fn compare(a: &ItemRecord, b: &ItemRecord, key: SortKey) -> Ordering {
    match key {
        SortKey::WeekendSales => a.weekend_sales().cmp(&b.weekend_sales()),
        SortKey::WeekdaySales => a.weekday_sales().cmp(&b.weekday_sales()),
        SortKey::WeekdayWasteRate => a.weekday_waste_rate().total_cmp(&b.weekday_waste_rate()),
        SortKey::WeekendWasteRate => a.weekend_waste_rate().total_cmp(&b.weekend_waste_rate()),
        SortKey::Name => a.name.cmp(&b.name),
    }
}

/// Stable sort, so ties keep their source row order.
pub fn sort_items(items: &mut [ItemRecord], key: SortKey, ascending: bool) {
    items.sort_by(|a, b| {
        let ord = compare(a, b, key);
        if ascending {
            ord
        } else {
            ord.reverse()
        }
    });
}

fn record_cells(record: &ItemRecord) -> Vec<CellValue> {
    vec![
        CellValue::from(record.name.as_str()),
        CellValue::Int(record.weekday_production()),
        CellValue::Int(record.weekday_sales()),
        CellValue::Float(record.weekday_waste_rate()),
        CellValue::Int(record.weekend_production()),
        CellValue::Int(record.weekend_sales()),
        CellValue::Float(record.weekend_waste_rate()),
    ]
}

/// Report grid with a header row, ready for the sheet writers.
///
/// A leading "Sheet" column is added when more than one section is present.
pub fn to_sheet(name: &str, sections: &[Section]) -> Sheet {
    let labeled = sections.len() > 1;

    let mut header: Vec<CellValue> = Vec::new();
    if labeled {
        header.push(CellValue::from("Sheet"));
    }
    header.extend(COLUMNS.iter().map(|c| CellValue::from(*c)));

    let mut rows = vec![header];
    for section in sections {
        for record in &section.rows {
            let mut row = Vec::with_capacity(COLUMNS.len() + 1);
            if labeled {
                row.push(CellValue::from(section.label()));
            }
            row.extend(record_cells(record));
            rows.push(row);
        }
    }
    Sheet::from_rows(name, rows)
}

/// Bordered table for one section. Total rows are highlighted.
pub fn render_table(section: &Section) -> String {
    let mut table = Table::new();
    table
        .load_preset(ASCII_FULL_CONDENSED)
        .set_header(
            COLUMNS
                .iter()
                .map(|title| Cell::new(title).add_attribute(Attribute::Bold))
                .collect::<Vec<_>>(),
        );

    for record in &section.rows {
        let row: Vec<Cell> = record_cells(record)
            .iter()
            .map(|value| {
                let cell = Cell::new(value);
                if record.is_total {
                    cell.fg(Color::Yellow)
                } else {
                    cell
                }
            })
            .collect();
        table.add_row(row);
    }

    for index in 1..COLUMNS.len() {
        if let Some(column) = table.column_mut(index) {
            column.set_cell_alignment(CellAlignment::Right);
        }
    }
    table.to_string()
}

/// Summary card for one item.
pub fn detail_card(section: &Section, record: &ItemRecord) -> String {
    let delta = record.weekend_sales() - record.weekday_sales();
    let delta = if delta >= 0 {
        format!("+{delta}").green()
    } else {
        delta.to_string().red()
    };

    let mut out = format!(
        "{} ({})\n",
        record.name.cyan().bold(),
        section.label()
    );
    out.push_str(&format!(
        "  Weekday  sales {:>6}  waste {:>5.1}%\n",
        record.weekday_sales(),
        record.weekday_waste_rate()
    ));
    out.push_str(&format!(
        "  Weekend  sales {:>6}  waste {:>5.1}%\n",
        record.weekend_sales(),
        record.weekend_waste_rate()
    ));
    out.push_str(&format!("  Weekend vs weekday sales: {delta}\n"));
    if record.has_defaulted_cells() {
        out.push_str(&format!(
            "  {} non-numeric cells counted as zero\n",
            record.defaulted_cells
        ));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use ovenlog_core::BucketStats;

    fn record(name: &str, row: usize, weekday_sales: i64, weekend_sales: i64) -> ItemRecord {
        ItemRecord {
            name: name.to_string(),
            row,
            weekday: BucketStats {
                production: weekday_sales,
                sales: weekday_sales,
                waste: 0,
                waste_rate: 0.0,
            },
            weekend: BucketStats {
                production: weekend_sales + 10,
                sales: weekend_sales,
                waste: 10,
                waste_rate: 10.0,
            },
            is_total: false,
            defaulted_cells: 0,
        }
    }

    fn result() -> AnalysisResult {
        let mut total = record("합계", 9, 60, 90);
        total.is_total = true;
        AnalysisResult {
            sheet: "1주차".to_string(),
            header_row: 3,
            items: vec![
                record("Bagel", 5, 10, 20),
                record("Croissant", 6, 30, 50),
                record("Muffin", 7, 20, 20),
            ],
            total: Some(total),
            extra_totals: Vec::new(),
        }
    }

    fn names(section: &Section) -> Vec<&str> {
        section.rows.iter().map(|r| r.name.as_str()).collect()
    }

    #[test]
    fn test_default_sort_is_weekend_sales_descending() {
        let section = Section::arrange(
            "log.xlsx",
            &result(),
            SortKey::default(),
            false,
            TotalPlacement::default(),
        );
        assert_eq!(names(&section), vec!["Croissant", "Bagel", "Muffin", "합계"]);
    }

    #[test]
    fn test_ascending_and_ties_keep_row_order() {
        let section = Section::arrange(
            "log.xlsx",
            &result(),
            SortKey::WeekendSales,
            true,
            TotalPlacement::Hide,
        );
        assert_eq!(names(&section), vec!["Bagel", "Muffin", "Croissant"]);
    }

    #[test]
    fn test_total_on_top() {
        let section = Section::arrange(
            "log.xlsx",
            &result(),
            SortKey::Name,
            true,
            TotalPlacement::Top,
        );
        assert_eq!(names(&section), vec!["합계", "Bagel", "Croissant", "Muffin"]);
    }

    #[test]
    fn test_sheet_grid() {
        let section = Section::arrange(
            "log.xlsx",
            &result(),
            SortKey::WeekdaySales,
            false,
            TotalPlacement::Hide,
        );
        let sheet = to_sheet("report", &[section.clone()]);

        assert_eq!(sheet.row_count(), 4);
        assert_eq!(sheet.cell(0, 0), &CellValue::from("Item"));
        assert_eq!(sheet.cell(1, 0), &CellValue::from("Croissant"));
        assert_eq!(sheet.cell(1, 2), &CellValue::Int(30));

        let two = to_sheet("report", &[section.clone(), section]);
        assert_eq!(two.cell(0, 0), &CellValue::from("Sheet"));
        assert_eq!(two.cell(1, 0), &CellValue::from("log.xlsx:1주차"));
        assert_eq!(two.row_count(), 7);
    }

    /// Terminal columns, with Hangul syllables taking two. ANSI styling
    /// sequences take none.
    fn display_width(line: &str) -> usize {
        let mut width = 0;
        let mut in_escape = false;
        for c in line.chars() {
            match c {
                '\u{1b}' => in_escape = true,
                'm' if in_escape => in_escape = false,
                _ if in_escape => {}
                '\u{AC00}'..='\u{D7A3}' => width += 2,
                _ => width += 1,
            }
        }
        width
    }

    #[test]
    fn test_table_has_every_row() {
        let section = Section::arrange(
            "log.xlsx",
            &result(),
            SortKey::default(),
            false,
            TotalPlacement::Bottom,
        );
        let table = render_table(&section);

        let rows: Vec<&str> = table.lines().filter(|l| l.starts_with('|')).collect();
        assert_eq!(rows.len(), 5);
        assert!(rows[0].contains("Item"));
        assert!(rows[1].contains("Croissant"));
        assert!(rows[4].contains("합계"));
    }

    #[test]
    fn test_table_columns_line_up_with_korean_names() {
        let mut source = result();
        source.items = vec![record("Bagel", 5, 10, 20), record("크루아상", 6, 30, 50)];
        let section = Section::arrange(
            "log.xlsx",
            &source,
            SortKey::Name,
            true,
            TotalPlacement::Hide,
        );
        let table = render_table(&section);

        let widths: Vec<usize> = table.lines().map(display_width).collect();
        assert!(widths.len() > 2);
        assert!(widths.iter().all(|w| *w == widths[0]), "{widths:?}");
    }

    #[test]
    fn test_detail_card_delta() {
        colored::control::set_override(false);
        let section = Section::arrange(
            "log.xlsx",
            &result(),
            SortKey::default(),
            false,
            TotalPlacement::Hide,
        );
        let card = detail_card(&section, &section.rows[0]);

        assert!(card.contains("Croissant"));
        assert!(card.contains("+20"));
    }
}
