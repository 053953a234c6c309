//! Memoized analysis results.
//!
//! Results are keyed by the SHA-256 of the source file's bytes plus the
//! sheet name, so re-running on an unchanged file skips the engine. The
//! engine itself never consults the cache; callers wrap it with
//! [`AnalysisCache::get_or_analyze`].

use crate::config::LayoutConfig;
use crate::error::CacheError;
use crate::result::AnalysisResult;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};

const CACHE_FILE_NAME: &str = "ovenlog-cache.json";

/// Hex SHA-256 of a file's contents.
#[must_use]
pub fn content_hash(bytes: &[u8]) -> String {
    hex::encode(Sha256::digest(bytes))
}

/// Hash of the layout settings a cached result was computed with.
#[must_use]
pub fn layout_fingerprint(config: &LayoutConfig) -> String {
    let encoded = serde_json::to_vec(config).unwrap_or_default();
    content_hash(&encoded)
}

/// Identity of one (file contents, sheet) pair.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    pub content_hash: String,
    pub sheet: String,
}

/// In-memory cache with optional JSON persistence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisCache {
    version: u32,
    fingerprint: String,
    /// content hash -> sheet name -> result
    entries: HashMap<String, HashMap<String, AnalysisResult>>,
}

impl AnalysisCache {
    const CURRENT_VERSION: u32 = 1;

    /// Empty cache for results computed under `config`.
    #[must_use]
    pub fn new(config: &LayoutConfig) -> Self {
        Self {
            version: Self::CURRENT_VERSION,
            fingerprint: layout_fingerprint(config),
            entries: HashMap::new(),
        }
    }

    #[must_use]
    pub fn key_for(bytes: &[u8], sheet: &str) -> CacheKey {
        CacheKey {
            content_hash: content_hash(bytes),
            sheet: sheet.to_string(),
        }
    }

    /// Location of the cache file inside `dir`
    #[must_use]
    pub fn path(dir: &Path) -> PathBuf {
        dir.join(CACHE_FILE_NAME)
    }

    #[must_use]
    pub fn fingerprint(&self) -> &str {
        &self.fingerprint
    }

    #[must_use]
    pub fn get(&self, key: &CacheKey) -> Option<&AnalysisResult> {
        self.entries
            .get(&key.content_hash)
            .and_then(|sheets| sheets.get(&key.sheet))
    }

    pub fn insert(&mut self, key: CacheKey, result: AnalysisResult) {
        self.entries
            .entry(key.content_hash)
            .or_default()
            .insert(key.sheet, result);
    }

    /// Drop every sheet cached for one file's contents. Returns how many
    /// results were removed.
    pub fn invalidate(&mut self, content_hash: &str) -> usize {
        self.entries
            .remove(content_hash)
            .map_or(0, |sheets| sheets.len())
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Number of cached sheet results
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.values().map(HashMap::len).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of distinct file contents with at least one cached sheet
    #[must_use]
    pub fn file_count(&self) -> usize {
        self.entries.len()
    }

    /// Return the cached result, or run `analyze` and remember a success.
    ///
    /// Failures are passed through and never cached.
    pub fn get_or_analyze<F, E>(
        &mut self,
        bytes: &[u8],
        sheet: &str,
        analyze: F,
    ) -> Result<AnalysisResult, E>
    where
        F: FnOnce() -> Result<AnalysisResult, E>,
    {
        let key = Self::key_for(bytes, sheet);
        if let Some(hit) = self.get(&key) {
            tracing::debug!("Cache hit for sheet '{}'", sheet);
            return Ok(hit.clone());
        }

        let result = analyze()?;
        self.insert(key, result.clone());
        Ok(result)
    }

    /// Load the cache persisted in `dir`.
    ///
    /// A missing or unreadable file, a different format version, or results
    /// computed under a different layout config all yield an empty cache.
    #[must_use]
    pub fn load(dir: &Path, config: &LayoutConfig) -> Self {
        let path = Self::path(dir);
        if !path.exists() {
            return Self::new(config);
        }

        let file = match File::open(&path) {
            Ok(f) => f,
            Err(e) => {
                tracing::warn!("Cannot open cache {}: {}", path.display(), e);
                return Self::new(config);
            }
        };

        match serde_json::from_reader::<_, AnalysisCache>(BufReader::new(file)) {
            Ok(cache) if cache.version != Self::CURRENT_VERSION => {
                tracing::info!("Cache version changed, starting fresh");
                Self::new(config)
            }
            Ok(cache) if cache.fingerprint != layout_fingerprint(config) => {
                tracing::info!("Layout config changed, starting fresh");
                Self::new(config)
            }
            Ok(cache) => cache,
            Err(e) => {
                tracing::warn!("Ignoring unreadable cache {}: {}", path.display(), e);
                Self::new(config)
            }
        }
    }

    /// Persist the cache into `dir`, creating it if needed.
    pub fn save(&self, dir: &Path) -> Result<(), CacheError> {
        std::fs::create_dir_all(dir)?;
        let writer = BufWriter::new(File::create(Self::path(dir))?);
        serde_json::to_writer_pretty(writer, self)?;
        Ok(())
    }

    /// Delete the cache file in `dir`. Returns whether a file was removed.
    pub fn remove(dir: &Path) -> Result<bool, CacheError> {
        let path = Self::path(dir);
        if !path.exists() {
            return Ok(false);
        }
        std::fs::remove_file(path)?;
        Ok(true)
    }
}
