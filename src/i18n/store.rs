//! Locale table loading.
//!
//! Each locale lives in one flat `<locale-tag>.json` file (key → template,
//! no nesting) inside a configured directory. [`DirStore`] re-reads the
//! whole directory on every call and returns an atomic snapshot.

use anyhow::{Context, Result};
use std::collections::HashMap;
use std::path::PathBuf;
use tracing::warn;

/// Flat mapping from message key to message template for one locale.
pub type LocaleTable = HashMap<String, String>;

/// Mapping from locale tag (e.g. "de-DE") to its table.
pub type LocaleRegistry = HashMap<String, LocaleTable>;

/// Capability interface for loading the locale registry.
///
/// The translator only depends on this trait, so the always-fresh
/// [`DirStore`] can be replaced by a caching or file-watching
/// implementation without touching lookup logic.
pub trait LocaleStore: Send + Sync {
    /// Load a complete registry snapshot.
    fn load(&self) -> Result<LocaleRegistry>;
}

/// Loads locale tables from a directory of `<locale-tag>.json` files.
pub struct DirStore {
    dir: PathBuf,
}

impl DirStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

impl LocaleStore for DirStore {
    /// Read every locale file in the directory.
    ///
    /// A single malformed or unreadable file only costs that locale: it is
    /// skipped with a warning, because the fallback locale can still serve
    /// the key. A missing directory is a hard error.
    fn load(&self) -> Result<LocaleRegistry> {
        let entries = std::fs::read_dir(&self.dir)
            .with_context(|| format!("failed to read locale directory {}", self.dir.display()))?;

        let mut registry = LocaleRegistry::new();
        for entry in entries {
            let path = entry
                .with_context(|| format!("failed to list locale directory {}", self.dir.display()))?
                .path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            let Some(tag) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };

            let raw = match std::fs::read_to_string(&path) {
                Ok(raw) => raw,
                Err(e) => {
                    warn!("Skipping unreadable locale file {}: {}", path.display(), e);
                    continue;
                }
            };
            match serde_json::from_str::<LocaleTable>(&raw) {
                Ok(table) => {
                    registry.insert(tag.to_string(), table);
                }
                Err(e) => {
                    warn!("Skipping malformed locale file {}: {}", path.display(), e);
                }
            }
        }

        Ok(registry)
    }
}
