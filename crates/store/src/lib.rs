//! JSON file persistence for high score and unlock progress
//!
//! Implements [`ProgressStore`] on a single small JSON document:
//!
//! ```json
//! {"high_score": 1200, "highest_level_unlocked": 3}
//! ```
//!
//! Read and write failures are logged and swallowed. Loads fall back to
//! 0 / level 1 so gameplay never sees an I/O error; saves leave an unreadable
//! file untouched.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use blockfall_engine::ProgressStore;

/// Default file name used when no path is configured
pub const DEFAULT_STORE_FILE: &str = "blockfall-progress.json";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Progress {
    #[serde(default)]
    pub high_score: u32,
    #[serde(default = "first_level")]
    pub highest_level_unlocked: u8,
}

fn first_level() -> u8 {
    1
}

impl Default for Progress {
    fn default() -> Self {
        Self {
            high_score: 0,
            highest_level_unlocked: first_level(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path from `BLOCKFALL_STORE_PATH`, else [`DEFAULT_STORE_FILE`] in the working directory
    pub fn from_env() -> Self {
        let path = std::env::var("BLOCKFALL_STORE_PATH")
            .ok()
            .filter(|p| !p.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_STORE_FILE.to_string());
        Self::new(path)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the stored document. A missing file is not an error.
    pub fn read(&self) -> Result<Progress> {
        if !self.path.exists() {
            return Ok(Progress::default());
        }
        let text = fs::read_to_string(&self.path)
            .with_context(|| format!("failed to read {}", self.path.display()))?;
        let progress = serde_json::from_str(&text)
            .with_context(|| format!("malformed progress file {}", self.path.display()))?;
        Ok(progress)
    }

    pub fn write(&self, progress: &Progress) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }
        let text = serde_json::to_string_pretty(progress)?;
        fs::write(&self.path, text)
            .with_context(|| format!("failed to write {}", self.path.display()))?;
        Ok(())
    }

    fn load_or_default(&self) -> Progress {
        self.read().unwrap_or_else(|e| {
            eprintln!("[Store] {:#}; using defaults", e);
            Progress::default()
        })
    }

    /// Read-modify-write of one field
    ///
    /// An unreadable document is left as it is, so a save never replaces the
    /// other stored value with its default.
    fn update(&self, apply: impl FnOnce(&mut Progress)) {
        let mut progress = match self.read() {
            Ok(progress) => progress,
            Err(e) => {
                eprintln!("[Store] {:#}; save skipped", e);
                return;
            }
        };
        apply(&mut progress);
        if let Err(e) = self.write(&progress) {
            eprintln!("[Store] {:#}", e);
        }
    }
}

impl ProgressStore for JsonFileStore {
    fn load_high_score(&self) -> u32 {
        self.load_or_default().high_score
    }

    fn save_high_score(&mut self, score: u32) {
        self.update(|p| p.high_score = score);
    }

    fn load_unlock_progress(&self) -> u8 {
        self.load_or_default().highest_level_unlocked.max(1)
    }

    fn save_unlock_progress(&mut self, level: u8) {
        self.update(|p| p.highest_level_unlocked = level);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("blockfall-store-{}", std::process::id()));
        dir.join(name)
    }

    #[test]
    fn test_missing_file_yields_defaults() {
        let store = JsonFileStore::new(temp_path("missing.json"));
        assert_eq!(store.load_high_score(), 0);
        assert_eq!(store.load_unlock_progress(), 1);
    }

    #[test]
    fn test_saves_persist_across_instances() {
        let path = temp_path("persist.json");
        let _ = fs::remove_file(&path);

        let mut store = JsonFileStore::new(&path);
        store.save_high_score(1200);
        store.save_unlock_progress(3);

        let reopened = JsonFileStore::new(&path);
        assert_eq!(reopened.load_high_score(), 1200);
        assert_eq!(reopened.load_unlock_progress(), 3);

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_malformed_file_yields_defaults() {
        let path = temp_path("garbage.json");
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "not json").unwrap();

        let store = JsonFileStore::new(&path);
        assert!(store.read().is_err());
        assert_eq!(store.load_high_score(), 0);
        assert_eq!(store.load_unlock_progress(), 1);

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_unreadable_document_is_not_overwritten() {
        let path = temp_path("overflow.json");
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        let stored = r#"{"high_score": 900, "highest_level_unlocked": 300}"#;
        fs::write(&path, stored).unwrap();

        let mut store = JsonFileStore::new(&path);
        store.save_unlock_progress(2);
        store.save_high_score(40);
        assert_eq!(fs::read_to_string(&path).unwrap(), stored);

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_partial_document_fills_defaults() {
        let path = temp_path("partial.json");
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, r#"{"high_score": 70}"#).unwrap();

        let store = JsonFileStore::new(&path);
        assert_eq!(store.load_high_score(), 70);
        assert_eq!(store.load_unlock_progress(), 1);

        let _ = fs::remove_file(&path);
    }
}
