//! FAQ store file persistence.
//!
//! The whole store lives in one JSON file: an object whose keys are FAQ keys
//! and whose values are `{"question", "answer"}` objects. The file is
//! rewritten in full after every mutation and stays pretty-printed so it can
//! be inspected or hand-edited between runs.
//!
//! # Atomic Writes
//!
//! Saves use write-then-rename to prevent corruption:
//!
//! 1. Write to `<file>.tmp`
//! 2. Rename to `<file>` (atomic on Unix)
//!
//! The on-disk file is therefore always a complete, parseable snapshot.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::store::FaqEntry;

/// Error type for store persistence operations.
#[derive(Debug)]
pub enum StoreError {
    /// IO error (permission denied, disk full, etc.)
    Io(std::io::Error),
    /// The backing file exists but cannot be parsed as a store snapshot
    Corrupt(serde_json::Error),
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreError::Io(e) => write!(f, "IO error: {e}"),
            StoreError::Corrupt(e) => write!(f, "corrupt store file: {e}"),
        }
    }
}

impl std::error::Error for StoreError {}

impl From<std::io::Error> for StoreError {
    fn from(e: std::io::Error) -> Self {
        StoreError::Io(e)
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(e: serde_json::Error) -> Self {
        StoreError::Corrupt(e)
    }
}

/// Load the FAQ mapping from disk.
///
/// A missing file is created containing an empty object, so the first
/// startup leaves a valid snapshot behind. An existing file that fails to
/// parse is fatal: the caller cannot trust a store it cannot read.
pub fn load_entries(path: &Path) -> Result<BTreeMap<String, FaqEntry>, StoreError> {
    if !path.exists() {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, "{}")?;
        log::info!("created empty faq store at {}", path.display());
        return Ok(BTreeMap::new());
    }

    let contents = fs::read(path)?;
    let entries: BTreeMap<String, FaqEntry> = serde_json::from_slice(&contents)?;

    Ok(entries)
}

/// Save the full FAQ mapping to disk.
///
/// Serializes the whole map pretty-printed, writes it to a temp file, then
/// renames over the real file.
pub fn save_entries(path: &Path, entries: &BTreeMap<String, FaqEntry>) -> Result<(), StoreError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let temp_path = temp_path(path);

    let json = serde_json::to_string_pretty(entries)?;
    fs::write(&temp_path, json)?;
    fs::rename(&temp_path, path)?;

    Ok(())
}

fn temp_path(path: &Path) -> PathBuf {
    let mut temp = path.as_os_str().to_os_string();
    temp.push(".tmp");
    PathBuf::from(temp)
}

// ============================================================================
// TESTS
// ============================================================================
