//! The FAQ store - the heart of faqbot-core.
//!
//! Owns the in-memory key → entry mapping, enforces the reserved-key rule,
//! and writes the full mapping back to disk after every successful mutation.
//! Callers hold exactly one store per process and route every read and write
//! through it.

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::escape;
use crate::persistence::{self, StoreError};

/// Keys claimed by built-in commands. They appear in the listing but can
/// never be created, renamed onto, or deleted.
pub const RESERVED_KEYS: [&str; 2] = ["help", "list"];

/// One FAQ entry: a question/answer pair identified by its key in the store.
///
/// Both fields hold real control characters (newlines, tabs). The literal
/// `\n`/`\t` convention only exists at the edges, see [`crate::escape`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FaqEntry {
    pub question: String,
    pub answer: String,
}

impl Default for FaqEntry {
    fn default() -> Self {
        FaqEntry {
            question: "?".to_string(),
            answer: "!".to_string(),
        }
    }
}

/// The two editable fields of an entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryField {
    Question,
    Answer,
}

impl EntryField {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntryField::Question => "question",
            EntryField::Answer => "answer",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "question" => Some(EntryField::Question),
            "answer" => Some(EntryField::Answer),
            _ => None,
        }
    }
}

/// In-memory FAQ mapping backed by a single JSON file.
///
/// Every mutating operation persists the whole mapping before reporting
/// success. If the write fails, the in-memory state is rolled back to the
/// pre-mutation snapshot so memory and disk never diverge.
pub struct FaqStore {
    entries: BTreeMap<String, FaqEntry>,
    path: PathBuf,
}

impl FaqStore {
    /// Open the store backed by the given file, creating an empty one if the
    /// file does not exist. A file that exists but cannot be parsed is fatal.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let entries = persistence::load_entries(&path)?;
        log::info!("loaded {} faq entries from {}", entries.len(), path.display());
        Ok(FaqStore { entries, path })
    }

    /// Whether a key is claimed by a built-in command.
    pub fn is_reserved(key: &str) -> bool {
        RESERVED_KEYS.contains(&key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &BTreeMap<String, FaqEntry> {
        &self.entries
    }

    /// All entry keys plus the `list`/`help` pseudo-keys, sorted.
    pub fn sorted_keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.entries.keys().cloned().collect();
        keys.extend(RESERVED_KEYS.iter().map(|key| key.to_string()));
        keys.sort();
        keys
    }

    /// Render the display string for a key.
    ///
    /// `"list"` renders the key listing. A present key renders the entry with
    /// its stored newlines and tabs intact. An absent key renders a plain
    /// "unknown" message, never an error.
    pub fn lookup(&self, key: &str) -> String {
        if key == "list" {
            let keys = self.sorted_keys();
            return format!("# {} available faqs:\n```{}```", keys.len(), keys.join(", "));
        }

        match self.entries.get(key) {
            Some(entry) => format!("## {}\nkey: {}\n{}", entry.question, key, entry.answer),
            None => format!("unknown argument {key}. try help"),
        }
    }

    /// Return an entry's fields in raw form, with newlines and tabs
    /// re-escaped to literal `\n`/`\t` for single-line editing round-trips.
    pub fn raw_show(&self, key: &str) -> Option<(String, String)> {
        self.entries
            .get(key)
            .map(|entry| (escape::escape(&entry.question), escape::escape(&entry.answer)))
    }

    /// Create or update one field of an entry.
    ///
    /// `raw_text` is unescaped before storing. A missing key starts from the
    /// default `{"?", "!"}` entry; only the named field is overwritten.
    /// Returns `false` for a reserved key, with no mutation and no write.
    pub fn upsert(&mut self, key: &str, field: EntryField, raw_text: &str) -> Result<bool, StoreError> {
        if Self::is_reserved(key) {
            log::debug!("refusing to set reserved key: {key}");
            return Ok(false);
        }

        let snapshot = self.entries.clone();

        let entry = self.entries.entry(key.to_string()).or_default();
        let text = escape::unescape(raw_text);
        match field {
            EntryField::Question => entry.question = text,
            EntryField::Answer => entry.answer = text,
        }

        self.persist(snapshot)?;
        Ok(true)
    }

    /// Move an entry from `old_key` to `new_key`.
    ///
    /// Returns `false` when `old_key` does not exist or `new_key` is
    /// reserved, with no mutation in either case. An existing entry at
    /// `new_key` is overwritten.
    pub fn rename(&mut self, old_key: &str, new_key: &str) -> Result<bool, StoreError> {
        if Self::is_reserved(new_key) {
            log::debug!("refusing to rename onto reserved key: {new_key}");
            return Ok(false);
        }
        if old_key == new_key {
            return Ok(self.entries.contains_key(old_key));
        }

        let Some(entry) = self.entries.get(old_key).cloned() else {
            return Ok(false);
        };

        let snapshot = self.entries.clone();

        self.entries.insert(new_key.to_string(), entry);
        self.entries.remove(old_key);

        self.persist(snapshot)?;
        Ok(true)
    }

    /// Remove an entry.
    ///
    /// Returns `false` for a reserved key. An absent key is a successful
    /// no-op: the store already has no such entry, so nothing is written.
    pub fn delete(&mut self, key: &str) -> Result<bool, StoreError> {
        if Self::is_reserved(key) {
            log::debug!("refusing to delete reserved key: {key}");
            return Ok(false);
        }
        if !self.entries.contains_key(key) {
            return Ok(true);
        }

        let snapshot = self.entries.clone();
        self.entries.remove(key);

        self.persist(snapshot)?;
        Ok(true)
    }

    /// Write the current mapping to disk, restoring `snapshot` on failure so
    /// memory never gets ahead of the file.
    fn persist(&mut self, snapshot: BTreeMap<String, FaqEntry>) -> Result<(), StoreError> {
        if let Err(err) = persistence::save_entries(&self.path, &self.entries) {
            log::warn!("failed to persist faq store, rolling back: {err}");
            self.entries = snapshot;
            return Err(err);
        }
        Ok(())
    }
}

// ============================================================================
// TESTS
// ============================================================================
