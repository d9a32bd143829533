//! File-backed search history.
//!
//! The whole history is a single JSON array of `{name, id}` objects. Every
//! mutation reads the full file, computes the new list and writes it back.
//! Mutations are serialized by an internal mutex and persisted with a
//! write-to-temp + rename, so concurrent callers cannot lose each other's
//! updates and a crash cannot leave a torn file.

use std::fs;
use std::path::PathBuf;
use std::sync::{Mutex, PoisonError};

use uuid::Uuid;

use crate::error::HistoryError;
use crate::model::HistoryEntry;

/// Persisted list of looked-up city names.
///
/// Construct one at startup and hand it to whatever drives lookups; there is
/// no process-wide instance.
#[derive(Debug)]
pub struct HistoryStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl HistoryStore {
    /// A store over the given file. The file does not need to exist yet;
    /// parent directories are created on first write.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into(), lock: Mutex::new(()) }
    }

    /// All entries in append order. A store with no persisted file yet is
    /// empty, not an error.
    pub fn list(&self) -> Result<Vec<HistoryEntry>, HistoryError> {
        let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);
        self.read()
    }

    /// Append a city, rejecting names already present (case-insensitive).
    pub fn add(&self, name: &str) -> Result<HistoryEntry, HistoryError> {
        let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);

        let mut entries = self.read()?;

        let lower = name.to_lowercase();
        if entries.iter().any(|e| e.name.to_lowercase() == lower) {
            return Err(HistoryError::Duplicate(name.to_string()));
        }

        let entry = HistoryEntry { name: name.to_string(), id: Uuid::new_v4().to_string() };
        entries.push(entry.clone());
        self.write(&entries)?;

        tracing::debug!(name, id = %entry.id, "city added to search history");
        Ok(entry)
    }

    /// Remove the entry with the given id. The persisted state is unchanged
    /// when no entry matches.
    pub fn remove(&self, id: &str) -> Result<(), HistoryError> {
        let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);

        let mut entries = self.read()?;

        let before = entries.len();
        entries.retain(|e| e.id != id);
        if entries.len() == before {
            return Err(HistoryError::NotFound(id.to_string()));
        }

        self.write(&entries)?;

        tracing::debug!(id, "city removed from search history");
        Ok(())
    }

    fn read(&self) -> Result<Vec<HistoryEntry>, HistoryError> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(HistoryError::Io { path: self.path.clone(), source: e }),
        };

        match serde_json::from_str(&contents) {
            Ok(entries) => Ok(entries),
            Err(e) => {
                // Fail open: a corrupt history file reads as empty and gets
                // rewritten by the next successful mutation.
                tracing::warn!(
                    path = %self.path.display(),
                    error = %e,
                    "search history file is malformed, treating as empty"
                );
                Ok(Vec::new())
            }
        }
    }

    fn write(&self, entries: &[HistoryEntry]) -> Result<(), HistoryError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| HistoryError::Io { path: parent.to_path_buf(), source: e })?;
        }

        let json = serde_json::to_string_pretty(entries)?;

        let tmp_path = self.path.with_extension("tmp");
        fs::write(&tmp_path, json)
            .map_err(|e| HistoryError::Io { path: tmp_path.clone(), source: e })?;
        fs::rename(&tmp_path, &self.path)
            .map_err(|e| HistoryError::Io { path: self.path.clone(), source: e })?;

        Ok(())
    }
}
