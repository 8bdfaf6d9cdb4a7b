//! Write-back of session additions to the backing source.

use parking_lot::Mutex;
use sd_builder::{read_table, write_table};
use sd_core::error::{Result, SdError};
use sd_core::{clean_field, SlangEntry};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Destination for persisted additions.
pub trait SlangSink: Send + Sync {
    /// Merge `additions` into the backing store. Returns the stored row count.
    fn persist(&self, additions: &[SlangEntry]) -> Result<usize>;

    /// Human-readable location, for logs.
    fn location(&self) -> String;
}

/// Append `additions` to `rows`. A source row whose cleaned slang matches an
/// addition is dropped, so the addition wins. Duplicates within `rows` are
/// left alone for the builder's first-occurrence rule.
pub fn merge_last_wins(
    rows: Vec<(String, String)>,
    additions: &[SlangEntry],
) -> Vec<(String, String)> {
    let mut last: HashMap<String, usize> = HashMap::new();
    for (i, entry) in additions.iter().enumerate() {
        last.insert(clean_field(&entry.slang), i);
    }

    let mut merged: Vec<(String, String)> = rows
        .into_iter()
        .filter(|(slang, _)| !last.contains_key(&clean_field(slang)))
        .collect();
    merged.extend(
        additions
            .iter()
            .enumerate()
            .filter(|(i, e)| last.get(&clean_field(&e.slang)) == Some(i))
            .map(|(_, e)| (e.slang.clone(), e.meaning.clone())),
    );
    merged
}

/// The headerless CSV the dictionary was built from.
///
/// The read-append-write sequence runs under one lock, so sessions sharing
/// a sink cannot interleave their writes.
pub struct CsvFileSink {
    path: PathBuf,
    lock: Mutex<()>,
}

impl CsvFileSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into(), lock: Mutex::new(()) }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SlangSink for CsvFileSink {
    fn persist(&self, additions: &[SlangEntry]) -> Result<usize> {
        let _guard = self.lock.lock();

        let table = read_table(&self.path).map_err(|e| SdError::PersistFailed(e.to_string()))?;
        let rows: Vec<(String, String)> = table
            .rows()
            .iter()
            .map(|r| {
                let slang = r.first().cloned().unwrap_or_default();
                let meaning = r.get(1).cloned().unwrap_or_default();
                (slang, meaning)
            })
            .collect();

        let merged = merge_last_wins(rows, additions);
        write_table(&self.path, &merged)?;
        Ok(merged.len())
    }

    fn location(&self) -> String {
        self.path.display().to_string()
    }
}
