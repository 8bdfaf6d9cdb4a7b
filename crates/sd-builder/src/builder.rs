//! Cleaning pipeline from a raw table to a `SlangDictionary`.

use crate::source::{read_table, RawTable};
use sd_core::error::{Result, SdError};
use sd_core::{SlangDictionary, SlangEntry, HEADER_SENTINEL};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::path::Path;
use tracing::{debug, info};

/// Row accounting for one build.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildReport {
    pub total_rows: usize,
    pub header_dropped: bool,
    pub duplicates_dropped: usize,
    pub blank_dropped: usize,
    /// Denylisted keys plus stray sentinel rows.
    pub denylisted: usize,
    pub final_size: usize,
    /// Final entries grouped by slang length in characters.
    pub slang_lengths: BTreeMap<usize, LengthBucket>,
}

/// Entries sharing one slang length.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LengthBucket {
    pub entries: usize,
    /// Sum of meaning lengths in characters.
    pub meaning_chars: usize,
}

impl LengthBucket {
    pub fn mean_meaning_len(&self) -> f64 {
        if self.entries == 0 {
            return 0.0;
        }
        self.meaning_chars as f64 / self.entries as f64
    }
}

impl BuildReport {
    /// Slang length with the most entries; the shorter length on a tie.
    pub fn most_common_slang_len(&self) -> Option<usize> {
        self.slang_lengths
            .iter()
            .max_by(|a, b| a.1.entries.cmp(&b.1.entries).then_with(|| b.0.cmp(a.0)))
            .map(|(len, _)| *len)
    }
}

#[derive(Debug, Clone)]
pub struct BuildOutput {
    pub dictionary: SlangDictionary,
    pub report: BuildReport,
}

/// Build the canonical dictionary from a raw table.
pub fn build(table: &RawTable) -> Result<SlangDictionary> {
    build_with_report(table).map(|out| out.dictionary)
}

/// Read `path` and build.
pub fn build_from_path(path: &Path) -> Result<BuildOutput> {
    let table = read_table(path)?;
    build_with_report(&table)
}

pub fn build_with_report(table: &RawTable) -> Result<BuildOutput> {
    check_shape(table)?;

    let mut report = BuildReport { total_rows: table.len(), ..Default::default() };
    let mut rows = table.rows();

    if let Some(first) = rows.first() {
        if first[0] == HEADER_SENTINEL.0 && first[1] == HEADER_SENTINEL.1 {
            debug!("dropping header row mistakenly read as data");
            report.header_dropped = true;
            rows = &rows[1..];
        }
    }

    let mut seen: HashSet<String> = HashSet::new();
    let mut dictionary = SlangDictionary::new();

    for row in rows {
        let entry = SlangEntry::new(&row[0], &row[1]);
        if !entry.has_key() {
            report.blank_dropped += 1;
            continue;
        }
        if !seen.insert(entry.slang.clone()) {
            report.duplicates_dropped += 1;
            continue;
        }
        if entry.is_denylisted() || entry.is_header_sentinel() {
            debug!(slang = %entry.slang, "denylisted row dropped");
            report.denylisted += 1;
            continue;
        }
        dictionary.try_insert(entry);
    }

    report.final_size = dictionary.len();
    for (slang, meaning) in dictionary.iter() {
        let bucket = report.slang_lengths.entry(slang.chars().count()).or_default();
        bucket.entries += 1;
        bucket.meaning_chars += meaning.chars().count();
    }
    info!(
        total_rows = report.total_rows,
        duplicates = report.duplicates_dropped,
        denylisted = report.denylisted,
        blank = report.blank_dropped,
        size = report.final_size,
        "slang dictionary built"
    );

    Ok(BuildOutput { dictionary, report })
}

fn check_shape(table: &RawTable) -> Result<()> {
    if table.is_empty() {
        return Err(SdError::MalformedSource("source has no rows".into()));
    }
    let width = table.width();
    if width < 2 {
        return Err(SdError::MalformedSource(format!(
            "expected at least 2 columns, found {width}"
        )));
    }
    if let Some(i) = table.rows().iter().position(|r| r.len() < 2) {
        return Err(SdError::MalformedSource(format!(
            "row {} has fewer than 2 columns",
            i + 1
        )));
    }
    Ok(())
}
