//! Headerless CSV source: reading rows and atomic write-back.

use sd_core::error::{Result, SdError};
use std::fs::{self, File};
use std::io::{self, BufReader, Read};
use std::path::Path;
use tempfile::NamedTempFile;

/// Rows of a headerless table, in file order. Rows may be ragged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawTable {
    rows: Vec<Vec<String>>,
}

impl RawTable {
    pub fn from_rows<R, S>(rows: impl IntoIterator<Item = R>) -> Self
    where
        R: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            rows: rows
                .into_iter()
                .map(|r| r.into_iter().map(Into::into).collect())
                .collect(),
        }
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Column count, taken from the first row.
    pub fn width(&self) -> usize {
        self.rows.first().map_or(0, Vec::len)
    }
}

/// Parse CSV from any reader. No header row is assumed.
pub fn parse_table<R: Read>(reader: R) -> Result<RawTable> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);

    let mut rows = Vec::new();
    for (i, record) in rdr.records().enumerate() {
        let record = record.map_err(|e| SdError::BuildFailed(format!("row {}: {e}", i + 1)))?;
        rows.push(record.iter().map(str::to_string).collect());
    }
    Ok(RawTable { rows })
}

/// Read a CSV file from disk.
pub fn read_table(path: &Path) -> Result<RawTable> {
    let file = File::open(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => SdError::SourceNotFound { path: path.display().to_string() },
        _ => SdError::BuildFailed(format!("{}: {e}", path.display())),
    })?;
    parse_table(BufReader::new(file))
}

/// Atomically replace `path` with two-column rows.
pub fn write_table(path: &Path, rows: &[(String, String)]) -> Result<()> {
    let parent = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    fs::create_dir_all(parent).map_err(|e| SdError::PersistFailed(e.to_string()))?;

    let temp = NamedTempFile::new_in(parent).map_err(|e| SdError::PersistFailed(e.to_string()))?;
    {
        let mut wtr = csv::WriterBuilder::new().has_headers(false).from_writer(temp.as_file());
        for (slang, meaning) in rows {
            wtr.write_record([slang.as_str(), meaning.as_str()])
                .map_err(|e| SdError::PersistFailed(e.to_string()))?;
        }
        wtr.flush().map_err(|e| SdError::PersistFailed(e.to_string()))?;
    }
    temp.as_file().sync_all().map_err(|e| SdError::PersistFailed(e.to_string()))?;
    temp.persist(path).map_err(|e| SdError::PersistFailed(e.error.to_string()))?;
    Ok(())
}
