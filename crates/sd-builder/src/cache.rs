//! Build-once cache keyed by source identity.
//!
//! An entry is reused while the source file's canonical path, modification
//! time and length are unchanged and (if configured) its TTL has not elapsed.

use crate::builder::{build_from_path, BuildReport};
use parking_lot::Mutex;
use sd_core::error::{Result, SdError};
use sd_core::SlangDictionary;
use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant, SystemTime};
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceIdentity {
    pub path: PathBuf,
    pub modified: Option<SystemTime>,
    pub len: u64,
}

impl SourceIdentity {
    pub fn probe(path: &Path) -> Result<Self> {
        let not_found = |e: io::Error| match e.kind() {
            io::ErrorKind::NotFound => SdError::SourceNotFound { path: path.display().to_string() },
            _ => SdError::BuildFailed(format!("{}: {e}", path.display())),
        };
        let canonical = path.canonicalize().map_err(not_found)?;
        let meta = std::fs::metadata(&canonical).map_err(not_found)?;
        Ok(Self {
            path: canonical,
            modified: meta.modified().ok(),
            len: meta.len(),
        })
    }
}

struct CachedDictionary {
    identity: SourceIdentity,
    dictionary: Arc<SlangDictionary>,
    report: BuildReport,
    built_at: Instant,
}

pub struct DictionaryCache {
    ttl: Option<Duration>,
    entries: Mutex<HashMap<PathBuf, CachedDictionary>>,
}

impl DictionaryCache {
    pub fn new(ttl: Option<Duration>) -> Self {
        Self { ttl, entries: Mutex::new(HashMap::new()) }
    }

    /// Return the cached dictionary for `path`, rebuilding when the source
    /// identity changed or the TTL expired. Failed builds are not cached, and
    /// a failed rebuild evicts the previous entry.
    pub fn get_or_build(&self, path: &Path) -> Result<Arc<SlangDictionary>> {
        let identity = SourceIdentity::probe(path)?;
        let mut entries = self.entries.lock();

        if let Some(cached) = entries.get(&identity.path) {
            let fresh = self.ttl.map_or(true, |ttl| cached.built_at.elapsed() < ttl);
            if fresh && cached.identity == identity {
                debug!(path = %identity.path.display(), "dictionary cache hit");
                return Ok(Arc::clone(&cached.dictionary));
            }
            debug!(path = %identity.path.display(), "dictionary cache stale");
        }

        let output = match build_from_path(&identity.path) {
            Ok(output) => output,
            Err(e) => {
                entries.remove(&identity.path);
                return Err(e);
            }
        };
        let dictionary = Arc::new(output.dictionary);
        entries.insert(
            identity.path.clone(),
            CachedDictionary {
                identity,
                dictionary: Arc::clone(&dictionary),
                report: output.report,
                built_at: Instant::now(),
            },
        );
        Ok(dictionary)
    }

    /// Report for the cached build of `path`, if it is still current.
    pub fn last_report(&self, path: &Path) -> Option<BuildReport> {
        let key = path.canonicalize().ok()?;
        self.entries.lock().get(&key).map(|c| c.report.clone())
    }

    pub fn invalidate(&self, path: &Path) {
        if let Ok(key) = path.canonicalize() {
            self.entries.lock().remove(&key);
        }
    }

    pub fn clear(&self) {
        self.entries.lock().clear();
    }

    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }
}

impl Default for DictionaryCache {
    fn default() -> Self {
        Self::new(None)
    }
}
