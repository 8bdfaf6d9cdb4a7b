use crate::persist::{CsvFileSink, SlangSink};
use crate::session::{AddOutcome, PersistOutcome, SessionContext, SessionStats};
use parking_lot::Mutex;
use sd_builder::{BuildReport, DictionaryCache};
use sd_core::error::{Result, SdError};
use sd_core::{MatchPolicy, SlangDecoderConfig};
use sd_normalizer::{Normalization, Normalizer};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::info;

/// Owns every live session. Each session has its own lock, so one request
/// per session runs to completion before the next starts.
pub struct SessionManager {
    source: PathBuf,
    cache: Arc<DictionaryCache>,
    sink: Option<Arc<dyn SlangSink>>,
    normalizer: Normalizer,
    sessions: Mutex<HashMap<String, Arc<Mutex<SessionContext>>>>,
}

impl SessionManager {
    pub fn new(
        source: impl Into<PathBuf>,
        cache: Arc<DictionaryCache>,
        sink: Option<Arc<dyn SlangSink>>,
        normalizer: Normalizer,
    ) -> Self {
        Self {
            source: source.into(),
            cache,
            sink,
            normalizer,
            sessions: Mutex::new(HashMap::new()),
        }
    }

    pub fn from_config(config: &SlangDecoderConfig) -> Self {
        let sink: Option<Arc<dyn SlangSink>> = if config.persistence.enabled {
            Some(Arc::new(CsvFileSink::new(&config.source.path)))
        } else {
            None
        };
        Self::new(
            &config.source.path,
            Arc::new(DictionaryCache::new(config.cache_ttl())),
            sink,
            Normalizer::new(config.normalizer.policy),
        )
    }

    pub fn source(&self) -> &Path {
        &self.source
    }

    /// Build (or reuse) the canonical dictionary without opening a session.
    pub fn warm(&self) -> Result<usize> {
        self.cache.get_or_build(&self.source).map(|d| d.len())
    }

    /// Create a session seeded from the cached canonical dictionary.
    /// Build failures are returned and no session is registered.
    pub fn create(&self) -> Result<SessionStats> {
        let mut session = SessionContext::new();
        session.initialize(self.cache.get_or_build(&self.source))?;
        let stats = session.stats();
        self.sessions.lock().insert(session.id.clone(), Arc::new(Mutex::new(session)));
        info!(session = %stats.id, size = stats.dictionary_size, "session created");
        Ok(stats)
    }

    fn session(&self, id: &str) -> Result<Arc<Mutex<SessionContext>>> {
        self.sessions
            .lock()
            .get(id)
            .cloned()
            .ok_or_else(|| SdError::SessionNotFound { id: id.to_string() })
    }

    pub fn get(&self, id: &str) -> Option<SessionStats> {
        self.session(id).ok().map(|s| s.lock().stats())
    }

    pub fn normalize(
        &self,
        id: &str,
        text: &str,
        policy: Option<MatchPolicy>,
    ) -> Result<Normalization> {
        let normalizer = policy.map_or(self.normalizer, Normalizer::new);
        let session = self.session(id)?;
        let guard = session.lock();
        guard.normalize(&normalizer, text)
    }

    pub fn add(&self, id: &str, slang: &str, meaning: &str) -> Result<AddOutcome> {
        let session = self.session(id)?;
        let mut guard = session.lock();
        guard.add(slang, meaning)
    }

    pub fn persist(&self, id: &str) -> Result<PersistOutcome> {
        let session = self.session(id)?;
        let sink = self
            .sink
            .as_ref()
            .ok_or_else(|| SdError::PersistFailed("persistence disabled".into()))?;
        let mut guard = session.lock();
        guard.persist(sink.as_ref())
    }

    pub fn close(&self, id: &str) -> bool {
        let removed = self.sessions.lock().remove(id).is_some();
        if removed {
            info!(session = %id, "session closed");
        }
        removed
    }

    pub fn count(&self) -> usize {
        self.sessions.lock().len()
    }

    pub fn build_report(&self) -> Option<BuildReport> {
        self.cache.last_report(&self.source)
    }

    pub fn default_policy(&self) -> MatchPolicy {
        self.normalizer.policy
    }
}
