use crate::persist::SlangSink;
use chrono::{DateTime, Utc};
use sd_core::error::{Result, SdError};
use sd_core::{MatchPolicy, SlangDictionary, SlangEntry};
use sd_normalizer::{DictionaryPattern, Normalization, Normalizer};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::{Arc, OnceLock};
use tracing::{info, warn};
use uuid::Uuid;

/// Session lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionState {
    Uninitialized,
    Loaded,
    /// Holds additions not yet persisted.
    Mutated,
    /// Terminal. No dictionary, so nothing may run.
    BuildFailed,
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionState::Uninitialized => write!(f, "uninitialized"),
            SessionState::Loaded => write!(f, "loaded"),
            SessionState::Mutated => write!(f, "mutated"),
            SessionState::BuildFailed => write!(f, "build_failed"),
        }
    }
}

/// Result of a successful `add`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddOutcome {
    pub entry: SlangEntry,
    pub dictionary_size: usize,
}

/// Result of a successful `persist`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersistOutcome {
    pub persisted: usize,
    pub total_rows: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionStats {
    pub id: String,
    pub state: SessionState,
    pub dictionary_size: usize,
    pub base_size: usize,
    pub pending: usize,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub failure: Option<String>,
}

/// Explicit per-session state: a private copy of the canonical dictionary
/// plus the entries added during this session.
#[derive(Debug, Clone)]
pub struct SessionContext {
    pub id: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    state: SessionState,
    dictionary: Option<SlangDictionary>,
    /// Regex over `dictionary`, compiled on first use and reset by `add`.
    pub(crate) pattern: OnceLock<DictionaryPattern>,
    base_size: usize,
    pending: Vec<SlangEntry>,
    failure: Option<String>,
}

impl SessionContext {
    pub fn new() -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            created_at: now,
            updated_at: now,
            state: SessionState::Uninitialized,
            dictionary: None,
            pattern: OnceLock::new(),
            base_size: 0,
            pending: Vec::new(),
            failure: None,
        }
    }

    /// Seed a session directly from a canonical dictionary.
    pub fn from_dictionary(canonical: &SlangDictionary) -> Self {
        let mut s = Self::new();
        s.seed(canonical);
        s
    }

    /// Apply the builder's outcome. Only valid once, from `Uninitialized`.
    /// A build error moves the session to `BuildFailed` and is returned.
    pub fn initialize(&mut self, build: Result<Arc<SlangDictionary>>) -> Result<()> {
        if self.state != SessionState::Uninitialized {
            return Err(SdError::InvalidInput(format!("session already {}", self.state)));
        }
        match build {
            Ok(canonical) => {
                self.seed(&canonical);
                Ok(())
            }
            Err(e) => {
                warn!(session = %self.id, error = %e, "dictionary build failed");
                self.state = SessionState::BuildFailed;
                self.failure = Some(e.to_string());
                self.updated_at = Utc::now();
                Err(e)
            }
        }
    }

    fn seed(&mut self, canonical: &SlangDictionary) {
        self.dictionary = Some(canonical.clone());
        self.pattern = OnceLock::new();
        self.base_size = canonical.len();
        self.state = SessionState::Loaded;
        self.updated_at = Utc::now();
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn dictionary(&self) -> Option<&SlangDictionary> {
        self.dictionary.as_ref()
    }

    pub fn pending(&self) -> &[SlangEntry] {
        &self.pending
    }

    pub fn failure(&self) -> Option<&str> {
        self.failure.as_deref()
    }

    /// Normalize against the current snapshot. Never mutates the session.
    pub fn normalize(&self, normalizer: &Normalizer, text: &str) -> Result<Normalization> {
        let pattern = match (normalizer.policy, &self.dictionary) {
            (MatchPolicy::DictionaryRegex, Some(dict)) => Some(self.compiled_pattern(dict)?),
            _ => None,
        };
        normalizer.normalize_compiled(text, self.dictionary.as_ref(), pattern)
    }

    fn compiled_pattern(&self, dict: &SlangDictionary) -> Result<&DictionaryPattern> {
        if let Some(pattern) = self.pattern.get() {
            return Ok(pattern);
        }
        let compiled = DictionaryPattern::new(dict)?;
        Ok(self.pattern.get_or_init(|| compiled))
    }

    /// Insert a new entry. Never overwrites an existing key.
    pub fn add(&mut self, slang: &str, meaning: &str) -> Result<AddOutcome> {
        let dict = self.dictionary.as_mut().ok_or(SdError::DictionaryUnavailable)?;

        if slang.trim().is_empty() || meaning.trim().is_empty() {
            return Err(SdError::InvalidInput("both slang and meaning are required".into()));
        }
        let entry = SlangEntry::new(slang, meaning);
        if entry.is_denylisted() {
            return Err(SdError::InvalidInput(format!("'{}' is not allowed as slang", entry.slang)));
        }
        if entry.is_header_sentinel() {
            return Err(SdError::InvalidInput("entry matches the header sentinel".into()));
        }
        if dict.contains(&entry.slang) {
            warn!(session = %self.id, slang = %entry.slang, "slang already exists");
            return Err(SdError::AlreadyExists { slang: entry.slang });
        }

        dict.try_insert(entry.clone());
        let dictionary_size = dict.len();
        self.pattern = OnceLock::new();
        self.pending.push(entry.clone());
        self.state = SessionState::Mutated;
        self.updated_at = Utc::now();
        info!(session = %self.id, slang = %entry.slang, size = dictionary_size, "slang added");

        Ok(AddOutcome { entry, dictionary_size })
    }

    /// Write this session's additions back through `sink`.
    ///
    /// On failure the in-memory additions stay in place and remain pending.
    pub fn persist(&mut self, sink: &dyn SlangSink) -> Result<PersistOutcome> {
        if self.dictionary.is_none() {
            return Err(SdError::DictionaryUnavailable);
        }
        if self.pending.is_empty() {
            return Ok(PersistOutcome::default());
        }

        match sink.persist(&self.pending) {
            Ok(total_rows) => {
                let persisted = self.pending.len();
                self.pending.clear();
                self.state = SessionState::Loaded;
                self.updated_at = Utc::now();
                info!(session = %self.id, persisted, total_rows, target = %sink.location(), "additions persisted");
                Ok(PersistOutcome { persisted, total_rows })
            }
            Err(e) => {
                warn!(session = %self.id, error = %e, "persist failed");
                Err(match e {
                    SdError::PersistFailed(msg) => SdError::PersistFailed(msg),
                    other => SdError::PersistFailed(other.to_string()),
                })
            }
        }
    }

    pub fn stats(&self) -> SessionStats {
        SessionStats {
            id: self.id.clone(),
            state: self.state,
            dictionary_size: self.dictionary.as_ref().map_or(0, SlangDictionary::len),
            base_size: self.base_size,
            pending: self.pending.len(),
            created_at: self.created_at,
            updated_at: self.updated_at,
            failure: self.failure.clone(),
        }
    }
}

impl Default for SessionContext {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SessionContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Session(id={}, state={}, pending={})", self.id, self.state, self.pending.len())
    }
}
