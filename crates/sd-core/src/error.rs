use thiserror::Error;

#[derive(Error, Debug)]
pub enum SdError {
    #[error("Slang source not found: {path}")]
    SourceNotFound { path: String },
    #[error("Malformed slang source: {0}")]
    MalformedSource(String),
    #[error("Dictionary build failed: {0}")]
    BuildFailed(String),
    #[error("No slang dictionary is loaded")]
    DictionaryUnavailable,
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Slang already exists: {slang}")]
    AlreadyExists { slang: String },
    #[error("Session not found: {id}")]
    SessionNotFound { id: String },
    #[error("Persist failed: {0}")]
    PersistFailed(String),
    #[error("Configuration error: {0}")]
    Config(String),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl SdError {
    /// Build-time failures leave the session without a dictionary.
    pub fn is_build_error(&self) -> bool {
        matches!(
            self,
            SdError::SourceNotFound { .. } | SdError::MalformedSource(_) | SdError::BuildFailed(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, SdError>;
