use crate::error::{Result, SdError};
use crate::types::MatchPolicy;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SlangDecoderConfig {
    pub source: SourceConfig,
    pub cache: CacheConfig,
    pub normalizer: NormalizerConfig,
    pub persistence: PersistenceConfig,
    pub server: ServerConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    /// Headerless two-column CSV.
    pub path: PathBuf,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Rebuild after this many seconds even if the source is unchanged.
    pub ttl_secs: Option<u64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct NormalizerConfig {
    pub policy: MatchPolicy,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PersistenceConfig {
    pub enabled: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self { path: PathBuf::from("data/abbreviations.csv") }
    }
}

impl Default for PersistenceConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { host: "127.0.0.1".into(), port: 8080 }
    }
}

impl SlangDecoderConfig {
    /// Load a JSON config file. Missing sections fall back to defaults.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .map_err(|e| SdError::Config(format!("{}: {e}", path.display())))?;
        Self::from_json(&raw)
    }

    pub fn from_json(raw: &str) -> Result<Self> {
        serde_json::from_str(raw).map_err(|e| SdError::Config(e.to_string()))
    }

    pub fn cache_ttl(&self) -> Option<std::time::Duration> {
        self.cache.ttl_secs.map(std::time::Duration::from_secs)
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
