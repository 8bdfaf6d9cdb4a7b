//! Application state shared across all handlers.

use sd_core::SlangDecoderConfig;
use sd_session::SessionManager;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub sessions: Arc<SessionManager>,
    pub start_time: std::time::Instant,
}

impl AppState {
    pub fn new(sessions: SessionManager) -> Self {
        Self {
            sessions: Arc::new(sessions),
            start_time: std::time::Instant::now(),
        }
    }

    pub fn from_config(config: &SlangDecoderConfig) -> Self {
        Self::new(SessionManager::from_config(config))
    }
}
