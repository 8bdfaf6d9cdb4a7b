//! SlangDecoder HTTP API (Axum).
//!
//! Request/response surface over the session store: create a session,
//! normalize text, add slang, persist additions, inspect the build report.

pub mod error;
pub mod routes;
pub mod state;

use axum::Router;
use state::AppState;

/// Build the application router with the given state.
pub fn app_with_state(state: AppState) -> Router {
    Router::new()
        .merge(routes::health_routes())
        .merge(routes::session_routes())
        .merge(routes::dictionary_routes())
        .with_state(state)
}
