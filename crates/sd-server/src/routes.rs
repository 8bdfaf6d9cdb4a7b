use crate::error::ApiError;
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use sd_builder::BuildReport;
use sd_core::MatchPolicy;
use sd_normalizer::Normalization;
use sd_session::{PersistOutcome, SessionStats};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

pub fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(health))
}

pub fn session_routes() -> Router<AppState> {
    Router::new()
        .route("/api/v1/sessions", post(create_session))
        .route("/api/v1/sessions/{id}", get(get_session).delete(close_session))
        .route("/api/v1/sessions/{id}/normalize", post(normalize))
        .route("/api/v1/sessions/{id}/slang", post(add_slang))
        .route("/api/v1/sessions/{id}/persist", post(persist))
}

pub fn dictionary_routes() -> Router<AppState> {
    Router::new().route("/api/v1/dictionary/report", get(build_report))
}

#[derive(Debug, Deserialize)]
pub struct NormalizeRequest {
    pub text: String,
    pub policy: Option<MatchPolicy>,
}

#[derive(Debug, Deserialize)]
pub struct AddSlangRequest {
    pub slang: String,
    pub meaning: String,
}

#[derive(Debug, Serialize)]
pub struct AddSlangResponse {
    pub slang: String,
    pub meaning: String,
    pub dictionary_size: usize,
}

async fn health(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "sessions": state.sessions.count(),
        "policy": state.sessions.default_policy(),
        "uptime_secs": state.start_time.elapsed().as_secs(),
    }))
}

async fn create_session(
    State(state): State<AppState>,
) -> Result<(StatusCode, Json<SessionStats>), ApiError> {
    let stats = state.sessions.create()?;
    Ok((StatusCode::CREATED, Json(stats)))
}

async fn get_session(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<SessionStats>, ApiError> {
    state
        .sessions
        .get(&id)
        .map(Json)
        .ok_or_else(|| ApiError::not_found(format!("Session not found: {id}")))
}

async fn close_session(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    if state.sessions.close(&id) {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::not_found(format!("Session not found: {id}")))
    }
}

async fn normalize(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<NormalizeRequest>,
) -> Result<Json<Normalization>, ApiError> {
    Ok(Json(state.sessions.normalize(&id, &req.text, req.policy)?))
}

async fn add_slang(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<AddSlangRequest>,
) -> Result<(StatusCode, Json<AddSlangResponse>), ApiError> {
    let out = state.sessions.add(&id, &req.slang, &req.meaning)?;
    Ok((
        StatusCode::CREATED,
        Json(AddSlangResponse {
            slang: out.entry.slang,
            meaning: out.entry.meaning,
            dictionary_size: out.dictionary_size,
        }),
    ))
}

async fn persist(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<PersistOutcome>, ApiError> {
    Ok(Json(state.sessions.persist(&id)?))
}

async fn build_report(State(state): State<AppState>) -> Result<Json<BuildReport>, ApiError> {
    state
        .sessions
        .build_report()
        .map(Json)
        .ok_or_else(|| ApiError::not_found("dictionary not built yet"))
}
