use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::{
    error::{AppError, AppResult},
    models::RecommendationResponse,
    services::{sample_reels, IngestReport},
};

use super::AppState;

// Request/Response types

#[derive(Debug, Deserialize)]
pub struct RecommendationRequest {
    pub query_text: String,
}

#[derive(Debug, Serialize)]
pub struct SetupResponse {
    pub status: &'static str,
    #[serde(flatten)]
    pub report: IngestReport,
}

// Handlers

/// Health check endpoint
pub async fn health_check() -> Json<Value> {
    Json(json!({ "status": "healthy" }))
}

/// Answers a user query with recommendation cards
pub async fn get_recommendations(
    State(state): State<AppState>,
    Json(request): Json<RecommendationRequest>,
) -> AppResult<Json<RecommendationResponse>> {
    let query = request.query_text.trim();
    if query.is_empty() {
        return Err(AppError::InvalidInput(
            "query_text must not be empty".to_string(),
        ));
    }

    let response = state.pipeline.handle(query).await?;
    Ok(Json(response))
}

/// Administrative endpoint: creates the schema and seeds sample reels
///
/// Schema failure aborts the call; seed ingestion is per-item best-effort
/// and always reports its counts.
pub async fn setup_catalog(State(state): State<AppState>) -> AppResult<Json<SetupResponse>> {
    state.store.ensure_schema().await?;

    let report = state.ingestion.ingest(sample_reels()).await;

    Ok(Json(SetupResponse {
        status: "success",
        report,
    }))
}
