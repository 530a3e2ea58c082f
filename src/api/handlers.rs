use axum::{
    extract::{rejection::QueryRejection, Query, State},
    http::StatusCode,
    Extension, Json,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::{
    error::AppResult,
    middleware::RequestId,
    models::{Recommendation, RecommendationSet},
    services::{RecommendError, SnapshotStats},
};

use super::AppState;

// Request/Response types

#[derive(Debug, Deserialize)]
pub struct RecommendationQuery {
    /// Missing is treated like blank so the engine reports it uniformly
    #[serde(default)]
    pub title: String,
    pub top_n: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct RecommendedMovie {
    pub rank: usize,
    pub title: String,
    pub score: f64,
    pub similarity_percent: String,
}

impl From<&Recommendation> for RecommendedMovie {
    fn from(recommendation: &Recommendation) -> Self {
        Self {
            rank: recommendation.rank,
            title: recommendation.title.clone(),
            score: recommendation.score,
            similarity_percent: recommendation.similarity_percent(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct RecommendationResponse {
    pub query: String,
    pub matched_title: String,
    pub recommendations: Vec<RecommendedMovie>,
}

impl From<&RecommendationSet> for RecommendationResponse {
    fn from(set: &RecommendationSet) -> Self {
        Self {
            query: set.query.clone(),
            matched_title: set.matched_title.clone(),
            recommendations: set.recommendations.iter().map(RecommendedMovie::from).collect(),
        }
    }
}

// Handlers

/// Health check endpoint
pub async fn health_check() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "status": "healthy" })))
}

/// Ranks the movies most similar to the requested title
pub async fn recommend(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    query: Result<Query<RecommendationQuery>, QueryRejection>,
) -> AppResult<Json<RecommendationResponse>> {
    let Query(params) =
        query.map_err(|rejection| RecommendError::Validation(rejection.body_text()))?;
    let top_n = state.settings.resolve_top_n(params.top_n);

    tracing::info!(
        request_id = %request_id,
        title = %params.title,
        top_n,
        "Processing recommendation request"
    );

    let snapshot = state.snapshot().await;
    let set = snapshot.recommender.recommend(&params.title, top_n)?;

    tracing::info!(
        request_id = %request_id,
        matched_title = %set.matched_title,
        returned = set.len(),
        "Recommendations ranked"
    );

    Ok(Json(RecommendationResponse::from(&set)))
}

/// Describes the snapshot currently serving queries
pub async fn stats(State(state): State<AppState>) -> Json<SnapshotStats> {
    Json(state.snapshot().await.stats())
}

/// Rebuilds the snapshot from the configured dataset source
///
/// Concurrent reloads run one at a time. On failure the previous snapshot
/// keeps serving.
pub async fn reload_dataset(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
) -> AppResult<Json<SnapshotStats>> {
    tracing::info!(
        request_id = %request_id,
        source = %state.source.describe(),
        "Reloading dataset"
    );

    let stats = state.reload().await.map_err(|e| {
        tracing::warn!(request_id = %request_id, error = %e, "Reload failed, keeping current snapshot");
        e
    })?;

    tracing::info!(
        request_id = %request_id,
        movies = stats.movie_count,
        "Dataset reloaded"
    );

    Ok(Json(stats))
}
