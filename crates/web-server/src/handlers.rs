use crate::{AppState, error::AppError};
use axum::{
    Json,
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
};
use calculator::{ComponentScores, ScoreCalculator};
use core_types::{DomainError, Identity, Outcome};
use database::RecordRow;
use provider::{AggregateProvider, AggregateReport, ProviderInput, ProviderOutput, RecordProvider};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use service::{AnalysisRequest, AnalysisResponse, AnalysisService};
use std::sync::Arc;
use uuid::Uuid;

#[derive(Debug, Deserialize)]
pub struct Pagination {
    #[serde(default = "default_page")]
    page: usize,
    #[serde(default = "default_limit")]
    limit: usize,
}
fn default_page() -> usize { 1 }
fn default_limit() -> usize { 20 }

/// One page of records plus the pagination envelope.
#[derive(Debug, Serialize)]
pub struct RecordPage {
    pub items: Vec<RecordRow>,
    pub total: i64,
    pub page: usize,
    pub page_size: usize,
}

#[derive(Debug, Deserialize)]
pub struct CreateRecordRequest {
    pub name: String,
    pub value: f64,
    #[serde(default)]
    pub score: f64,
}

/// The component scores to combine, each in [0, 1].
#[derive(Debug, Deserialize)]
pub struct ScoreRequest {
    pub quality: f64,
    pub performance: f64,
    pub reliability: f64,
}

#[derive(Debug, Serialize)]
pub struct ScoreResponse {
    pub score: f64,
}

/// Reads the optional caller identity from the `x-user-id` header.
///
/// Authentication happens upstream; a missing or malformed value simply
/// means an anonymous caller, never an error.
fn caller_identity(headers: &HeaderMap) -> Option<Identity> {
    headers
        .get("x-user-id")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| Uuid::parse_str(v).ok())
        .map(Identity::new)
}

/// # POST /api/v1/analysis
///
/// Runs one analysis and unwraps the service outcome: success becomes
/// the serialized payload, failure is mapped through the published
/// status table.
pub async fn analyze(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(request): Json<AnalysisRequest>,
) -> Result<Json<AnalysisResponse>, AppError> {
    let identity = caller_identity(&headers);
    let service = AnalysisService::from_store(state.store.clone(), state.settings.analysis.clone());

    match service.execute(request, identity).await {
        Outcome::Success { data } => Ok(Json(data)),
        Outcome::Failure { error } => Err(AppError::Domain(error)),
    }
}

/// # GET /api/v1/records/:record_id
pub async fn get_record(
    Path(record_id): Path<i64>,
    State(state): State<Arc<AppState>>,
) -> Result<Json<ProviderOutput>, AppError> {
    let provider = RecordProvider::new(state.store.clone());
    let record = provider.provide(&ProviderInput { record_id }).await?;
    Ok(Json(record))
}

/// # GET /api/v1/records
///
/// Fetches one page of records, newest first.
pub async fn list_records(
    State(state): State<Arc<AppState>>,
    Query(pagination): Query<Pagination>,
) -> Result<Json<RecordPage>, AppError> {
    let page = pagination.page.max(1);
    let limit = pagination.limit.clamp(1, 100) as i64;
    let offset = (page as i64 - 1) * limit;

    let items = state.store.list_records(limit, offset).await?;
    let total = state.store.count_records().await?;

    Ok(Json(RecordPage { items, total, page, page_size: limit as usize }))
}

/// # POST /api/v1/records
pub async fn create_record(
    State(state): State<Arc<AppState>>,
    Json(request): Json<CreateRecordRequest>,
) -> Result<(StatusCode, Json<RecordRow>), AppError> {
    if request.name.trim().is_empty() {
        return Err(DomainError::validation("Record name must not be empty").into());
    }
    if !(0.0..=1.0).contains(&request.score) {
        return Err(DomainError::validation("Score must be between 0 and 1")
            .with_detail("score", request.score)
            .into());
    }

    let row = state
        .store
        .insert_record(request.name.trim(), request.value, request.score)
        .await?;
    Ok((StatusCode::CREATED, Json(row)))
}

/// # GET /api/v1/aggregate
pub async fn get_aggregate(
    State(state): State<Arc<AppState>>,
) -> Result<Json<AggregateReport>, AppError> {
    let provider = AggregateProvider::new(state.store.clone());
    let report = provider.provide().await?;
    Ok(Json(report))
}

/// # POST /api/v1/score
///
/// Combines the supplied component scores into one composite score
/// through the configured weights.
pub async fn compute_score(
    State(state): State<Arc<AppState>>,
    Json(request): Json<ScoreRequest>,
) -> Result<Json<ScoreResponse>, AppError> {
    let calculator = ScoreCalculator::new(state.settings.analysis.score_weights.clone());
    let score = calculator.calculate(&ComponentScores {
        quality: request.quality,
        performance: request.performance,
        reliability: request.reliability,
    })?;
    Ok(Json(ScoreResponse { score }))
}

/// # GET /api/v1/analysis/health
pub async fn analysis_health() -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "domain": "analysis",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// # GET /api/health
pub async fn health(State(state): State<Arc<AppState>>) -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "environment": state.settings.app.environment.as_str(),
    }))
}

/// # GET /
pub async fn root(State(state): State<Arc<AppState>>) -> Json<Value> {
    Json(json!({
        "name": state.settings.app.name,
        "version": state.settings.app.version,
        "status": "running",
        "api_v1": "/api/v1",
    }))
}
