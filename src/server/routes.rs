//! Axum route handlers for the persona service.
//!
//! # Routes
//!
//! - `GET  /api/health`                     - liveness probe
//! - `GET  /api/personas`                   - full persona catalog
//! - `GET  /api/personas/:name`             - one persona with ranking flags
//! - `GET  /api/quiz/questions`             - the five quiz questions
//! - `POST /api/quiz/submit`                - classify `{ "answers": [..5] }`
//! - `POST /api/quiz/report`                - classify and build a persona report
//! - `GET  /api/quotes`                     - all quotes with stats
//! - `GET  /api/quotes/random/:count`       - random sample (`?sentiment=&tag=`)
//! - `GET  /api/quotes/sentiment/:sentiment` - quotes with a sentiment
//! - `GET  /api/quotes/tag/:tag`            - quotes with a matching tag
//! - `GET  /api/quotes/stats`               - corpus statistics

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use serde_json::Value;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::error::ClassifyError;
use crate::persona::{ClassificationResult, PersonaClassifier, PersonaName};
use crate::quiz::QUIZ_QUESTIONS;
use crate::quotes::{
    filter_by_sentiment, filter_by_tag, Ingestion, QuoteAggregator, QuoteFilter,
};

type ApiError = (StatusCode, Json<Value>);

fn api_error(status: StatusCode, message: impl Into<String>) -> ApiError {
    (status, Json(serde_json::json!({ "error": message.into() })))
}

/// Shared application state for the HTTP server.
#[derive(Clone)]
pub struct AppState {
    /// Classifier with its persona catalog, built once at startup.
    pub classifier: Arc<PersonaClassifier>,
    /// Quote engine; re-reads its source on every request.
    pub quotes: QuoteAggregator,
}

impl AppState {
    pub fn new(classifier: PersonaClassifier, quotes: QuoteAggregator) -> Self {
        Self {
            classifier: Arc::new(classifier),
            quotes,
        }
    }
}

/// Build the axum router with all routes.
pub fn app_router(state: AppState) -> Router {
    Router::new()
        .route("/api/health", get(health_handler))
        .route("/api/personas", get(list_personas_handler))
        .route("/api/personas/:name", get(get_persona_handler))
        .route("/api/quiz/questions", get(quiz_questions_handler))
        .route("/api/quiz/submit", post(submit_quiz_handler))
        .route("/api/quiz/report", post(quiz_report_handler))
        .route("/api/quotes", get(list_quotes_handler))
        .route("/api/quotes/random/:count", get(random_quotes_handler))
        .route("/api/quotes/sentiment/:sentiment", get(quotes_by_sentiment_handler))
        .route("/api/quotes/tag/:tag", get(quotes_by_tag_handler))
        .route("/api/quotes/stats", get(quote_stats_handler))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// GET /api/health - liveness probe.
async fn health_handler() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "OK",
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "version": crate::VERSION,
    }))
}

// ---------------------------------------------------------------------------
// Personas
// ---------------------------------------------------------------------------

/// GET /api/personas - every persona keyed by name, plus study metadata.
async fn list_personas_handler(State(state): State<AppState>) -> Json<Value> {
    Json(state.classifier.catalog().to_json())
}

/// GET /api/personas/:name
async fn get_persona_handler(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let persona = PersonaName::from_label(&name).ok_or_else(|| {
        api_error(
            StatusCode::NOT_FOUND,
            format!("Persona '{}' not found", name),
        )
    })?;
    let insights = state.classifier.catalog().insights(persona);
    Ok(Json(serde_json::to_value(insights).unwrap_or(Value::Null)))
}

// ---------------------------------------------------------------------------
// Quiz
// ---------------------------------------------------------------------------

async fn quiz_questions_handler() -> Json<Value> {
    Json(serde_json::json!({ "questions": QUIZ_QUESTIONS }))
}

#[derive(Serialize)]
struct QuizResponse {
    #[serde(flatten)]
    result: ClassificationResult,
    timestamp: String,
}

/// Pull `answers` out of a quiz request body.
fn extract_answers(body: &Value) -> Result<Vec<i64>, ApiError> {
    let answers = body
        .get("answers")
        .and_then(|v| v.as_array())
        .ok_or_else(|| api_error(StatusCode::BAD_REQUEST, "Missing 'answers' array"))?;
    answers
        .iter()
        .map(|a| {
            a.as_i64().ok_or_else(|| {
                api_error(StatusCode::BAD_REQUEST, "Answers must be integers")
            })
        })
        .collect()
}

fn classify_error(error: ClassifyError) -> ApiError {
    api_error(StatusCode::BAD_REQUEST, error.to_string())
}

/// POST /api/quiz/submit - classify five answers.
///
/// Request:  `{ "answers": [0, 3, 1, 4, 2] }`
/// Response: `{ "personaName", "confidence", "scores", "alternatives", "timestamp" }`
async fn submit_quiz_handler(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> Result<Json<QuizResponse>, ApiError> {
    let answers = extract_answers(&body)?;
    let result = state.classifier.classify(&answers).map_err(classify_error)?;
    let timestamp = chrono::Utc::now().to_rfc3339();
    tracing::info!(
        "Quiz completed at {}, result: {}",
        timestamp,
        result.persona_name
    );
    Ok(Json(QuizResponse { result, timestamp }))
}

/// POST /api/quiz/report - classification plus the persona report.
async fn quiz_report_handler(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> Result<Json<Value>, ApiError> {
    let answers = extract_answers(&body)?;
    let (result, report) = state.classifier.report(&answers).map_err(classify_error)?;
    Ok(Json(serde_json::json!({
        "result": result,
        "report": report,
    })))
}

// ---------------------------------------------------------------------------
// Quotes
// ---------------------------------------------------------------------------

/// Ingest the corpus off the async runtime.
async fn ingest(state: &AppState) -> Result<Ingestion, ApiError> {
    let quotes = state.quotes.clone();
    tokio::task::spawn_blocking(move || quotes.ingest())
        .await
        .map_err(|e| {
            api_error(
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Quote ingestion panicked: {}", e),
            )
        })
}

/// GET /api/quotes - `{ quotes, source, total, stats, error? }`
async fn list_quotes_handler(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    let quotes = state.quotes.clone();
    let snapshot = tokio::task::spawn_blocking(move || quotes.ingest_and_stats())
        .await
        .map_err(|e| {
            api_error(
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Quote ingestion panicked: {}", e),
            )
        })?;
    Ok(Json(serde_json::to_value(snapshot).unwrap_or(Value::Null)))
}

/// GET /api/quotes/random/:count?sentiment=&tag=
///
/// A count that is not a positive integer falls back to the default.
async fn random_quotes_handler(
    State(state): State<AppState>,
    Path(count): Path<String>,
    Query(filter): Query<QuoteFilter>,
) -> Result<Json<Value>, ApiError> {
    let count = count.trim().parse::<usize>().ok();
    let ingestion = ingest(&state).await?;
    let sample = crate::quotes::sample_random(
        &ingestion.quotes,
        count,
        &filter,
        &mut rand::thread_rng(),
    );
    Ok(Json(serde_json::to_value(sample).unwrap_or(Value::Null)))
}

/// GET /api/quotes/sentiment/:sentiment
async fn quotes_by_sentiment_handler(
    State(state): State<AppState>,
    Path(sentiment): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let ingestion = ingest(&state).await?;
    let quotes = filter_by_sentiment(&ingestion.quotes, &sentiment);
    Ok(Json(serde_json::json!({
        "total": quotes.len(),
        "quotes": quotes,
        "sentiment": sentiment,
    })))
}

/// GET /api/quotes/tag/:tag
async fn quotes_by_tag_handler(
    State(state): State<AppState>,
    Path(tag): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let ingestion = ingest(&state).await?;
    let quotes = filter_by_tag(&ingestion.quotes, &tag);
    Ok(Json(serde_json::json!({
        "total": quotes.len(),
        "quotes": quotes,
        "tag": tag,
    })))
}

/// GET /api/quotes/stats
async fn quote_stats_handler(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    let ingestion = ingest(&state).await?;
    let stats = crate::quotes::compute_stats(&ingestion.quotes);
    Ok(Json(serde_json::json!({
        "totalQuotes": ingestion.quotes.len(),
        "stats": stats,
        "source": ingestion.origin,
    })))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
