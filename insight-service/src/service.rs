use axum::{
    Router,
    extract::State,
    http::{HeaderMap, HeaderValue, Request},
    middleware::{Next, from_fn},
    response::Json,
    routing::{get, post},
};
use insight_core::{FactsResult, InsightGenerator, MovieData, SuggestionResult};
use serde_json::{Value, json};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{Instrument, info};
use uuid::Uuid;

pub const CORRELATION_HEADER: &str = "x-correlation-id";

#[derive(Clone)]
pub struct AppState {
    pub insights: Arc<InsightGenerator>,
}

impl AppState {
    pub fn new(insights: InsightGenerator) -> Self {
        Self {
            insights: Arc::new(insights),
        }
    }
}

pub fn build_router(app_state: AppState) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health_check))
        .route("/insights/facts", post(generate_facts))
        .route("/insights/suggestion", get(generate_suggestion))
        .layer(from_fn(correlation_id_middleware))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}

/// Reuse the caller's correlation ID when it is a usable header value,
/// otherwise mint a fresh UUID.
fn correlation_id(headers: &HeaderMap) -> HeaderValue {
    headers
        .get(CORRELATION_HEADER)
        .filter(|v| v.to_str().is_ok_and(|s| !s.trim().is_empty()))
        .cloned()
        .unwrap_or_else(|| {
            HeaderValue::from_str(&Uuid::new_v4().to_string())
                .unwrap_or_else(|_| HeaderValue::from_static("unknown"))
        })
}

/// Run each request inside an `insight_request` span and echo the
/// correlation ID back on the response.
async fn correlation_id_middleware(
    mut request: Request<axum::body::Body>,
    next: Next,
) -> axum::response::Response {
    let id = correlation_id(request.headers());
    let span = tracing::info_span!(
        "insight_request",
        correlation_id = id.to_str().unwrap_or_default(),
        method = %request.method(),
        route = request.uri().path(),
    );
    request.headers_mut().insert(CORRELATION_HEADER, id.clone());

    let mut response = next.run(request).instrument(span).await;
    response.headers_mut().insert(CORRELATION_HEADER, id);
    response
}

async fn root() -> Json<Value> {
    Json(json!({
        "service": "Movie Insights Service",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "POST /insights/facts": "Ten lesser-known facts about a movie or series",
            "GET /insights/suggestion": "One underrated title worth watching",
            "GET /health": "Health check"
        }
    }))
}

async fn health_check() -> &'static str {
    "OK"
}

async fn generate_facts(
    State(state): State<AppState>,
    Json(data): Json<MovieData>,
) -> Json<FactsResult> {
    info!(
        title = ?data.title,
        name = ?data.name,
        "Received facts request"
    );
    Json(state.insights.generate_facts(&data).await)
}

async fn generate_suggestion(State(state): State<AppState>) -> Json<SuggestionResult> {
    info!("Received suggestion request");
    Json(state.insights.generate_suggestion().await)
}
