//! HTTP API for simulation, recommendations, health, and metrics

use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use optimizer_lib::{
    health::{ComponentStatus, HealthRegistry},
    observability::StructuredLogger,
    ranker::RecommendationRanker,
    rules::UcasRule,
    simulator::{SimulateRequest, Simulator},
    Recommendation,
};
use prometheus::{Encoder, TextEncoder};
use serde::Serialize;
use std::sync::Arc;
use tracing::info;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub health_registry: HealthRegistry,
    pub logger: StructuredLogger,
    pub simulator: Arc<Simulator>,
    pub ranker: Arc<RecommendationRanker>,
}

impl AppState {
    pub fn new(
        health_registry: HealthRegistry,
        logger: StructuredLogger,
        simulator: Arc<Simulator>,
        ranker: Arc<RecommendationRanker>,
    ) -> Self {
        Self {
            health_registry,
            logger,
            simulator,
            ranker,
        }
    }
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
}

#[derive(Debug, Serialize)]
struct RecommendationList {
    recommendations: Vec<Recommendation>,
    total: usize,
}

#[derive(Debug, Serialize)]
struct RuleList {
    rules: Vec<UcasRule>,
    total: usize,
}

/// Run a what-if simulation over the requested resources.
/// An empty resource list is a caller error; everything else degrades to
/// an empty scenario list rather than an error status.
async fn simulate(
    State(state): State<Arc<AppState>>,
    Json(request): Json<SimulateRequest>,
) -> impl IntoResponse {
    if request.resource_ids.is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: "resource_ids must not be empty".to_string(),
            }),
        )
            .into_response();
    }

    let requested = request.resource_ids.len();
    let action_code = request.action.code();
    let response = state.simulator.simulate(request).await;
    state
        .logger
        .log_simulation(action_code, requested, response.scenarios.len());

    (StatusCode::OK, Json(response)).into_response()
}

/// Top recommendations across all active accounts
async fn recommendations(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let recommendations = state.ranker.top_recommendations().await;
    let total_savings: f64 = recommendations.iter().map(|r| r.estimated_savings).sum();
    state
        .logger
        .log_recommendations(recommendations.len(), total_savings);

    let total = recommendations.len();
    Json(RecommendationList {
        recommendations,
        total,
    })
}

/// Read-only dump of the loaded rule catalog
async fn rules(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let mut rules: Vec<UcasRule> = state.simulator.catalog().all_rules().cloned().collect();
    rules.sort_by(|a, b| a.rule_id.cmp(&b.rule_id));
    let total = rules.len();
    Json(RuleList { rules, total })
}

/// Health check response - returns 200 if healthy, 503 if unhealthy
async fn healthz(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let health = state.health_registry.health().await;

    let status_code = match health.status {
        ComponentStatus::Healthy => StatusCode::OK,
        ComponentStatus::Degraded => StatusCode::OK, // Still operational
        ComponentStatus::Unhealthy => StatusCode::SERVICE_UNAVAILABLE,
    };

    (status_code, Json(health))
}

/// Readiness check response - returns 200 if ready, 503 if not ready
async fn readyz(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let readiness = state.health_registry.readiness().await;

    let status_code = if readiness.ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (status_code, Json(readiness))
}

/// Prometheus metrics endpoint
async fn metrics() -> impl IntoResponse {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    let mut buffer = Vec::new();

    encoder.encode(&metric_families, &mut buffer).unwrap();

    (
        StatusCode::OK,
        [("content-type", "text/plain; charset=utf-8")],
        buffer,
    )
}

/// Create the API router
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/v1/simulate", post(simulate))
        .route("/api/v1/recommendations", get(recommendations))
        .route("/api/v1/rules", get(rules))
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        .route("/metrics", get(metrics))
        .with_state(state)
}

/// Start the API server
pub async fn serve(port: u16, state: Arc<AppState>) -> anyhow::Result<()> {
    let app = create_router(state);

    let addr = format!("0.0.0.0:{}", port);
    info!(addr = %addr, "Starting API server");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
