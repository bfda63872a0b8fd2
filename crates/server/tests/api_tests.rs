//! Integration tests for the optimizer API endpoints

use axum::{
    body::Body,
    extract::State,
    http::{Request, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use optimizer_lib::{
    health::{components, ComponentStatus, HealthRegistry},
    inventory::StaticInventory,
    models::{AccountInfo, CloudProvider, PricingInfo, PricingUnit, ResourceInfo, UsageMetrics},
    ranker::RecommendationRanker,
    rules::RuleCatalog,
    simulator::{SimulateRequest, Simulator},
};
use prometheus::{Encoder, TextEncoder};
use std::collections::HashMap;
use std::sync::Arc;
use tower::ServiceExt;

#[derive(Clone)]
struct AppState {
    health_registry: HealthRegistry,
    simulator: Arc<Simulator>,
    ranker: Arc<RecommendationRanker>,
}

async fn simulate(
    State(state): State<Arc<AppState>>,
    Json(request): Json<SimulateRequest>,
) -> impl IntoResponse {
    if request.resource_ids.is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(serde_json::json!({"error": "resource_ids must not be empty"})),
        )
            .into_response();
    }
    let response = state.simulator.simulate(request).await;
    (StatusCode::OK, Json(response)).into_response()
}

async fn recommendations(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let recommendations = state.ranker.top_recommendations().await;
    Json(serde_json::json!({
        "total": recommendations.len(),
        "recommendations": recommendations,
    }))
}

async fn healthz(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let health = state.health_registry.health().await;
    let status_code = match health.status {
        ComponentStatus::Healthy | ComponentStatus::Degraded => StatusCode::OK,
        ComponentStatus::Unhealthy => StatusCode::SERVICE_UNAVAILABLE,
    };
    (status_code, Json(health))
}

async fn readyz(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let readiness = state.health_registry.readiness().await;
    let status_code = if readiness.ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };
    (status_code, Json(readiness))
}

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

fn create_test_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/v1/simulate", post(simulate))
        .route("/api/v1/recommendations", get(recommendations))
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        .route("/metrics", get(metrics))
        .with_state(state)
}

fn sample_inventory() -> StaticInventory {
    let inventory = StaticInventory::new();
    inventory.add_account(AccountInfo {
        account_id: "acct-1".to_string(),
        provider: CloudProvider::Aws,
        alias: "prod".to_string(),
        active: true,
    });
    inventory.add_resource(
        "acct-1",
        ResourceInfo {
            id: "i-1".to_string(),
            provider: CloudProvider::Aws,
            service: "ec2".to_string(),
            region: "ap-northeast-2".to_string(),
            project: "default".to_string(),
            tags: HashMap::new(),
            instance_type: Some("t3.medium".to_string()),
        },
        PricingInfo {
            unit: PricingUnit::Hour,
            unit_price: 0.0416,
            commitment_applicable: true,
            commitment_price: 0.025,
        },
        Some(UsageMetrics {
            avg: 30.0,
            p95: 55.0,
            p99: 70.0,
            idle_ratio: 0.5,
            schedule_pattern: "business-hours".to_string(),
            uptime_days: 90,
        }),
    );
    inventory
}

async fn setup_test_app() -> (Router, Arc<AppState>) {
    let inventory = Arc::new(sample_inventory());
    let catalog = Arc::new(RuleCatalog::empty());

    let health_registry = HealthRegistry::new();
    health_registry.register(components::RULE_CATALOG).await;
    health_registry.register(components::SIMULATOR).await;

    let state = Arc::new(AppState {
        health_registry,
        simulator: Arc::new(Simulator::new(
            catalog.clone(),
            inventory.clone(),
            inventory.clone(),
            inventory.clone(),
        )),
        ranker: Arc::new(RecommendationRanker::new(
            catalog,
            inventory.clone(),
            inventory.clone(),
            inventory,
        )),
    });
    let router = create_test_router(state.clone());

    (router, state)
}

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}

#[tokio::test]
async fn test_simulate_returns_scenarios() {
    let (app, _state) = setup_test_app().await;

    let request = Request::builder()
        .method("POST")
        .uri("/api/v1/simulate")
        .header("content-type", "application/json")
        .body(Body::from(
            r#"{"resource_ids": ["i-1"], "action": "offhours"}"#,
        ))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["action_type_code"], "OFFHOURS");
    assert_eq!(body["total_resources"], 1);
    let scenarios = body["scenarios"].as_array().unwrap();
    assert_eq!(scenarios.len(), 1);
    assert!(scenarios[0]["scenario_name"]
        .as_str()
        .unwrap()
        .contains("i-1"));
}

#[tokio::test]
async fn test_simulate_rejects_empty_resource_list() {
    let (app, _state) = setup_test_app().await;

    let request = Request::builder()
        .method("POST")
        .uri("/api/v1/simulate")
        .header("content-type", "application/json")
        .body(Body::from(r#"{"resource_ids": [], "action": "offhours"}"#))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_simulate_commitment_produces_three_coverage_levels() {
    let (app, _state) = setup_test_app().await;

    let request = Request::builder()
        .method("POST")
        .uri("/api/v1/simulate")
        .header("content-type", "application/json")
        .body(Body::from(
            r#"{"resource_ids": ["i-1"], "action": "commitment"}"#,
        ))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    let body = body_json(response).await;
    assert_eq!(body["scenarios"].as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn test_recommendations_bounded_and_shaped() {
    let (app, _state) = setup_test_app().await;

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/v1/recommendations")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    let recommendations = body["recommendations"].as_array().unwrap();
    assert!(recommendations.len() <= 3);
    for r in recommendations {
        assert!(r["title"].as_str().unwrap().len() > 0);
        assert!(r["estimated_savings"].as_f64().unwrap() >= 0.0);
        assert!(r["scenario"]["new_cost"].as_f64().unwrap() >= 0.0);
    }
}

#[tokio::test]
async fn test_healthz_returns_ok_when_healthy() {
    let (app, _state) = setup_test_app().await;

    let response = app
        .oneshot(Request::builder().uri("/healthz").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let health = body_json(response).await;
    assert_eq!(health["status"], "healthy");
}

#[tokio::test]
async fn test_healthz_stays_ok_when_catalog_degraded() {
    let (app, state) = setup_test_app().await;

    state
        .health_registry
        .set_degraded(components::RULE_CATALOG, "No rule documents loaded")
        .await;

    let response = app
        .oneshot(Request::builder().uri("/healthz").body(Body::empty()).unwrap())
        .await
        .unwrap();
    // Degraded still returns 200 (operational)
    assert_eq!(response.status(), StatusCode::OK);

    let health = body_json(response).await;
    assert_eq!(health["status"], "degraded");
}

#[tokio::test]
async fn test_readyz_reflects_readiness() {
    let (app, state) = setup_test_app().await;

    let not_ready = app
        .clone()
        .oneshot(Request::builder().uri("/readyz").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(not_ready.status(), StatusCode::SERVICE_UNAVAILABLE);

    state.health_registry.set_ready(true).await;
    let ready = app
        .oneshot(Request::builder().uri("/readyz").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(ready.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_metrics_endpoint_returns_prometheus_format() {
    let (app, _state) = setup_test_app().await;

    let response = app
        .oneshot(Request::builder().uri("/metrics").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let content_type = response.headers().get("content-type").unwrap();
    assert!(content_type.to_str().unwrap().contains("text/plain"));

    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let metrics_text = String::from_utf8(body.to_vec()).unwrap();
    assert!(metrics_text.contains("cost_optimizer_simulation_latency_seconds"));
}
