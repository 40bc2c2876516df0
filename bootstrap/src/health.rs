//! 健康检查模块
//!
//! 提供 /health、/ready 和 /metrics 端点

use axum::{
    Json, Router,
    extract::State,
    http::{StatusCode, header},
    response::IntoResponse,
    routing::get,
};
use metrics_exporter_prometheus::PrometheusHandle;
use serde::Serialize;
use sqlx::PgPool;
use sweetshop_adapter_postgres::check_connection;
use tracing::warn;

/// 健康检查端点共享状态
#[derive(Clone)]
pub struct HealthState {
    pool: PgPool,
    metrics: PrometheusHandle,
}

impl HealthState {
    pub fn new(pool: PgPool, metrics: PrometheusHandle) -> Self {
        Self { pool, metrics }
    }
}

/// 存活检查响应
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// 就绪检查响应
#[derive(Debug, Clone, Serialize)]
pub struct ReadinessResponse {
    pub status: String,
    pub checks: Vec<ComponentHealth>,
}

/// 组件健康状态
#[derive(Debug, Clone, Serialize)]
pub struct ComponentHealth {
    pub name: String,
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latency_ms: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

pub fn health_routes(state: HealthState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/ready", get(readiness_check))
        .route("/metrics", get(render_metrics))
        .with_state(state)
}

async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

async fn readiness_check(State(state): State<HealthState>) -> impl IntoResponse {
    let postgres = match check_connection(&state.pool).await {
        Ok(latency) => ComponentHealth {
            name: "postgres".to_string(),
            status: "healthy".to_string(),
            latency_ms: Some(latency.as_millis() as u64),
            message: None,
        },
        Err(e) => {
            warn!(error = %e, "Readiness check failed");
            ComponentHealth {
                name: "postgres".to_string(),
                status: "unhealthy".to_string(),
                latency_ms: None,
                message: Some("database unavailable".to_string()),
            }
        }
    };

    let ready = postgres.status == "healthy";
    let body = ReadinessResponse {
        status: if ready { "ready" } else { "not_ready" }.to_string(),
        checks: vec![postgres],
    };
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (status, Json(body))
}

async fn render_metrics(State(state): State<HealthState>) -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}
