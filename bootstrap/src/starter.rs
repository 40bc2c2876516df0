//! 服务启动器
//!
//! 提供统一的 HTTP 服务启动模式

use std::net::SocketAddr;

use axum::Router;
use sweetshop_adapter_postgres::Migration;
use sweetshop_config::AppConfig;
use sweetshop_telemetry::init_metrics;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::cors::cors_layer;
use crate::health::{HealthState, health_routes};
use crate::infrastructure::Infrastructure;
use crate::runtime::{init_runtime, shutdown_signal};

/// 运行 HTTP 服务
///
/// 1. 加载配置并初始化日志
/// 2. 安装 Prometheus recorder
/// 3. 建立数据库连接池（带重试）并执行迁移
/// 4. 调用 `router_builder` 构建业务路由，合并健康检查路由
/// 5. 挂载 tracing 与 CORS 层，启动服务器并处理 graceful shutdown
///
/// # 示例
///
/// ```ignore
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     run_http_server("config", &migrations(), |infra| {
///         api_router(Arc::new(MyService::new(infra.postgres_pool())))
///     })
///     .await
/// }
/// ```
pub async fn run_http_server<F>(
    config_dir: &str,
    migrations: &[Migration],
    router_builder: F,
) -> Result<(), Box<dyn std::error::Error>>
where
    F: FnOnce(&Infrastructure) -> Router,
{
    let config = AppConfig::load(config_dir)?;
    init_runtime(&config);

    info!("Starting {} service", config.app_name);

    let metrics = init_metrics()?;

    let infra = Infrastructure::from_config(config).await?;
    infra.run_migrations(migrations).await?;

    let cors = cors_layer(&infra.config().cors)?;
    let app = router_builder(&infra)
        .merge(health_routes(HealthState::new(infra.postgres_pool(), metrics)))
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    let addr: SocketAddr = infra.config().bind_address().parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;

    info!(%addr, "HTTP server starting");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    infra.close().await;
    info!("Service stopped");

    Ok(())
}
