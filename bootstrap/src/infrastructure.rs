//! 基础设施资源管理

use std::time::Duration;

use secrecy::ExposeSecret;
use sqlx::PgPool;
use sweetshop_adapter_postgres::{
    Migration, MigrationManager, MigrationReport, PostgresConfig, create_pool,
};
use sweetshop_common::{RetryConfig, is_retryable_error, with_conditional_retry};
use sweetshop_config::AppConfig;
use sweetshop_errors::AppResult;
use tracing::info;

/// 基础设施资源容器
pub struct Infrastructure {
    config: AppConfig,
    postgres_pool: PgPool,
}

impl Infrastructure {
    /// 从配置创建基础设施资源（连接失败时按可重试错误退避重试）
    pub async fn from_config(config: AppConfig) -> AppResult<Self> {
        let postgres_pool = connect_postgres(&config).await?;
        info!(
            max_connections = config.database.max_connections,
            "PostgreSQL connection pool created"
        );

        Ok(Self {
            config,
            postgres_pool,
        })
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// 获取连接池（PgPool 内部为 Arc，克隆开销很小）
    pub fn postgres_pool(&self) -> PgPool {
        self.postgres_pool.clone()
    }

    /// 执行 schema 迁移
    pub async fn run_migrations(&self, migrations: &[Migration]) -> AppResult<MigrationReport> {
        let report = MigrationManager::new(self.postgres_pool())
            .migrate(migrations)
            .await?;
        info!(
            applied = ?report.applied,
            skipped = report.skipped.len(),
            "Database migrations finished"
        );
        Ok(report)
    }

    /// 关闭连接池
    pub async fn close(&self) {
        self.postgres_pool.close().await;
        info!("PostgreSQL connection pool closed");
    }
}

async fn connect_postgres(config: &AppConfig) -> AppResult<PgPool> {
    let pg_config = PostgresConfig::new(config.database.url.expose_secret())
        .with_max_connections(config.database.max_connections)
        .with_min_connections(config.database.min_connections)
        .with_acquire_timeout(Duration::from_secs(config.database.acquire_timeout_secs));

    with_conditional_retry(
        &RetryConfig::default(),
        "PostgreSQL connection",
        || {
            let cfg = pg_config.clone();
            async move { create_pool(&cfg).await }
        },
        |e| is_retryable_error(&e.to_string()),
    )
    .await
}
