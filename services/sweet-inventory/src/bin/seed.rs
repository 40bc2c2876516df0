//! 用示例目录重置 sweets 表

use sweet_inventory::infrastructure::persistence::{PostgresSweetRepository, migrations};
use sweet_inventory::infrastructure::seed::sample_catalogue;
use sweetshop_bootstrap::{Infrastructure, init_runtime};
use sweetshop_config::AppConfig;
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load("config")?;
    init_runtime(&config);

    let infra = Infrastructure::from_config(config).await?;
    infra.run_migrations(&migrations()).await?;

    info!("Seeding database...");
    let repo = PostgresSweetRepository::new(infra.postgres_pool());
    let inserted = repo.replace_all(&sample_catalogue()).await?;
    for sweet in &inserted {
        info!(sweet_id = %sweet.id, name = %sweet.name, quantity = sweet.quantity, "Seeded sweet");
    }
    info!(count = inserted.len(), "Database seeded");

    infra.close().await;
    Ok(())
}
