//! sweet-inventory Service - Sweet Shop Inventory

use std::sync::Arc;

use sweet_inventory::api::api_router;
use sweet_inventory::application::SweetService;
use sweet_inventory::infrastructure::persistence::{PostgresSweetRepository, migrations};
use sweetshop_bootstrap::{Infrastructure, run_http_server};
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    run_http_server("config", &migrations(), |infra: &Infrastructure| {
        info!("Initializing sweet-inventory Service...");

        let repo = Arc::new(PostgresSweetRepository::new(infra.postgres_pool()));
        let service = Arc::new(SweetService::new(repo));

        api_router(service)
    })
    .await
}
