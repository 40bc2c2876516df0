//! 路由

use axum::{
    Router,
    routing::{get, post},
};

use super::handlers::{self, SharedService};

/// 库存 API 路由
pub fn api_router(service: SharedService) -> Router {
    Router::new()
        .route(
            "/api/sweets",
            get(handlers::list_sweets).post(handlers::create_sweet),
        )
        .route(
            "/api/sweets/{id}",
            get(handlers::get_sweet)
                .put(handlers::update_sweet)
                .delete(handlers::delete_sweet),
        )
        .route("/api/sweets/{id}/purchase", post(handlers::purchase_sweet))
        .route("/api/sweets/{id}/restock", post(handlers::restock_sweet))
        .with_state(service)
}
