//! HTTP API 层

mod dto;
mod extract;
mod handlers;
mod routes;

pub use dto::*;
pub use extract::{ApiJson, ApiQuery, SweetIdPath};
pub use routes::api_router;
