//! HTTP 处理函数

use std::sync::Arc;

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use sweetshop_bootstrap::X_TOTAL_COUNT;
use sweetshop_errors::AppResult;

use crate::application::{CreateSweetCommand, GetSweetQuery, SweetService};

use super::dto::{
    CreateSweetRequest, ListSweetsParams, StockRequest, SweetResponse, UpdateSweetRequest,
};
use super::extract::{ApiJson, ApiQuery, SweetIdPath};

pub type SharedService = Arc<SweetService>;

/// GET /api/sweets
pub async fn list_sweets(
    State(service): State<SharedService>,
    ApiQuery(params): ApiQuery<ListSweetsParams>,
) -> AppResult<impl IntoResponse> {
    let sweets = service.list_sweets(params.into_query()?).await?;
    let body: Vec<SweetResponse> = sweets.into_iter().map(Into::into).collect();
    Ok(([(X_TOTAL_COUNT, body.len().to_string())], Json(body)))
}

/// GET /api/sweets/{id}
pub async fn get_sweet(
    State(service): State<SharedService>,
    SweetIdPath(id): SweetIdPath,
) -> AppResult<Json<SweetResponse>> {
    let sweet = service.get_sweet(GetSweetQuery { id }).await?;
    Ok(Json(sweet.into()))
}

/// POST /api/sweets
pub async fn create_sweet(
    State(service): State<SharedService>,
    ApiJson(req): ApiJson<CreateSweetRequest>,
) -> AppResult<(StatusCode, Json<SweetResponse>)> {
    let sweet = service.create_sweet(CreateSweetCommand::from(req)).await?;
    Ok((StatusCode::CREATED, Json(sweet.into())))
}

/// PUT /api/sweets/{id}
pub async fn update_sweet(
    State(service): State<SharedService>,
    SweetIdPath(id): SweetIdPath,
    ApiJson(req): ApiJson<UpdateSweetRequest>,
) -> AppResult<Json<SweetResponse>> {
    let sweet = service.update_sweet(req.into_command(id)).await?;
    Ok(Json(sweet.into()))
}

/// DELETE /api/sweets/{id}
pub async fn delete_sweet(
    State(service): State<SharedService>,
    SweetIdPath(id): SweetIdPath,
) -> AppResult<Json<SweetResponse>> {
    let sweet = service.delete_sweet(id).await?;
    Ok(Json(sweet.into()))
}

/// POST /api/sweets/{id}/purchase
pub async fn purchase_sweet(
    State(service): State<SharedService>,
    SweetIdPath(id): SweetIdPath,
    ApiJson(req): ApiJson<StockRequest>,
) -> AppResult<Json<SweetResponse>> {
    let sweet = service.purchase_sweet(req.into_purchase(id)).await?;
    Ok(Json(sweet.into()))
}

/// POST /api/sweets/{id}/restock
pub async fn restock_sweet(
    State(service): State<SharedService>,
    SweetIdPath(id): SweetIdPath,
    ApiJson(req): ApiJson<StockRequest>,
) -> AppResult<Json<SweetResponse>> {
    let sweet = service.restock_sweet(req.into_restock(id)).await?;
    Ok(Json(sweet.into()))
}
