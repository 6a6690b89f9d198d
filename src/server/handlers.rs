//! HTTP handlers for order operations.
//!
//! Thin plumbing around [`OrderService`]: extract, delegate, serialize.
//! Request bodies stay untyped (`serde_json::Value`) until the service's
//! validation layer has coerced them — unvalidated data never reaches the
//! store. Path ids that are not UUIDs cannot name any order and behave as
//! not-found rather than a parse error.

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use chrono::Utc;
use serde::Deserialize;
use serde_json::{Value, json};
use std::sync::Arc;
use uuid::Uuid;

use crate::core::error::ApiError;
use crate::core::order::Order;
use crate::core::service::OrderService;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<OrderService>,
}

/// Query parameters for the listing endpoint.
#[derive(Debug, Deserialize)]
pub struct ListParams {
    /// `all` or omitted = no filter; otherwise case-insensitive status name.
    pub status: Option<String>,
}

/// `GET /api/health`
pub async fn health() -> Json<Value> {
    Json(json!({ "ok": true, "timestamp": Utc::now() }))
}

/// `GET /api/orders?status=<s>` — filtered, sorted listing.
pub async fn list_orders(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<Json<Vec<Order>>, ApiError> {
    let orders = state.service.list(params.status.as_deref()).await?;
    Ok(Json(orders))
}

/// `POST /api/orders` — 201 + created order, or 400 with the aggregated
/// field list.
pub async fn create_order(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> Result<(StatusCode, Json<Order>), ApiError> {
    let order = state.service.create(&body).await?;
    Ok((StatusCode::CREATED, Json(order)))
}

/// `PATCH /api/orders/{id}/status` — 200 + updated order, 400 on a status
/// outside the enum, 404 on an unknown id.
pub async fn update_order_status(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> Result<Json<Order>, ApiError> {
    let id = parse_order_id(&id)?;
    let order = state.service.update_status(&id, &body).await?;
    Ok(Json(order))
}

/// `DELETE /api/orders/{id}` — 200 + pre-deletion snapshot, 404 when absent.
pub async fn delete_order(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Order>, ApiError> {
    let id = parse_order_id(&id)?;
    let order = state.service.delete(&id).await?;
    Ok(Json(order))
}

/// A malformed id can never match an order, so it is a not-found outcome.
fn parse_order_id(raw: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(raw).map_err(|_| ApiError::NotFound)
}
