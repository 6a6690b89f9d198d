//! Router builder for the order API.

use crate::server::handlers::{
    AppState, create_order, delete_order, health, list_orders, update_order_status,
};
use axum::{
    Router,
    routing::{delete, get, patch},
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Build the API routes:
/// - GET    /api/health
/// - GET    /api/orders?status=<s>
/// - POST   /api/orders
/// - PATCH  /api/orders/{id}/status
/// - DELETE /api/orders/{id}
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/api/health", get(health))
        .route("/api/orders", get(list_orders).post(create_order))
        .route("/api/orders/{id}/status", patch(update_order_status))
        .route("/api/orders/{id}", delete(delete_order))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
