//! The order store trait and the service that orchestrates it.
//!
//! `OrderStore` is the persistence seam: object-safe, async, shared as an
//! `Arc<dyn OrderStore>` across handlers. Implementations return
//! `anyhow::Result`; "no such id" is a normal `Option::None` outcome, not an
//! error. [`OrderService`] owns validation, the forced-pending rule, the
//! listing policy, and the promotion of `None` to [`ApiError::NotFound`] at
//! the API boundary.

use crate::core::error::ApiError;
use crate::core::order::{NewOrder, Order, Status};
use crate::core::{query, validation};
use anyhow::Result;
use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;
use uuid::Uuid;

/// Durable persistence contract for orders.
///
/// Every write (create, status update, delete) must be atomic and committed
/// before the call returns. Reads see the latest committed write.
#[async_trait]
pub trait OrderStore: Send + Sync {
    /// All orders, unfiltered and unsorted.
    async fn list(&self) -> Result<Vec<Order>>;

    async fn get(&self, id: &Uuid) -> Result<Option<Order>>;

    /// Persist a new order, stamping `created_at` and `updated_at` with the
    /// same current instant. Returns the stored record.
    async fn create(&self, new: NewOrder) -> Result<Order>;

    /// Set the status and refresh `updated_at`. `None` when the id is absent.
    async fn update_status(&self, id: &Uuid, status: Status) -> Result<Option<Order>>;

    /// Remove and return the pre-deletion snapshot. `None` when absent.
    async fn delete(&self, id: &Uuid) -> Result<Option<Order>>;

    /// Number of stored orders. Guards the one-time legacy import.
    async fn count(&self) -> Result<usize>;

    /// Bulk-insert fully-formed records (timestamps preserved) in a single
    /// atomic batch. Used only by the legacy import.
    async fn import(&self, orders: Vec<Order>) -> Result<usize>;
}

/// Validates and normalizes input, enforces the status state machine, and
/// applies the listing policy on read.
pub struct OrderService {
    store: Arc<dyn OrderStore>,
}

impl OrderService {
    pub fn new(store: Arc<dyn OrderStore>) -> Self {
        Self { store }
    }

    /// Create an order from an untyped request body. Validation happens
    /// before any storage mutation; status is always forced to pending.
    pub async fn create(&self, body: &Value) -> Result<Order, ApiError> {
        let draft = validation::validate_create(body)?;
        let order = self.store.create(NewOrder::pending(draft)).await?;
        Ok(order)
    }

    /// List orders, filtered by the optional status parameter and sorted by
    /// the ship-by/created-at/id policy. `None` or `"all"` means no filter.
    pub async fn list(&self, status_param: Option<&str>) -> Result<Vec<Order>, ApiError> {
        let orders = self.store.list().await?;
        Ok(query::apply_listing(orders, status_param))
    }

    /// Move an order to a new status. The status must name one of the three
    /// enum values exactly; that is checked before the store is touched.
    pub async fn update_status(&self, id: &Uuid, body: &Value) -> Result<Order, ApiError> {
        let status = body
            .get("status")
            .and_then(Value::as_str)
            .and_then(Status::parse)
            .ok_or(ApiError::InvalidStatus)?;
        self.store
            .update_status(id, status)
            .await?
            .ok_or(ApiError::NotFound)
    }

    /// Delete an order, returning its last snapshot.
    pub async fn delete(&self, id: &Uuid) -> Result<Order, ApiError> {
        self.store.delete(id).await?.ok_or(ApiError::NotFound)
    }
}
