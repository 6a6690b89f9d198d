//! # spoolq
//!
//! A small job-queue tracker for a 3D-printing workflow. Clients submit print
//! orders over a JSON HTTP API, the server persists them in an embedded LMDB
//! store, and callers list, filter, and mutate them.
//!
//! ## Architecture
//!
//! - **Order Store** ([`storage`]): durable persistence behind the
//!   [`core::service::OrderStore`] trait — LMDB for production, an in-memory
//!   map for tests and development.
//! - **Order Service** ([`core::service::OrderService`]): validates and
//!   normalizes untyped request bodies, enforces the status state machine,
//!   and maps missing records to not-found outcomes.
//! - **Query/Sort Policy** ([`core::query`]): the deterministic ordering and
//!   filtering rule applied to every listing — ship-by date ascending with
//!   undated orders last, then creation time, then id.
//!
//! ## Quick start
//!
//! ```rust,ignore
//! use spoolq::prelude::*;
//! use std::sync::Arc;
//!
//! let store: Arc<dyn OrderStore> = Arc::new(LmdbOrderStore::open("data/orders.lmdb")?);
//! let service = Arc::new(OrderService::new(store));
//! let app = build_router(AppState { service });
//! axum::serve(listener, app).await?;
//! ```

pub mod config;
pub mod core;
pub mod migrate;
pub mod server;
pub mod storage;

/// Re-exports of commonly used types and traits
pub mod prelude {
    pub use crate::config::AppConfig;
    pub use crate::core::{
        error::ApiError,
        order::{NewOrder, Order, OrderDraft, Status},
        query,
        service::{OrderService, OrderStore},
        validation,
    };
    pub use crate::server::{AppState, build_router};
    pub use crate::storage::{InMemoryOrderStore, LmdbOrderStore};
}
