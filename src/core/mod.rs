//! Core domain: the order entity, its validation, the status state machine,
//! the listing query policy, and the service that ties them together.

pub mod error;
pub mod order;
pub mod query;
pub mod service;
pub mod validation;

pub use error::ApiError;
pub use order::{NewOrder, Order, OrderDraft, Status};
pub use service::{OrderService, OrderStore};
