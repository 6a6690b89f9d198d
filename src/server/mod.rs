//! HTTP surface: application state, handlers, and the router builder.

pub mod handlers;
pub mod router;

pub use handlers::AppState;
pub use router::build_router;
