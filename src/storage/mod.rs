//! Storage backends for the order store.
//!
//! - [`LmdbOrderStore`] — the durable backend, canonical in production.
//! - [`InMemoryOrderStore`] — a `RwLock`-backed map for tests and development.

pub mod in_memory;
pub mod lmdb;

pub use in_memory::InMemoryOrderStore;
pub use lmdb::LmdbOrderStore;
