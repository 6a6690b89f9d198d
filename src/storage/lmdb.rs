//! LMDB storage backend using heed (memory-mapped B-tree).
//!
//! LMDB is an embedded key-value store — no external server required.
//! All operations are synchronous (memory-mapped I/O) and are wrapped in
//! `tokio::task::spawn_blocking` for async compatibility.
//!
//! One named database, `orders`, keyed by the order's UUID string with
//! JSON-encoded values. Every write happens inside a single write
//! transaction, so a status update or delete either fully applies or not at
//! all, and is durable once the transaction commits. Reads run in their own
//! read transactions and see the latest committed write.

use crate::core::order::{NewOrder, Order, Status};
use crate::core::service::OrderStore;
use anyhow::{Result, anyhow};
use async_trait::async_trait;
use chrono::Utc;
use heed::types::{Bytes, Str};
use heed::{Database, Env, EnvOpenOptions};
use std::path::Path;
use std::sync::Arc;
use uuid::Uuid;

/// Encode an order as JSON bytes for LMDB storage.
fn encode(order: &Order) -> Result<Vec<u8>> {
    serde_json::to_vec(order).map_err(|e| anyhow!("lmdb encode: {}", e))
}

/// Decode an order from JSON bytes.
fn decode(bytes: &[u8]) -> Result<Order> {
    serde_json::from_slice(bytes).map_err(|e| anyhow!("lmdb decode: {}", e))
}

/// LMDB-backed implementation of [`OrderStore`].
///
/// The `Env` is wrapped in an `Arc` for cheap cloning across async tasks.
/// Data survives process restarts; reopening the same path sees the same
/// orders.
#[derive(Clone)]
pub struct LmdbOrderStore {
    env: Arc<Env>,
    db: Database<Str, Bytes>,
}

impl LmdbOrderStore {
    /// Open (or create) an LMDB environment at `path` and initialise the
    /// `orders` named database.
    ///
    /// The map size defaults to 256 MB which is plenty for this dataset.
    /// LMDB will not actually allocate that much — it is a virtual address
    /// space reservation.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        std::fs::create_dir_all(path.as_ref())?;

        let env = unsafe {
            EnvOpenOptions::new()
                .map_size(256 * 1024 * 1024)
                .max_dbs(3)
                .max_readers(126)
                .open(path.as_ref())?
        };

        let mut wtxn = env.write_txn()?;
        let db: Database<Str, Bytes> = env.create_database(&mut wtxn, Some("orders"))?;
        wtxn.commit()?;

        Ok(Self {
            env: Arc::new(env),
            db,
        })
    }
}

#[async_trait]
impl OrderStore for LmdbOrderStore {
    async fn list(&self) -> Result<Vec<Order>> {
        let env = self.env.clone();
        let db = self.db;

        tokio::task::spawn_blocking(move || {
            let rtxn = env.read_txn()?;
            let mut orders = Vec::new();
            for item in db.iter(&rtxn)? {
                let (_key, bytes) = item?;
                orders.push(decode(bytes)?);
            }
            Ok(orders)
        })
        .await?
    }

    async fn get(&self, id: &Uuid) -> Result<Option<Order>> {
        let env = self.env.clone();
        let db = self.db;
        let key = id.to_string();

        tokio::task::spawn_blocking(move || {
            let rtxn = env.read_txn()?;
            match db.get(&rtxn, &key)? {
                Some(bytes) => Ok(Some(decode(bytes)?)),
                None => Ok(None),
            }
        })
        .await?
    }

    async fn create(&self, new: NewOrder) -> Result<Order> {
        let env = self.env.clone();
        let db = self.db;
        let order = new.into_order(Utc::now());
        let key = order.id.to_string();
        let bytes = encode(&order)?;

        tokio::task::spawn_blocking(move || {
            let mut wtxn = env.write_txn()?;
            db.put(&mut wtxn, &key, &bytes)?;
            wtxn.commit()?;
            Ok(order)
        })
        .await?
    }

    async fn update_status(&self, id: &Uuid, status: Status) -> Result<Option<Order>> {
        let env = self.env.clone();
        let db = self.db;
        let key = id.to_string();

        tokio::task::spawn_blocking(move || {
            let mut wtxn = env.write_txn()?;
            let Some(bytes) = db.get(&wtxn, &key)? else {
                return Ok(None);
            };
            let mut order = decode(bytes)?;
            order.status = status;
            order.updated_at = Utc::now();
            let bytes = encode(&order)?;
            db.put(&mut wtxn, &key, &bytes)?;
            wtxn.commit()?;
            Ok(Some(order))
        })
        .await?
    }

    async fn delete(&self, id: &Uuid) -> Result<Option<Order>> {
        let env = self.env.clone();
        let db = self.db;
        let key = id.to_string();

        tokio::task::spawn_blocking(move || {
            let mut wtxn = env.write_txn()?;
            let Some(bytes) = db.get(&wtxn, &key)? else {
                return Ok(None);
            };
            let order = decode(bytes)?;
            db.delete(&mut wtxn, &key)?;
            wtxn.commit()?;
            Ok(Some(order))
        })
        .await?
    }

    async fn count(&self) -> Result<usize> {
        let env = self.env.clone();
        let db = self.db;

        tokio::task::spawn_blocking(move || {
            let rtxn = env.read_txn()?;
            Ok(db.len(&rtxn)? as usize)
        })
        .await?
    }

    async fn import(&self, orders: Vec<Order>) -> Result<usize> {
        let env = self.env.clone();
        let db = self.db;

        tokio::task::spawn_blocking(move || {
            let mut wtxn = env.write_txn()?;
            let count = orders.len();
            for order in &orders {
                let key = order.id.to_string();
                let bytes = encode(order)?;
                db.put(&mut wtxn, &key, &bytes)?;
            }
            wtxn.commit()?;
            Ok(count)
        })
        .await?
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encode_decode_roundtrip() {
        let order = Order {
            id: Uuid::new_v4(),
            order_number: "PO-9".into(),
            item_name: "Bracket".into(),
            filament_type: "ABS".into(),
            filament_color: "white".into(),
            quantity: 4,
            ship_by: None,
            notes: "two perimeters".into(),
            status: Status::Pending,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        let bytes = encode(&order).expect("should encode");
        let decoded = decode(&bytes).expect("should decode");
        assert_eq!(decoded, order);
    }

    #[test]
    fn decode_invalid_bytes_returns_error() {
        let result = decode(b"not valid json at all {{{");
        assert!(result.is_err());
        let err = result.unwrap_err().to_string();
        assert!(err.contains("lmdb decode"), "unexpected error: {}", err);
    }
}
