//! One-time legacy flat-file import.
//!
//! Older deployments kept orders as a JSON array in `orders.json`. On
//! startup, if that file exists and the store is empty, its entries are
//! normalized and imported in one atomic batch, and the file is renamed with
//! a `.bak` suffix so it is never re-imported (store non-emptiness is the
//! guard either way). The whole step is best-effort: on any failure it logs
//! and leaves the store untouched rather than aborting startup. Not part of
//! the store's hot path — invoked once by the process entry point.

use crate::core::order::{Order, Status};
use crate::core::service::OrderStore;
use crate::core::validation::parse_ship_by;
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde_json::Value;
use std::path::Path;
use uuid::Uuid;

/// Run the legacy import. Never fails startup; outcomes are logged.
pub async fn run(store: &dyn OrderStore, legacy_path: &Path) {
    if !legacy_path.exists() {
        return;
    }

    match try_import(store, legacy_path).await {
        Ok(Some(count)) => {
            tracing::info!(
                count,
                path = %legacy_path.display(),
                "migrated legacy JSON orders into the store; backup saved with .bak suffix"
            );
        }
        Ok(None) => {
            tracing::debug!(
                path = %legacy_path.display(),
                "legacy order file present but nothing to import"
            );
        }
        Err(err) => {
            tracing::error!(
                error = ?err,
                path = %legacy_path.display(),
                "failed to migrate legacy orders; store left untouched"
            );
        }
    }
}

/// `Ok(Some(n))` when `n` orders were imported and the file was renamed;
/// `Ok(None)` when the guard skipped the import (non-empty store, empty
/// array).
async fn try_import(store: &dyn OrderStore, legacy_path: &Path) -> Result<Option<usize>> {
    if store.count().await? > 0 {
        return Ok(None);
    }

    let raw = std::fs::read_to_string(legacy_path)
        .with_context(|| format!("reading {}", legacy_path.display()))?;
    let entries: Vec<Value> =
        serde_json::from_str(&raw).context("legacy order file is not a JSON array")?;
    if entries.is_empty() {
        return Ok(None);
    }

    let orders: Vec<Order> = entries.iter().map(normalize_entry).collect();
    let count = store.import(orders).await?;

    let backup = backup_path(legacy_path);
    std::fs::rename(legacy_path, &backup)
        .with_context(|| format!("renaming to {}", backup.display()))?;

    Ok(Some(count))
}

fn backup_path(legacy_path: &Path) -> std::path::PathBuf {
    let mut name = legacy_path.as_os_str().to_os_string();
    name.push(".bak");
    std::path::PathBuf::from(name)
}

/// Lenient normalization of a legacy entry. Legacy files predate the
/// validation layer, so every field gets a usable fallback instead of being
/// rejected: unknown statuses become pending, broken quantities become 1,
/// missing timestamps become now.
fn normalize_entry(entry: &Value) -> Order {
    let created_at = timestamp_or_now(entry.get("createdAt"));
    let updated_at = timestamp_or_now(entry.get("updatedAt")).max(created_at);

    Order {
        id: entry
            .get("id")
            .and_then(Value::as_str)
            .and_then(|s| Uuid::parse_str(s).ok())
            .unwrap_or_else(Uuid::new_v4),
        order_number: string_or(entry.get("orderNumber"), "UNKNOWN"),
        item_name: string_or(entry.get("itemName"), "UNKNOWN ITEM"),
        filament_type: string_or(entry.get("filamentType"), "unknown"),
        filament_color: string_or(entry.get("filamentColor"), "unknown"),
        quantity: quantity_or_one(entry.get("quantity")),
        ship_by: parse_ship_by(entry.get("shipBy")),
        notes: string_or(entry.get("notes"), ""),
        status: entry
            .get("status")
            .and_then(Value::as_str)
            .and_then(|s| Status::parse(&s.to_ascii_lowercase()))
            .unwrap_or(Status::Pending),
        created_at,
        updated_at,
    }
}

fn string_or(value: Option<&Value>, fallback: &str) -> String {
    match value {
        Some(Value::String(s)) if !s.is_empty() => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        _ => fallback.to_string(),
    }
}

fn quantity_or_one(value: Option<&Value>) -> u32 {
    let n = match value {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    match n {
        Some(n) if n.is_finite() && n >= 1.0 && n <= f64::from(u32::MAX) => n.trunc() as u32,
        _ => 1,
    }
}

fn timestamp_or_now(value: Option<&Value>) -> DateTime<Utc> {
    value
        .and_then(Value::as_str)
        .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_else(Utc::now)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn normalize_fills_every_missing_field_with_fallbacks() {
        let order = normalize_entry(&json!({}));
        assert_eq!(order.order_number, "UNKNOWN");
        assert_eq!(order.item_name, "UNKNOWN ITEM");
        assert_eq!(order.filament_type, "unknown");
        assert_eq!(order.filament_color, "unknown");
        assert_eq!(order.quantity, 1);
        assert_eq!(order.ship_by, None);
        assert_eq!(order.notes, "");
        assert_eq!(order.status, Status::Pending);
        assert!(order.updated_at >= order.created_at);
    }

    #[test]
    fn normalize_keeps_well_formed_fields() {
        let id = Uuid::new_v4();
        let order = normalize_entry(&json!({
            "id": id.to_string(),
            "orderNumber": "PO-77",
            "itemName": "Gear",
            "filamentType": "PETG",
            "filamentColor": "green",
            "quantity": 5,
            "shipBy": "2024-03-01T00:00:00Z",
            "notes": "legacy",
            "status": "COMPLETED",
            "createdAt": "2024-01-01T00:00:00Z",
            "updatedAt": "2024-01-02T00:00:00Z",
        }));
        assert_eq!(order.id, id);
        assert_eq!(order.order_number, "PO-77");
        assert_eq!(order.quantity, 5);
        assert_eq!(order.status, Status::Completed);
        assert!(order.ship_by.is_some());
        assert!(order.updated_at > order.created_at);
    }

    #[test]
    fn normalize_clamps_updated_at_to_created_at() {
        let order = normalize_entry(&json!({
            "createdAt": "2024-02-01T00:00:00Z",
            "updatedAt": "2024-01-01T00:00:00Z",
        }));
        assert_eq!(order.updated_at, order.created_at);
    }

    #[test]
    fn bad_quantity_and_status_fall_back() {
        let order = normalize_entry(&json!({
            "quantity": "lots",
            "status": "shipped",
        }));
        assert_eq!(order.quantity, 1);
        assert_eq!(order.status, Status::Pending);
    }

    #[test]
    fn backup_path_appends_bak_suffix() {
        let backup = backup_path(Path::new("data/orders.json"));
        assert_eq!(backup, Path::new("data/orders.json.bak"));
    }
}
