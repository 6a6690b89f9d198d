//! The order entity and its lifecycle status.
//!
//! An [`Order`] is a single print job request tracked through
//! `pending → completed/archived`. Its JSON representation is also the
//! external wire shape: camelCase field names, RFC 3339 UTC timestamps,
//! lowercase status strings. Nothing internal leaks past this struct.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Lifecycle status of an order. Always one of these three values,
/// never free text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Pending,
    Completed,
    Archived,
}

impl Status {
    /// Lowercase wire name of the status.
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Pending => "pending",
            Status::Completed => "completed",
            Status::Archived => "archived",
        }
    }

    /// Parse an exact lowercase status name. Anything else is `None`.
    pub fn parse(s: &str) -> Option<Status> {
        match s {
            "pending" => Some(Status::Pending),
            "completed" => Some(Status::Completed),
            "archived" => Some(Status::Archived),
            _ => None,
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A persisted print order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    /// Unique identifier, assigned at creation, never reused.
    pub id: Uuid,
    pub order_number: String,
    pub item_name: String,
    pub filament_type: String,
    pub filament_color: String,
    pub quantity: u32,
    /// Optional target completion date; orders with one print first.
    pub ship_by: Option<DateTime<Utc>>,
    pub notes: String,
    pub status: Status,
    /// Server-assigned, never client-supplied.
    pub created_at: DateTime<Utc>,
    /// Refreshed on every status change. Always `>= created_at`.
    pub updated_at: DateTime<Utc>,
}

/// Validated creation input, before the server assigns an id, status and
/// timestamps. Produced by [`crate::core::validation::validate_create`].
#[derive(Debug, Clone, PartialEq)]
pub struct OrderDraft {
    pub order_number: String,
    pub item_name: String,
    pub filament_type: String,
    pub filament_color: String,
    pub quantity: u32,
    pub ship_by: Option<DateTime<Utc>>,
    pub notes: String,
}

/// A draft promoted with an id and status, ready for the store to stamp
/// timestamps on and persist.
#[derive(Debug, Clone)]
pub struct NewOrder {
    pub id: Uuid,
    pub order_number: String,
    pub item_name: String,
    pub filament_type: String,
    pub filament_color: String,
    pub quantity: u32,
    pub ship_by: Option<DateTime<Utc>>,
    pub notes: String,
    pub status: Status,
}

impl NewOrder {
    /// Promote a validated draft to a pending order with a fresh id.
    /// Creation always starts at `pending`, whatever the client sent.
    pub fn pending(draft: OrderDraft) -> Self {
        Self {
            id: Uuid::new_v4(),
            order_number: draft.order_number,
            item_name: draft.item_name,
            filament_type: draft.filament_type,
            filament_color: draft.filament_color,
            quantity: draft.quantity,
            ship_by: draft.ship_by,
            notes: draft.notes,
            status: Status::Pending,
        }
    }

    /// Stamp creation and update timestamps (identical at birth).
    pub fn into_order(self, now: DateTime<Utc>) -> Order {
        Order {
            id: self.id,
            order_number: self.order_number,
            item_name: self.item_name,
            filament_type: self.filament_type,
            filament_color: self.filament_color,
            quantity: self.quantity,
            ship_by: self.ship_by,
            notes: self.notes,
            status: self.status,
            created_at: now,
            updated_at: now,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn status_parses_exact_lowercase_only() {
        assert_eq!(Status::parse("pending"), Some(Status::Pending));
        assert_eq!(Status::parse("completed"), Some(Status::Completed));
        assert_eq!(Status::parse("archived"), Some(Status::Archived));
        assert_eq!(Status::parse("Pending"), None);
        assert_eq!(Status::parse("COMPLETED"), None);
        assert_eq!(Status::parse("bogus"), None);
        assert_eq!(Status::parse(""), None);
    }

    #[test]
    fn status_serializes_lowercase() {
        assert_eq!(serde_json::to_value(Status::Pending).unwrap(), json!("pending"));
        assert_eq!(serde_json::to_value(Status::Archived).unwrap(), json!("archived"));
    }

    #[test]
    fn order_uses_camel_case_wire_names() {
        let now = Utc::now();
        let order = NewOrder::pending(OrderDraft {
            order_number: "PO-1".into(),
            item_name: "Benchy".into(),
            filament_type: "PLA".into(),
            filament_color: "red".into(),
            quantity: 2,
            ship_by: None,
            notes: String::new(),
        })
        .into_order(now);

        let value = serde_json::to_value(&order).unwrap();
        assert_eq!(value["orderNumber"], "PO-1");
        assert_eq!(value["itemName"], "Benchy");
        assert_eq!(value["filamentType"], "PLA");
        assert_eq!(value["filamentColor"], "red");
        assert_eq!(value["quantity"], 2);
        assert_eq!(value["shipBy"], serde_json::Value::Null);
        assert_eq!(value["status"], "pending");
        assert!(value["createdAt"].is_string());
        assert_eq!(value["createdAt"], value["updatedAt"]);
    }

    #[test]
    fn pending_promotion_forces_pending_and_fresh_ids() {
        let draft = OrderDraft {
            order_number: "PO-2".into(),
            item_name: "Vase".into(),
            filament_type: "PETG".into(),
            filament_color: "blue".into(),
            quantity: 1,
            ship_by: None,
            notes: "gift".into(),
        };
        let a = NewOrder::pending(draft.clone());
        let b = NewOrder::pending(draft);
        assert_eq!(a.status, Status::Pending);
        assert_eq!(b.status, Status::Pending);
        assert_ne!(a.id, b.id);
    }
}
