//! Creation-body validation and coercion.
//!
//! Request bodies are untyped JSON at the boundary. This module coerces them
//! into a typed [`OrderDraft`] before anything reaches the store, collecting
//! *every* failing field into one aggregated [`ApiError::Validation`] rather
//! than stopping at the first.
//!
//! Leniency rules: an unparseable `shipBy` is normalized to "no ship date",
//! never rejected; a missing `notes` defaults to the empty string; any
//! client-supplied `id`, `status` or timestamps are ignored outright.

use crate::core::error::ApiError;
use crate::core::order::OrderDraft;
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde_json::Value;

/// Validate and coerce a creation body into a draft.
///
/// Field names are reported in a stable order: `orderNumber`, `itemName`,
/// `filamentType`, `filamentColor`, `quantity`.
pub fn validate_create(body: &Value) -> Result<OrderDraft, ApiError> {
    let mut invalid = Vec::new();

    let order_number = required_string(body.get("orderNumber"));
    if order_number.is_none() {
        invalid.push("orderNumber");
    }
    let item_name = required_string(body.get("itemName"));
    if item_name.is_none() {
        invalid.push("itemName");
    }
    let filament_type = required_string(body.get("filamentType"));
    if filament_type.is_none() {
        invalid.push("filamentType");
    }
    let filament_color = required_string(body.get("filamentColor"));
    if filament_color.is_none() {
        invalid.push("filamentColor");
    }
    let quantity = coerce_quantity(body.get("quantity"));
    if quantity.is_none() {
        invalid.push("quantity");
    }

    match (order_number, item_name, filament_type, filament_color, quantity) {
        (
            Some(order_number),
            Some(item_name),
            Some(filament_type),
            Some(filament_color),
            Some(quantity),
        ) => Ok(OrderDraft {
            order_number,
            item_name,
            filament_type,
            filament_color,
            quantity,
            ship_by: parse_ship_by(body.get("shipBy")),
            notes: coerce_notes(body.get("notes")),
        }),
        _ => Err(ApiError::invalid_fields(invalid)),
    }
}

/// A required free-form string: strings are taken as-is, JSON numbers are
/// rendered. Missing, empty-after-trim, or any other JSON type is a failure.
fn required_string(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Quantity must coerce to a finite, integral number `> 0`. Numeric strings
/// are accepted; fractional or out-of-range values are not.
fn coerce_quantity(value: Option<&Value>) -> Option<u32> {
    let n = match value? {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    if !n.is_finite() || n <= 0.0 || n.fract() != 0.0 || n > f64::from(u32::MAX) {
        return None;
    }
    Some(n as u32)
}

/// Parse an optional ship-by value. Accepts RFC 3339 plus the bare
/// `YYYY-MM-DD` and `YYYY-MM-DDTHH:MM[:SS]` forms browser date inputs submit
/// (read as UTC). Anything unparseable is normalized to `None`.
pub fn parse_ship_by(value: Option<&Value>) -> Option<DateTime<Utc>> {
    let s = value?.as_str()?.trim();
    if s.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    for format in ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, format) {
            return Some(naive.and_utc());
        }
    }
    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return date.and_hms_opt(0, 0, 0).map(|naive| naive.and_utc());
    }
    None
}

/// Notes default to the empty string; strings and numbers are kept.
fn coerce_notes(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        _ => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::order::Status;
    use serde_json::json;

    fn valid_body() -> Value {
        json!({
            "orderNumber": "PO-100",
            "itemName": "Calibration cube",
            "filamentType": "PLA",
            "filamentColor": "black",
            "quantity": 3,
        })
    }

    fn fields_of(err: ApiError) -> Vec<String> {
        match err {
            ApiError::Validation { fields } => fields,
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn accepts_a_minimal_valid_body() {
        let draft = validate_create(&valid_body()).unwrap();
        assert_eq!(draft.order_number, "PO-100");
        assert_eq!(draft.quantity, 3);
        assert_eq!(draft.ship_by, None);
        assert_eq!(draft.notes, "");
    }

    #[test]
    fn collects_every_missing_field_in_stable_order() {
        let err = validate_create(&json!({})).unwrap_err();
        assert_eq!(
            fields_of(err),
            vec![
                "orderNumber",
                "itemName",
                "filamentType",
                "filamentColor",
                "quantity"
            ]
        );
    }

    #[test]
    fn missing_strings_reported_together_when_quantity_is_fine() {
        let err = validate_create(&json!({ "quantity": 1 })).unwrap_err();
        assert_eq!(
            fields_of(err),
            vec!["orderNumber", "itemName", "filamentType", "filamentColor"]
        );
    }

    #[test]
    fn empty_or_blank_strings_count_as_missing() {
        let mut body = valid_body();
        body["orderNumber"] = json!("");
        body["itemName"] = json!("   ");
        let err = validate_create(&body).unwrap_err();
        assert_eq!(fields_of(err), vec!["orderNumber", "itemName"]);
    }

    #[test]
    fn numbers_coerce_to_strings_for_string_fields() {
        let mut body = valid_body();
        body["orderNumber"] = json!(42);
        let draft = validate_create(&body).unwrap();
        assert_eq!(draft.order_number, "42");
    }

    #[test]
    fn quantity_rejects_zero_negative_fractional_and_garbage() {
        for bad in [json!(0), json!(-3), json!(1.5), json!("abc"), json!(null), json!(true)] {
            let mut body = valid_body();
            body["quantity"] = bad.clone();
            let err = validate_create(&body).unwrap_err();
            assert_eq!(fields_of(err), vec!["quantity"], "for quantity = {bad}");
        }
    }

    #[test]
    fn quantity_accepts_numeric_strings() {
        let mut body = valid_body();
        body["quantity"] = json!("7");
        assert_eq!(validate_create(&body).unwrap().quantity, 7);
    }

    #[test]
    fn ship_by_accepts_rfc3339_and_bare_dates() {
        let rfc = parse_ship_by(Some(&json!("2024-01-10T12:00:00Z"))).unwrap();
        assert_eq!(rfc.to_rfc3339(), "2024-01-10T12:00:00+00:00");

        let date = parse_ship_by(Some(&json!("2024-01-10"))).unwrap();
        assert_eq!(date.to_rfc3339(), "2024-01-10T00:00:00+00:00");

        let local = parse_ship_by(Some(&json!("2024-01-10T09:30"))).unwrap();
        assert_eq!(local.to_rfc3339(), "2024-01-10T09:30:00+00:00");
    }

    #[test]
    fn unparseable_ship_by_normalizes_to_none_not_an_error() {
        let mut body = valid_body();
        body["shipBy"] = json!("next tuesday");
        let draft = validate_create(&body).unwrap();
        assert_eq!(draft.ship_by, None);

        assert_eq!(parse_ship_by(Some(&json!(12345))), None);
        assert_eq!(parse_ship_by(Some(&json!(""))), None);
        assert_eq!(parse_ship_by(None), None);
    }

    #[test]
    fn client_supplied_status_and_id_are_ignored() {
        let mut body = valid_body();
        body["status"] = json!("completed");
        body["id"] = json!("not-a-real-id");
        let draft = validate_create(&body).unwrap();
        // The draft carries no status at all; promotion always yields pending.
        let new = crate::core::order::NewOrder::pending(draft);
        assert_eq!(new.status, Status::Pending);
    }

    #[test]
    fn notes_default_to_empty_string() {
        let mut body = valid_body();
        assert_eq!(validate_create(&body).unwrap().notes, "");
        body["notes"] = json!("rush job");
        assert_eq!(validate_create(&body).unwrap().notes, "rush job");
        body["notes"] = json!(null);
        assert_eq!(validate_create(&body).unwrap().notes, "");
    }
}
