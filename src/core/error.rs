//! Typed error handling for the API surface.
//!
//! A small closed taxonomy instead of raised-and-caught control flow:
//!
//! - [`ApiError::Validation`] / [`ApiError::InvalidStatus`] — user-correctable
//!   input problems, mapped to 400.
//! - [`ApiError::NotFound`] — the id does not name an order, mapped to 404.
//!   Inside the store this is a plain `Option::None`; the service promotes it
//!   to an error only at the API boundary.
//! - [`ApiError::Internal`] — storage/IO failure, mapped to 500. The detail is
//!   logged server-side; the client only ever sees a generic message.
//!
//! Every error serializes to the wire as `{"error": "<message>"}`.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;

/// All errors a request handler can surface.
#[derive(Debug, Error)]
pub enum ApiError {
    /// One or more creation fields are missing or invalid. Carries every
    /// failing field name, not just the first.
    #[error("Missing or invalid fields: {}", .fields.join(", "))]
    Validation { fields: Vec<String> },

    /// A status update named something outside the closed enum.
    #[error("status must be one of: pending, completed, archived")]
    InvalidStatus,

    /// No order matches the requested id.
    #[error("Order not found")]
    NotFound,

    /// Storage or IO failure. Never exposes internal detail to the client.
    #[error("Unexpected server error")]
    Internal(#[from] anyhow::Error),
}

impl ApiError {
    /// Aggregated validation failure over the named fields.
    pub fn invalid_fields<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        ApiError::Validation {
            fields: fields.into_iter().map(Into::into).collect(),
        }
    }

    /// HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation { .. } | ApiError::InvalidStatus => StatusCode::BAD_REQUEST,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let ApiError::Internal(err) = &self {
            tracing::error!(error = ?err, "request failed");
        }
        let status = self.status_code();
        let body = Json(json!({ "error": self.to_string() }));
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_lists_every_field_in_order() {
        let err = ApiError::invalid_fields(["orderNumber", "quantity"]);
        assert_eq!(
            err.to_string(),
            "Missing or invalid fields: orderNumber, quantity"
        );
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn status_codes_match_taxonomy() {
        assert_eq!(ApiError::InvalidStatus.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(ApiError::NotFound.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(
            ApiError::Internal(anyhow::anyhow!("disk on fire")).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn internal_error_message_is_generic() {
        let err = ApiError::Internal(anyhow::anyhow!("lmdb: MDB_PANIC"));
        assert_eq!(err.to_string(), "Unexpected server error");
    }

    #[test]
    fn not_found_message_matches_wire_contract() {
        assert_eq!(ApiError::NotFound.to_string(), "Order not found");
    }
}
