//! Application error type shared by services, repositories and HTTP handlers.
//!
//! Every request-path failure is an [`AppError`]. Handlers return it directly and
//! axum turns it into a JSON response via [`IntoResponse`]:
//!
//! ```json
//! { "error": "Not found", "code": "not_found", "details": { "code": "abc123" } }
//! ```

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::{Map, Value, json};

/// JSON body returned for every error response.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
    pub code: &'static str,
    pub details: Value,
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Malformed input. `details` lists every violated field.
    #[error("{message}")]
    Validation { message: String, details: Value },

    /// No active link matches the request.
    #[error("{message}")]
    NotFound { message: String, details: Value },

    /// The short code is already held by an active link.
    #[error("{message}")]
    Conflict { message: String, details: Value },

    /// Store or other unexpected failure. `details` is logged, never returned.
    #[error("{message}")]
    Internal { message: String, details: Value },
}

impl AppError {
    pub fn bad_request(message: impl Into<String>, details: Value) -> Self {
        Self::Validation {
            message: message.into(),
            details,
        }
    }

    pub fn not_found(message: impl Into<String>, details: Value) -> Self {
        Self::NotFound {
            message: message.into(),
            details,
        }
    }

    pub fn conflict(message: impl Into<String>, details: Value) -> Self {
        Self::Conflict {
            message: message.into(),
            details,
        }
    }

    pub fn internal(message: impl Into<String>, details: Value) -> Self {
        Self::Internal {
            message: message.into(),
            details,
        }
    }

    /// HTTP status this error maps to.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation { .. } => StatusCode::BAD_REQUEST,
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::Conflict { .. } => StatusCode::CONFLICT,
            Self::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Converts the error into its response body.
    ///
    /// Internal errors are reduced to a generic message with empty details.
    pub fn to_body(&self) -> ErrorBody {
        match self {
            Self::Validation { message, details } => ErrorBody {
                error: message.clone(),
                code: "validation_error",
                details: details.clone(),
            },
            Self::NotFound { message, details } => ErrorBody {
                error: message.clone(),
                code: "not_found",
                details: details.clone(),
            },
            Self::Conflict { message, details } => ErrorBody {
                error: message.clone(),
                code: "conflict",
                details: details.clone(),
            },
            Self::Internal { .. } => ErrorBody {
                error: "Server error".to_string(),
                code: "internal_error",
                details: json!({}),
            },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if let Self::Internal { message, details } = &self {
            tracing::error!(%message, %details, "Request failed");
        }

        (self.status_code(), Json(self.to_body())).into_response()
    }
}

impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        AppError::internal("Database error", json!({ "reason": e.to_string() }))
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::bad_request(
            "Invalid JSON body",
            json!({ "reason": rejection.body_text() }),
        )
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut fields = Map::new();

        for (field, errs) in errors.field_errors() {
            let messages: Vec<String> = errs
                .iter()
                .map(|e| match &e.message {
                    Some(message) => message.to_string(),
                    None => e.code.to_string(),
                })
                .collect();
            fields.insert(to_camel_case(&field), json!(messages));
        }

        AppError::bad_request("Validation failed", json!({ "fields": fields }))
    }
}

/// Maps a Rust field name to the camelCase name used on the wire.
fn to_camel_case(field: &str) -> String {
    let mut out = String::with_capacity(field.len());
    let mut upper_next = false;

    for c in field.chars() {
        if c == '_' {
            upper_next = true;
        } else if upper_next {
            out.push(c.to_ascii_uppercase());
            upper_next = false;
        } else {
            out.push(c);
        }
    }

    out
}
