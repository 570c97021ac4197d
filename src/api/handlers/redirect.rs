//! Handler for short URL redirect.

use axum::{
    extract::{Path, State},
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use serde_json::json;

use crate::application::services::Resolution;
use crate::error::AppError;
use crate::state::AppState;

/// Redirects a short code to its target URL.
///
/// # Endpoint
///
/// `GET /{code}`
///
/// # Request Flow
///
/// 1. Reserved segments (`healthz`, `api`, `code`) pass through as a plain 404
///    without touching the store
/// 2. Active link is looked up by code
/// 3. Click count and last-click time are updated
/// 4. Return 302 Found with `Location: targetUrl`
///
/// # Errors
///
/// Returns 404 Not Found with a JSON body if the code is unknown or deleted.
pub async fn redirect_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
) -> Result<Response, AppError> {
    match state.redirect_service.resolve(&code).await? {
        Resolution::Redirect { target_url } => {
            let location = HeaderValue::from_str(&target_url).map_err(|e| {
                AppError::internal(
                    "Stored target URL is not a valid header value",
                    json!({ "code": code, "reason": e.to_string() }),
                )
            })?;

            Ok((StatusCode::FOUND, [(header::LOCATION, location)]).into_response())
        }
        Resolution::NotFound => Err(AppError::not_found("Not found", json!({ "code": code }))),
        Resolution::PassThrough => Ok(StatusCode::NOT_FOUND.into_response()),
    }
}
