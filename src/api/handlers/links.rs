//! Handlers for link management endpoints (create, list, get, delete).

use axum::{
    Json,
    extract::{Path, Query, State, rejection::JsonRejection},
    http::StatusCode,
};

use crate::api::dto::link::{CreateLinkRequest, DeleteLinkResponse, LinkResponse, ListLinksQuery};
use crate::error::AppError;
use crate::state::AppState;

/// Creates a short link.
///
/// # Endpoint
///
/// `POST /api/links`
///
/// # Request Body
///
/// ```json
/// {
///   "targetUrl": "https://example.com/docs",
///   "code": "Docs2024"   // optional, 6-8 letters or digits
/// }
/// ```
///
/// # Response Codes
///
/// - **201 Created**: the stored link
/// - **400 Bad Request**: every invalid or wrongly typed field listed in
///   `details.fields`, or a body that is not a JSON object
/// - **409 Conflict**: the code is already used by an active link
/// - **500 Internal Server Error**: store failure
pub async fn create_link_handler(
    State(state): State<AppState>,
    payload: Result<Json<CreateLinkRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<LinkResponse>), AppError> {
    let Json(payload) = payload?;
    let (target_url, code) = payload.into_fields()?;

    let link = state.link_service.create_link(target_url, code).await?;

    Ok((StatusCode::CREATED, Json(link.into())))
}

/// Lists active links, newest first.
///
/// # Endpoint
///
/// `GET /api/links?q=docs`
///
/// `q` is optional and filters by code or target URL, ignoring case.
pub async fn list_links_handler(
    State(state): State<AppState>,
    Query(query): Query<ListLinksQuery>,
) -> Result<Json<Vec<LinkResponse>>, AppError> {
    let links = state.link_service.list_links(query.q.as_deref()).await?;

    Ok(Json(links.into_iter().map(LinkResponse::from).collect()))
}

/// Returns one active link.
///
/// # Endpoint
///
/// `GET /api/links/{code}`
///
/// # Errors
///
/// Returns 404 Not Found if the code is unknown or soft-deleted.
pub async fn get_link_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<LinkResponse>, AppError> {
    let link = state.link_service.get_link(&code).await?;

    Ok(Json(link.into()))
}

/// Soft-deletes a short link by setting its `deleted_at` timestamp.
///
/// # Endpoint
///
/// `DELETE /api/links/{code}`
///
/// # Behavior
///
/// - The row is **not** removed; `deleted_at` is set to now.
/// - Subsequent lookups, listings and redirects treat the code as absent.
/// - The code becomes available for a new link.
///
/// # Errors
///
/// Returns 404 Not Found if the link doesn't exist or is already deleted.
pub async fn delete_link_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<DeleteLinkResponse>, AppError> {
    state.link_service.delete_link(&code).await?;

    Ok(Json(DeleteLinkResponse { ok: true }))
}
