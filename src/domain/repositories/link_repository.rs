//! Repository trait for short link data access.

use crate::domain::entities::{Link, LinkTotals, NewLink};
use crate::error::AppError;
use async_trait::async_trait;

/// Result of an insert attempt that reached the store.
///
/// A uniqueness violation on `code` is an expected outcome, not a failure, so it
/// is reported as [`InsertOutcome::Conflict`]. Any other store error is an
/// `Err(AppError::Internal)`.
#[derive(Debug, Clone, PartialEq)]
pub enum InsertOutcome {
    Created(Link),
    Conflict,
}

/// Repository interface for managing short links.
///
/// Every read except [`LinkRepository::totals`] only sees active links
/// (`deleted_at IS NULL`). Soft-deleted rows stay in the store.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgLinkRepository`] - PostgreSQL implementation
/// - [`crate::infrastructure::persistence::MemoryLinkRepository`] - In-process implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LinkRepository: Send + Sync {
    /// Inserts a new active link with zeroed click counters.
    ///
    /// # Returns
    ///
    /// - `Ok(InsertOutcome::Created(link))` with the stored record
    /// - `Ok(InsertOutcome::Conflict)` if an active link already uses the code
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn insert(&self, new_link: NewLink) -> Result<InsertOutcome, AppError>;

    /// Finds the active link with exactly this code.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn find_active_by_code(&self, code: &str) -> Result<Option<Link>, AppError>;

    /// Lists all active links, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn list_active(&self) -> Result<Vec<Link>, AppError>;

    /// Soft-deletes a link by setting `deleted_at = now()`.
    ///
    /// Returns `Ok(true)` if an active link was deleted, `Ok(false)` if the id is
    /// unknown or already deleted.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn soft_delete(&self, id: i64) -> Result<bool, AppError>;

    /// Atomically increments `total_clicks` and sets `last_clicked = now()`.
    ///
    /// Returns `Ok(false)` if no active link has this id.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn record_visit(&self, id: i64) -> Result<bool, AppError>;

    /// Counts active and deleted links and sums clicks over active links.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn totals(&self) -> Result<LinkTotals, AppError>;

    /// Verifies the store is reachable.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] if the store cannot be queried.
    async fn ping(&self) -> Result<(), AppError>;
}
