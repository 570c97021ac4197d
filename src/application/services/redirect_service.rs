//! Resolution of short codes to redirect targets.

use std::sync::Arc;

use crate::domain::repositories::LinkRepository;
use crate::error::AppError;
use crate::utils::code_generator::is_reserved;

/// Outcome of resolving a requested code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// Active link found and the visit recorded.
    Redirect { target_url: String },
    /// No active link has this code.
    NotFound,
    /// Reserved path segment; the store was not consulted.
    PassThrough,
}

/// Resolves short codes and records visits.
///
/// # Flow
///
/// 1. Reserved codes pass through untouched
/// 2. Active link is looked up by exact code
/// 3. Click counter and last-click time are updated in one store statement
/// 4. Target URL is returned for the redirect
///
/// The visit is recorded before [`Resolution::Redirect`] is returned.
pub struct RedirectService {
    link_repository: Arc<dyn LinkRepository>,
}

impl RedirectService {
    pub fn new(link_repository: Arc<dyn LinkRepository>) -> Self {
        Self { link_repository }
    }

    /// Resolves `code` to a redirect target.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on store errors, including a failed click update.
    pub async fn resolve(&self, code: &str) -> Result<Resolution, AppError> {
        if is_reserved(code) {
            tracing::debug!(%code, "Reserved path, skipping resolution");
            return Ok(Resolution::PassThrough);
        }

        let Some(link) = self.link_repository.find_active_by_code(code).await? else {
            return Ok(Resolution::NotFound);
        };

        if !self.link_repository.record_visit(link.id).await? {
            // Soft-deleted after the lookup; the link was active when requested.
            tracing::debug!(%code, id = link.id, "Visit not recorded, link no longer active");
        }

        Ok(Resolution::Redirect {
            target_url: link.target_url,
        })
    }
}
