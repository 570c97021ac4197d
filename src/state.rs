//! Shared application state injected into every handler.

use std::sync::Arc;

use crate::application::services::{LinkService, RedirectService};
use crate::domain::repositories::LinkRepository;

/// Handles built once at startup and cloned into each request.
///
/// Both services share the same repository, and through it the same
/// connection pool.
#[derive(Clone)]
pub struct AppState {
    pub link_service: Arc<LinkService>,
    pub redirect_service: Arc<RedirectService>,
}

impl AppState {
    /// Builds the services around a single repository handle.
    pub fn new(link_repository: Arc<dyn LinkRepository>, code_length: usize) -> Self {
        let link_service =
            Arc::new(LinkService::new(link_repository.clone()).with_code_length(code_length));
        let redirect_service = Arc::new(RedirectService::new(link_repository));

        Self {
            link_service,
            redirect_service,
        }
    }
}
