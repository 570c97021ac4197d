//! Link creation, lookup, listing and soft deletion.

use std::sync::Arc;

use crate::domain::entities::{Link, LinkTotals, NewLink};
use crate::domain::repositories::{InsertOutcome, LinkRepository};
use crate::error::AppError;
use crate::utils::code_generator::{
    DEFAULT_CODE_LENGTH, MAX_CODE_LENGTH, MIN_CODE_LENGTH, generate_code,
};
use crate::utils::link_validator::validate_link_input;
use serde_json::json;

/// Service for managing short links.
///
/// Validates input, assigns generated codes and maps store outcomes to
/// [`AppError`] variants. Only active links are ever returned.
pub struct LinkService {
    link_repository: Arc<dyn LinkRepository>,
    code_length: usize,
}

impl LinkService {
    /// Creates a new link service generating codes of the default length.
    pub fn new(link_repository: Arc<dyn LinkRepository>) -> Self {
        Self {
            link_repository,
            code_length: DEFAULT_CODE_LENGTH,
        }
    }

    /// Sets the length of generated codes, clamped to 6..=8 so generated
    /// codes always pass custom-code validation.
    pub fn with_code_length(mut self, code_length: usize) -> Self {
        self.code_length = code_length.clamp(MIN_CODE_LENGTH, MAX_CODE_LENGTH);
        self
    }

    /// Creates a short link.
    ///
    /// When `custom_code` is `None` a random code is generated. A collision is
    /// reported to the caller as a conflict; the service never retries.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if the URL or custom code is invalid.
    /// Returns [`AppError::Conflict`] if an active link already uses the code.
    /// Returns [`AppError::Internal`] on store errors.
    pub async fn create_link(
        &self,
        target_url: Option<String>,
        custom_code: Option<String>,
    ) -> Result<Link, AppError> {
        let input = validate_link_input(target_url, custom_code)?;

        let code = input
            .code
            .unwrap_or_else(|| generate_code(self.code_length));

        let new_link = NewLink {
            code: code.clone(),
            target_url: input.target_url,
        };

        match self.link_repository.insert(new_link).await? {
            InsertOutcome::Created(link) => {
                tracing::info!(code = %link.code, id = link.id, "Link created");
                Ok(link)
            }
            InsertOutcome::Conflict => {
                tracing::debug!(%code, "Code already taken");
                Err(AppError::conflict(
                    "Code already exists",
                    json!({ "code": code }),
                ))
            }
        }
    }

    /// Retrieves the active link for a code.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no active link has this code.
    /// Returns [`AppError::Internal`] on store errors.
    pub async fn get_link(&self, code: &str) -> Result<Link, AppError> {
        self.link_repository
            .find_active_by_code(code)
            .await?
            .ok_or_else(|| AppError::not_found("Not found", json!({ "code": code })))
    }

    /// Lists active links, newest first.
    ///
    /// When `filter` is non-blank only links whose code or target URL contains
    /// it (case-insensitively) are returned.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on store errors.
    pub async fn list_links(&self, filter: Option<&str>) -> Result<Vec<Link>, AppError> {
        let links = self.link_repository.list_active().await?;

        match filter.map(str::trim).filter(|q| !q.is_empty()) {
            Some(query) => Ok(links.into_iter().filter(|l| l.matches(query)).collect()),
            None => Ok(links),
        }
    }

    /// Soft-deletes the active link for a code.
    ///
    /// Deleting an already deleted code is reported as not found.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no active link has this code.
    /// Returns [`AppError::Internal`] on store errors.
    pub async fn delete_link(&self, code: &str) -> Result<(), AppError> {
        let link = self.get_link(code).await?;

        if !self.link_repository.soft_delete(link.id).await? {
            // Deleted concurrently between lookup and update.
            return Err(AppError::not_found("Not found", json!({ "code": code })));
        }

        tracing::info!(%code, id = link.id, "Link deleted");
        Ok(())
    }

    /// Returns aggregate link and click counts.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on store errors.
    pub async fn totals(&self) -> Result<LinkTotals, AppError> {
        self.link_repository.totals().await
    }

    /// Checks that the store is reachable.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] if the store cannot be queried.
    pub async fn health_check(&self) -> Result<(), AppError> {
        self.link_repository.ping().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repositories::MockLinkRepository;
    use chrono::Utc;
    use mockall::predicate::eq;

    fn create_test_link(id: i64, code: &str, url: &str) -> Link {
        Link::new(id, code.to_string(), url.to_string(), Utc::now())
    }

    fn service(mock: MockLinkRepository) -> LinkService {
        LinkService::new(Arc::new(mock))
    }

    #[tokio::test]
    async fn test_create_link_generates_code() {
        let mut mock_repo = MockLinkRepository::new();

        mock_repo
            .expect_insert()
            .withf(|new_link| {
                new_link.code.len() == 6
                    && new_link.code.chars().all(|c| c.is_ascii_alphanumeric())
                    && new_link.target_url == "https://example.com/docs"
            })
            .times(1)
            .returning(|new_link| {
                Ok(InsertOutcome::Created(Link::new(
                    1,
                    new_link.code,
                    new_link.target_url,
                    Utc::now(),
                )))
            });

        let link = service(mock_repo)
            .create_link(Some("https://example.com/docs".to_string()), None)
            .await
            .unwrap();

        assert_eq!(link.code.len(), 6);
        assert_eq!(link.target_url, "https://example.com/docs");
        assert_eq!(link.total_clicks, 0);
    }

    #[tokio::test]
    async fn test_create_link_uses_configured_code_length() {
        let mut mock_repo = MockLinkRepository::new();

        mock_repo
            .expect_insert()
            .withf(|new_link| new_link.code.len() == 8)
            .times(1)
            .returning(|new_link| {
                Ok(InsertOutcome::Created(Link::new(
                    1,
                    new_link.code,
                    new_link.target_url,
                    Utc::now(),
                )))
            });

        let link = service(mock_repo)
            .with_code_length(8)
            .create_link(Some("https://example.com".to_string()), None)
            .await
            .unwrap();

        assert_eq!(link.code.len(), 8);
    }

    #[tokio::test]
    async fn test_code_length_is_clamped() {
        for (requested, expected) in [(0, 6), (3, 6), (7, 7), (12, 8)] {
            let mut mock_repo = MockLinkRepository::new();
            mock_repo
                .expect_insert()
                .withf(move |new_link| new_link.code.len() == expected)
                .times(1)
                .returning(|new_link| {
                    Ok(InsertOutcome::Created(Link::new(
                        1,
                        new_link.code,
                        new_link.target_url,
                        Utc::now(),
                    )))
                });

            let link = service(mock_repo)
                .with_code_length(requested)
                .create_link(Some("https://example.com".to_string()), None)
                .await
                .unwrap();

            assert_eq!(link.code.len(), expected, "requested {requested}");
        }
    }

    #[tokio::test]
    async fn test_create_link_with_custom_code() {
        let mut mock_repo = MockLinkRepository::new();

        let created = create_test_link(10, "Promo24", "https://example.com");
        mock_repo
            .expect_insert()
            .withf(|new_link| new_link.code == "Promo24")
            .times(1)
            .returning(move |_| Ok(InsertOutcome::Created(created.clone())));

        let link = service(mock_repo)
            .create_link(
                Some("https://example.com".to_string()),
                Some(" Promo24 ".to_string()),
            )
            .await
            .unwrap();

        assert_eq!(link.code, "Promo24");
    }

    #[tokio::test]
    async fn test_create_link_conflict_is_not_retried() {
        let mut mock_repo = MockLinkRepository::new();

        mock_repo
            .expect_insert()
            .times(1)
            .returning(|_| Ok(InsertOutcome::Conflict));

        let result = service(mock_repo)
            .create_link(
                Some("https://example.com".to_string()),
                Some("taken123".to_string()),
            )
            .await;

        assert!(matches!(result.unwrap_err(), AppError::Conflict { .. }));
    }

    #[tokio::test]
    async fn test_create_link_generated_code_conflict_is_not_retried() {
        let mut mock_repo = MockLinkRepository::new();

        mock_repo
            .expect_insert()
            .times(1)
            .returning(|_| Ok(InsertOutcome::Conflict));

        let result = service(mock_repo)
            .create_link(Some("https://example.com".to_string()), None)
            .await;

        assert!(matches!(result.unwrap_err(), AppError::Conflict { .. }));
    }

    #[tokio::test]
    async fn test_create_link_invalid_input_skips_store() {
        let mut mock_repo = MockLinkRepository::new();
        mock_repo.expect_insert().times(0);

        let result = service(mock_repo)
            .create_link(Some("not-a-url".to_string()), None)
            .await;

        assert!(matches!(result.unwrap_err(), AppError::Validation { .. }));
    }

    #[tokio::test]
    async fn test_create_link_store_failure() {
        let mut mock_repo = MockLinkRepository::new();

        mock_repo
            .expect_insert()
            .times(1)
            .returning(|_| Err(AppError::internal("Database error", json!({}))));

        let result = service(mock_repo)
            .create_link(Some("https://example.com".to_string()), None)
            .await;

        assert!(matches!(result.unwrap_err(), AppError::Internal { .. }));
    }

    #[tokio::test]
    async fn test_get_link_found() {
        let mut mock_repo = MockLinkRepository::new();

        let link = create_test_link(5, "abc123", "https://example.com");
        mock_repo
            .expect_find_active_by_code()
            .withf(|code| code == "abc123")
            .times(1)
            .returning(move |_| Ok(Some(link.clone())));

        let link = service(mock_repo).get_link("abc123").await.unwrap();

        assert_eq!(link.id, 5);
    }

    #[tokio::test]
    async fn test_get_link_not_found() {
        let mut mock_repo = MockLinkRepository::new();

        mock_repo
            .expect_find_active_by_code()
            .times(1)
            .returning(|_| Ok(None));

        let result = service(mock_repo).get_link("missing1").await;

        assert!(matches!(result.unwrap_err(), AppError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_list_links_filters_by_code_or_url() {
        let mut mock_repo = MockLinkRepository::new();

        let links = vec![
            create_test_link(3, "Docs01", "https://example.com/docs"),
            create_test_link(2, "blog22", "https://blog.example.org"),
            create_test_link(1, "rust99", "https://rust-lang.org"),
        ];
        mock_repo
            .expect_list_active()
            .times(3)
            .returning(move || Ok(links.clone()));

        let service = service(mock_repo);

        let all = service.list_links(None).await.unwrap();
        assert_eq!(all.len(), 3);

        let by_code = service.list_links(Some("DOCS")).await.unwrap();
        assert_eq!(by_code.len(), 1);
        assert_eq!(by_code[0].code, "Docs01");

        let blank = service.list_links(Some("   ")).await.unwrap();
        assert_eq!(blank.len(), 3);
    }

    #[tokio::test]
    async fn test_delete_link_success() {
        let mut mock_repo = MockLinkRepository::new();

        let link = create_test_link(7, "del001", "https://example.com");
        mock_repo
            .expect_find_active_by_code()
            .times(1)
            .returning(move |_| Ok(Some(link.clone())));
        mock_repo
            .expect_soft_delete()
            .with(eq(7))
            .times(1)
            .returning(|_| Ok(true));

        assert!(service(mock_repo).delete_link("del001").await.is_ok());
    }

    #[tokio::test]
    async fn test_delete_link_not_found() {
        let mut mock_repo = MockLinkRepository::new();

        mock_repo
            .expect_find_active_by_code()
            .times(1)
            .returning(|_| Ok(None));
        mock_repo.expect_soft_delete().times(0);

        let result = service(mock_repo).delete_link("nothere").await;

        assert!(matches!(result.unwrap_err(), AppError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_delete_link_lost_race() {
        let mut mock_repo = MockLinkRepository::new();

        let link = create_test_link(7, "del002", "https://example.com");
        mock_repo
            .expect_find_active_by_code()
            .times(1)
            .returning(move |_| Ok(Some(link.clone())));
        mock_repo
            .expect_soft_delete()
            .times(1)
            .returning(|_| Ok(false));

        let result = service(mock_repo).delete_link("del002").await;

        assert!(matches!(result.unwrap_err(), AppError::NotFound { .. }));
    }
}
