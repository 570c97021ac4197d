//! Link entity representing a short code mapped to a target URL.

use chrono::{DateTime, Utc};

/// A short link with its click counters.
///
/// A link with `deleted_at` set is soft-deleted: the row is kept but it is
/// invisible to lookups, listings and redirects.
#[derive(Debug, Clone, PartialEq)]
pub struct Link {
    pub id: i64,
    pub code: String,
    pub target_url: String,
    pub total_clicks: i64,
    pub last_clicked: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

impl Link {
    /// Creates a fresh, never-clicked, active link.
    pub fn new(id: i64, code: String, target_url: String, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            code,
            target_url,
            total_clicks: 0,
            last_clicked: None,
            created_at,
            deleted_at: None,
        }
    }

    /// Returns true if the link has been soft-deleted.
    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }

    /// Returns true if `query` occurs in the code or target URL, ignoring case.
    pub fn matches(&self, query: &str) -> bool {
        let query = query.to_lowercase();
        self.code.to_lowercase().contains(&query) || self.target_url.to_lowercase().contains(&query)
    }
}

/// Input data for inserting a new link.
///
/// Both fields are already validated; the store fills in the rest.
#[derive(Debug, Clone, PartialEq)]
pub struct NewLink {
    pub code: String,
    pub target_url: String,
}

/// Aggregate counts over the links table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LinkTotals {
    pub active: i64,
    pub deleted: i64,
    /// Sum of `total_clicks` over active links.
    pub clicks: i64,
}
