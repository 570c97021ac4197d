//! In-process implementation of link repository.

use async_trait::async_trait;
use chrono::Utc;
use std::sync::{Mutex, MutexGuard};

use crate::domain::entities::{Link, LinkTotals, NewLink};
use crate::domain::repositories::{InsertOutcome, LinkRepository};
use crate::error::AppError;

#[derive(Debug, Default)]
struct Table {
    next_id: i64,
    rows: Vec<Link>,
}

/// Link repository backed by a `Vec` behind a mutex.
///
/// Mirrors the PostgreSQL semantics: codes are unique among active rows,
/// deletes only stamp `deleted_at`, and visits update counters under the lock
/// so concurrent increments are never lost. Nothing is persisted.
#[derive(Debug, Default)]
pub struct MemoryLinkRepository {
    table: Mutex<Table>,
}

impl MemoryLinkRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns every stored row, including soft-deleted ones, in insertion order.
    pub fn all_rows(&self) -> Vec<Link> {
        self.lock().rows.clone()
    }

    fn lock(&self) -> MutexGuard<'_, Table> {
        // Every mutation completes before its guard drops, so a poisoned table is still consistent.
        self.table.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[async_trait]
impl LinkRepository for MemoryLinkRepository {
    async fn insert(&self, new_link: NewLink) -> Result<InsertOutcome, AppError> {
        let mut table = self.lock();

        if table
            .rows
            .iter()
            .any(|l| !l.is_deleted() && l.code == new_link.code)
        {
            return Ok(InsertOutcome::Conflict);
        }

        table.next_id += 1;
        let link = Link::new(table.next_id, new_link.code, new_link.target_url, Utc::now());
        table.rows.push(link.clone());

        Ok(InsertOutcome::Created(link))
    }

    async fn find_active_by_code(&self, code: &str) -> Result<Option<Link>, AppError> {
        Ok(self
            .lock()
            .rows
            .iter()
            .find(|l| !l.is_deleted() && l.code == code)
            .cloned())
    }

    async fn list_active(&self) -> Result<Vec<Link>, AppError> {
        let mut links: Vec<Link> = self
            .lock()
            .rows
            .iter()
            .filter(|l| !l.is_deleted())
            .cloned()
            .collect();

        links.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(links)
    }

    async fn soft_delete(&self, id: i64) -> Result<bool, AppError> {
        let mut table = self.lock();

        match table
            .rows
            .iter_mut()
            .find(|l| l.id == id && !l.is_deleted())
        {
            Some(link) => {
                link.deleted_at = Some(Utc::now());
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn record_visit(&self, id: i64) -> Result<bool, AppError> {
        let mut table = self.lock();

        match table
            .rows
            .iter_mut()
            .find(|l| l.id == id && !l.is_deleted())
        {
            Some(link) => {
                link.total_clicks += 1;
                link.last_clicked = Some(Utc::now());
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn totals(&self) -> Result<LinkTotals, AppError> {
        let table = self.lock();

        Ok(table
            .rows
            .iter()
            .fold(LinkTotals::default(), |mut totals, link| {
                if link.is_deleted() {
                    totals.deleted += 1;
                } else {
                    totals.active += 1;
                    totals.clicks += link.total_clicks;
                }
                totals
            }))
    }

    async fn ping(&self) -> Result<(), AppError> {
        Ok(())
    }
}
