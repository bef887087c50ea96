//! Bookmark-search providers.
//!
//! A [`BookmarkSource`] answers a keyword query with raw bookmark records.
//! Providers do not deduplicate — the returned sequence may be empty and may
//! contain the same URL more than once; reconciliation handles both.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use async_trait::async_trait;

use crate::models::BookmarkRecord;

/// A keyword query against a bookmark source.
#[derive(Debug, Clone)]
pub struct BookmarkQuery {
    pub query: String,
    pub sort: SortKey,
}

impl BookmarkQuery {
    /// Keyword query with the default title sort.
    pub fn keyword(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            sort: SortKey::Title,
        }
    }
}

/// Result ordering for a [`BookmarkQuery`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    /// Ascending by title; ties keep provider order.
    #[default]
    Title,
    /// Provider order, untouched.
    Unsorted,
}

/// A searchable source of bookmark records.
///
/// `search` either resolves with the matching records or fails once — there
/// is no retry or timeout at this layer. Callers decide what a failure
/// means; [`Menu::reconcile`](crate::menu::Menu::reconcile) logs it and
/// abandons the pass.
#[async_trait]
pub trait BookmarkSource: Send + Sync {
    /// Provider instance name, for logs and status output.
    fn name(&self) -> &str;

    /// Search for records matching the query.
    async fn search(&self, query: &BookmarkQuery) -> Result<Vec<BookmarkRecord>>;
}

/// Keep records whose title, url, or any tag contains the keyword
/// (case-insensitive; an empty keyword keeps everything), then apply the
/// requested sort.
fn filter_and_sort(mut records: Vec<BookmarkRecord>, query: &BookmarkQuery) -> Vec<BookmarkRecord> {
    let needle = query.query.to_lowercase();
    if !needle.is_empty() {
        records.retain(|record| {
            record.title.to_lowercase().contains(&needle)
                || record.url.to_lowercase().contains(&needle)
                || record.tags.iter().any(|t| t.to_lowercase().contains(&needle))
        });
    }

    match query.sort {
        SortKey::Title => records.sort_by(|a, b| a.title.cmp(&b.title)),
        SortKey::Unsorted => {}
    }

    records
}

/// Provider backed by a JSON bookmark export file: an array of
/// `{ title, url, tags }` records.
pub struct ExportFileSource {
    name: String,
    path: PathBuf,
}

impl ExportFileSource {
    pub fn new(name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
        }
    }
}

#[async_trait]
impl BookmarkSource for ExportFileSource {
    fn name(&self) -> &str {
        &self.name
    }

    async fn search(&self, query: &BookmarkQuery) -> Result<Vec<BookmarkRecord>> {
        if !self.path.exists() {
            bail!("bookmark export does not exist: {}", self.path.display());
        }

        let raw = std::fs::read_to_string(&self.path)
            .with_context(|| format!("failed to read bookmark export: {}", self.path.display()))?;
        let records: Vec<BookmarkRecord> = serde_json::from_str(&raw)
            .with_context(|| format!("failed to parse bookmark export: {}", self.path.display()))?;

        Ok(filter_and_sort(records, query))
    }
}

/// Provider over a fixed record set, for tests and embedding.
pub struct StaticSource {
    records: Vec<BookmarkRecord>,
}

impl StaticSource {
    pub fn new(records: Vec<BookmarkRecord>) -> Self {
        Self { records }
    }
}

#[async_trait]
impl BookmarkSource for StaticSource {
    fn name(&self) -> &str {
        "static"
    }

    async fn search(&self, query: &BookmarkQuery) -> Result<Vec<BookmarkRecord>> {
        Ok(filter_and_sort(self.records.clone(), query))
    }
}
