//! Core data models for the bookmark menu.
//!
//! These types represent the raw bookmark records produced by a search
//! provider, the reconciled menu entries derived from them, and the
//! document shape persisted to the storage slot.

use std::fmt;

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::icons;
use crate::identity;

/// Raw record produced by a bookmark-search provider before reconciliation.
#[derive(Debug, Clone, Deserialize)]
pub struct BookmarkRecord {
    pub title: String,
    pub url: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// One reconciled menu item.
///
/// `identity` is the SHA-256 hex of the URL and serves as the primary key;
/// `domain` is the URL's host component, used only as a grouping key for
/// favicon propagation. Two entries with the same URL always carry the same
/// identity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenuEntry {
    pub identity: String,
    pub domain: String,
    pub title: String,
    pub url: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub orphan: bool,
    #[serde(default = "default_favicon")]
    pub favicon: String,
    #[serde(default)]
    pub order: u32,
}

fn default_favicon() -> String {
    icons::BOOKMARK_DEFAULT.to_string()
}

impl MenuEntry {
    /// Build an entry from raw fields, deriving identity and domain.
    ///
    /// Fails if `url` is not parseable or has no host component. Defaults:
    /// not orphaned, placeholder favicon, order 0.
    pub fn new(title: &str, url: &str, tags: Vec<String>) -> Result<Self> {
        Ok(Self {
            identity: identity::entry_identity(url),
            domain: identity::extract_domain(url)?,
            title: title.to_string(),
            url: url.to_string(),
            tags,
            orphan: false,
            favicon: default_favicon(),
            order: 0,
        })
    }

    pub fn with_favicon(mut self, favicon: impl Into<String>) -> Self {
        self.favicon = favicon.into();
        self
    }

    pub fn with_order(mut self, order: u32) -> Self {
        self.order = order;
        self
    }
}

impl fmt::Display for MenuEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{ identity: {}, title: {} }}", self.identity, self.title)
    }
}

/// The document persisted to the storage slot: `{ items, count }`.
///
/// The menu's `name` is deliberately absent — the slot holds a single
/// global menu.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenuDocument {
    #[serde(default)]
    pub items: Vec<MenuEntry>,
    #[serde(default)]
    pub count: usize,
}
