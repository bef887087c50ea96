//! The menu aggregate and its reconciliation engine.
//!
//! A [`Menu`] holds the ordered entry collection, loads itself from an
//! injected [`MenuStore`] slot, and reconciles against freshly searched
//! bookmark records: every existing entry starts a pass presumed orphaned,
//! survivors are un-marked by identity, and the sweep happens at save time.
//! Manual `order` and propagated favicons survive re-sync because the merge
//! never touches them.

use std::sync::Arc;

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::{debug, warn};

use crate::models::{MenuDocument, MenuEntry};
use crate::source::{BookmarkQuery, BookmarkSource};
use crate::store::MenuStore;

/// Storage-slot key for the persisted menu document.
pub const MENU_SLOT_KEY: &str = "menu";

/// Separator inside reorder tokens; everything after the first segment is
/// auxiliary and ignored.
pub const TOKEN_SEPARATOR: char = '_';

/// Borrowed view serialized on save: `{ items, count }`, name excluded.
#[derive(Serialize)]
struct MenuDocumentRef<'a> {
    items: &'a [MenuEntry],
    count: usize,
}

/// The ordered, deduplicated, persisted collection of menu entries.
///
/// `count` caches the item total and is authoritative only after a save;
/// during a reconcile pass it may briefly disagree with `items.len()` while
/// orphans await pruning.
pub struct Menu {
    name: String,
    items: Vec<MenuEntry>,
    count: usize,
    store: Arc<dyn MenuStore>,
}

impl Menu {
    /// Load the menu from its storage slot, or start empty if the slot is
    /// absent or blank. The previous in-memory state, if any, is replaced
    /// wholesale — there is no incremental load.
    pub async fn load(name: impl Into<String>, store: Arc<dyn MenuStore>) -> Result<Self> {
        let mut menu = Self {
            name: name.into(),
            items: Vec::new(),
            count: 0,
            store,
        };

        if let Some(raw) = menu.store.load(MENU_SLOT_KEY).await? {
            if !raw.is_empty() {
                let doc: MenuDocument =
                    serde_json::from_str(&raw).context("failed to parse persisted menu")?;
                menu.items = doc.items;
                menu.count = doc.count;
            }
        }

        Ok(menu)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn items(&self) -> &[MenuEntry] {
        &self.items
    }

    pub fn count(&self) -> usize {
        self.count
    }

    /// Reconcile the menu against the records a source returns for
    /// `keyword`, then save.
    ///
    /// An empty menu bootstraps: every record is appended as-is, with no
    /// identity check, so duplicate URLs in the source become duplicate
    /// entries on this path. A populated menu runs mark-and-sweep: all
    /// entries are first marked orphaned, each record then either un-marks
    /// its match (overwriting title, url, tags — order and favicon are left
    /// alone) or is appended as new, and save prunes whatever stayed marked.
    ///
    /// A search failure abandons the pass: it is logged and swallowed, the
    /// items and the persisted slot stay untouched, and the call still
    /// resolves `Ok`. A record whose URL does not parse is an error — the
    /// merge path does not guard against malformed input.
    pub async fn reconcile(&mut self, source: &dyn BookmarkSource, keyword: &str) -> Result<()> {
        let query = BookmarkQuery::keyword(keyword);
        let records = match source.search(&query).await {
            Ok(records) => records,
            Err(error) => {
                warn!(source = source.name(), keyword, %error, "bookmark search failed, pass abandoned");
                return Ok(());
            }
        };

        debug!(keyword, records = records.len(), items = self.count, "reconciling");

        if self.count == 0 {
            for record in &records {
                let entry = MenuEntry::new(&record.title, &record.url, record.tags.clone())?;
                self.insert(entry);
            }
        } else {
            for item in &mut self.items {
                item.orphan = true;
            }
            for record in &records {
                let entry = MenuEntry::new(&record.title, &record.url, record.tags.clone())?;
                self.merge(entry);
            }
        }

        self.save().await
    }

    /// Append an entry unconditionally.
    pub fn insert(&mut self, entry: MenuEntry) {
        self.items.push(entry);
        self.count += 1;
    }

    /// Merge an entry by identity: overwrite title, url, tags, and orphan on
    /// the existing item, or append if no item matches. Manual `order` and
    /// the favicon of an existing item are never touched here.
    pub fn merge(&mut self, entry: MenuEntry) {
        match self
            .items
            .iter_mut()
            .find(|item| item.identity == entry.identity)
        {
            Some(existing) => {
                existing.title = entry.title;
                existing.url = entry.url;
                existing.tags = entry.tags;
                existing.orphan = entry.orphan;
            }
            None => self.insert(entry),
        }
    }

    /// Overwrite the favicon of every item sharing the probe's domain, then
    /// save. Matching nothing still saves — callers must expect the
    /// prune/sort side effect either way.
    pub async fn update_favicon(&mut self, probe: &MenuEntry) -> Result<()> {
        for item in self
            .items
            .iter_mut()
            .filter(|item| item.domain == probe.domain)
        {
            item.favicon = probe.favicon.clone();
        }
        self.save().await
    }

    /// Apply a new manual ordering, then save.
    ///
    /// Each token carries an identity as its first `_`-separated segment;
    /// the item matching token i gets `order = i`. Unknown identities leave
    /// their items' prior order intact.
    pub async fn reorder(&mut self, tokens: &[String]) -> Result<()> {
        for (rank, token) in tokens.iter().enumerate() {
            let identity = token.split(TOKEN_SEPARATOR).next().unwrap_or(token);
            if let Some(item) = self.items.iter_mut().find(|item| item.identity == identity) {
                item.order = rank as u32;
            }
        }
        self.save().await
    }

    /// Find an item by identity. O(n) scan, no side effects.
    pub fn find_by_id(&self, identity: &str) -> Option<&MenuEntry> {
        self.items.iter().find(|item| item.identity == identity)
    }

    /// Finalize and persist: prune orphans, stable-sort ascending by
    /// `order`, recompute the count, and overwrite the storage slot.
    ///
    /// Idempotent — saving twice with no intervening mutation writes the
    /// same bytes both times. Store write failures propagate.
    pub async fn save(&mut self) -> Result<()> {
        self.items.retain(|item| !item.orphan);
        self.items.sort_by_key(|item| item.order);
        self.count = self.items.len();

        let payload = serde_json::to_string(&MenuDocumentRef {
            items: &self.items,
            count: self.count,
        })?;
        self.store.save(MENU_SLOT_KEY, &payload).await
    }
}
