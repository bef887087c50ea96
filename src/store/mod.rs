//! Storage abstraction for the persisted menu.
//!
//! The [`MenuStore`] trait is a single-value-per-key slot store: `load`
//! returns the raw serialized document for a key, `save` is a full
//! overwrite. The menu never partially updates its slot — every save
//! rewrites the whole document.
//!
//! Implementations must be `Send + Sync` to work with async runtimes.

pub mod memory;
pub mod sqlite;

use anyhow::Result;
use async_trait::async_trait;

pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

/// Abstract slot store backing a [`Menu`](crate::menu::Menu).
#[async_trait]
pub trait MenuStore: Send + Sync {
    /// Read the value stored under `key`, if any.
    async fn load(&self, key: &str) -> Result<Option<String>>;

    /// Overwrite the value stored under `key`.
    async fn save(&self, key: &str, value: &str) -> Result<()>;
}
