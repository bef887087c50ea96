//! In-memory [`MenuStore`] implementation for tests and embedding.
//!
//! A `HashMap` behind `std::sync::RwLock`. Futures resolve immediately.

use std::collections::HashMap;
use std::sync::RwLock;

use anyhow::Result;
use async_trait::async_trait;

use super::MenuStore;

/// In-memory slot store.
#[derive(Default)]
pub struct MemoryStore {
    slots: RwLock<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl MenuStore for MemoryStore {
    async fn load(&self, key: &str) -> Result<Option<String>> {
        let slots = self.slots.read().unwrap();
        Ok(slots.get(key).cloned())
    }

    async fn save(&self, key: &str, value: &str) -> Result<()> {
        let mut slots = self.slots.write().unwrap();
        slots.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
