//! In-memory idea collection repository.
//!
//! Keeps each collection as the serialized JSON string it would have on
//! disk, so data passes through the same encoding as the file backend.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use spark_core::error::Result;
use spark_core::idea::{Idea, IdeaCollection, IdeaCollectionRepository};

#[derive(Default)]
pub struct InMemoryIdeaRepository {
    entries: Mutex<HashMap<&'static str, String>>,
}

impl InMemoryIdeaRepository {
    pub fn new() -> Self {
        Self::default()
    }

    // The map only holds complete strings, so a poisoned lock is still usable.
    fn entries(&self) -> MutexGuard<'_, HashMap<&'static str, String>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Seeds a raw stored value, e.g. to simulate corrupted storage.
    pub fn insert_raw(&self, collection: IdeaCollection, raw: impl Into<String>) {
        self.entries().insert(collection.storage_key(), raw.into());
    }

    /// Returns the raw stored value for a collection.
    pub fn raw(&self, collection: IdeaCollection) -> Option<String> {
        self.entries().get(collection.storage_key()).cloned()
    }
}

#[async_trait]
impl IdeaCollectionRepository for InMemoryIdeaRepository {
    async fn load(&self, collection: IdeaCollection) -> Result<Option<Vec<Idea>>> {
        let raw = self.raw(collection);
        match raw {
            Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
            None => Ok(None),
        }
    }

    async fn save(&self, collection: IdeaCollection, ideas: &[Idea]) -> Result<()> {
        let raw = serde_json::to_string(ideas)?;
        self.entries().insert(collection.storage_key(), raw);
        Ok(())
    }
}
