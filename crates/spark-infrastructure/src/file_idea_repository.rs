//! File-backed idea collection repository.
//!
//! Each collection is a pretty-printed JSON array of ideas stored under its
//! storage key: `{data_dir}/spark_history.json` and
//! `{data_dir}/spark_favorites.json`.

use async_trait::async_trait;
use std::path::PathBuf;

use spark_core::SparkError;
use spark_core::error::Result;
use spark_core::idea::{Idea, IdeaCollection, IdeaCollectionRepository};

use crate::paths::SparkPaths;
use crate::storage::AtomicJsonFile;

/// Stores idea collections as JSON files in the Spark data directory.
pub struct FileIdeaRepository {
    paths: SparkPaths,
}

impl FileIdeaRepository {
    /// Creates a repository using the platform data directory.
    pub fn new() -> Self {
        Self {
            paths: SparkPaths::default(),
        }
    }

    /// Creates a repository rooted at `base_path` (for tests and `--data-dir`).
    pub fn with_base_path(base_path: PathBuf) -> Self {
        Self {
            paths: SparkPaths::new(Some(&base_path)),
        }
    }

    fn file(&self, collection: IdeaCollection) -> Result<AtomicJsonFile<Vec<Idea>>> {
        let path = self
            .paths
            .collection_file(collection.storage_key())
            .map_err(|e| SparkError::config(e.to_string()))?;
        Ok(AtomicJsonFile::new(path))
    }
}

impl Default for FileIdeaRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl IdeaCollectionRepository for FileIdeaRepository {
    async fn load(&self, collection: IdeaCollection) -> Result<Option<Vec<Idea>>> {
        let file = self.file(collection)?;
        let ideas = file.load().await?;
        tracing::debug!(
            "Loaded {} ideas from {}",
            ideas.as_ref().map_or(0, Vec::len),
            file.path().display()
        );
        Ok(ideas)
    }

    async fn save(&self, collection: IdeaCollection, ideas: &[Idea]) -> Result<()> {
        let file = self.file(collection)?;
        file.save(ideas).await
    }
}
