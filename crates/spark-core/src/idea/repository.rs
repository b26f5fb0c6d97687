//! Idea collection repository trait.

use async_trait::async_trait;

use super::model::Idea;
use crate::error::Result;

/// The two named collections kept per client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IdeaCollection {
    /// Recently generated ideas, newest first.
    History,
    /// Ideas the user bookmarked, most recently bookmarked first.
    Favorites,
}

impl IdeaCollection {
    pub const ALL: [IdeaCollection; 2] = [IdeaCollection::History, IdeaCollection::Favorites];

    /// Key under which the collection is persisted.
    pub fn storage_key(&self) -> &'static str {
        match self {
            IdeaCollection::History => "spark_history",
            IdeaCollection::Favorites => "spark_favorites",
        }
    }
}

/// Key/value persistence for whole idea collections.
///
/// Implementations always read and write a collection in full.
#[async_trait]
pub trait IdeaCollectionRepository: Send + Sync {
    /// Loads a collection. Returns `Ok(None)` if nothing was ever stored under its key.
    async fn load(&self, collection: IdeaCollection) -> Result<Option<Vec<Idea>>>;

    /// Replaces the stored collection with `ideas`.
    async fn save(&self, collection: IdeaCollection, ideas: &[Idea]) -> Result<()>;
}
