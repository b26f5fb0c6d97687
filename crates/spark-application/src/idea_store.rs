//! Persistent store for the history and favorites collections.
//!
//! The store owns both lists in memory and rewrites a whole collection
//! through the repository after every mutation. Persistence is best effort:
//! read failures start from an empty list and write failures are logged.

use std::sync::Arc;

use spark_core::idea::{Idea, IdeaCollection, IdeaCollectionRepository};

/// Maximum number of ideas kept in history.
pub const HISTORY_LIMIT: usize = 20;

pub struct IdeaStore {
    repository: Arc<dyn IdeaCollectionRepository>,
    history: Vec<Idea>,
    favorites: Vec<Idea>,
}

impl IdeaStore {
    /// Loads both collections. Missing or unreadable entries start empty.
    pub async fn load(repository: Arc<dyn IdeaCollectionRepository>) -> Self {
        let history = Self::load_collection(repository.as_ref(), IdeaCollection::History).await;
        let favorites =
            Self::load_collection(repository.as_ref(), IdeaCollection::Favorites).await;

        tracing::debug!(
            "Idea store loaded: {} in history, {} favorites",
            history.len(),
            favorites.len()
        );

        Self {
            repository,
            history,
            favorites,
        }
    }

    async fn load_collection(
        repository: &dyn IdeaCollectionRepository,
        collection: IdeaCollection,
    ) -> Vec<Idea> {
        match repository.load(collection).await {
            Ok(Some(ideas)) => ideas,
            Ok(None) => Vec::new(),
            Err(e) => {
                tracing::warn!(
                    "Failed to load {}, starting empty: {}",
                    collection.storage_key(),
                    e
                );
                Vec::new()
            }
        }
    }

    async fn persist(&self, collection: IdeaCollection) {
        let ideas = match collection {
            IdeaCollection::History => &self.history,
            IdeaCollection::Favorites => &self.favorites,
        };
        if let Err(e) = self.repository.save(collection, ideas).await {
            tracing::warn!("Failed to persist {}: {}", collection.storage_key(), e);
        }
    }

    /// History, newest first.
    pub fn history(&self) -> &[Idea] {
        &self.history
    }

    /// Favorites, most recently bookmarked first.
    pub fn favorites(&self) -> &[Idea] {
        &self.favorites
    }

    pub fn is_favorite(&self, id: &str) -> bool {
        self.favorites.iter().any(|idea| idea.id == id)
    }

    /// Looks an idea up in history, then favorites.
    pub fn find(&self, id: &str) -> Option<&Idea> {
        self.history
            .iter()
            .chain(self.favorites.iter())
            .find(|idea| idea.id == id)
    }

    /// Prepends to history, evicting the oldest entries past [`HISTORY_LIMIT`].
    pub async fn append_to_history(&mut self, idea: Idea) {
        self.history.retain(|existing| !existing.same_identity(&idea));
        self.history.insert(0, idea);
        self.history.truncate(HISTORY_LIMIT);
        self.persist(IdeaCollection::History).await;
    }

    /// Removes the idea from favorites if present, otherwise prepends it.
    ///
    /// Returns whether the idea is a favorite afterwards.
    pub async fn toggle_favorite(&mut self, idea: &Idea) -> bool {
        let before = self.favorites.len();
        self.favorites.retain(|existing| !existing.same_identity(idea));
        let added = self.favorites.len() == before;
        if added {
            self.favorites.insert(0, idea.clone());
        }
        self.persist(IdeaCollection::Favorites).await;
        added
    }

    /// Replaces every copy of `updated` (matched by id) in both collections,
    /// keeping positions. Collections without a match are not rewritten.
    pub async fn update_everywhere(&mut self, updated: &Idea) {
        for collection in IdeaCollection::ALL {
            let ideas = match collection {
                IdeaCollection::History => &mut self.history,
                IdeaCollection::Favorites => &mut self.favorites,
            };
            let mut touched = false;
            for idea in ideas.iter_mut().filter(|idea| idea.same_identity(updated)) {
                *idea = updated.clone();
                touched = true;
            }
            if touched {
                self.persist(collection).await;
            }
        }
    }

    /// Returns whether an entry was removed.
    pub async fn remove_from_history(&mut self, id: &str) -> bool {
        self.remove(IdeaCollection::History, id).await
    }

    /// Returns whether an entry was removed.
    pub async fn remove_from_favorites(&mut self, id: &str) -> bool {
        self.remove(IdeaCollection::Favorites, id).await
    }

    async fn remove(&mut self, collection: IdeaCollection, id: &str) -> bool {
        let ideas = match collection {
            IdeaCollection::History => &mut self.history,
            IdeaCollection::Favorites => &mut self.favorites,
        };
        let before = ideas.len();
        ideas.retain(|idea| idea.id != id);
        let removed = ideas.len() != before;
        self.persist(collection).await;
        removed
    }
}
