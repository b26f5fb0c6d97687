//! Application controller for Spark.
//!
//! Coordinates the generation gateway, the idea store and the idea currently
//! on display. The display follows `Idle -> Loading -> Displayed -> Idle`; a
//! deep dive in flight is a flag on the displayed idea, not a separate state.
//!
//! Deep dives in flight are also tracked by idea id, so closing or
//! re-selecting an idea never lets a second request through.
//!
//! State lives behind an async mutex that is never held across a gateway
//! call, so a request issued while another is pending sees it as pending.

use std::collections::HashSet;
use std::sync::Arc;

use tokio::sync::Mutex;
use url::Url;

use spark_core::error::Result;
use spark_core::idea::{Idea, IdeaCollectionRepository, IdeaFilters, IdeaGateway};
use spark_core::share;

use crate::idea_store::IdeaStore;

/// Notice shown to the user when generation fails.
pub const GENERATION_FAILURE_NOTICE: &str =
    "The spark flickered out... please check your connection and try again.";

/// The idea on display and its per-idea flags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayedIdea {
    pub idea: Idea,
    /// Opened from a share link rather than generated or picked from a collection.
    pub shared: bool,
    /// A deep-dive request for this idea is in flight.
    pub deep_dive_pending: bool,
}

impl DisplayedIdea {
    fn new(idea: Idea, shared: bool) -> Self {
        Self {
            idea,
            shared,
            deep_dive_pending: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DisplayState {
    #[default]
    Idle,
    Loading,
    Displayed(DisplayedIdea),
}

impl DisplayState {
    pub fn idea(&self) -> Option<&Idea> {
        match self {
            DisplayState::Displayed(displayed) => Some(&displayed.idea),
            _ => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, DisplayState::Loading)
    }

    pub fn is_shared(&self) -> bool {
        matches!(self, DisplayState::Displayed(d) if d.shared)
    }
}

/// Result of a deep-dive request that did not fail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeepDiveOutcome {
    /// The deep dive was fetched and merged everywhere.
    Completed(Idea),
    /// The displayed idea already has a deep dive; nothing was requested.
    AlreadyPresent,
    /// A request for the displayed idea is already in flight.
    InFlight,
    /// No idea is on display.
    NothingDisplayed,
}

/// Outcome of opening a page URL that may carry a share token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SharedLinkOpen {
    /// The decoded idea, now on display.
    pub idea: Option<Idea>,
    /// The URL with the share parameter removed.
    pub cleaned_url: Url,
}

struct ControllerState {
    store: IdeaStore,
    display: DisplayState,
    filters: IdeaFilters,
    notice: Option<String>,
    pending_generations: usize,
    deep_dives_in_flight: HashSet<String>,
}

pub struct SparkController {
    gateway: Arc<dyn IdeaGateway>,
    state: Mutex<ControllerState>,
}

impl SparkController {
    /// Creates a controller over an already loaded store.
    pub fn new(gateway: Arc<dyn IdeaGateway>, store: IdeaStore) -> Self {
        Self {
            gateway,
            state: Mutex::new(ControllerState {
                store,
                display: DisplayState::Idle,
                filters: IdeaFilters::default(),
                notice: None,
                pending_generations: 0,
                deep_dives_in_flight: HashSet::new(),
            }),
        }
    }

    /// Loads the store from `repository` and creates a controller.
    pub async fn load(
        gateway: Arc<dyn IdeaGateway>,
        repository: Arc<dyn IdeaCollectionRepository>,
    ) -> Self {
        Self::new(gateway, IdeaStore::load(repository).await)
    }

    // ============================================================================
    // Queries
    // ============================================================================

    pub async fn filters(&self) -> IdeaFilters {
        self.state.lock().await.filters
    }

    pub async fn set_filters(&self, filters: IdeaFilters) {
        self.state.lock().await.filters = filters;
    }

    /// Snapshot of the display state.
    pub async fn view(&self) -> DisplayState {
        self.state.lock().await.display.clone()
    }

    pub async fn current_idea(&self) -> Option<Idea> {
        self.state.lock().await.display.idea().cloned()
    }

    pub async fn history(&self) -> Vec<Idea> {
        self.state.lock().await.store.history().to_vec()
    }

    pub async fn favorites(&self) -> Vec<Idea> {
        self.state.lock().await.store.favorites().to_vec()
    }

    /// Whether the displayed idea is in favorites.
    pub async fn is_bookmarked(&self) -> bool {
        let state = self.state.lock().await;
        state
            .display
            .idea()
            .is_some_and(|idea| state.store.is_favorite(&idea.id))
    }

    /// Returns and clears the pending user-visible notice.
    pub async fn take_notice(&self) -> Option<String> {
        self.state.lock().await.notice.take()
    }

    /// Share link for the displayed idea.
    pub async fn share_url(&self, base: &Url) -> Result<Option<Url>> {
        match self.current_idea().await {
            Some(idea) => share::shareable_url(base, &idea).map(Some),
            None => Ok(None),
        }
    }

    // ============================================================================
    // Generation
    // ============================================================================

    /// Requests a new idea for the current filters.
    ///
    /// On success the idea is displayed and prepended to history. On failure
    /// the display returns to idle, a notice is recorded and history is left
    /// untouched.
    pub async fn generate(&self) -> Result<Idea> {
        let filters = {
            let mut state = self.state.lock().await;
            state.display = DisplayState::Loading;
            state.notice = None;
            state.pending_generations += 1;
            state.filters
        };

        let result = self.gateway.generate_idea(&filters).await;

        let mut state = self.state.lock().await;
        state.pending_generations = state.pending_generations.saturating_sub(1);
        match result {
            Ok(draft) => {
                let idea = Idea::from_draft(draft);
                tracing::info!("Displaying generated idea {}", idea.id);
                state.display = DisplayState::Displayed(DisplayedIdea::new(idea.clone(), false));
                state.store.append_to_history(idea.clone()).await;
                Ok(idea)
            }
            Err(e) => {
                tracing::warn!("Idea generation failed: {}", e);
                if state.display.is_loading() && state.pending_generations == 0 {
                    state.display = DisplayState::Idle;
                }
                state.notice = Some(GENERATION_FAILURE_NOTICE.to_string());
                Err(e)
            }
        }
    }

    /// Fetches the tactical deep dive for the displayed idea.
    ///
    /// Accepted once per idea: a no-op while a request is in flight or once a
    /// deep dive exists. A failed request releases the latch so the user can
    /// try again.
    pub async fn request_deep_dive(&self) -> Result<DeepDiveOutcome> {
        let idea = {
            let mut guard = self.state.lock().await;
            let state = &mut *guard;
            let DisplayState::Displayed(displayed) = &mut state.display else {
                return Ok(DeepDiveOutcome::NothingDisplayed);
            };
            if displayed.idea.has_deep_dive() {
                return Ok(DeepDiveOutcome::AlreadyPresent);
            }
            if !state.deep_dives_in_flight.insert(displayed.idea.id.clone()) {
                displayed.deep_dive_pending = true;
                return Ok(DeepDiveOutcome::InFlight);
            }
            displayed.deep_dive_pending = true;
            displayed.idea.clone()
        };

        let result = self.gateway.tactical_deep_dive(&idea).await;

        let mut guard = self.state.lock().await;
        let state = &mut *guard;
        state.deep_dives_in_flight.remove(&idea.id);
        if let DisplayState::Displayed(displayed) = &mut state.display
            && displayed.idea.same_identity(&idea)
        {
            displayed.deep_dive_pending = false;
        }

        match result {
            Ok(deep_dive) => {
                // Merge into the freshest copy; a deep dive already stored wins.
                let current = state.store.find(&idea.id).unwrap_or(&idea);
                let updated = current.with_deep_dive(deep_dive);
                if let DisplayState::Displayed(displayed) = &mut state.display
                    && displayed.idea.same_identity(&updated)
                {
                    displayed.idea = updated.clone();
                }
                state.store.update_everywhere(&updated).await;
                tracing::info!("Deep dive merged into idea {}", updated.id);
                Ok(DeepDiveOutcome::Completed(updated))
            }
            Err(e) => {
                tracing::warn!("Deep dive for idea {} failed: {}", idea.id, e);
                Err(e)
            }
        }
    }

    // ============================================================================
    // Display transitions
    // ============================================================================

    /// Displays the idea carried by a share token, tagged as shared.
    ///
    /// The idea is not added to history. A malformed token leaves the display
    /// untouched and returns `None`.
    pub async fn open_shared(&self, token: &str) -> Option<Idea> {
        let idea = share::decode(token)?;
        let mut state = self.state.lock().await;
        state.display = DisplayState::Displayed(DisplayedIdea::new(idea.clone(), true));
        state.notice = None;
        tracing::info!("Displaying shared idea {}", idea.id);
        Some(idea)
    }

    /// Consumes the share parameter of a page URL.
    ///
    /// Returns `None` if the URL carries no share parameter. Otherwise the
    /// cleaned URL is returned whether or not the token decoded.
    pub async fn open_shared_link(&self, url: &Url) -> Option<SharedLinkOpen> {
        let token = share::shared_token(url)?;
        let idea = self.open_shared(&token).await;
        Some(SharedLinkOpen {
            idea,
            cleaned_url: share::clear_shared_idea_from_url(url),
        })
    }

    /// Displays an idea from history or favorites.
    pub async fn select(&self, id: &str) -> Option<Idea> {
        let mut state = self.state.lock().await;
        let idea = state.store.find(id)?.clone();
        let mut displayed = DisplayedIdea::new(idea.clone(), false);
        displayed.deep_dive_pending = state.deep_dives_in_flight.contains(id);
        state.display = DisplayState::Displayed(displayed);
        Some(idea)
    }

    /// Returns to idle and forgets the shared tag.
    pub async fn close(&self) {
        self.state.lock().await.display = DisplayState::Idle;
    }

    // ============================================================================
    // Collection mutations
    // ============================================================================

    /// Toggles the displayed idea in favorites.
    ///
    /// Returns whether it is bookmarked afterwards, or `None` if nothing is
    /// displayed.
    pub async fn toggle_bookmark(&self) -> Option<bool> {
        let mut state = self.state.lock().await;
        let idea = state.display.idea()?.clone();
        Some(state.store.toggle_favorite(&idea).await)
    }

    /// Removes an idea from history only; favorites and the display are untouched.
    pub async fn remove_from_history(&self, id: &str) -> bool {
        self.state.lock().await.store.remove_from_history(id).await
    }

    /// Removes an idea from favorites only; history and the display are untouched.
    pub async fn remove_from_favorites(&self, id: &str) -> bool {
        self.state.lock().await.store.remove_from_favorites(id).await
    }
}
