//! Outbound boundary to the generative text service.

use async_trait::async_trait;

use super::filters::IdeaFilters;
use super::model::{Idea, IdeaDraft, TacticalDeepDive};
use crate::error::Result;

/// Produces ideas and deep dives.
///
/// Each call is a single attempt; callers decide whether to try again.
#[async_trait]
pub trait IdeaGateway: Send + Sync {
    /// Generates a new idea for the given filters.
    async fn generate_idea(&self, filters: &IdeaFilters) -> Result<IdeaDraft>;

    /// Produces the tactical breakdown for an existing idea.
    async fn tactical_deep_dive(&self, idea: &Idea) -> Result<TacticalDeepDive>;
}
