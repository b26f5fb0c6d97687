//! Idea domain models, filters, and the traits at the storage and generation seams.

mod filters;
mod gateway;
mod model;
mod repository;

pub use filters::{Complexity, Domain, IdeaFilters, TimeCommitment};
pub use gateway::IdeaGateway;
pub use model::{
    Idea, IdeaDraft, RoadmapStep, SHARED_ID_PREFIX, Source, TacticalDeepDive, TacticalItem,
};
pub use repository::{IdeaCollection, IdeaCollectionRepository};

#[cfg(test)]
pub(crate) use model::fixtures;
