//! Application layer for Spark.
//!
//! Coordinates idea generation, the idea collections and the idea on display.

pub mod idea_store;
pub mod spark_controller;

pub use idea_store::{HISTORY_LIMIT, IdeaStore};
pub use spark_controller::{
    DeepDiveOutcome, DisplayState, DisplayedIdea, GENERATION_FAILURE_NOTICE, SharedLinkOpen,
    SparkController,
};
