//! Domain layer for Spark.
//!
//! Holds the idea model, the compact share codec, configuration models and
//! the traits that the infrastructure and interaction crates implement.

pub mod config;
pub mod error;
pub mod idea;
pub mod secret;
pub mod share;

// Re-export common error type
pub use error::SparkError;
