//! Outbound integrations for Spark.
//!
//! Currently a single gateway: the Gemini REST API.

pub mod gemini_api_agent;
pub mod prompts;

pub use gemini_api_agent::GeminiApiAgent;
