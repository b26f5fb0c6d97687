//! Generation filters chosen by the user.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// Problem space the idea should come from.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum Domain {
    #[default]
    Any,
    Tech,
    Creative,
    Business,
    Lifestyle,
}

impl Domain {
    pub fn label(&self) -> &'static str {
        match self {
            Domain::Any => "Surprise Me",
            Domain::Tech => "Tech & AI",
            Domain::Creative => "Creative Arts",
            Domain::Business => "Startup & Biz",
            Domain::Lifestyle => "Lifestyle",
        }
    }
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum Complexity {
    Simple,
    #[default]
    Moderate,
    Advanced,
}

impl Complexity {
    pub fn label(&self) -> &'static str {
        match self {
            Complexity::Simple => "Simple",
            Complexity::Moderate => "Moderate",
            Complexity::Advanced => "Advanced",
        }
    }
}

/// How long the user is willing to spend building it.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum TimeCommitment {
    Weekend,
    #[default]
    Month,
    LongTerm,
}

impl TimeCommitment {
    pub fn label(&self) -> &'static str {
        match self {
            TimeCommitment::Weekend => "Weekend Hack",
            TimeCommitment::Month => "One Month Build",
            TimeCommitment::LongTerm => "Legacy Project",
        }
    }
}

/// The full filter selection sent with a generation request.
///
/// Defaults to `{any, moderate, month}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct IdeaFilters {
    pub domain: Domain,
    pub complexity: Complexity,
    pub time: TimeCommitment,
}

impl IdeaFilters {
    pub fn new(domain: Domain, complexity: Complexity, time: TimeCommitment) -> Self {
        Self {
            domain,
            complexity,
            time,
        }
    }
}
