//! Idea domain models.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Id prefix marking an idea that was decoded from a share token.
pub const SHARED_ID_PREFIX: &str = "shared-";

/// One step of an idea's roadmap. Steps are kept in execution order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoadmapStep {
    pub step: String,
    pub detail: String,
}

impl RoadmapStep {
    pub fn new(step: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            step: step.into(),
            detail: detail.into(),
        }
    }
}

/// A web page the gateway grounded the idea on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Source {
    pub title: String,
    pub uri: String,
}

impl Source {
    pub fn new(title: impl Into<String>, uri: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            uri: uri.into(),
        }
    }
}

/// A "day one" task with a concrete tool suggestion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TacticalItem {
    pub task: String,
    pub tool_suggestion: String,
}

/// Tactical breakdown of an idea, fetched at most once per idea.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TacticalDeepDive {
    /// Project resource notes: a short summary of the stack or resources needed.
    pub prn: String,
    pub actionable_items: Vec<TacticalItem>,
}

/// Idea fields as produced by the generation gateway.
///
/// Identity (`id`, `timestamp`) is assigned by the caller through
/// [`Idea::from_draft`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IdeaDraft {
    pub title: String,
    pub description: String,
    pub target_audience: String,
    pub why_it_matters: String,
    pub roadmap: Vec<RoadmapStep>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sources: Vec<Source>,
}

impl IdeaDraft {
    /// Returns the first roadmap step with an empty `step` or `detail`, if any.
    pub fn incomplete_step(&self) -> Option<usize> {
        self.roadmap
            .iter()
            .position(|s| s.step.trim().is_empty() || s.detail.trim().is_empty())
    }
}

/// The generated project recommendation.
///
/// Every field except `tactical_deep_dive` is write-once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Idea {
    pub id: String,
    pub title: String,
    pub description: String,
    pub target_audience: String,
    pub why_it_matters: String,
    pub roadmap: Vec<RoadmapStep>,
    /// Creation time in epoch milliseconds.
    pub timestamp: i64,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sources: Vec<Source>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tactical_deep_dive: Option<TacticalDeepDive>,
}

impl Idea {
    /// Creates an idea from gateway output with a fresh UUID and the current time.
    pub fn from_draft(draft: IdeaDraft) -> Self {
        Self::with_identity(draft, Uuid::new_v4().to_string())
    }

    /// Creates an idea decoded from a share token.
    ///
    /// The id carries [`SHARED_ID_PREFIX`] so it can never collide with a
    /// generated one.
    pub fn shared_from_draft(draft: IdeaDraft) -> Self {
        Self::with_identity(draft, format!("{SHARED_ID_PREFIX}{}", Uuid::new_v4()))
    }

    fn with_identity(draft: IdeaDraft, id: String) -> Self {
        Self {
            id,
            title: draft.title,
            description: draft.description,
            target_audience: draft.target_audience,
            why_it_matters: draft.why_it_matters,
            roadmap: draft.roadmap,
            timestamp: chrono::Utc::now().timestamp_millis(),
            sources: draft.sources,
            tactical_deep_dive: None,
        }
    }

    /// Equality by id, used for deduplication across collections.
    pub fn same_identity(&self, other: &Idea) -> bool {
        self.id == other.id
    }

    pub fn has_deep_dive(&self) -> bool {
        self.tactical_deep_dive.is_some()
    }

    /// True when the idea was opened from a share token.
    pub fn is_shared(&self) -> bool {
        self.id.starts_with(SHARED_ID_PREFIX)
    }

    /// Returns a copy augmented with the deep dive.
    ///
    /// An idea that already carries a deep dive keeps it.
    pub fn with_deep_dive(&self, deep_dive: TacticalDeepDive) -> Self {
        let mut updated = self.clone();
        if updated.tactical_deep_dive.is_none() {
            updated.tactical_deep_dive = Some(deep_dive);
        }
        updated
    }

    /// Plain-text rendering for copying to the clipboard.
    pub fn to_plain_text(&self) -> String {
        let roadmap = self
            .roadmap
            .iter()
            .enumerate()
            .map(|(i, r)| format!("{}. {}: {}", i + 1, r.step, r.detail))
            .collect::<Vec<_>>()
            .join("\n");

        format!(
            "💡 Spark Idea: {}\n\n{}\n\nTarget Audience: {}\n\nRoadmap:\n{}",
            self.title, self.description, self.target_audience, roadmap
        )
    }
}
