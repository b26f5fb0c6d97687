//! Compact, URL-safe encoding of an idea for stateless sharing.
//!
//! The token is URL-safe base64 (no padding) of a JSON projection with
//! one-letter keys. Only the core fields travel: `id` and `timestamp` are
//! reassigned on decode, the deep dive is dropped and at most
//! [`MAX_SHARED_SOURCES`] sources are kept.

use base64::Engine;
use base64::engine::general_purpose::{STANDARD as BASE64_STANDARD, URL_SAFE_NO_PAD};
use serde::{Deserialize, Serialize};

use crate::error::{Result, SparkError};
use crate::idea::{Idea, IdeaDraft, RoadmapStep, Source};

/// Sources beyond this index are not shared.
pub const MAX_SHARED_SOURCES: usize = 3;

#[derive(Debug, Serialize, Deserialize)]
struct ShareableIdea {
    /// title
    t: String,
    /// description
    d: String,
    /// targetAudience
    a: String,
    /// whyItMatters
    w: String,
    /// roadmap
    r: Vec<ShareableStep>,
    /// sources
    #[serde(default, skip_serializing_if = "Option::is_none")]
    s: Option<Vec<ShareableSource>>,
}

#[derive(Debug, Serialize, Deserialize)]
struct ShareableStep {
    s: String,
    d: String,
}

#[derive(Debug, Serialize, Deserialize)]
struct ShareableSource {
    t: String,
    u: String,
}

impl From<&Idea> for ShareableIdea {
    fn from(idea: &Idea) -> Self {
        let sources = (!idea.sources.is_empty()).then(|| {
            idea.sources
                .iter()
                .take(MAX_SHARED_SOURCES)
                .map(|src| ShareableSource {
                    t: src.title.clone(),
                    u: src.uri.clone(),
                })
                .collect()
        });

        ShareableIdea {
            t: idea.title.clone(),
            d: idea.description.clone(),
            a: idea.target_audience.clone(),
            w: idea.why_it_matters.clone(),
            r: idea
                .roadmap
                .iter()
                .map(|step| ShareableStep {
                    s: step.step.clone(),
                    d: step.detail.clone(),
                })
                .collect(),
            s: sources,
        }
    }
}

impl From<ShareableIdea> for IdeaDraft {
    fn from(shared: ShareableIdea) -> Self {
        IdeaDraft {
            title: shared.t,
            description: shared.d,
            target_audience: shared.a,
            why_it_matters: shared.w,
            roadmap: shared
                .r
                .into_iter()
                .map(|step| RoadmapStep::new(step.s, step.d))
                .collect(),
            sources: shared
                .s
                .unwrap_or_default()
                .into_iter()
                .map(|src| Source::new(src.t, src.u))
                .collect(),
        }
    }
}

/// Encodes an idea into a URL-safe token.
///
/// Deterministic: ideas with the same shared fields yield the same token.
pub fn encode(idea: &Idea) -> Result<String> {
    let json = serde_json::to_vec(&ShareableIdea::from(idea))?;
    Ok(URL_SAFE_NO_PAD.encode(json))
}

/// Decodes a share token into a fresh, unsaved idea.
///
/// Returns `None` for anything that is not a well-formed token; a bad token
/// means "no shared idea", not an error.
pub fn decode(token: &str) -> Option<Idea> {
    match decode_draft(token) {
        Ok(draft) => Some(Idea::shared_from_draft(draft)),
        Err(err) => {
            tracing::debug!("Ignoring malformed share token: {}", err);
            None
        }
    }
}

fn decode_draft(token: &str) -> Result<IdeaDraft> {
    // Accept both alphabets and tokens with or without padding.
    let mut base64: String = token
        .trim()
        .chars()
        .map(|c| match c {
            '-' => '+',
            '_' => '/',
            other => other,
        })
        .collect();
    while base64.len() % 4 != 0 {
        base64.push('=');
    }

    let bytes = BASE64_STANDARD
        .decode(base64.as_bytes())
        .map_err(|e| SparkError::Serialization {
            format: "base64".to_string(),
            message: e.to_string(),
        })?;

    let json = String::from_utf8(bytes).map_err(|e| SparkError::Serialization {
        format: "UTF-8".to_string(),
        message: e.to_string(),
    })?;

    let shared: ShareableIdea = serde_json::from_str(&json)?;
    Ok(shared.into())
}
