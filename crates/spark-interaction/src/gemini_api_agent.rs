//! GeminiApiAgent - Direct REST API implementation of the idea gateway.
//!
//! Both calls ask Gemini for JSON constrained by a response schema. Idea
//! generation additionally enables Google Search grounding and turns the
//! grounding chunks into the idea's sources.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use spark_core::SparkError;
use spark_core::config::GeminiConfig;
use spark_core::error::Result;
use spark_core::idea::{
    Idea, IdeaDraft, IdeaFilters, IdeaGateway, RoadmapStep, Source, TacticalDeepDive,
};
use spark_core::secret::SecretService;

use crate::prompts;

pub const BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/models";

/// Gateway implementation that talks to the Gemini HTTP API.
#[derive(Clone)]
pub struct GeminiApiAgent {
    client: Client,
    api_key: String,
    model: String,
    base_url: String,
    search_grounding: bool,
}

impl GeminiApiAgent {
    /// Creates a new agent with the provided API key and model.
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            model: model.into(),
            base_url: BASE_URL.to_string(),
            search_grounding: true,
        }
    }

    /// Builds an agent from the Gemini section of `secret.json`.
    pub fn from_config(config: &GeminiConfig) -> Result<Self> {
        if !config.has_api_key() {
            return Err(SparkError::config(
                "Gemini API key is empty; set it in secret.json or GEMINI_API_KEY",
            ));
        }

        let agent = Self::new(config.api_key.clone(), config.model());
        Ok(match &config.base_url {
            Some(base_url) => agent.with_base_url(base_url.clone()),
            None => agent,
        })
    }

    /// Loads configuration through a secret service.
    ///
    /// Fails with a config error when no API key is configured.
    pub async fn try_from_secrets(service: &dyn SecretService) -> Result<Self> {
        let secrets = service.load_secrets().await?;
        let gemini = secrets.gemini.ok_or_else(|| {
            SparkError::config("Gemini configuration not found in secret.json")
        })?;
        Self::from_config(&gemini)
    }

    /// Overrides the REST endpoint (without the trailing `/{model}:generateContent`).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Enables or disables Google Search grounding for idea generation.
    pub fn with_search_grounding(mut self, enabled: bool) -> Self {
        self.search_grounding = enabled;
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn request(prompt: String, schema: Value, tools: Option<Vec<Value>>) -> GenerateContentRequest {
        GenerateContentRequest {
            contents: vec![Content {
                role: "user".to_string(),
                parts: vec![Part { text: prompt }],
            }],
            tools,
            generation_config: GenerationConfig {
                response_mime_type: "application/json".to_string(),
                response_schema: schema,
            },
        }
    }

    async fn send_request(&self, body: &GenerateContentRequest) -> Result<GenerateContentResponse> {
        let url = format!(
            "{}/{model}:generateContent?key={api_key}",
            self.base_url,
            model = self.model,
            api_key = self.api_key
        );

        let response = self
            .client
            .post(url)
            .json(body)
            .send()
            .await
            .map_err(|err| {
                // reqwest errors embed the URL, which carries the key.
                SparkError::gateway(
                    None,
                    format!("Gemini API request failed: {}", err.without_url()),
                )
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to read Gemini error body".to_string());
            return Err(map_http_error(status, body_text));
        }

        response.json().await.map_err(|err| {
            SparkError::invalid_response(format!(
                "Failed to parse Gemini response: {}",
                err.without_url()
            ))
        })
    }
}

#[async_trait]
impl IdeaGateway for GeminiApiAgent {
    async fn generate_idea(&self, filters: &IdeaFilters) -> Result<IdeaDraft> {
        let prompt = prompts::idea_prompt(filters)?;
        let tools = self
            .search_grounding
            .then(|| vec![json!({ "googleSearch": {} })]);
        let request = Self::request(prompt, idea_schema(), tools);

        tracing::debug!(
            "Requesting idea from {} (domain={}, complexity={}, time={})",
            self.model,
            filters.domain,
            filters.complexity,
            filters.time
        );
        let response = self.send_request(&request).await?;

        let sources = grounding_sources(&response);
        let payload: GeneratedIdea = parse_json_text(&response)?;
        let draft = payload.into_draft(sources);

        if draft.roadmap.is_empty() {
            return Err(SparkError::invalid_response("Gemini returned an empty roadmap"));
        }
        if let Some(index) = draft.incomplete_step() {
            return Err(SparkError::invalid_response(format!(
                "Gemini returned an incomplete roadmap step at position {}",
                index + 1
            )));
        }

        tracing::info!("Generated idea '{}'", draft.title);
        Ok(draft)
    }

    async fn tactical_deep_dive(&self, idea: &Idea) -> Result<TacticalDeepDive> {
        let prompt = prompts::deep_dive_prompt(idea)?;
        let request = Self::request(prompt, deep_dive_schema(), None);

        tracing::debug!("Requesting deep dive for idea {}", idea.id);
        let response = self.send_request(&request).await?;
        parse_json_text(&response)
    }
}

fn idea_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "title": { "type": "STRING" },
            "description": { "type": "STRING" },
            "targetAudience": { "type": "STRING" },
            "whyItMatters": { "type": "STRING" },
            "roadmap": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "step": { "type": "STRING" },
                        "detail": { "type": "STRING" }
                    },
                    "required": ["step", "detail"]
                }
            }
        },
        "required": ["title", "description", "targetAudience", "whyItMatters", "roadmap"]
    })
}

fn deep_dive_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "prn": { "type": "STRING", "description": "Technical resource summary" },
            "actionableItems": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "task": { "type": "STRING" },
                        "toolSuggestion": { "type": "STRING" }
                    },
                    "required": ["task", "toolSuggestion"]
                }
            }
        },
        "required": ["prn", "actionableItems"]
    })
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tools: Option<Vec<Value>>,
    generation_config: GenerationConfig,
}

#[derive(Serialize)]
struct Content {
    role: String,
    parts: Vec<Part>,
}

#[derive(Serialize)]
struct Part {
    text: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    response_mime_type: String,
    response_schema: Value,
}

#[derive(Deserialize)]
struct GenerateContentResponse {
    candidates: Option<Vec<Candidate>>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    content: Option<ContentResponse>,
    grounding_metadata: Option<GroundingMetadata>,
}

#[derive(Deserialize)]
struct ContentResponse {
    #[serde(default)]
    parts: Vec<PartResponse>,
}

#[derive(Deserialize)]
struct PartResponse {
    text: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct GroundingMetadata {
    #[serde(default)]
    grounding_chunks: Vec<GroundingChunk>,
}

#[derive(Deserialize)]
struct GroundingChunk {
    web: Option<WebChunk>,
}

#[derive(Deserialize)]
struct WebChunk {
    title: Option<String>,
    uri: Option<String>,
}

/// Idea fields as Gemini returns them.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeneratedIdea {
    title: String,
    description: String,
    target_audience: String,
    why_it_matters: String,
    roadmap: Vec<RoadmapStep>,
}

impl GeneratedIdea {
    fn into_draft(self, sources: Vec<Source>) -> IdeaDraft {
        IdeaDraft {
            title: self.title,
            description: self.description,
            target_audience: self.target_audience,
            why_it_matters: self.why_it_matters,
            roadmap: self.roadmap,
            sources,
        }
    }
}

#[derive(Deserialize)]
struct ErrorWrapper {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: Option<String>,
    status: Option<String>,
}

fn first_candidate(response: &GenerateContentResponse) -> Option<&Candidate> {
    response.candidates.as_ref().and_then(|c| c.first())
}

fn extract_text_response(response: &GenerateContentResponse) -> Result<String> {
    first_candidate(response)
        .and_then(|candidate| candidate.content.as_ref())
        .and_then(|content| content.parts.iter().find_map(|part| part.text.clone()))
        .ok_or_else(|| {
            SparkError::invalid_response("Gemini API returned no text in the response candidates")
        })
}

fn parse_json_text<T: serde::de::DeserializeOwned>(response: &GenerateContentResponse) -> Result<T> {
    let text = extract_text_response(response)?;
    serde_json::from_str(strip_code_fence(&text)).map_err(|e| {
        SparkError::invalid_response(format!("Gemini returned malformed JSON: {}", e))
    })
}

/// Removes a surrounding Markdown code fence, if the model added one.
fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let rest = rest.strip_prefix("json").unwrap_or(rest);
    rest.strip_suffix("```").unwrap_or(rest).trim()
}

/// Web grounding chunks with a URI, titled `Source` when the title is missing.
fn grounding_sources(response: &GenerateContentResponse) -> Vec<Source> {
    first_candidate(response)
        .and_then(|candidate| candidate.grounding_metadata.as_ref())
        .map(|metadata| {
            metadata
                .grounding_chunks
                .iter()
                .filter_map(|chunk| chunk.web.as_ref())
                .filter_map(|web| {
                    let uri = web.uri.clone().filter(|uri| !uri.is_empty())?;
                    let title = web
                        .title
                        .clone()
                        .filter(|title| !title.is_empty())
                        .unwrap_or_else(|| "Source".to_string());
                    Some(Source::new(title, uri))
                })
                .collect()
        })
        .unwrap_or_default()
}

fn map_http_error(status: StatusCode, body: String) -> SparkError {
    let message = serde_json::from_str::<ErrorWrapper>(&body)
        .map(|wrapper| {
            let status_text = wrapper.error.status.unwrap_or_default();
            let msg = wrapper.error.message.unwrap_or_else(|| body.clone());
            if status_text.is_empty() {
                msg
            } else {
                format!("{status_text}: {msg}")
            }
        })
        .unwrap_or_else(|_| body.clone());

    SparkError::gateway(Some(status.as_u16()), message)
}
