use std::collections::HashSet;

use serde_json::{Value, json};
use spark_core::SparkError;
use spark_core::idea::{
    Complexity, Domain, Idea, IdeaDraft, IdeaFilters, IdeaGateway, RoadmapStep, Source,
    TimeCommitment,
};
use spark_interaction::GeminiApiAgent;
use strum::IntoEnumIterator;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const MODEL: &str = "gemini-test";
const GENERATE_PATH: &str = "/gemini-test:generateContent";

fn agent(server: &MockServer) -> GeminiApiAgent {
    GeminiApiAgent::new("test-key", MODEL).with_base_url(server.uri())
}

fn text_response(payload: Value, grounding: Option<Value>) -> Value {
    let mut candidate = json!({
        "content": { "role": "model", "parts": [{ "text": payload.to_string() }] }
    });
    if let Some(grounding) = grounding {
        candidate["groundingMetadata"] = grounding;
    }
    json!({ "candidates": [candidate] })
}

fn idea_payload() -> Value {
    json!({
        "title": "Shift Swap",
        "description": "Lets hourly workers trade shifts without a manager in the loop.",
        "targetAudience": "Cafe and retail staff",
        "whyItMatters": "Shift trades happen over group chats and get lost.",
        "roadmap": [
            { "step": "Interview", "detail": "Talk to five shift leads" },
            { "step": "Prototype", "detail": "Build a shared calendar view" },
            { "step": "Notify", "detail": "Send SMS when a swap is posted" },
            { "step": "Launch", "detail": "Pilot with one cafe" }
        ]
    })
}

async fn mount(server: &MockServer, status: u16, body: Value) {
    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .and(query_param("key", "test-key"))
        .respond_with(ResponseTemplate::new(status).set_body_json(body))
        .expect(1)
        .mount(server)
        .await;
}

async fn request_body(server: &MockServer) -> Value {
    let requests = server.received_requests().await.unwrap();
    serde_json::from_slice(&requests[0].body).unwrap()
}

#[tokio::test]
async fn generate_idea_parses_fields_and_sources() {
    let server = MockServer::start().await;
    let grounding = json!({
        "groundingChunks": [
            { "web": { "title": "Labor stats", "uri": "https://stats.example.com" } },
            { "web": { "uri": "https://blog.example.com" } },
            { "web": { "title": "Dead link", "uri": "" } }
        ]
    });
    mount(&server, 200, text_response(idea_payload(), Some(grounding))).await;

    let filters = IdeaFilters::new(Domain::Tech, Complexity::Simple, TimeCommitment::Weekend);
    let draft = agent(&server).generate_idea(&filters).await.unwrap();

    assert_eq!(draft.title, "Shift Swap");
    assert_eq!(draft.roadmap.len(), 4);
    assert_eq!(draft.roadmap[0], RoadmapStep::new("Interview", "Talk to five shift leads"));
    assert_eq!(
        draft.sources,
        vec![
            Source::new("Labor stats", "https://stats.example.com"),
            Source::new("Source", "https://blog.example.com"),
        ]
    );
}

#[tokio::test]
async fn generate_idea_sends_schema_and_search_tool() {
    let server = MockServer::start().await;
    mount(&server, 200, text_response(idea_payload(), None)).await;

    let filters = IdeaFilters::new(Domain::Business, Complexity::Advanced, TimeCommitment::LongTerm);
    agent(&server).generate_idea(&filters).await.unwrap();

    let body = request_body(&server).await;
    assert_eq!(body["tools"][0], json!({ "googleSearch": {} }));
    assert_eq!(body["generationConfig"]["responseMimeType"], "application/json");
    assert_eq!(
        body["generationConfig"]["responseSchema"]["required"],
        json!(["title", "description", "targetAudience", "whyItMatters", "roadmap"])
    );
    let prompt = body["contents"][0]["parts"][0]["text"].as_str().unwrap();
    assert!(prompt.contains("Domain: business"));
    assert!(prompt.contains("Time Commitment: long-term"));
}

#[tokio::test]
async fn generate_idea_without_search_grounding_omits_tools() {
    let server = MockServer::start().await;
    mount(&server, 200, text_response(idea_payload(), None)).await;

    agent(&server)
        .with_search_grounding(false)
        .generate_idea(&IdeaFilters::default())
        .await
        .unwrap();

    assert!(request_body(&server).await.get("tools").is_none());
}

#[tokio::test]
async fn every_filter_combination_yields_a_complete_ordered_roadmap() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(text_response(idea_payload(), None)),
        )
        .expect(45)
        .mount(&server)
        .await;
    let agent = agent(&server);

    let mut combinations = 0;
    for domain in Domain::iter() {
        for complexity in Complexity::iter() {
            for time in TimeCommitment::iter() {
                let filters = IdeaFilters::new(domain, complexity, time);
                let draft = agent.generate_idea(&filters).await.unwrap();

                let steps: Vec<&str> = draft.roadmap.iter().map(|r| r.step.as_str()).collect();
                assert_eq!(steps, vec!["Interview", "Prototype", "Notify", "Launch"]);
                assert!(draft
                    .roadmap
                    .iter()
                    .all(|r| !r.step.trim().is_empty() && !r.detail.trim().is_empty()));
                combinations += 1;
            }
        }
    }
    assert_eq!(combinations, 45);

    let prompts: HashSet<String> = server
        .received_requests()
        .await
        .unwrap()
        .iter()
        .map(|request| {
            let body: Value = serde_json::from_slice(&request.body).unwrap();
            body["contents"][0]["parts"][0]["text"]
                .as_str()
                .unwrap()
                .to_string()
        })
        .collect();
    assert_eq!(prompts.len(), 45);
}

#[tokio::test]
async fn generate_idea_rejects_incomplete_roadmap() {
    let server = MockServer::start().await;
    let mut payload = idea_payload();
    payload["roadmap"][2]["detail"] = json!("");
    mount(&server, 200, text_response(payload, None)).await;

    let err = agent(&server)
        .generate_idea(&IdeaFilters::default())
        .await
        .unwrap_err();
    assert!(matches!(err, SparkError::InvalidResponse(_)));
}

#[tokio::test]
async fn generate_idea_maps_http_errors() {
    let server = MockServer::start().await;
    mount(
        &server,
        503,
        json!({ "error": { "code": 503, "message": "The model is overloaded", "status": "UNAVAILABLE" } }),
    )
    .await;

    let err = agent(&server)
        .generate_idea(&IdeaFilters::default())
        .await
        .unwrap_err();
    match err {
        SparkError::Gateway {
            status_code,
            message,
        } => {
            assert_eq!(status_code, Some(503));
            assert_eq!(message, "UNAVAILABLE: The model is overloaded");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn tactical_deep_dive_parses_items() {
    let server = MockServer::start().await;
    let payload = json!({
        "prn": "Supabase for Auth/DB, Vercel for Hosting",
        "actionableItems": [
            { "task": "Create the shifts table", "toolSuggestion": "Supabase" },
            { "task": "Scaffold the app", "toolSuggestion": "Next.js" }
        ]
    });
    mount(&server, 200, text_response(payload, None)).await;

    let idea = Idea::from_draft(IdeaDraft {
        title: "Shift Swap".to_string(),
        description: "Trade shifts.".to_string(),
        target_audience: "Retail staff".to_string(),
        why_it_matters: "Lost swaps.".to_string(),
        roadmap: vec![RoadmapStep::new("Interview", "Talk to leads")],
        sources: vec![],
    });
    let deep_dive = agent(&server).tactical_deep_dive(&idea).await.unwrap();

    assert_eq!(deep_dive.prn, "Supabase for Auth/DB, Vercel for Hosting");
    assert_eq!(deep_dive.actionable_items.len(), 2);
    assert_eq!(deep_dive.actionable_items[1].tool_suggestion, "Next.js");

    let body = request_body(&server).await;
    assert!(body.get("tools").is_none());
    let prompt = body["contents"][0]["parts"][0]["text"].as_str().unwrap();
    assert!(prompt.contains("Shift Swap - Trade shifts."));
}
