//! Prompt templates for idea generation and deep dives.

use minijinja::{Environment, context};

use spark_core::SparkError;
use spark_core::error::Result;
use spark_core::idea::{Idea, IdeaFilters};

const IDEA_TEMPLATE: &str = r#"Generate a grounded, practical, and highly actionable project idea.
Domain: {{ domain }}
Complexity: {{ complexity }}
Time Commitment: {{ time }}

CRITICAL GUIDELINES:
{% for rule in guidelines -%}
- {{ rule }}
{% endfor %}
AVOID:
- Far-fetched or extremely generic ideas.

Provide:
1. A catchy but descriptive Title.
2. A 2-3 sentence clear description.
3. "Target Audience": Exactly who is this for?
4. "Why it matters": The specific problem it solves.
5. A {{ roadmap_steps }}-step roadmap to bring a V1 (MVP) to life."#;

const DEEP_DIVE_TEMPLATE: &str = r#"Provide a "Tactical Deep Dive" for the following project idea: "{{ title }} - {{ description }}".
Target audience: {{ target_audience }}

Generate:
1. "PRN" (Project Resource Notes): A concise technical summary of the core stack or resources needed (e.g., "Supabase for Auth/DB, Vercel for Hosting").
2. {{ item_count }} "Actionable Items": Highly specific "Day 1" tasks. Each should include a specific tool suggestion.

Ensure the suggestions are modern, cost-effective, and pragmatic."#;

const GUIDELINES: [&str; 4] = [
    "PRACTICALITY: Focus on solving a specific, annoying friction point in a real-world workflow or daily life.",
    "FEASIBILITY: The idea must be buildable by 1-2 people using existing, accessible technology.",
    "UTILITY-FIRST: Prioritize tools, micro-SaaS, or niche services over \"high-concept\" or sci-fi ideas.",
    "REAL MARKET: Identify a specific, underserved group.",
];

const ROADMAP_STEPS: usize = 4;
const ACTIONABLE_ITEMS: usize = 4;

fn render(template: &str, ctx: minijinja::Value) -> Result<String> {
    Environment::new()
        .render_str(template, ctx)
        .map_err(|e| SparkError::internal(format!("Failed to render prompt: {}", e)))
}

/// Renders the generation prompt for a filter selection.
pub fn idea_prompt(filters: &IdeaFilters) -> Result<String> {
    render(
        IDEA_TEMPLATE,
        context! {
            domain => filters.domain.to_string(),
            complexity => filters.complexity.to_string(),
            time => filters.time.to_string(),
            guidelines => GUIDELINES.to_vec(),
            roadmap_steps => ROADMAP_STEPS,
        },
    )
}

/// Renders the deep-dive prompt for an idea.
pub fn deep_dive_prompt(idea: &Idea) -> Result<String> {
    render(
        DEEP_DIVE_TEMPLATE,
        context! {
            title => &idea.title,
            description => &idea.description,
            target_audience => &idea.target_audience,
            item_count => ACTIONABLE_ITEMS,
        },
    )
}
