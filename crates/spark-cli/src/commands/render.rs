//! Terminal rendering of ideas.

use chrono::{DateTime, Local, Utc};

use spark_core::idea::Idea;

fn created_at(idea: &Idea) -> String {
    DateTime::<Utc>::from_timestamp_millis(idea.timestamp)
        .map(|utc| utc.with_timezone(&Local).format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| "-".to_string())
}

/// One-line listing entry: `id  date  title`, with a star for favorites.
pub fn summary_line(idea: &Idea, bookmarked: bool) -> String {
    let marker = if bookmarked { "★" } else { " " };
    format!("{marker} {}  {}  {}", idea.id, created_at(idea), idea.title)
}

/// Full card with roadmap, sources and the deep dive when present.
pub fn card(idea: &Idea) -> String {
    let mut out = String::new();
    out.push_str(&format!("💡 {}\n", idea.title));
    out.push_str(&format!("   {} · {}\n\n", idea.id, created_at(idea)));
    out.push_str(&format!("{}\n\n", idea.description));
    out.push_str(&format!("Target audience: {}\n", idea.target_audience));
    out.push_str(&format!("Why it matters:  {}\n\n", idea.why_it_matters));

    out.push_str("Roadmap:\n");
    for (i, step) in idea.roadmap.iter().enumerate() {
        out.push_str(&format!("  {}. {}: {}\n", i + 1, step.step, step.detail));
    }

    if !idea.sources.is_empty() {
        out.push_str("\nSources:\n");
        for source in &idea.sources {
            out.push_str(&format!("  - {} <{}>\n", source.title, source.uri));
        }
    }

    if let Some(deep_dive) = &idea.tactical_deep_dive {
        out.push_str("\nTactical deep dive:\n");
        out.push_str(&format!("  PRN: {}\n", deep_dive.prn));
        for item in &deep_dive.actionable_items {
            out.push_str(&format!("  - {} ({})\n", item.task, item.tool_suggestion));
        }
    }

    out
}
