use anyhow::Result;

use spark_core::idea::{Complexity, Domain, IdeaFilters, TimeCommitment};

use super::{AppContext, render};

pub async fn run(
    ctx: &AppContext,
    domain: Option<Domain>,
    complexity: Option<Complexity>,
    time: Option<TimeCommitment>,
) -> Result<()> {
    let defaults = IdeaFilters::default();
    let filters = IdeaFilters::new(
        domain.unwrap_or(defaults.domain),
        complexity.unwrap_or(defaults.complexity),
        time.unwrap_or(defaults.time),
    );

    let controller = ctx.controller().await?;
    controller.set_filters(filters).await;

    eprintln!(
        "✨ Sparking a {} / {} / {} idea...",
        filters.domain.label(),
        filters.complexity.label(),
        filters.time.label()
    );

    match controller.generate().await {
        Ok(idea) => {
            print!("{}", render::card(&idea));
            Ok(())
        }
        Err(e) => {
            if let Some(notice) = controller.take_notice().await {
                eprintln!("{notice}");
            }
            Err(e.into())
        }
    }
}
