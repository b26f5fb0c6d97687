use anyhow::Result;

use spark_application::DeepDiveOutcome;

use super::{AppContext, render, select};

pub async fn show(ctx: &AppContext, id: &str, text: bool) -> Result<()> {
    let controller = ctx.controller().await?;
    let idea = select(&controller, id).await?;

    if text {
        println!("{}", idea.to_plain_text());
    } else {
        print!("{}", render::card(&idea));
    }
    Ok(())
}

pub async fn bookmark(ctx: &AppContext, id: &str) -> Result<()> {
    let controller = ctx.controller().await?;
    let idea = select(&controller, id).await?;

    match controller.toggle_bookmark().await {
        Some(true) => println!("★ Bookmarked \"{}\"", idea.title),
        Some(false) => println!("Removed \"{}\" from favorites", idea.title),
        None => {}
    }
    Ok(())
}

pub async fn deep_dive(ctx: &AppContext, id: &str) -> Result<()> {
    let controller = ctx.controller().await?;
    select(&controller, id).await?;

    match controller.request_deep_dive().await? {
        DeepDiveOutcome::Completed(idea) => print!("{}", render::card(&idea)),
        DeepDiveOutcome::AlreadyPresent => {
            if let Some(idea) = controller.current_idea().await {
                print!("{}", render::card(&idea));
            }
        }
        DeepDiveOutcome::InFlight | DeepDiveOutcome::NothingDisplayed => {}
    }
    Ok(())
}
