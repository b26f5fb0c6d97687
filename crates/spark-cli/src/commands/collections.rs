use anyhow::{Result, bail};

use spark_core::idea::Idea;

use super::{AppContext, render};

fn print_list(ideas: &[Idea], favorites: &[Idea], empty: &str) {
    if ideas.is_empty() {
        println!("{empty}");
        return;
    }
    for idea in ideas {
        let bookmarked = favorites.iter().any(|f| f.same_identity(idea));
        println!("{}", render::summary_line(idea, bookmarked));
    }
}

pub async fn history(ctx: &AppContext) -> Result<()> {
    let controller = ctx.controller().await?;
    let favorites = controller.favorites().await;
    print_list(&controller.history().await, &favorites, "No ideas yet. Try `spark generate`.");
    Ok(())
}

pub async fn favorites(ctx: &AppContext) -> Result<()> {
    let controller = ctx.controller().await?;
    let favorites = controller.favorites().await;
    print_list(&favorites, &favorites, "No bookmarks yet.");
    Ok(())
}

pub async fn remove(ctx: &AppContext, id: &str, history: bool, favorites: bool) -> Result<()> {
    let controller = ctx.controller().await?;

    let (removed, collection) = match (history, favorites) {
        (true, _) => (controller.remove_from_history(id).await, "history"),
        (_, true) => (controller.remove_from_favorites(id).await, "favorites"),
        _ => bail!("Pass --history or --favorites"),
    };

    if removed {
        println!("Removed {id} from {collection}");
    } else {
        println!("{id} was not in {collection}");
    }
    Ok(())
}
