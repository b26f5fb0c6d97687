use anyhow::{Context, Result, bail};
use url::Url;

use super::{AppContext, render, select};

pub async fn share(ctx: &AppContext, id: &str, base_url: &str) -> Result<()> {
    let base = Url::parse(base_url).with_context(|| format!("Invalid base URL: {base_url}"))?;
    let controller = ctx.controller().await?;
    select(&controller, id).await?;

    if let Some(link) = controller.share_url(&base).await? {
        println!("{link}");
    }
    Ok(())
}

/// Accepts either a full share link or a bare token.
pub async fn open(ctx: &AppContext, input: &str, save: bool) -> Result<()> {
    let controller = ctx.controller().await?;

    let idea = match Url::parse(input) {
        Ok(url) => controller
            .open_shared_link(&url)
            .await
            .context("Link has no `idea` parameter")?
            .idea,
        Err(_) => controller.open_shared(input.trim()).await,
    };
    let Some(idea) = idea else {
        bail!("Could not read the shared idea; the link may be truncated or corrupted");
    };

    print!("{}", render::card(&idea));
    if save && controller.toggle_bookmark().await == Some(true) {
        println!("\n★ Saved to favorites as {}", idea.id);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::DEFAULT_SHARE_BASE_URL;
    use spark_core::idea::{Idea, IdeaCollection, IdeaCollectionRepository, IdeaDraft, RoadmapStep};
    use spark_core::share::shareable_url;
    use spark_infrastructure::FileIdeaRepository;
    use tempfile::TempDir;

    fn idea() -> Idea {
        Idea::from_draft(IdeaDraft {
            title: "Plant Pal".to_string(),
            description: "Reminds renters when to water.".to_string(),
            target_audience: "Apartment dwellers".to_string(),
            why_it_matters: "Houseplants die of neglect.".to_string(),
            roadmap: vec![RoadmapStep::new("Catalog", "List common plants")],
            sources: vec![],
        })
    }

    #[tokio::test]
    async fn test_open_with_save_bookmarks_without_history() {
        let dir = TempDir::new().unwrap();
        let ctx = AppContext::new(Some(dir.path().to_path_buf()));
        let base = Url::parse(DEFAULT_SHARE_BASE_URL).unwrap();
        let link = shareable_url(&base, &idea()).unwrap();

        open(&ctx, link.as_str(), true).await.unwrap();

        let repo = FileIdeaRepository::with_base_path(dir.path().to_path_buf());
        let favorites = repo.load(IdeaCollection::Favorites).await.unwrap().unwrap();
        assert_eq!(favorites.len(), 1);
        assert_eq!(favorites[0].title, "Plant Pal");
        assert!(favorites[0].is_shared());
        assert!(repo.load(IdeaCollection::History).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_open_rejects_unreadable_input() {
        let dir = TempDir::new().unwrap();
        let ctx = AppContext::new(Some(dir.path().to_path_buf()));

        assert!(open(&ctx, "not-a-token", false).await.is_err());
        assert!(open(&ctx, "https://spark.local/?other=1", false).await.is_err());
    }

    #[tokio::test]
    async fn test_share_unknown_id_fails() {
        let dir = TempDir::new().unwrap();
        let ctx = AppContext::new(Some(dir.path().to_path_buf()));

        assert!(share(&ctx, "missing", DEFAULT_SHARE_BASE_URL).await.is_err());
        assert!(share(&ctx, "missing", "not a url").await.is_err());
    }
}
