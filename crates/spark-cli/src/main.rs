use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use spark_core::idea::{Complexity, Domain, TimeCommitment};

mod commands;

use commands::AppContext;

#[derive(Parser)]
#[command(name = "spark")]
#[command(about = "Spark - grounded, practical project ideas on demand", long_about = None)]
struct Cli {
    /// Directory holding secret.json and the history/favorites files
    #[arg(long, global = true, env = "SPARK_DATA_DIR")]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a secret.json template for the Gemini API key
    Init,
    /// Generate a new idea and add it to history
    Generate {
        /// any, tech, creative, business, lifestyle
        #[arg(long)]
        domain: Option<Domain>,
        /// simple, moderate, advanced
        #[arg(long)]
        complexity: Option<Complexity>,
        /// weekend, month, long-term
        #[arg(long)]
        time: Option<TimeCommitment>,
    },
    /// List recent ideas, newest first
    History,
    /// List bookmarked ideas
    Favorites,
    /// Show an idea from history or favorites
    Show {
        id: String,
        /// Print the plain-text version used for copying
        #[arg(long)]
        text: bool,
    },
    /// Toggle an idea in favorites
    Bookmark { id: String },
    /// Fetch the tactical deep dive for an idea
    DeepDive { id: String },
    /// Print a share link for an idea
    Share {
        id: String,
        /// Page URL the token is attached to
        #[arg(long, default_value = commands::DEFAULT_SHARE_BASE_URL)]
        base_url: String,
    },
    /// Open a shared idea from a link or a raw token
    Open {
        link: String,
        /// Add the shared idea to favorites
        #[arg(long)]
        save: bool,
    },
    /// Remove an idea from history or favorites
    Remove {
        id: String,
        #[arg(long, conflicts_with = "favorites")]
        history: bool,
        #[arg(long)]
        favorites: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let ctx = AppContext::new(cli.data_dir);

    match cli.command {
        Commands::Init => commands::init::run(&ctx).await?,
        Commands::Generate {
            domain,
            complexity,
            time,
        } => commands::generate::run(&ctx, domain, complexity, time).await?,
        Commands::History => commands::collections::history(&ctx).await?,
        Commands::Favorites => commands::collections::favorites(&ctx).await?,
        Commands::Show { id, text } => commands::idea::show(&ctx, &id, text).await?,
        Commands::Bookmark { id } => commands::idea::bookmark(&ctx, &id).await?,
        Commands::DeepDive { id } => commands::idea::deep_dive(&ctx, &id).await?,
        Commands::Share { id, base_url } => commands::share::share(&ctx, &id, &base_url).await?,
        Commands::Open { link, save } => commands::share::open(&ctx, &link, save).await?,
        Commands::Remove {
            id,
            history,
            favorites,
        } => commands::collections::remove(&ctx, &id, history, favorites).await?,
    }

    Ok(())
}
