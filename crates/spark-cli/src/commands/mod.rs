pub mod collections;
pub mod generate;
pub mod idea;
pub mod init;
pub mod render;
pub mod share;

use anyhow::{Context, Result};
use async_trait::async_trait;
use std::path::PathBuf;
use std::sync::Arc;

use spark_application::SparkController;
use spark_core::SparkError;
use spark_core::idea::{
    Idea, IdeaCollectionRepository, IdeaDraft, IdeaFilters, IdeaGateway, TacticalDeepDive,
};
use spark_infrastructure::{FileIdeaRepository, SecretServiceImpl};
use spark_interaction::GeminiApiAgent;

/// Page URL share links point at when `--base-url` is not given.
pub const DEFAULT_SHARE_BASE_URL: &str = "https://spark.local/";

/// Per-invocation wiring of storage, secrets and the gateway.
pub struct AppContext {
    data_dir: Option<PathBuf>,
}

impl AppContext {
    pub fn new(data_dir: Option<PathBuf>) -> Self {
        Self { data_dir }
    }

    pub fn secret_service(&self) -> Result<SecretServiceImpl> {
        SecretServiceImpl::new(self.data_dir.as_deref()).context("Failed to resolve secret.json")
    }

    fn repository(&self) -> Arc<dyn IdeaCollectionRepository> {
        match &self.data_dir {
            Some(dir) => Arc::new(FileIdeaRepository::with_base_path(dir.clone())),
            None => Arc::new(FileIdeaRepository::new()),
        }
    }

    /// Builds the Gemini gateway, or one that reports why it is unavailable.
    async fn gateway(&self) -> Result<Arc<dyn IdeaGateway>> {
        let secrets = self.secret_service()?;
        match GeminiApiAgent::try_from_secrets(&secrets).await {
            Ok(agent) => {
                tracing::debug!("Using Gemini model {}", agent.model());
                Ok(Arc::new(agent))
            }
            Err(e) => {
                tracing::debug!("Gemini gateway unavailable: {}", e);
                Ok(Arc::new(UnconfiguredGateway { reason: e }))
            }
        }
    }

    pub async fn controller(&self) -> Result<SparkController> {
        let gateway = self.gateway().await?;
        Ok(SparkController::load(gateway, self.repository()).await)
    }
}

/// Gateway used when no API key is configured; every call fails with the
/// configuration error so offline commands still work.
struct UnconfiguredGateway {
    reason: SparkError,
}

#[async_trait]
impl IdeaGateway for UnconfiguredGateway {
    async fn generate_idea(&self, _filters: &IdeaFilters) -> spark_core::error::Result<IdeaDraft> {
        Err(self.reason.clone())
    }

    async fn tactical_deep_dive(
        &self,
        _idea: &Idea,
    ) -> spark_core::error::Result<TacticalDeepDive> {
        Err(self.reason.clone())
    }
}

/// Selects an idea by id or fails with a hint.
pub(crate) async fn select(controller: &SparkController, id: &str) -> Result<Idea> {
    controller.select(id).await.with_context(|| {
        format!("No idea with id '{id}' in history or favorites (see `spark history`)")
    })
}
