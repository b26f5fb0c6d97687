//! Secret service implementation.
//!
//! Reads the Gemini configuration from `secret.json` and lets environment
//! variables override it.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::sync::RwLock;

use spark_core::SparkError;
use spark_core::config::{DEFAULT_GEMINI_MODEL, GeminiConfig, SecretConfig};
use spark_core::error::Result;
use spark_core::secret::SecretService;

use crate::paths::SparkPaths;
use crate::storage::AtomicJsonFile;

/// Environment variables checked for the API key, in order.
pub const API_KEY_ENV_VARS: [&str; 2] = ["GEMINI_API_KEY", "API_KEY"];
/// Environment variable overriding the model name.
pub const MODEL_ENV_VAR: &str = "SPARK_GEMINI_MODEL";

/// Service for loading secret configuration.
///
/// The merged configuration is cached after the first load.
pub struct SecretServiceImpl {
    file: AtomicJsonFile<SecretConfig>,
    use_env: bool,
    cached: RwLock<Option<SecretConfig>>,
}

impl SecretServiceImpl {
    /// Creates a service reading `secret.json` from the config directory.
    pub fn new(base_path: Option<&Path>) -> Result<Self> {
        let path = SparkPaths::new(base_path)
            .secret_file()
            .map_err(|e| SparkError::config(format!("Failed to get secret path: {}", e)))?;
        Ok(Self::with_path(path))
    }

    /// Creates a service reading the given file.
    pub fn with_path(path: PathBuf) -> Self {
        Self {
            file: AtomicJsonFile::new(path),
            use_env: true,
            cached: RwLock::new(None),
        }
    }

    /// Ignores environment overrides (for tests).
    pub fn without_env(mut self) -> Self {
        self.use_env = false;
        self
    }

    pub fn path(&self) -> &Path {
        self.file.path()
    }

    /// Writes a template `secret.json` if none exists and returns its path.
    ///
    /// On Unix the file is created with mode 600.
    pub async fn ensure_secret_file(&self) -> Result<PathBuf> {
        let path = self.file.path().to_path_buf();
        if tokio::fs::try_exists(&path).await.unwrap_or(false) {
            return Ok(path);
        }

        let template = SecretConfig {
            gemini: Some(GeminiConfig {
                api_key: String::new(),
                model_name: Some(DEFAULT_GEMINI_MODEL.to_string()),
                base_url: None,
            }),
        };
        self.file.save(&template).await?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            tokio::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o600)).await?;
        }

        tracing::info!("Created secret template at {}", path.display());
        Ok(path)
    }
}

/// Applies environment overrides on top of the file configuration.
pub fn apply_env_overrides(
    mut config: SecretConfig,
    lookup: impl Fn(&str) -> Option<String>,
) -> SecretConfig {
    let api_key = API_KEY_ENV_VARS
        .iter()
        .filter_map(|name| lookup(name))
        .find(|value| !value.trim().is_empty());
    let model = lookup(MODEL_ENV_VAR).filter(|value| !value.trim().is_empty());

    if api_key.is_some() || model.is_some() {
        let gemini = config.gemini.get_or_insert_with(GeminiConfig::default);
        if let Some(api_key) = api_key {
            gemini.api_key = api_key;
        }
        if let Some(model) = model {
            gemini.model_name = Some(model);
        }
    }
    config
}

#[async_trait]
impl SecretService for SecretServiceImpl {
    async fn load_secrets(&self) -> Result<SecretConfig> {
        if let Some(cached) = self.cached.read().await.as_ref() {
            return Ok(cached.clone());
        }

        let from_file = self.file.load().await?.unwrap_or_default();
        let merged = if self.use_env {
            apply_env_overrides(from_file, |name| std::env::var(name).ok())
        } else {
            from_file
        };

        *self.cached.write().await = Some(merged.clone());
        Ok(merged)
    }

    async fn secret_file_exists(&self) -> bool {
        tokio::fs::try_exists(self.file.path())
            .await
            .unwrap_or(false)
    }
}
