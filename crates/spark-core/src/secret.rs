//! Secret management service trait.

use crate::config::SecretConfig;
use crate::error::Result;

/// Loads API keys and model settings.
///
/// # Security Note
///
/// Implementations must never log secrets or include them in error messages.
#[async_trait::async_trait]
pub trait SecretService: Send + Sync {
    /// Loads the secret configuration.
    async fn load_secrets(&self) -> Result<SecretConfig>;

    /// Checks if the secret file exists.
    async fn secret_file_exists(&self) -> bool;
}
