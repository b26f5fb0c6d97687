//! Unified path management for Spark files.
//!
//! # Directory Structure
//!
//! ```text
//! ~/.config/spark/             # Config directory
//! └── secret.json              # Gemini API key and model
//!
//! ~/.local/share/spark/        # Data directory
//! ├── spark_history.json       # History collection
//! └── spark_favorites.json     # Favorites collection
//! ```
//!
//! When a base path is given, both directories collapse onto it. Tests and
//! the `--data-dir` flag rely on this.

use std::path::{Path, PathBuf};

const APP_DIR_NAME: &str = "spark";

/// Errors that can occur during path resolution.
#[derive(Debug)]
pub enum PathError {
    /// Home directory could not be determined.
    HomeDirNotFound,
}

impl std::fmt::Display for PathError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PathError::HomeDirNotFound => write!(f, "Cannot find home directory"),
        }
    }
}

impl std::error::Error for PathError {}

/// Resolves the directories Spark reads and writes.
#[derive(Debug, Clone, Default)]
pub struct SparkPaths {
    base: Option<PathBuf>,
}

impl SparkPaths {
    /// Creates a resolver. `base` overrides the platform directories.
    pub fn new(base: Option<&Path>) -> Self {
        Self {
            base: base.map(Path::to_path_buf),
        }
    }

    /// Returns the config directory (e.g. `~/.config/spark/`).
    pub fn config_dir(&self) -> Result<PathBuf, PathError> {
        match &self.base {
            Some(base) => Ok(base.clone()),
            None => dirs::config_dir()
                .map(|dir| dir.join(APP_DIR_NAME))
                .ok_or(PathError::HomeDirNotFound),
        }
    }

    /// Returns the data directory (e.g. `~/.local/share/spark/`).
    pub fn data_dir(&self) -> Result<PathBuf, PathError> {
        match &self.base {
            Some(base) => Ok(base.clone()),
            None => dirs::data_dir()
                .map(|dir| dir.join(APP_DIR_NAME))
                .ok_or(PathError::HomeDirNotFound),
        }
    }

    /// Returns the path to the secrets file.
    ///
    /// # Security Note
    ///
    /// Ensure this file has appropriate permissions (e.g., 600).
    pub fn secret_file(&self) -> Result<PathBuf, PathError> {
        Ok(self.config_dir()?.join("secret.json"))
    }

    /// Returns the file backing a storage key, e.g. `spark_history.json`.
    pub fn collection_file(&self, storage_key: &str) -> Result<PathBuf, PathError> {
        Ok(self.data_dir()?.join(format!("{storage_key}.json")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_path_overrides_everything() {
        let paths = SparkPaths::new(Some(Path::new("/tmp/spark-test")));

        assert_eq!(paths.config_dir().unwrap(), PathBuf::from("/tmp/spark-test"));
        assert_eq!(paths.data_dir().unwrap(), PathBuf::from("/tmp/spark-test"));
        assert_eq!(
            paths.secret_file().unwrap(),
            PathBuf::from("/tmp/spark-test/secret.json")
        );
        assert_eq!(
            paths.collection_file("spark_history").unwrap(),
            PathBuf::from("/tmp/spark-test/spark_history.json")
        );
    }

    #[test]
    fn test_platform_dirs_end_with_app_name() {
        let paths = SparkPaths::default();
        if let Ok(dir) = paths.config_dir() {
            assert!(dir.ends_with(APP_DIR_NAME));
        }
        if let Ok(dir) = paths.data_dir() {
            assert!(dir.ends_with(APP_DIR_NAME));
        }
    }
}
