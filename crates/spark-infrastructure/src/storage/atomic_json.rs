//! Atomic JSON file operations.
//!
//! Writes go to a sibling temp file that is synced and then renamed over the
//! target, so readers only ever see a complete previous or next version.

use serde::{Serialize, de::DeserializeOwned};
use std::marker::PhantomData;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;

use spark_core::SparkError;
use spark_core::error::Result;

/// A handle to a JSON file holding one `T`.
pub struct AtomicJsonFile<T> {
    path: PathBuf,
    _phantom: PhantomData<T>,
}

impl<T> AtomicJsonFile<T>
where
    T: Serialize + DeserializeOwned,
{
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            _phantom: PhantomData,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads and deserializes the file.
    ///
    /// - `Ok(Some(T))`: loaded
    /// - `Ok(None)`: the file doesn't exist or is empty
    /// - `Err`: the file could not be read or parsed
    pub async fn load(&self) -> Result<Option<T>> {
        let content = match fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(SparkError::io(format!(
                    "Failed to read {}: {}",
                    self.path.display(),
                    e
                )));
            }
        };

        if content.trim().is_empty() {
            return Ok(None);
        }

        let data: T = serde_json::from_str(&content)?;
        Ok(Some(data))
    }

    /// Saves `data` atomically (temp file + fsync + rename).
    ///
    /// `data` may be any value serializing to the same JSON as `T`, e.g. a
    /// slice when `T` is a `Vec`.
    pub async fn save<V>(&self, data: &V) -> Result<()>
    where
        V: Serialize + ?Sized,
    {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| SparkError::io(format!("Failed to create directory: {}", e)))?;
        }

        let json = serde_json::to_string_pretty(data)?;

        let tmp_path = self.temp_path()?;
        let mut tmp_file = fs::File::create(&tmp_path).await?;
        tmp_file.write_all(json.as_bytes()).await?;
        tmp_file.sync_all().await?;
        drop(tmp_file);

        fs::rename(&tmp_path, &self.path).await?;
        Ok(())
    }

    fn temp_path(&self) -> Result<PathBuf> {
        let parent = self
            .path
            .parent()
            .ok_or_else(|| SparkError::io("Path has no parent directory"))?;
        let file_name = self
            .path
            .file_name()
            .ok_or_else(|| SparkError::io("Path has no file name"))?;

        Ok(parent.join(format!(".{}.tmp", file_name.to_string_lossy())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use tempfile::TempDir;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Counter {
        name: String,
        count: u32,
    }

    #[tokio::test]
    async fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let file = AtomicJsonFile::<Counter>::new(temp_dir.path().join("nested/counter.json"));

        let counter = Counter {
            name: "sparks".to_string(),
            count: 3,
        };
        file.save(&counter).await.unwrap();

        assert_eq!(file.load().await.unwrap(), Some(counter));
        assert!(!temp_dir.path().join("nested/.counter.json.tmp").exists());
    }

    #[tokio::test]
    async fn test_save_slice_loads_as_vec() {
        let temp_dir = TempDir::new().unwrap();
        let file = AtomicJsonFile::<Vec<Counter>>::new(temp_dir.path().join("counters.json"));
        let counters = [
            Counter {
                name: "a".to_string(),
                count: 1,
            },
            Counter {
                name: "b".to_string(),
                count: 2,
            },
        ];

        file.save(&counters[..]).await.unwrap();

        assert_eq!(file.load().await.unwrap(), Some(counters.to_vec()));
    }

    #[tokio::test]
    async fn test_load_missing_or_empty() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("counter.json");
        let file = AtomicJsonFile::<Counter>::new(path.clone());

        assert!(file.load().await.unwrap().is_none());

        std::fs::write(&path, "  \n").unwrap();
        assert!(file.load().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_load_corrupted() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("counter.json");
        std::fs::write(&path, "{ not json").unwrap();

        let err = AtomicJsonFile::<Counter>::new(path).load().await.unwrap_err();
        assert!(err.is_serialization());
    }
}
