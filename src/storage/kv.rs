use std::{
    collections::BTreeMap,
    io::ErrorKind,
    path::{Path, PathBuf},
};

use anyhow::Result;
use async_trait::async_trait;
use fs4::tokio::AsyncFileExt;
use tokio::{
    fs::File,
    io::{AsyncReadExt, AsyncSeekExt, AsyncWriteExt},
    sync::Mutex,
};
use tracing::debug;

/// Interface for abstracting durable storage of numeric values by string key.
/// Point lookups only, no enumeration.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait KeyValueStore: Sync + Send {
    /// Looks up a value by key. Absence is a valid result, not an error.
    async fn get(&self, key: &str) -> Result<Option<f64>>;

    /// Writes a value under a key, replacing any prior value.
    async fn set(&self, key: &str, value: f64) -> Result<()>;
}

const STORE_FILE_NAME: &str = "hours.json";

/// The main realization of [KeyValueStore]. All values live in a single json
/// object on disk. Reads and read-modify-write cycles hold a file lock so
/// overlapping command invocations can't tear the file.
pub struct FileKeyValueStore {
    store_path: PathBuf,
}

impl FileKeyValueStore {
    pub fn new(data_dir: PathBuf) -> Result<Self, std::io::Error> {
        std::fs::create_dir_all(&data_dir)?;

        Ok(Self {
            store_path: data_dir.join(STORE_FILE_NAME),
        })
    }

    async fn read_all(&self) -> Result<BTreeMap<String, f64>> {
        async fn extract(path: &Path) -> std::result::Result<BTreeMap<String, f64>, std::io::Error> {
            debug!("Reading {path:?}");
            let mut file = File::open(path).await?;
            file.lock_shared()?;
            let mut contents = String::new();
            let read = file.read_to_string(&mut contents).await;
            file.unlock_async().await?;
            read?;

            if contents.trim().is_empty() {
                // A present but empty file appears after creation without a write
                return Ok(BTreeMap::new());
            }

            Ok(serde_json::from_str(&contents)?)
        }

        match extract(&self.store_path).await {
            Ok(s) => Ok(s),
            Err(e) => {
                if e.kind() == ErrorKind::NotFound {
                    Ok(BTreeMap::new())
                } else {
                    Err(e)?
                }
            }
        }
    }

    async fn update_with_file(file: &mut File, key: &str, value: f64) -> Result<()> {
        let mut contents = String::new();
        file.read_to_string(&mut contents).await?;

        let mut values: BTreeMap<String, f64> = if contents.trim().is_empty() {
            BTreeMap::new()
        } else {
            serde_json::from_str(&contents)?
        };
        values.insert(key.to_string(), value);

        let buffer = serde_json::to_vec_pretty(&values)?;
        file.set_len(0).await?;
        file.seek(std::io::SeekFrom::Start(0)).await?;
        file.write_all(&buffer).await?;
        file.flush().await?;
        Ok(())
    }
}

#[async_trait]
impl KeyValueStore for FileKeyValueStore {
    async fn get(&self, key: &str) -> Result<Option<f64>> {
        let values = self.read_all().await?;
        Ok(values.get(key).copied())
    }

    async fn set(&self, key: &str, value: f64) -> Result<()> {
        let mut file = File::options()
            .write(true)
            .create(true)
            .read(true)
            .truncate(false)
            .open(&self.store_path)
            .await?;

        // Semi-safe acquire-release for the file
        file.lock_exclusive()?;
        let result = Self::update_with_file(&mut file, key, value).await;
        file.unlock_async().await?;
        result
    }
}

/// In-process realization of [KeyValueStore] for tests and one-off
/// computations that shouldn't touch the disk.
#[derive(Default)]
pub struct MemoryStore {
    values: Mutex<BTreeMap<String, f64>>,
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<f64>> {
        Ok(self.values.lock().await.get(key).copied())
    }

    async fn set(&self, key: &str, value: f64) -> Result<()> {
        self.values.lock().await.insert(key.to_string(), value);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use anyhow::Result;
    use tempfile::tempdir;

    use super::{FileKeyValueStore, KeyValueStore, MemoryStore};

    #[tokio::test]
    async fn test_file_store_missing_file_reads_as_absent() -> Result<()> {
        let dir = tempdir()?;
        let store = FileKeyValueStore::new(dir.path().to_owned())?;

        assert_eq!(store.get("defaultHours").await?, None);
        Ok(())
    }

    #[tokio::test]
    async fn test_file_store_round_trip() -> Result<()> {
        let dir = tempdir()?;
        let store = FileKeyValueStore::new(dir.path().to_owned())?;

        store.set("defaultHours", 8.0).await?;
        store.set("adjustedHours_2024-06-01", 5.5).await?;

        assert_eq!(store.get("defaultHours").await?, Some(8.0));
        assert_eq!(store.get("adjustedHours_2024-06-01").await?, Some(5.5));
        assert_eq!(store.get("adjustedHours_2024-06-02").await?, None);
        Ok(())
    }

    #[tokio::test]
    async fn test_file_store_overwrites_value() -> Result<()> {
        let dir = tempdir()?;
        let store = FileKeyValueStore::new(dir.path().to_owned())?;

        store.set("adjustedHours_2024-06-01", 5.0).await?;
        store.set("adjustedHours_2024-06-01", 0.0).await?;

        assert_eq!(store.get("adjustedHours_2024-06-01").await?, Some(0.0));
        Ok(())
    }

    #[tokio::test]
    async fn test_file_store_survives_reopen() -> Result<()> {
        let dir = tempdir()?;
        {
            let store = FileKeyValueStore::new(dir.path().to_owned())?;
            store.set("defaultHours", 6.0).await?;
        }

        let reopened = FileKeyValueStore::new(dir.path().to_owned())?;
        assert_eq!(reopened.get("defaultHours").await?, Some(6.0));
        Ok(())
    }

    #[tokio::test]
    async fn test_memory_store_round_trip() -> Result<()> {
        let store = MemoryStore::default();

        assert_eq!(store.get("adjustedHours_2024-06-01").await?, None);
        store.set("adjustedHours_2024-06-01", 12.0).await?;
        assert_eq!(store.get("adjustedHours_2024-06-01").await?, Some(12.0));
        Ok(())
    }
}
