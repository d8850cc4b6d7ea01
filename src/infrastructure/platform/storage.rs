use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;

/// Durable key-value storage with whole-value replacement semantics.
///
/// Reads of a missing key return `Ok(None)`. Implementations are
/// last-writer-wins; there is no transactional isolation.
#[async_trait]
pub trait PersistentStorage: Send + Sync {
    async fn load(&self, key: &str) -> Result<Option<String>, String>;

    async fn save(&self, key: &str, value: &str) -> Result<(), String>;

    /// Remove the value entirely. Removing a missing key succeeds.
    async fn remove(&self, key: &str) -> Result<(), String>;
}

fn validate_key(key: &str) -> Result<(), String> {
    let valid = !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
    if valid {
        Ok(())
    } else {
        Err(format!("invalid storage key: {:?}", key))
    }
}

/// Stores each key as `<dir>/<key>.json`
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, String> {
        validate_key(key)?;
        Ok(self.dir.join(format!("{}.json", key)))
    }
}

#[async_trait]
impl PersistentStorage for FileStorage {
    async fn load(&self, key: &str) -> Result<Option<String>, String> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path).await {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(format!("failed to read {}: {}", path.display(), e)),
        }
    }

    async fn save(&self, key: &str, value: &str) -> Result<(), String> {
        let path = self.path_for(key)?;
        fs::create_dir_all(&self.dir)
            .await
            .map_err(|e| format!("failed to create {}: {}", self.dir.display(), e))?;

        // Write to a sibling file and rename so readers never see a partial value
        let temp_path = path.with_extension("json.tmp");
        if let Err(e) = replace_via(&temp_path, &path, value).await {
            if let Err(cleanup) = fs::remove_file(&temp_path).await {
                if cleanup.kind() != std::io::ErrorKind::NotFound {
                    tracing::warn!(path = %temp_path.display(), error = %cleanup, "Stale temp file left behind");
                }
            }
            return Err(e);
        }

        tracing::debug!(key = key, path = %path.display(), size = value.len(), "Value persisted");
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), String> {
        let path = self.path_for(key)?;
        match fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(format!("failed to remove {}: {}", path.display(), e)),
        }
    }
}

async fn replace_via(temp_path: &Path, path: &Path, value: &str) -> Result<(), String> {
    let mut file = fs::File::create(temp_path)
        .await
        .map_err(|e| format!("failed to create {}: {}", temp_path.display(), e))?;
    file.write_all(value.as_bytes())
        .await
        .map_err(|e| format!("failed to write {}: {}", temp_path.display(), e))?;
    file.sync_all()
        .await
        .map_err(|e| format!("failed to sync {}: {}", temp_path.display(), e))?;
    drop(file);

    fs::rename(temp_path, path)
        .await
        .map_err(|e| format!("failed to replace {}: {}", path.display(), e))
}

/// Volatile storage, used for headless sessions and tests
#[derive(Default)]
pub struct MemoryStorage {
    values: Mutex<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a raw value, bypassing validation of its contents
    pub fn with_value(key: &str, value: &str) -> Self {
        let storage = Self::new();
        storage
            .values
            .lock()
            .insert(key.to_string(), value.to_string());
        storage
    }

    pub fn contains(&self, key: &str) -> bool {
        self.values.lock().contains_key(key)
    }

    pub fn raw(&self, key: &str) -> Option<String> {
        self.values.lock().get(key).cloned()
    }
}

#[async_trait]
impl PersistentStorage for MemoryStorage {
    async fn load(&self, key: &str) -> Result<Option<String>, String> {
        validate_key(key)?;
        Ok(self.values.lock().get(key).cloned())
    }

    async fn save(&self, key: &str, value: &str) -> Result<(), String> {
        validate_key(key)?;
        self.values
            .lock()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), String> {
        validate_key(key)?;
        self.values.lock().remove(key);
        Ok(())
    }
}
