//! Session storage in a JSON file on disk.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::{debug, warn};

use inventory_core::error::{AppError, ErrorKind};
use inventory_core::result::AppResult;
use inventory_core::traits::SessionStorage;

/// Stores session keys as a flat JSON object in a single file.
///
/// Every batch rewrites the whole file through a temporary sibling that is
/// renamed into place, so a reader never sees half of a batch.
#[derive(Debug)]
pub struct FileSessionStorage {
    path: PathBuf,
    /// Serializes read-modify-write cycles within this process.
    write_lock: Mutex<()>,
}

impl FileSessionStorage {
    /// Creates a storage backed by `path`. The file is created on first write.
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            write_lock: Mutex::new(()),
        }
    }

    /// Path of the session file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read_all(&self) -> AppResult<BTreeMap<String, String>> {
        match self.read_raw().await? {
            Some(raw) => self.parse(&raw),
            None => Ok(BTreeMap::new()),
        }
    }

    /// Current entries for a read-modify-write. A corrupt file is replaced;
    /// I/O failures propagate so an unreadable file is never overwritten.
    async fn read_for_update(&self) -> AppResult<BTreeMap<String, String>> {
        let Some(raw) = self.read_raw().await? else {
            return Ok(BTreeMap::new());
        };
        match self.parse(&raw) {
            Ok(entries) => Ok(entries),
            Err(_) => {
                warn!(path = %self.path.display(), "Replacing corrupt session file");
                Ok(BTreeMap::new())
            }
        }
    }

    async fn read_raw(&self) -> AppResult<Option<String>> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(raw) if raw.trim().is_empty() => Ok(None),
            Ok(raw) => Ok(Some(raw)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn parse(&self, raw: &str) -> AppResult<BTreeMap<String, String>> {
        serde_json::from_str(raw).map_err(|e| {
            warn!(path = %self.path.display(), error = %e, "Session file is corrupt");
            AppError::with_source(ErrorKind::Session, "Session file is corrupt", e)
        })
    }

    async fn write_all(&self, entries: &BTreeMap<String, String>) -> AppResult<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }

        let body = serde_json::to_vec_pretty(entries)?;
        let tmp = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp, body).await?;
        tokio::fs::rename(&tmp, &self.path).await?;

        debug!(path = %self.path.display(), keys = entries.len(), "Session file written");
        Ok(())
    }
}

#[async_trait]
impl SessionStorage for FileSessionStorage {
    async fn get(&self, key: &str) -> AppResult<Option<String>> {
        Ok(self.read_all().await?.remove(key))
    }

    async fn set_many(&self, entries: &[(&str, String)]) -> AppResult<()> {
        let _guard = self.write_lock.lock().await;
        let mut current = self.read_for_update().await?;
        for (key, value) in entries {
            current.insert((*key).to_string(), value.clone());
        }
        self.write_all(&current).await
    }

    async fn remove_many(&self, keys: &[&str]) -> AppResult<()> {
        let _guard = self.write_lock.lock().await;
        let mut current = self.read_for_update().await?;
        let before = current.len();
        for key in keys {
            current.remove(*key);
        }
        if current.len() == before && !self.path.exists() {
            return Ok(());
        }
        self.write_all(&current).await
    }
}
