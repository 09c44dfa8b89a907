//! File-backed flag store.
//!
//! Persists the whole flag map as one JSON document. Writes are
//! read-modify-write over the full file; flag volume is tiny (a few counters
//! and selections per actor), so contention and size are non-issues.

use std::collections::HashMap;
use std::path::PathBuf;

use async_trait::async_trait;
use tokio::sync::Mutex;

use hud_core::snapshot::ActorId;

use super::{FlagError, FlagStore, MODULE_SCOPE};

/// Flag store persisted to a single JSON file.
pub struct FileFlagStore {
    path: PathBuf,
    /// Serializes read-modify-write cycles against the backing file.
    io_lock: Mutex<()>,
}

impl FileFlagStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            io_lock: Mutex::new(()),
        }
    }

    fn storage_key(actor: &ActorId, key: &str) -> String {
        format!("{}.{}.{}", MODULE_SCOPE, actor, key)
    }

    async fn load(&self) -> Result<HashMap<String, serde_json::Value>, FlagError> {
        match tokio::fs::read(&self.path).await {
            Ok(bytes) => serde_json::from_slice(&bytes).map_err(FlagError::Serialize),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(HashMap::new()),
            Err(err) => Err(FlagError::Io(err)),
        }
    }

    async fn save(&self, flags: &HashMap<String, serde_json::Value>) -> Result<(), FlagError> {
        let bytes = serde_json::to_vec_pretty(flags).map_err(FlagError::Serialize)?;
        tokio::fs::write(&self.path, bytes)
            .await
            .map_err(FlagError::Io)
    }
}

#[async_trait]
impl FlagStore for FileFlagStore {
    async fn read_flag(
        &self,
        actor: &ActorId,
        key: &str,
    ) -> Result<Option<serde_json::Value>, FlagError> {
        let _guard = self.io_lock.lock().await;
        let flags = self.load().await?;
        Ok(flags.get(&Self::storage_key(actor, key)).cloned())
    }

    async fn write_flag(
        &self,
        actor: &ActorId,
        key: &str,
        value: serde_json::Value,
    ) -> Result<(), FlagError> {
        let _guard = self.io_lock.lock().await;
        let mut flags = self.load().await?;
        flags.insert(Self::storage_key(actor, key), value);
        self.save(&flags).await
    }

    async fn clear_flag(&self, actor: &ActorId, key: &str) -> Result<(), FlagError> {
        let _guard = self.io_lock.lock().await;
        let mut flags = self.load().await?;
        if flags.remove(&Self::storage_key(actor, key)).is_some() {
            self.save(&flags).await?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn persists_across_store_instances() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("flags.json");
        let actor = ActorId::new("hero");

        {
            let store = FileFlagStore::new(&path);
            store
                .write_flag(&actor, "actions_remaining", serde_json::json!(1))
                .await
                .unwrap();
        }

        let reopened = FileFlagStore::new(&path);
        assert_eq!(
            reopened.read_flag(&actor, "actions_remaining").await.unwrap(),
            Some(serde_json::json!(1))
        );
    }

    #[tokio::test]
    async fn missing_file_reads_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileFlagStore::new(dir.path().join("absent.json"));
        let actor = ActorId::new("hero");
        assert_eq!(store.read_flag(&actor, "anything").await.unwrap(), None);
    }
}
