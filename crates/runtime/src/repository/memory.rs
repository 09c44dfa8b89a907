//! In-memory flag store for tests and standalone sessions.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;

use hud_core::snapshot::ActorId;

use super::{FlagError, FlagStore, MODULE_SCOPE};

/// Flag store backed by a process-local map. Contents die with the process.
#[derive(Default)]
pub struct InMemoryFlagStore {
    flags: RwLock<HashMap<String, serde_json::Value>>,
}

impl InMemoryFlagStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn storage_key(actor: &ActorId, key: &str) -> String {
        format!("{}.{}.{}", MODULE_SCOPE, actor, key)
    }
}

#[async_trait]
impl FlagStore for InMemoryFlagStore {
    async fn read_flag(
        &self,
        actor: &ActorId,
        key: &str,
    ) -> Result<Option<serde_json::Value>, FlagError> {
        let flags = self
            .flags
            .read()
            .map_err(|_| FlagError::Backend("flag map lock poisoned".to_string()))?;
        Ok(flags.get(&Self::storage_key(actor, key)).cloned())
    }

    async fn write_flag(
        &self,
        actor: &ActorId,
        key: &str,
        value: serde_json::Value,
    ) -> Result<(), FlagError> {
        let mut flags = self
            .flags
            .write()
            .map_err(|_| FlagError::Backend("flag map lock poisoned".to_string()))?;
        flags.insert(Self::storage_key(actor, key), value);
        Ok(())
    }

    async fn clear_flag(&self, actor: &ActorId, key: &str) -> Result<(), FlagError> {
        let mut flags = self
            .flags
            .write()
            .map_err(|_| FlagError::Backend("flag map lock poisoned".to_string()))?;
        flags.remove(&Self::storage_key(actor, key));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn round_trips_values_per_actor() {
        let store = InMemoryFlagStore::new();
        let alice = ActorId::new("alice");
        let bob = ActorId::new("bob");

        store
            .write_flag(&alice, "reactions_remaining", serde_json::json!(0))
            .await
            .unwrap();

        assert_eq!(
            store.read_flag(&alice, "reactions_remaining").await.unwrap(),
            Some(serde_json::json!(0))
        );
        assert_eq!(store.read_flag(&bob, "reactions_remaining").await.unwrap(), None);

        store.clear_flag(&alice, "reactions_remaining").await.unwrap();
        assert_eq!(store.read_flag(&alice, "reactions_remaining").await.unwrap(), None);
    }
}
