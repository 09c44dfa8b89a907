//! Test doubles for the host boundary.
//!
//! Shared across the integration suites; not every suite uses every double.
#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Mutex, RwLock};

use async_trait::async_trait;

use hud_core::snapshot::{ActorId, ActorSnapshot, ItemId, ItemSnapshot};
use hud_runtime::repository::{FlagError, FlagStore};
use hud_runtime::view::{CellPatch, NotificationSink, PatchSink};
use hud_runtime::{ActorWrite, CellId, DocumentSource, HostWriteError, InMemoryFlagStore};

/// Document source backed by a mutable in-memory actor map.
#[derive(Default)]
pub struct StaticSource {
    actors: RwLock<HashMap<ActorId, ActorSnapshot>>,
    writes: Mutex<Vec<(ActorId, ActorWrite)>>,
}

impl StaticSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, actor: ActorSnapshot) {
        self.actors
            .write()
            .unwrap()
            .insert(actor.id.clone(), actor);
    }

    pub fn writes(&self) -> Vec<(ActorId, ActorWrite)> {
        self.writes.lock().unwrap().clone()
    }
}

#[async_trait]
impl DocumentSource for StaticSource {
    async fn actor(&self, id: &ActorId) -> Option<ActorSnapshot> {
        self.actors.read().unwrap().get(id).cloned()
    }

    async fn item(&self, actor: &ActorId, id: &ItemId) -> Option<ItemSnapshot> {
        self.actors
            .read()
            .unwrap()
            .get(actor)
            .and_then(|snapshot| snapshot.item(id).cloned())
    }

    async fn write_actor(&self, id: &ActorId, write: ActorWrite) -> Result<(), HostWriteError> {
        self.writes.lock().unwrap().push((id.clone(), write));
        Ok(())
    }
}

/// One applied patch, with whether it was frame-deferred.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PatchRecord {
    pub cell: CellId,
    pub patch: CellPatch,
    pub deferred: bool,
}

/// Patch sink that records every applied patch in order.
#[derive(Default)]
pub struct RecordingPatchSink {
    records: Mutex<Vec<PatchRecord>>,
}

impl RecordingPatchSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> Vec<PatchRecord> {
        self.records.lock().unwrap().clone()
    }
}

impl PatchSink for RecordingPatchSink {
    fn patch(&self, cell: &CellId, patch: CellPatch) {
        self.records.lock().unwrap().push(PatchRecord {
            cell: cell.clone(),
            patch,
            deferred: false,
        });
    }

    fn patch_deferred(&self, cell: &CellId, patch: CellPatch) {
        self.records.lock().unwrap().push(PatchRecord {
            cell: cell.clone(),
            patch,
            deferred: true,
        });
    }
}

/// Notification sink that records messages.
#[derive(Default)]
pub struct RecordingNotifier {
    messages: Mutex<Vec<String>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> Vec<String> {
        self.messages.lock().unwrap().clone()
    }
}

impl NotificationSink for RecordingNotifier {
    fn warn(&self, message: &str) {
        self.messages.lock().unwrap().push(message.to_string());
    }
}

/// Flag store whose writes always fail; reads pass through an in-memory map.
#[derive(Default)]
pub struct WriteFailingFlagStore {
    inner: InMemoryFlagStore,
}

impl WriteFailingFlagStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl FlagStore for WriteFailingFlagStore {
    async fn read_flag(
        &self,
        actor: &ActorId,
        key: &str,
    ) -> Result<Option<serde_json::Value>, FlagError> {
        self.inner.read_flag(actor, key).await
    }

    async fn write_flag(
        &self,
        _actor: &ActorId,
        _key: &str,
        _value: serde_json::Value,
    ) -> Result<(), FlagError> {
        Err(FlagError::Backend("storage offline".to_string()))
    }

    async fn clear_flag(&self, _actor: &ActorId, _key: &str) -> Result<(), FlagError> {
        Err(FlagError::Backend("storage offline".to_string()))
    }
}
