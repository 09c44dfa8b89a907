//! Host application boundary: document resolution and write-back.
//!
//! The host owns every actor and item document. Resolution is asynchronous
//! (documents may live in unloaded compendium packs) and may fail benignly:
//! a deleted document resolves to `None`, which downstream code treats as a
//! downgrade, never an error.

use async_trait::async_trait;

use hud_core::snapshot::{ActorId, ActorSnapshot, ItemId, ItemSnapshot};

/// A single write the engine asks the host to apply to an actor document.
///
/// Writes are fire-and-forget from the engine's point of view: the host
/// confirms them by emitting the usual change notifications, which trigger
/// the next reconciliation pass.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ActorWrite {
    HitPoints(u32),
    Focus(u32),
    /// Clear every preparation's expended flag on one spellcasting entry.
    ResetPreparations { entry: ItemId },
}

/// Error from a rejected host write.
#[derive(Clone, Debug, thiserror::Error)]
#[error("host rejected actor update: {0}")]
pub struct HostWriteError(pub String);

/// Read/write access to host-managed documents.
#[async_trait]
pub trait DocumentSource: Send + Sync {
    /// Resolves an actor snapshot; `None` when the document no longer
    /// exists.
    async fn actor(&self, id: &ActorId) -> Option<ActorSnapshot>;

    /// Resolves one of an actor's item documents.
    async fn item(&self, actor: &ActorId, id: &ItemId) -> Option<ItemSnapshot>;

    /// Applies a write to an actor document.
    async fn write_actor(&self, id: &ActorId, write: ActorWrite) -> Result<(), HostWriteError>;
}
