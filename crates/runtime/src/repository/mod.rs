//! Actor-scoped flag storage.
//!
//! The host gives modules a persistent key/value store namespaced per actor
//! document. The engine keeps its turn counters and passive selections
//! there; everything else is derived and never persisted.

mod file;
mod memory;

pub use file::FileFlagStore;
pub use memory::InMemoryFlagStore;

use async_trait::async_trait;

use hud_core::snapshot::ActorId;

/// Namespace under which every flag of this module is stored.
pub const MODULE_SCOPE: &str = "hud";

/// Errors surfaced by flag persistence.
#[derive(Debug, thiserror::Error)]
pub enum FlagError {
    #[error("failed to serialize flag value")]
    Serialize(#[source] serde_json::Error),

    #[error("failed to read or write flag storage")]
    Io(#[source] std::io::Error),

    #[error("flag storage backend failure: {0}")]
    Backend(String),
}

/// Asynchronous actor-scoped key/value store.
///
/// Implementations namespace keys under [`MODULE_SCOPE`]; callers pass bare
/// key names.
#[async_trait]
pub trait FlagStore: Send + Sync {
    async fn read_flag(
        &self,
        actor: &ActorId,
        key: &str,
    ) -> Result<Option<serde_json::Value>, FlagError>;

    async fn write_flag(
        &self,
        actor: &ActorId,
        key: &str,
        value: serde_json::Value,
    ) -> Result<(), FlagError>;

    async fn clear_flag(&self, actor: &ActorId, key: &str) -> Result<(), FlagError>;
}
