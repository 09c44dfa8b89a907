//! Unified error types surfaced by the reconciler API.
//!
//! Wraps failures from worker coordination, flag persistence, and host
//! writes so clients can bubble them up with consistent context. Nothing
//! here is allowed to propagate into the host as a panic; public entry
//! points catch and degrade instead.

use thiserror::Error;
use tokio::sync::oneshot;

pub use crate::host::HostWriteError;
pub use crate::repository::FlagError;

pub type Result<T> = std::result::Result<T, ReconcilerError>;

#[derive(Debug, Error)]
pub enum ReconcilerError {
    #[error("reconcile worker command channel closed")]
    CommandChannelClosed,

    #[error("reconcile worker reply channel closed")]
    ReplyChannelClosed(#[source] oneshot::error::RecvError),

    #[error("reconcile worker join failed")]
    WorkerJoin(#[source] tokio::task::JoinError),

    #[error(transparent)]
    Flag(#[from] FlagError),

    #[error(transparent)]
    HostWrite(#[from] HostWriteError),

    #[error("reconciler requires a document source before building")]
    MissingSource,

    #[error("reconciler requires a displayed actor before building")]
    MissingActor,
}
