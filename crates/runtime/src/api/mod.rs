//! Public reconciler API surface.
//!
//! This module gathers the types exposed to consumers of the runtime crate
//! so other layers can stay focused on orchestration, workers, or
//! infrastructure.

mod errors;
mod handle;

pub use errors::{FlagError, HostWriteError, ReconcilerError, Result};
pub use handle::ReconcilerHandle;
