//! Worker tasks that back the reconciler orchestration.
//!
//! One reconcile worker owns all mutable coordinator state and drains the
//! command queue to completion, one command at a time.

mod reconcile;

pub use reconcile::{Command, ReconcileWorker};
