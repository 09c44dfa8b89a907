//! Cell patches and the sinks they are applied through.
//!
//! A reconciliation pass patches only the derived bits of a cell: the
//! remaining-uses text and the depletion flag. The cell's subtree is never
//! rebuilt here; that stays with the host renderer.

use serde::{Deserialize, Serialize};

use hud_core::snapshot::ResourcePool;

use crate::bindings::CellId;

/// Uses-indicator update.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UsesPatch {
    /// Show `value/max`.
    Show(ResourcePool),
    /// Hide the indicator (untracked or unresolvable source).
    Hide,
}

/// Targeted visual update for one cell.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellPatch {
    pub uses: Option<UsesPatch>,
    pub depleted: Option<bool>,
}

impl CellPatch {
    /// Patch that shows a uses pair and its depletion state.
    pub fn uses(pool: ResourcePool, depleted: bool) -> Self {
        Self {
            uses: Some(UsesPatch::Show(pool)),
            depleted: Some(depleted),
        }
    }

    /// Patch that hides the uses indicator.
    pub fn hide_uses() -> Self {
        Self {
            uses: Some(UsesPatch::Hide),
            depleted: Some(false),
        }
    }

    /// Depletion-only patch.
    pub fn depletion(depleted: bool) -> Self {
        Self {
            uses: None,
            depleted: Some(depleted),
        }
    }
}

/// Applies patches to rendered cells.
///
/// `patch` applies synchronously within the current pass. `patch_deferred`
/// asks the host to apply on the next animation frame, batching the visual
/// update when several field changes arrive in one host update.
pub trait PatchSink: Send + Sync {
    fn patch(&self, cell: &CellId, patch: CellPatch);

    fn patch_deferred(&self, cell: &CellId, patch: CellPatch) {
        self.patch(cell, patch);
    }
}

/// Surfaces user-visible, non-fatal notifications.
pub trait NotificationSink: Send + Sync {
    fn warn(&self, message: &str);
}

/// Sink that drops every patch; for headless use.
pub struct NullPatchSink;

impl PatchSink for NullPatchSink {
    fn patch(&self, _cell: &CellId, _patch: CellPatch) {}
}

/// Sink that logs notifications instead of showing them.
pub struct LogNotificationSink;

impl NotificationSink for LogNotificationSink {
    fn warn(&self, message: &str) {
        tracing::warn!("{message}");
    }
}
