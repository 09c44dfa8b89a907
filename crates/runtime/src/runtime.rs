//! High-level reconciler orchestrator.
//!
//! The reconciler owns the background worker, wires up command/event
//! channels, and exposes a builder-based API for the host adapter to embed.

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use hud_core::HudConfig;
use hud_core::snapshot::ActorId;

use crate::api::{ReconcilerError, ReconcilerHandle, Result};
use crate::counters::CounterLedger;
use crate::events::EventBus;
use crate::host::DocumentSource;
use crate::repository::{FlagStore, InMemoryFlagStore};
use crate::view::{LogNotificationSink, NotificationSink, NullPatchSink, PatchSink};
use crate::workers::{Command, ReconcileWorker};

/// Reconciler configuration shared across the orchestrator and worker.
#[derive(Debug, Clone)]
pub struct ReconcilerConfig {
    pub hud_config: HudConfig,
    pub event_buffer_size: usize,
    pub command_buffer_size: usize,
}

impl Default for ReconcilerConfig {
    fn default() -> Self {
        Self {
            hud_config: HudConfig::default(),
            event_buffer_size: 100,
            command_buffer_size: 32,
        }
    }
}

/// Event-driven coordinator for one displayed HUD instance.
///
/// Design: the reconciler owns the worker task and coordinates shutdown;
/// [`ReconcilerHandle`] provides a cloneable façade for clients.
pub struct Reconciler {
    handle: ReconcilerHandle,
    worker_handle: JoinHandle<()>,
}

impl Reconciler {
    /// Create a new reconciler builder
    pub fn builder() -> ReconcilerBuilder {
        ReconcilerBuilder::new()
    }

    /// Get a cloneable handle to this reconciler
    ///
    /// The handle can be shared across clients and async tasks.
    pub fn handle(&self) -> ReconcilerHandle {
        self.handle.clone()
    }

    /// Shutdown the reconciler gracefully
    ///
    /// Drains the queue: previously dispatched events still run to
    /// completion before the worker exits.
    pub async fn shutdown(self) -> Result<()> {
        drop(self.handle);

        self.worker_handle
            .await
            .map_err(ReconcilerError::WorkerJoin)?;

        Ok(())
    }
}

/// Builder for [`Reconciler`] with flexible configuration.
pub struct ReconcilerBuilder {
    config: ReconcilerConfig,
    displayed: Option<ActorId>,
    source: Option<Arc<dyn DocumentSource>>,
    flags: Option<Arc<dyn FlagStore>>,
    patches: Option<Arc<dyn PatchSink>>,
    notifications: Option<Arc<dyn NotificationSink>>,
}

impl ReconcilerBuilder {
    fn new() -> Self {
        Self {
            config: ReconcilerConfig::default(),
            displayed: None,
            source: None,
            flags: None,
            patches: None,
            notifications: None,
        }
    }

    /// Override reconciler configuration
    pub fn config(mut self, config: ReconcilerConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the actor this HUD instance displays (required)
    pub fn displayed_actor(mut self, actor: ActorId) -> Self {
        self.displayed = Some(actor);
        self
    }

    /// Set the host document source (required)
    pub fn source(mut self, source: Arc<dyn DocumentSource>) -> Self {
        self.source = Some(source);
        self
    }

    /// Set the actor-scoped flag store (defaults to in-memory)
    pub fn flag_store(mut self, flags: Arc<dyn FlagStore>) -> Self {
        self.flags = Some(flags);
        self
    }

    /// Set the patch sink cells are updated through (defaults to a no-op)
    pub fn patch_sink(mut self, patches: Arc<dyn PatchSink>) -> Self {
        self.patches = Some(patches);
        self
    }

    /// Set the user notification sink (defaults to the warning log)
    pub fn notifications(mut self, notifications: Arc<dyn NotificationSink>) -> Self {
        self.notifications = Some(notifications);
        self
    }

    /// Build the reconciler and spawn its worker
    pub fn build(self) -> Result<Reconciler> {
        let displayed = self.displayed.ok_or(ReconcilerError::MissingActor)?;
        let source = self.source.ok_or(ReconcilerError::MissingSource)?;

        let flags = self
            .flags
            .unwrap_or_else(|| Arc::new(InMemoryFlagStore::new()));
        let patches = self.patches.unwrap_or_else(|| Arc::new(NullPatchSink));
        let notifications = self
            .notifications
            .unwrap_or_else(|| Arc::new(LogNotificationSink));

        let (command_tx, command_rx) =
            mpsc::channel::<Command>(self.config.command_buffer_size);
        let event_bus = EventBus::with_capacity(self.config.event_buffer_size);

        let handle = ReconcilerHandle::new(command_tx, event_bus.clone());

        let counters = CounterLedger::new(flags, self.config.hud_config.clone());
        let worker = ReconcileWorker::new(
            displayed,
            source,
            counters,
            patches,
            notifications,
            event_bus,
            command_rx,
        );

        let worker_handle = tokio::spawn(async move {
            worker.run().await;
        });

        Ok(Reconciler {
            handle,
            worker_handle,
        })
    }
}
