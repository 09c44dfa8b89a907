//! Cloneable façade for issuing commands to the reconciler.
//!
//! [`ReconcilerHandle`] hides channel plumbing and offers async helpers for
//! dispatching host events, managing bindings, and streaming derived-state
//! events from specific topics.

use tokio::sync::{broadcast, mpsc, oneshot};

use crate::bindings::{CellBinding, CellId};
use crate::counters::CounterKind;
use crate::events::{Event, EventBus, HostEvent, Topic};
use crate::workers::Command;

use super::errors::{ReconcilerError, Result};

/// Client-facing handle to interact with the reconciler
#[derive(Clone)]
pub struct ReconcilerHandle {
    command_tx: mpsc::Sender<Command>,
    event_bus: EventBus,
}

impl ReconcilerHandle {
    pub(crate) fn new(command_tx: mpsc::Sender<Command>, event_bus: EventBus) -> Self {
        Self {
            command_tx,
            event_bus,
        }
    }

    /// Enqueues a host change notification.
    ///
    /// Events are processed in dispatch order, one at a time, each to
    /// completion; this returns as soon as the event is queued.
    pub async fn dispatch(&self, event: HostEvent) -> Result<()> {
        self.command_tx
            .send(Command::Dispatch { event })
            .await
            .map_err(|_| ReconcilerError::CommandChannelClosed)
    }

    /// Registers a display-cell binding.
    pub async fn bind(&self, binding: CellBinding) -> Result<()> {
        self.command_tx
            .send(Command::Bind { binding })
            .await
            .map_err(|_| ReconcilerError::CommandChannelClosed)
    }

    /// Marks a cell's element as detached from the visible tree.
    pub async fn detach(&self, cell: CellId) -> Result<()> {
        self.command_tx
            .send(Command::Detach { cell })
            .await
            .map_err(|_| ReconcilerError::CommandChannelClosed)
    }

    /// Spends from the displayed actor's counter after an action use.
    ///
    /// Returns the remaining count. The visual update applies even when
    /// persistence fails; the store catches up on the next pass.
    pub async fn use_counter(&self, kind: CounterKind, cost: u32) -> Result<u32> {
        let (reply_tx, reply_rx) = oneshot::channel();

        self.command_tx
            .send(Command::UseCounter {
                kind,
                cost,
                reply: reply_tx,
            })
            .await
            .map_err(|_| ReconcilerError::CommandChannelClosed)?;

        reply_rx.await.map_err(ReconcilerError::ReplyChannelClosed)?
    }

    /// Resets a counter to its kind maximum (rest, manual correction).
    pub async fn reset_counter(&self, kind: CounterKind) -> Result<u32> {
        let (reply_tx, reply_rx) = oneshot::channel();

        self.command_tx
            .send(Command::ResetCounter {
                kind,
                reply: reply_tx,
            })
            .await
            .map_err(|_| ReconcilerError::CommandChannelClosed)?;

        reply_rx.await.map_err(ReconcilerError::ReplyChannelClosed)?
    }

    /// Reads a counter for the displayed actor.
    ///
    /// Because the queue is strictly ordered, awaiting this also fences on
    /// every previously dispatched event having completed.
    pub async fn counter(&self, kind: CounterKind) -> Result<u32> {
        let (reply_tx, reply_rx) = oneshot::channel();

        self.command_tx
            .send(Command::QueryCounter {
                kind,
                reply: reply_tx,
            })
            .await
            .map_err(|_| ReconcilerError::CommandChannelClosed)?;

        reply_rx.await.map_err(ReconcilerError::ReplyChannelClosed)?
    }

    /// Subscribe to derived-state events from a specific topic
    ///
    /// # Topics
    ///
    /// - `Topic::Cell` - display-cell patches
    /// - `Topic::Counter` - counter resets and spends
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.event_bus.subscribe(topic)
    }

    /// Get a reference to the event bus for advanced usage
    pub fn event_bus(&self) -> &EventBus {
        &self.event_bus
    }
}
