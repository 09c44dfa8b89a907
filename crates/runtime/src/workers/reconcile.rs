//! Reconcile worker that owns the binding registry and counter ledger.
//!
//! Receives commands from [`crate::api::ReconcilerHandle`], re-reads host
//! state through [`DocumentSource`], and patches bound cells through the
//! [`PatchSink`]. The command channel is the single consumer queue: commands
//! are processed in dispatch order, each to completion, never dropped and
//! never merged. Duplicate suppression is deliberately not attempted; every
//! pass re-reads the source of truth, so recomputation is idempotent and
//! bounded.

use std::sync::Arc;

use tokio::sync::{mpsc, oneshot};
use tracing::{debug, warn};

use hud_core::aggregate;
use hud_core::classify;
use hud_core::extract::{self, ResourceKind};
use hud_core::snapshot::{ActorId, ActorSnapshot, ItemId, ResourcePool, SpellbookSnapshot};

use crate::api::{ReconcilerError, Result};
use crate::bindings::{BindingRegistry, CellBinding, CellId};
use crate::counters::{CounterKind, CounterLedger};
use crate::events::{CellEvent, CounterEvent, Event, EventBus, HostEvent};
use crate::host::DocumentSource;
use crate::view::{CellPatch, NotificationSink, PatchSink};

/// Commands that can be sent to the reconcile worker
pub enum Command {
    /// Process one host change notification to completion.
    Dispatch { event: HostEvent },
    /// Register a display-cell binding (replaces any previous binding of the
    /// same cell).
    Bind { binding: CellBinding },
    /// Mark a cell's element as detached from the visible tree.
    Detach { cell: CellId },
    /// Spend from a counter after an action use.
    UseCounter {
        kind: CounterKind,
        cost: u32,
        reply: oneshot::Sender<Result<u32>>,
    },
    /// Reset a counter to its kind maximum (rest, manual correction).
    ResetCounter {
        kind: CounterKind,
        reply: oneshot::Sender<Result<u32>>,
    },
    /// Read a counter (also used to fence on queue drain).
    QueryCounter {
        kind: CounterKind,
        reply: oneshot::Sender<Result<u32>>,
    },
}

/// Background task that processes reconciliation commands.
///
/// The worker is the only owner of the binding registry; the authoritative
/// resource state stays with the host and is re-read on every pass, never
/// cached across passes.
pub struct ReconcileWorker {
    displayed: ActorId,
    bindings: BindingRegistry,
    source: Arc<dyn DocumentSource>,
    counters: CounterLedger,
    patches: Arc<dyn PatchSink>,
    notifications: Arc<dyn NotificationSink>,
    event_bus: EventBus,
    command_rx: mpsc::Receiver<Command>,
}

impl ReconcileWorker {
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn new(
        displayed: ActorId,
        source: Arc<dyn DocumentSource>,
        counters: CounterLedger,
        patches: Arc<dyn PatchSink>,
        notifications: Arc<dyn NotificationSink>,
        event_bus: EventBus,
        command_rx: mpsc::Receiver<Command>,
    ) -> Self {
        Self {
            displayed,
            bindings: BindingRegistry::new(),
            source,
            counters,
            patches,
            notifications,
            event_bus,
            command_rx,
        }
    }

    /// Main worker loop. Runs until every handle is dropped.
    pub async fn run(mut self) {
        while let Some(cmd) = self.command_rx.recv().await {
            self.handle_command(cmd).await;
        }
        debug!("reconcile worker command channel closed, shutting down");
    }

    async fn handle_command(&mut self, cmd: Command) {
        match cmd {
            Command::Dispatch { event } => self.reconcile(event).await,
            Command::Bind { binding } => self.bindings.bind(binding),
            Command::Detach { cell } => self.bindings.detach(&cell),
            Command::UseCounter { kind, cost, reply } => {
                let result = self.handle_use(kind, cost).await;
                if reply.send(result).is_err() {
                    debug!("UseCounter reply channel closed (caller dropped)");
                }
            }
            Command::ResetCounter { kind, reply } => {
                let result = self.handle_reset(kind).await;
                if reply.send(result).is_err() {
                    debug!("ResetCounter reply channel closed (caller dropped)");
                }
            }
            Command::QueryCounter { kind, reply } => {
                let result = self
                    .counters
                    .read(&self.displayed, kind)
                    .await
                    .map_err(ReconcilerError::from);
                if reply.send(result).is_err() {
                    debug!("QueryCounter reply channel closed (caller dropped)");
                }
            }
        }
    }

    /// One reconciliation pass: recompute the derived view of every cell the
    /// event made stale and patch only those.
    async fn reconcile(&mut self, event: HostEvent) {
        match event {
            HostEvent::ItemUpdated { actor, item } => {
                if actor == self.displayed {
                    self.reconcile_item(&actor, &item).await;
                }
            }
            HostEvent::ActorUpdated { actor, changed } => {
                if actor == self.displayed {
                    self.reconcile_actor(&actor, &changed).await;
                }
            }
            HostEvent::TurnAdvanced { active, .. } => {
                self.reconcile_turn(&active).await;
            }
            HostEvent::RoundAdvanced { combatants, .. } => {
                self.reconcile_round(&combatants).await;
            }
        }
    }

    async fn reconcile_item(&mut self, actor: &ActorId, item: &ItemId) {
        let Some(snapshot) = self.source.actor(actor).await else {
            warn!(%actor, "actor unresolvable during item reconciliation");
            self.downgrade_item_cells(item);
            return;
        };

        if let Some(book) = snapshot.spellbook(item) {
            self.reconcile_spellbook(&snapshot, book);
            return;
        }

        let resolved = match snapshot.item(item) {
            Some(found) => Some(found.clone()),
            None => self.source.item(actor, item).await,
        };

        match resolved {
            Some(found) => {
                let patch = match extract::item_uses(&found) {
                    Some(pool) => CellPatch::uses(pool, classify::depleted(pool)),
                    None => CellPatch::hide_uses(),
                };
                self.patch_item_cells(item, patch);
            }
            None => {
                // Deleted mid-flight; the cell keeps its face but loses the
                // uses indicator.
                warn!(%item, "item unresolvable, hiding uses indicator");
                self.downgrade_item_cells(item);
            }
        }
    }

    fn reconcile_spellbook(&self, snapshot: &ActorSnapshot, book: &SpellbookSnapshot) {
        let cells = aggregate::aggregate_cells(&book.ranks, |identity| snapshot.spell(identity));

        let targets: Vec<CellBinding> = self
            .bindings
            .attached_for_item(&book.id)
            .cloned()
            .collect();

        for binding in targets {
            let crate::bindings::SourceIdentity::Spell { identity, .. } = &binding.source else {
                continue;
            };

            let patch = match cells.iter().find(|cell| &cell.identity == identity) {
                Some(cell) => match cell.view.uses() {
                    Some(pool) => CellPatch::uses(pool, classify::depleted(pool)),
                    None => CellPatch::hide_uses(),
                },
                // No longer readied in any slot: no uses data for this cell.
                None => CellPatch::hide_uses(),
            };
            self.apply(&binding.cell, patch, false);
        }
    }

    async fn reconcile_actor(&mut self, actor: &ActorId, changed: &[ResourceKind]) {
        let Some(snapshot) = self.source.actor(actor).await else {
            warn!(%actor, "actor unresolvable during resource reconciliation");
            return;
        };

        for &kind in changed {
            let pool = extract::resource_pool(self.counters.config(), &snapshot, kind);
            let patch = CellPatch::uses(pool, classify::depleted(pool));
            // Focus fields arrive in multi-field host batches; defer the
            // visual write to the next frame so the batch lands at once.
            let deferred = kind == ResourceKind::Focus;
            self.patch_resource_cells(kind, patch, deferred);
        }
    }

    async fn reconcile_round(&mut self, combatants: &[ActorId]) {
        let mut notified = false;
        for combatant in combatants {
            match self.counters.reset(combatant, CounterKind::Reaction).await {
                Ok(value) => {
                    self.event_bus.publish(Event::Counter(CounterEvent::Reset {
                        actor: combatant.clone(),
                        kind: CounterKind::Reaction,
                        value,
                    }));
                }
                Err(err) => {
                    warn!(%combatant, error = %err, "failed to persist reaction reset");
                    self.notify_once(&mut notified, "Reaction counters could not be saved");
                }
            }
        }

        self.refresh_counter_cells(CounterKind::Reaction).await;
    }

    async fn reconcile_turn(&mut self, active: &ActorId) {
        // Counters are per-actor; only the combatant starting their turn
        // regains actions.
        if active != &self.displayed {
            return;
        }

        match self.counters.reset(active, CounterKind::Action).await {
            Ok(value) => {
                self.event_bus.publish(Event::Counter(CounterEvent::Reset {
                    actor: active.clone(),
                    kind: CounterKind::Action,
                    value,
                }));
            }
            Err(err) => {
                warn!(actor = %active, error = %err, "failed to persist action reset");
                self.notifications.warn("Action counter could not be saved");
            }
        }

        self.refresh_counter_cells(CounterKind::Action).await;
    }

    async fn handle_use(&mut self, kind: CounterKind, cost: u32) -> Result<u32> {
        let current = match self.counters.read(&self.displayed, kind).await {
            Ok(value) => value,
            Err(err) => {
                // A failed read degrades to the never-initialized default
                // rather than blocking the action.
                warn!(error = %err, "counter read failed, assuming full");
                kind.maximum(self.counters.config())
            }
        };
        let remaining = current.saturating_sub(cost);

        // Visual state first; a failed write must not roll it back. The next
        // pass re-reads the store and corrects any drift.
        let pool = ResourcePool::new(remaining, kind.maximum(self.counters.config()));
        self.patch_resource_cells(kind.resource(), CellPatch::uses(pool, classify::depleted(pool)), false);
        self.event_bus.publish(Event::Counter(CounterEvent::Spent {
            actor: self.displayed.clone(),
            kind,
            remaining,
        }));

        if let Err(err) = self.counters.write(&self.displayed, kind, remaining).await {
            warn!(error = %err, "failed to persist counter spend");
            self.notifications
                .warn("Action use could not be saved; the display will correct itself");
        }

        Ok(remaining)
    }

    async fn handle_reset(&mut self, kind: CounterKind) -> Result<u32> {
        let value = self.counters.reset(&self.displayed, kind).await?;
        self.event_bus.publish(Event::Counter(CounterEvent::Reset {
            actor: self.displayed.clone(),
            kind,
            value,
        }));
        self.refresh_counter_cells(kind).await;
        Ok(value)
    }

    async fn refresh_counter_cells(&mut self, kind: CounterKind) {
        let remaining = self
            .counters
            .read(&self.displayed, kind)
            .await
            .unwrap_or_else(|_| kind.maximum(self.counters.config()));
        let pool = ResourcePool::new(remaining, kind.maximum(self.counters.config()));
        self.patch_resource_cells(
            kind.resource(),
            CellPatch::uses(pool, classify::depleted(pool)),
            false,
        );
    }

    fn patch_resource_cells(&self, kind: ResourceKind, patch: CellPatch, deferred: bool) {
        let targets: Vec<CellId> = self
            .bindings
            .attached_for_resource(kind)
            .map(|binding| binding.cell.clone())
            .collect();
        for cell in targets {
            self.apply(&cell, patch, deferred);
        }
    }

    fn patch_item_cells(&self, item: &ItemId, patch: CellPatch) {
        let targets: Vec<CellId> = self
            .bindings
            .attached_for_item(item)
            .map(|binding| binding.cell.clone())
            .collect();
        for cell in targets {
            self.apply(&cell, patch, false);
        }
    }

    fn downgrade_item_cells(&self, item: &ItemId) {
        self.patch_item_cells(item, CellPatch::hide_uses());
    }

    fn apply(&self, cell: &CellId, patch: CellPatch, deferred: bool) {
        if deferred {
            self.patches.patch_deferred(cell, patch);
        } else {
            self.patches.patch(cell, patch);
        }
        self.event_bus.publish(Event::Cell(CellEvent::Patched {
            cell: cell.clone(),
            patch,
        }));
    }

    fn notify_once(&self, notified: &mut bool, message: &str) {
        if !*notified {
            self.notifications.warn(message);
            *notified = true;
        }
    }
}
