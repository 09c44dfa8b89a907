//! Event-driven reconciliation runtime for the HUD rules in `hud-core`.
//!
//! This crate wires the host boundary (document resolution, flag storage,
//! patch sinks) and the binding registry into a single-consumer worker with
//! run-to-completion semantics. Consumers embed [`Reconciler`] per displayed
//! HUD instance and interact through [`ReconcilerHandle`].
//!
//! Modules are organized by responsibility:
//! - [`runtime`] hosts the orchestrator and builder
//! - [`api`] exposes the types downstream clients interact with
//! - [`events`] provides the topic-based event bus for derived-state routing
//! - [`adapter`] is the capability surface the host calls by trait
//! - [`host`] and [`repository`] are the asynchronous host-boundary contracts
//! - `workers` keeps the reconcile task internal to the crate
pub mod adapter;
pub mod api;
pub mod bindings;
pub mod counters;
pub mod events;
pub mod host;
pub mod repository;
pub mod runtime;
pub mod view;

mod workers;

pub use adapter::{DisplaySettings, HudAdapter, RestOutcome, RulesAdapter};
pub use api::{FlagError, HostWriteError, ReconcilerError, ReconcilerHandle, Result};
pub use bindings::{BindingRegistry, CellBinding, CellId, SourceIdentity};
pub use counters::{CounterKind, CounterLedger};
pub use events::{CellEvent, CounterEvent, Event, EventBus, HostEvent, Topic};
pub use host::{ActorWrite, DocumentSource};
pub use repository::{FileFlagStore, FlagStore, InMemoryFlagStore, MODULE_SCOPE};
pub use runtime::{Reconciler, ReconcilerBuilder, ReconcilerConfig};
pub use view::{CellPatch, NotificationSink, PatchSink, UsesPatch};
