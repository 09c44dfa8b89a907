//! Capability interface the host rendering pipeline calls.
//!
//! The host invokes these methods at well-defined lifecycle moments: filter
//! and button providers at render time, cell decoration when a cell mounts,
//! the action-use path at click time. Composition replaces subclassing: the
//! host holds a `dyn HudAdapter`, nothing inherits from host types.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::warn;

use hud_core::config::HudConfig;
use hud_core::snapshot::{
    ActorId, ActorSnapshot, CombatSnapshot, ItemId, ItemSnapshot,
};
use hud_core::{
    ActionCost, ActionKind, ButtonSpec, CellData, CellTags, FilterChip, buttons, extract, filter,
    populate,
};

use crate::api::{ReconcilerError, ReconcilerHandle, Result};
use crate::counters::CounterKind;
use crate::host::{ActorWrite, DocumentSource};
use crate::repository::FlagStore;

/// Flag key the passive feat selection is persisted under.
const SELECTED_PASSIVES_KEY: &str = "selected_passives";

/// Display options the host queries before rendering cells.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DisplaySettings {
    pub show_item_names: bool,
    pub show_item_uses: bool,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            show_item_names: false,
            show_item_uses: true,
        }
    }
}

/// Outcome of a completed rest.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RestOutcome {
    pub hp_restored: u32,
}

/// System-rules capability surface called by the host.
#[async_trait]
pub trait HudAdapter: Send + Sync {
    /// Filter chips for the actor's current items and slots.
    fn filters(&self, actor: &ActorSnapshot) -> Vec<FilterChip>;

    /// Button row next to the grid.
    fn buttons(&self, actor: &ActorSnapshot, combat: &CombatSnapshot) -> Vec<ButtonSpec>;

    /// Whether one chip matches one cell's tags.
    fn matches_filter(&self, chip: &FilterChip, tags: &CellTags) -> bool;

    /// Tags for a freshly mounted cell.
    fn decorate_cell(&self, item: &ItemSnapshot) -> CellTags;

    /// Cell data for an item, resolved through the host.
    async fn cell_data(&self, actor: &ActorId, item: &ItemId) -> Option<CellData>;

    fn display_settings(&self) -> DisplaySettings;

    /// Click-time hook: spend the action economy cost of a used cell.
    async fn on_action_used(&self, kind: ActionKind, cost: Option<ActionCost>) -> Result<u32>;
}

/// Default adapter wiring the pure rules to the reconciler and host.
pub struct RulesAdapter {
    config: HudConfig,
    source: Arc<dyn DocumentSource>,
    flags: Arc<dyn FlagStore>,
    handle: ReconcilerHandle,
    settings: DisplaySettings,
}

impl RulesAdapter {
    pub fn new(
        config: HudConfig,
        source: Arc<dyn DocumentSource>,
        flags: Arc<dyn FlagStore>,
        handle: ReconcilerHandle,
    ) -> Self {
        Self {
            config,
            source,
            flags,
            handle,
            settings: DisplaySettings::default(),
        }
    }

    pub fn with_settings(mut self, settings: DisplaySettings) -> Self {
        self.settings = settings;
        self
    }

    /// Persists the actor's passive feat selection (feats with no action
    /// cost) to flag storage.
    pub async fn select_passives(&self, actor: &ActorId) -> Result<Vec<ItemId>> {
        let Some(snapshot) = self.source.actor(actor).await else {
            return Ok(Vec::new());
        };

        let passives = populate::passive_feats(&snapshot);
        let value = serde_json::to_value(&passives)
            .map_err(crate::repository::FlagError::Serialize)?;
        self.flags
            .write_flag(actor, SELECTED_PASSIVES_KEY, value)
            .await?;
        Ok(passives)
    }

    /// Eight-hour rest: restore hit points, clear expended preparations,
    /// refill focus, and reset both counters.
    ///
    /// Writes are eventually consistent like every other host write; the
    /// change notifications they trigger drive the follow-up passes.
    pub async fn rest(&self, actor: &ActorId) -> Result<RestOutcome> {
        let Some(snapshot) = self.source.actor(actor).await else {
            return Err(ReconcilerError::MissingActor);
        };

        let healed = buttons::rest_healing(snapshot.level, snapshot.con_mod);
        let hp = snapshot.hit_points.clamped();
        let new_hp = hp.max.min(hp.value + healed);
        self.source
            .write_actor(actor, ActorWrite::HitPoints(new_hp))
            .await?;

        for book in &snapshot.spellbooks {
            self.source
                .write_actor(
                    actor,
                    ActorWrite::ResetPreparations {
                        entry: book.id.clone(),
                    },
                )
                .await?;
        }

        if let Some(focus) = snapshot.focus {
            self.source
                .write_actor(actor, ActorWrite::Focus(focus.max))
                .await?;
        }

        self.handle.reset_counter(CounterKind::Action).await?;
        self.handle.reset_counter(CounterKind::Reaction).await?;

        Ok(RestOutcome {
            hp_restored: new_hp - hp.value,
        })
    }
}

#[async_trait]
impl HudAdapter for RulesAdapter {
    fn filters(&self, actor: &ActorSnapshot) -> Vec<FilterChip> {
        filter::standard_filters(actor)
    }

    fn buttons(&self, actor: &ActorSnapshot, combat: &CombatSnapshot) -> Vec<ButtonSpec> {
        buttons::hud_buttons(&self.config, actor, combat)
    }

    fn matches_filter(&self, chip: &FilterChip, tags: &CellTags) -> bool {
        filter::matches(chip, tags)
    }

    fn decorate_cell(&self, item: &ItemSnapshot) -> CellTags {
        CellTags::from_item(item)
    }

    async fn cell_data(&self, actor: &ActorId, item: &ItemId) -> Option<CellData> {
        let snapshot = self.source.item(actor, item).await?;
        Some(extract::cell_data(&snapshot))
    }

    fn display_settings(&self) -> DisplaySettings {
        self.settings
    }

    async fn on_action_used(&self, kind: ActionKind, cost: Option<ActionCost>) -> Result<u32> {
        match (kind, cost) {
            (_, Some(ActionCost::Reaction)) => {
                self.handle.use_counter(CounterKind::Reaction, 1).await
            }
            (_, Some(ActionCost::Actions(n))) if n > 0 => {
                self.handle
                    .use_counter(CounterKind::Action, u32::from(n))
                    .await
            }
            (ActionKind::Strike, None) => {
                // Strikes without an explicit cost are single actions.
                self.handle.use_counter(CounterKind::Action, 1).await
            }
            _ => {
                let remaining = self.handle.counter(CounterKind::Action).await;
                if remaining.is_err() {
                    warn!("counter query failed after free action use");
                }
                remaining
            }
        }
    }
}
