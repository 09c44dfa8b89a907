//! Display-cell bindings.
//!
//! The host's renderer registers each displayed cell here together with the
//! source identity its view derives from. Bindings outlive nothing: when the
//! host re-renders and an element leaves the visible tree, the binding is
//! detached and reconciliation skips it. Skipping a detached binding is
//! expected, not an error.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use hud_core::extract::ResourceKind;
use hud_core::snapshot::{ItemId, SpellIdentity};

/// Identifier of a rendered display cell.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CellId(pub String);

impl CellId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

impl fmt::Display for CellId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// What a cell's derived view is computed from.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SourceIdentity {
    /// An item document's own uses/charges.
    Item(ItemId),
    /// An aggregated spell within one spellcasting entry.
    Spell {
        entry: ItemId,
        identity: SpellIdentity,
    },
    /// An actor-level resource pool.
    Resource(ResourceKind),
}

/// One cell bound to its source.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellBinding {
    pub cell: CellId,
    pub source: SourceIdentity,
    /// Element still attached to the visible tree.
    pub attached: bool,
}

impl CellBinding {
    pub fn new(cell: CellId, source: SourceIdentity) -> Self {
        Self {
            cell,
            source,
            attached: true,
        }
    }
}

/// Registry of every binding for one displayed HUD instance.
///
/// Owned exclusively by the reconciler worker; single-consumer processing
/// makes interior locking unnecessary.
#[derive(Default)]
pub struct BindingRegistry {
    bindings: HashMap<CellId, CellBinding>,
}

impl BindingRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a binding, replacing any previous binding of the same cell.
    pub fn bind(&mut self, binding: CellBinding) {
        self.bindings.insert(binding.cell.clone(), binding);
    }

    /// Marks a cell's element as detached from the visible tree.
    pub fn detach(&mut self, cell: &CellId) {
        if let Some(binding) = self.bindings.get_mut(cell) {
            binding.attached = false;
        }
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// Attached bindings backed by the given item.
    pub fn attached_for_item<'a>(
        &'a self,
        item: &'a ItemId,
    ) -> impl Iterator<Item = &'a CellBinding> {
        self.attached().filter(move |binding| {
            matches!(
                &binding.source,
                SourceIdentity::Item(id) if id == item,
            ) || matches!(
                &binding.source,
                SourceIdentity::Spell { entry, .. } if entry == item,
            )
        })
    }

    /// Attached bindings for an aggregated spell identity.
    pub fn attached_for_spell<'a>(
        &'a self,
        identity: &'a SpellIdentity,
    ) -> impl Iterator<Item = &'a CellBinding> {
        self.attached().filter(move |binding| {
            matches!(
                &binding.source,
                SourceIdentity::Spell { identity: bound, .. } if bound == identity,
            )
        })
    }

    /// Attached bindings for an actor-level resource kind.
    pub fn attached_for_resource(
        &self,
        kind: ResourceKind,
    ) -> impl Iterator<Item = &CellBinding> {
        self.attached()
            .filter(move |binding| binding.source == SourceIdentity::Resource(kind))
    }

    fn attached(&self) -> impl Iterator<Item = &CellBinding> {
        self.bindings.values().filter(|binding| binding.attached)
    }
}
