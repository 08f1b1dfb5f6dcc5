//! Override entries and the keys managers store them under.

use crate::assets::AssetRef;
use crate::catalog::{SlotPath, TemplateId};

use super::record::{PlacementRecord, TransformDelta};
use super::scope::Scope;

/// Which slots a replacement request covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Placement {
    /// Every loaded template of the manager's kind.
    Global,
    /// Every slot of one template.
    Template(TemplateId),
    /// One slot of one template.
    Slot(TemplateId, SlotPath),
}

impl Placement {
    pub fn scope(self) -> Scope {
        match self {
            Placement::Global => Scope::Global,
            Placement::Template(_) => Scope::Grouped,
            Placement::Slot(..) => Scope::Individual,
        }
    }

    pub fn template(self) -> Option<TemplateId> {
        match self {
            Placement::Global => None,
            Placement::Template(t) | Placement::Slot(t, _) => Some(t),
        }
    }

    /// The placement a manager at `scope` uses for this slot.
    pub fn for_slot(scope: Scope, template: TemplateId, path: SlotPath) -> Self {
        match scope {
            Scope::Global => Placement::Global,
            Scope::Grouped => Placement::Template(template),
            Scope::Individual => Placement::Slot(template, path),
        }
    }
}

/// Identity of an entry inside one manager: the original asset plus where the
/// replacement applies. At most one entry per key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntryKey {
    pub target: AssetRef,
    pub placement: Placement,
}

impl EntryKey {
    pub fn new(target: AssetRef, placement: Placement) -> Self {
        Self { target, placement }
    }

    pub fn global(target: AssetRef) -> Self {
        Self::new(target, Placement::Global)
    }

    pub fn grouped(target: AssetRef, template: TemplateId) -> Self {
        Self::new(target, Placement::Template(template))
    }

    pub fn individual(target: AssetRef, template: TemplateId, path: SlotPath) -> Self {
        Self::new(target, Placement::Slot(template, path))
    }

    pub fn scope(&self) -> Scope {
        self.placement.scope()
    }
}

/// A replacement request as it arrives from the UI or the config loader.
#[derive(Debug, Clone, PartialEq)]
pub struct ApplyRequest {
    pub placement: Placement,
    pub target: AssetRef,
    pub replacement: AssetRef,
    pub delta: TransformDelta,
}

impl ApplyRequest {
    pub fn new(
        placement: Placement,
        target: AssetRef,
        replacement: AssetRef,
        delta: TransformDelta,
    ) -> Self {
        Self {
            placement,
            target,
            replacement,
            delta,
        }
    }

    pub fn key(&self) -> EntryKey {
        EntryKey::new(self.target.clone(), self.placement)
    }
}

/// One active replacement and the slots it currently governs.
#[derive(Debug, Clone, PartialEq)]
pub struct OverrideEntry {
    pub target: AssetRef,
    pub replacement: AssetRef,
    pub delta: TransformDelta,
    /// Discovery order. No two records address the same slot.
    pub governed: Vec<PlacementRecord>,
}

impl OverrideEntry {
    pub fn new(target: AssetRef, replacement: AssetRef, delta: TransformDelta) -> Self {
        Self {
            target,
            replacement,
            delta,
            governed: Vec::new(),
        }
    }

    pub fn record(&self, template: TemplateId, path: SlotPath) -> Option<&PlacementRecord> {
        self.governed.iter().find(|r| r.addresses(template, path))
    }

    pub fn governs(&self, template: TemplateId, path: SlotPath) -> bool {
        self.record(template, path).is_some()
    }
}
