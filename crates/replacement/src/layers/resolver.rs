//! Scope priority as data: the three managers of one template kind, ordered
//! strongest first.

use bevy::prelude::*;

use crate::assets::AssetRef;
use crate::catalog::{SlotPath, TemplateCatalog, TemplateId, TemplateKind};

use super::entry::{ApplyRequest, EntryKey, Placement};
use super::manager::{ApplyOutcome, OverrideManager, ReleasedSlot};
use super::scope::Scope;

#[derive(Debug, Clone)]
pub struct LayerSet {
    kind: TemplateKind,
    /// Indexed by [`Scope::rank`].
    managers: [OverrideManager; 3],
}

impl LayerSet {
    pub fn new(kind: TemplateKind) -> Self {
        Self {
            kind,
            managers: Scope::PRIORITY.map(|scope| OverrideManager::new(kind, scope)),
        }
    }

    pub fn kind(&self) -> TemplateKind {
        self.kind
    }

    pub fn manager(&self, scope: Scope) -> &OverrideManager {
        &self.managers[scope.rank()]
    }

    /// All managers, strongest first.
    pub fn managers(&self) -> &[OverrideManager] {
        &self.managers
    }

    pub fn is_empty(&self) -> bool {
        self.managers.iter().all(OverrideManager::is_empty)
    }

    /// Split into (stronger managers, the manager for `scope`, weaker managers).
    pub fn split(
        &mut self,
        scope: Scope,
    ) -> (&[OverrideManager], &mut OverrideManager, &mut [OverrideManager]) {
        let (higher, rest) = self.managers.split_at_mut(scope.rank());
        let (current, lower) = rest.split_at_mut(1);
        (&*higher, &mut current[0], lower)
    }

    /// The strongest manager governing this slot.
    pub fn governing(&self, template: TemplateId, path: SlotPath) -> Option<&OverrideManager> {
        self.managers.iter().find(|m| m.governs(template, path))
    }

    pub fn apply(
        &mut self,
        catalog: &mut dyn TemplateCatalog,
        request: ApplyRequest,
    ) -> ApplyOutcome {
        let (higher, manager, lower) = self.split(request.placement.scope());
        manager.apply(catalog, higher, lower, request)
    }

    pub fn revert(
        &mut self,
        catalog: &mut dyn TemplateCatalog,
        key: &EntryKey,
        remove_from_map: bool,
    ) -> Vec<ReleasedSlot> {
        self.managers[key.scope().rank()].revert(catalog, key, remove_from_map)
    }

    /// Restore a slot under `scope`, unless some manager already governs it.
    pub fn restore(
        &mut self,
        catalog: &mut dyn TemplateCatalog,
        scope: Scope,
        template: TemplateId,
        path: SlotPath,
        target: &AssetRef,
    ) -> bool {
        if let Some(owner) = self.governing(template, path) {
            debug!(
                "restore at {} scope: {:?} {:?} already held by {} replacement",
                scope.label(),
                template,
                path,
                owner.scope().label()
            );
            return false;
        }
        self.managers[scope.rank()].restore(catalog, template, path, target)
    }

    /// For each released slot, find the strongest scope below `reverted` that
    /// still has an entry for the slot's original asset and restore it there.
    pub fn restore_shadowed(
        &mut self,
        catalog: &mut dyn TemplateCatalog,
        reverted: Scope,
        released: &[ReleasedSlot],
    ) -> usize {
        let mut restored = 0;
        for slot in released {
            let candidate = reverted.lower().iter().copied().find(|&scope| {
                let key = EntryKey::new(
                    slot.target.clone(),
                    Placement::for_slot(scope, slot.template, slot.path),
                );
                self.manager(scope).has_entry(&key)
            });
            if let Some(scope) = candidate {
                if self.restore(catalog, scope, slot.template, slot.path, &slot.target) {
                    restored += 1;
                }
            }
        }
        restored
    }

    pub fn revert_all(&mut self, catalog: &mut dyn TemplateCatalog) -> usize {
        let mut reverted = 0;
        for manager in &mut self.managers {
            reverted += manager.revert_all(catalog);
        }
        reverted
    }
}
