//! `OverrideLayers` resource: every replacement layer of every template kind.
//!
//! This is the one context object the rest of the application holds. It is
//! created with the app, reset with [`OverrideLayers::revert_all`], and never
//! shared as a global.

use bevy::prelude::*;

use crate::assets::AssetRef;
use crate::catalog::{SlotPath, TemplateCatalog, TemplateId, TemplateKind};

use super::entry::{ApplyRequest, EntryKey, OverrideEntry};
use super::manager::{ApplyOutcome, OverrideManager, ReleasedSlot};
use super::resolver::LayerSet;
use super::scope::Scope;
use super::summary::SlotSummary;

#[derive(Resource, Debug, Clone)]
pub struct OverrideLayers {
    building: LayerSet,
    network: LayerSet,
}

impl Default for OverrideLayers {
    fn default() -> Self {
        Self {
            building: LayerSet::new(TemplateKind::Building),
            network: LayerSet::new(TemplateKind::Network),
        }
    }
}

impl OverrideLayers {
    pub fn layer(&self, kind: TemplateKind) -> &LayerSet {
        match kind {
            TemplateKind::Building => &self.building,
            TemplateKind::Network => &self.network,
        }
    }

    pub fn layer_mut(&mut self, kind: TemplateKind) -> &mut LayerSet {
        match kind {
            TemplateKind::Building => &mut self.building,
            TemplateKind::Network => &mut self.network,
        }
    }

    pub fn manager(&self, kind: TemplateKind, scope: Scope) -> &OverrideManager {
        self.layer(kind).manager(scope)
    }

    pub fn is_empty(&self) -> bool {
        self.building.is_empty() && self.network.is_empty()
    }

    pub fn apply(
        &mut self,
        catalog: &mut dyn TemplateCatalog,
        kind: TemplateKind,
        request: ApplyRequest,
    ) -> ApplyOutcome {
        self.layer_mut(kind).apply(catalog, request)
    }

    /// Revert one entry. With `remove_entry` false the inert entry stays in
    /// its manager until the caller drops it. Shadowed lower-scope
    /// replacements are not reinstated; pass the returned slots to
    /// [`Self::restore_shadowed`] for that.
    pub fn revert(
        &mut self,
        catalog: &mut dyn TemplateCatalog,
        kind: TemplateKind,
        key: &EntryKey,
        remove_entry: bool,
    ) -> Vec<ReleasedSlot> {
        self.layer_mut(kind).revert(catalog, key, remove_entry)
    }

    pub fn restore(
        &mut self,
        catalog: &mut dyn TemplateCatalog,
        kind: TemplateKind,
        scope: Scope,
        template: TemplateId,
        path: SlotPath,
        target: &AssetRef,
    ) -> bool {
        self.layer_mut(kind)
            .restore(catalog, scope, template, path, target)
    }

    pub fn restore_shadowed(
        &mut self,
        catalog: &mut dyn TemplateCatalog,
        kind: TemplateKind,
        reverted: Scope,
        released: &[ReleasedSlot],
    ) -> usize {
        self.layer_mut(kind)
            .restore_shadowed(catalog, reverted, released)
    }

    /// Revert every replacement of every kind and scope.
    pub fn revert_all(&mut self, catalog: &mut dyn TemplateCatalog) -> usize {
        let reverted = self.building.revert_all(catalog) + self.network.revert_all(catalog);
        info!("Reverted all replacements ({} slot(s))", reverted);
        reverted
    }

    // -------------------------------------------------------------------------
    // Queries
    // -------------------------------------------------------------------------

    pub fn active_replacement(
        &self,
        kind: TemplateKind,
        scope: Scope,
        template: TemplateId,
        path: SlotPath,
    ) -> Option<&AssetRef> {
        self.manager(kind, scope).active_replacement(template, path)
    }

    /// The strongest replacement governing a slot.
    pub fn governing(
        &self,
        catalog: &dyn TemplateCatalog,
        template: TemplateId,
        path: SlotPath,
    ) -> Option<(Scope, &EntryKey, &OverrideEntry)> {
        let kind = catalog.template_kind(template)?;
        let manager = self.layer(kind).governing(template, path)?;
        let (key, entry) = manager.governing_entry(template, path)?;
        Some((manager.scope(), key, entry))
    }

    /// What the slot showed before any replacement.
    pub fn original_asset(
        &self,
        catalog: &dyn TemplateCatalog,
        template: TemplateId,
        path: SlotPath,
    ) -> Option<AssetRef> {
        match self.governing(catalog, template, path) {
            Some((_, key, _)) => Some(key.target.clone()),
            None => catalog.slot(template, path)?.asset.clone(),
        }
    }

    /// Live spawn probability; the authored value when nothing governs the slot.
    pub fn effective_probability(
        &self,
        catalog: &dyn TemplateCatalog,
        template: TemplateId,
        path: SlotPath,
    ) -> Option<u8> {
        let slot = catalog.slot(template, path)?;
        if self.governing(catalog, template, path).is_some() {
            Some(slot.probability)
        } else {
            Some(slot.base_probability)
        }
    }

    pub fn slot_summaries(
        &self,
        catalog: &dyn TemplateCatalog,
        template: TemplateId,
    ) -> Vec<SlotSummary> {
        catalog
            .slot_paths(template)
            .into_iter()
            .filter_map(|path| {
                let slot = catalog.slot(template, path)?;
                let governing = self.governing(catalog, template, path);
                Some(SlotSummary {
                    path,
                    original: match governing {
                        Some((_, key, _)) => Some(key.target.clone()),
                        None => slot.asset.clone(),
                    },
                    current: slot.asset.clone(),
                    scope: governing.map(|(scope, _, _)| scope),
                    probability: slot.probability,
                    base_probability: slot.base_probability,
                })
            })
            .collect()
    }
}
