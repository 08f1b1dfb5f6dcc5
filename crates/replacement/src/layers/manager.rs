//! The override manager shared by every (template kind, scope) pair.
//!
//! A manager is a cache of replacements it has already written into the
//! catalog: every record in its map addresses a slot that currently shows the
//! entry's replacement asset. Nothing is pending; apply and revert write
//! through immediately.

use std::collections::{BTreeMap, BTreeSet};

use bevy::prelude::*;

use crate::assets::{AssetKind, AssetRef};
use crate::catalog::{SlotPath, TemplateCatalog, TemplateId, TemplateKind};
use crate::config::MAX_PROBABILITY;

use super::entry::{ApplyRequest, EntryKey, OverrideEntry, Placement};
use super::record::PlacementRecord;
use super::scope::Scope;

// =============================================================================
// Outcomes
// =============================================================================

/// Why a replacement request was ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    /// Trees can only replace trees, props only props.
    KindMismatch {
        target: AssetKind,
        replacement: AssetKind,
    },
    /// The request's placement belongs to another scope's manager.
    ScopeMismatch { manager: Scope, request: Scope },
    /// The template is not loaded or is of the other template kind.
    UnknownTemplate(TemplateId),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplyOutcome {
    /// The entry is stored. `governed` may be zero.
    Applied { governed: usize },
    /// Nothing was mutated and no entry was created.
    Rejected(RejectReason),
}

impl ApplyOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, ApplyOutcome::Applied { .. })
    }

    pub fn governed(&self) -> usize {
        match self {
            ApplyOutcome::Applied { governed } => *governed,
            ApplyOutcome::Rejected(_) => 0,
        }
    }
}

/// A slot handed back to its original asset by a revert.
#[derive(Debug, Clone, PartialEq)]
pub struct ReleasedSlot {
    pub template: TemplateId,
    pub path: SlotPath,
    pub target: AssetRef,
}

// =============================================================================
// Manager
// =============================================================================

#[derive(Debug, Clone)]
pub struct OverrideManager {
    kind: TemplateKind,
    scope: Scope,
    entries: BTreeMap<EntryKey, OverrideEntry>,
}

impl OverrideManager {
    pub fn new(kind: TemplateKind, scope: Scope) -> Self {
        Self {
            kind,
            scope,
            entries: BTreeMap::new(),
        }
    }

    pub fn kind(&self) -> TemplateKind {
        self.kind
    }

    pub fn scope(&self) -> Scope {
        self.scope
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> impl Iterator<Item = (&EntryKey, &OverrideEntry)> {
        self.entries.iter()
    }

    pub fn entry(&self, key: &EntryKey) -> Option<&OverrideEntry> {
        self.entries.get(key)
    }

    pub fn has_entry(&self, key: &EntryKey) -> bool {
        self.entries.contains_key(key)
    }

    // -------------------------------------------------------------------------
    // Apply
    // -------------------------------------------------------------------------

    /// Apply (or re-apply) a replacement.
    ///
    /// `higher` and `lower` are the other managers of the same template kind,
    /// strongest first. Slots held by a higher manager are left alone. Slots
    /// held by a lower manager for the same target are claimed: the lower
    /// manager's snapshot is taken over and its record dropped.
    pub fn apply(
        &mut self,
        catalog: &mut dyn TemplateCatalog,
        higher: &[OverrideManager],
        lower: &mut [OverrideManager],
        request: ApplyRequest,
    ) -> ApplyOutcome {
        if let Some(reason) = self.validate(&*catalog, &request) {
            warn!(
                "{} {} replacement of {} with {} rejected: {:?}",
                self.kind.label(),
                self.scope.label(),
                request.target,
                request.replacement,
                reason
            );
            return ApplyOutcome::Rejected(reason);
        }

        let key = request.key();
        if self.entries.contains_key(&key) {
            debug!(
                "{} {} replacement of {} already active; reverting before re-apply",
                self.kind.label(),
                self.scope.label(),
                key.target
            );
            self.revert(catalog, &key, true);
        }

        let ApplyRequest {
            placement,
            target,
            replacement,
            delta,
        } = request;
        let mut entry = OverrideEntry::new(target, replacement, delta);

        for (template, path) in self.candidate_slots(&*catalog, placement) {
            if let Some(owner) = higher.iter().find(|m| m.governs(template, path)) {
                debug!(
                    "{:?} {:?} held by {} replacement; skipping",
                    template,
                    path,
                    owner.scope.label()
                );
                continue;
            }
            if self.governs(template, path) {
                continue;
            }

            let record = match lower.iter_mut().find(|m| m.governs(template, path)) {
                Some(owner) => {
                    if owner.active_replacement(template, path) != Some(&entry.target) {
                        continue;
                    }
                    debug!(
                        "{:?} {:?} claimed from {} replacement",
                        template,
                        path,
                        owner.scope.label()
                    );
                    match owner.take_record(template, path) {
                        Some(record) => record,
                        None => continue,
                    }
                }
                None => match catalog.slot(template, path) {
                    Some(slot) if slot.shows(&entry.target) => {
                        PlacementRecord::snapshot(template, path, slot)
                    }
                    _ => continue,
                },
            };
            entry.governed.push(record);
        }

        let mut touched = BTreeSet::new();
        for record in &entry.governed {
            if Self::write_replacement(self.scope, catalog, &entry, record) {
                touched.insert(record.template);
            }
        }
        for template in touched {
            catalog.mark_dirty(template);
        }

        let governed = entry.governed.len();
        info!(
            "{} {} replacement {} -> {} applied to {} slot(s)",
            self.kind.label(),
            self.scope.label(),
            entry.target,
            entry.replacement,
            governed
        );
        self.entries.insert(key, entry);
        ApplyOutcome::Applied { governed }
    }

    fn validate(
        &self,
        catalog: &dyn TemplateCatalog,
        request: &ApplyRequest,
    ) -> Option<RejectReason> {
        if !request.target.same_kind(&request.replacement) {
            return Some(RejectReason::KindMismatch {
                target: request.target.kind,
                replacement: request.replacement.kind,
            });
        }
        let requested = request.placement.scope();
        if requested != self.scope {
            return Some(RejectReason::ScopeMismatch {
                manager: self.scope,
                request: requested,
            });
        }
        if let Some(template) = request.placement.template() {
            if catalog.template_kind(template) != Some(self.kind) {
                return Some(RejectReason::UnknownTemplate(template));
            }
        }
        None
    }

    fn candidate_slots(
        &self,
        catalog: &dyn TemplateCatalog,
        placement: Placement,
    ) -> Vec<(TemplateId, SlotPath)> {
        match placement {
            Placement::Global => catalog
                .templates(self.kind)
                .into_iter()
                .flat_map(|t| catalog.slot_paths(t).into_iter().map(move |p| (t, p)))
                .collect(),
            Placement::Template(t) => catalog
                .slot_paths(t)
                .into_iter()
                .map(|p| (t, p))
                .collect(),
            Placement::Slot(t, p) => vec![(t, p)],
        }
    }

    /// Point the slot at the replacement, offset from the recorded original.
    fn write_replacement(
        scope: Scope,
        catalog: &mut dyn TemplateCatalog,
        entry: &OverrideEntry,
        record: &PlacementRecord,
    ) -> bool {
        let Some(slot) = catalog.slot_mut(record.template, record.path) else {
            warn!(
                "{:?} {:?} vanished while applying {}; skipping",
                record.template, record.path, entry.replacement
            );
            return false;
        };
        slot.asset = Some(entry.replacement.clone());
        slot.rotation = record.original_rotation + entry.delta.rotation;
        slot.offset = record.original_offset + entry.delta.offset;
        // A claimed slot may still carry the lower scope's probability.
        if scope.supports_probability() {
            slot.probability = entry
                .delta
                .probability
                .map_or(record.original_probability, |p| p.min(MAX_PROBABILITY));
        }
        true
    }

    // -------------------------------------------------------------------------
    // Revert
    // -------------------------------------------------------------------------

    /// Put every slot governed by `key` back to its recorded original.
    ///
    /// With `remove_from_map` false the inert entry stays in the map for the
    /// caller to discard. Returns the slots handed back, so the caller can
    /// restore a shadowed lower-scope replacement on them.
    pub fn revert(
        &mut self,
        catalog: &mut dyn TemplateCatalog,
        key: &EntryKey,
        remove_from_map: bool,
    ) -> Vec<ReleasedSlot> {
        let Some(entry) = self.entries.get(key) else {
            debug!(
                "{} {} revert: no entry for {}",
                self.kind.label(),
                self.scope.label(),
                key.target
            );
            return Vec::new();
        };
        let released = self.revert_entry(catalog, entry);
        if remove_from_map {
            self.entries.remove(key);
        }
        released
    }

    /// Revert every entry, then start over with an empty map.
    pub fn revert_all(&mut self, catalog: &mut dyn TemplateCatalog) -> usize {
        let mut reverted = 0;
        for entry in self.entries.values() {
            reverted += self.revert_entry(catalog, entry).len();
        }
        self.entries = BTreeMap::new();
        reverted
    }

    fn revert_entry(
        &self,
        catalog: &mut dyn TemplateCatalog,
        entry: &OverrideEntry,
    ) -> Vec<ReleasedSlot> {
        let mut released = Vec::with_capacity(entry.governed.len());
        let mut touched = BTreeSet::new();
        for record in &entry.governed {
            let Some(slot) = catalog.slot_mut(record.template, record.path) else {
                warn!(
                    "{} {} revert of {}: {:?} is no longer loaded; treating {:?} as reverted",
                    self.kind.label(),
                    self.scope.label(),
                    entry.target,
                    record.template,
                    record.path
                );
                continue;
            };
            slot.asset = Some(entry.target.clone());
            slot.rotation = record.original_rotation;
            slot.offset = record.original_offset;
            if self.scope.supports_probability() {
                slot.probability = record.original_probability;
            }
            touched.insert(record.template);
            released.push(ReleasedSlot {
                template: record.template,
                path: record.path,
                target: entry.target.clone(),
            });
        }
        for template in touched {
            catalog.mark_dirty(template);
        }
        info!(
            "{} {} replacement {} -> {} reverted on {} slot(s)",
            self.kind.label(),
            self.scope.label(),
            entry.target,
            entry.replacement,
            released.len()
        );
        released
    }

    // -------------------------------------------------------------------------
    // Per-slot bookkeeping
    // -------------------------------------------------------------------------

    /// Forget one governed slot without touching its live value. Used when
    /// another manager is about to overwrite it.
    pub fn remove_entry(&mut self, template: TemplateId, path: SlotPath) -> bool {
        self.take_record(template, path).is_some()
    }

    fn take_record(&mut self, template: TemplateId, path: SlotPath) -> Option<PlacementRecord> {
        for entry in self.entries.values_mut() {
            if let Some(pos) = entry.governed.iter().position(|r| r.addresses(template, path)) {
                return Some(entry.governed.remove(pos));
            }
        }
        None
    }

    /// Original asset of the entry governing this slot, if any.
    pub fn active_replacement(&self, template: TemplateId, path: SlotPath) -> Option<&AssetRef> {
        self.governing_entry(template, path).map(|(key, _)| &key.target)
    }

    pub fn governing_entry(
        &self,
        template: TemplateId,
        path: SlotPath,
    ) -> Option<(&EntryKey, &OverrideEntry)> {
        self.entries.iter().find(|(_, e)| e.governs(template, path))
    }

    pub fn governs(&self, template: TemplateId, path: SlotPath) -> bool {
        self.governing_entry(template, path).is_some()
    }

    /// Re-attach one slot to an existing entry for `target`, typically after a
    /// higher-scope replacement on it was reverted.
    ///
    /// The slot must currently show `target`; its live transform becomes the
    /// new snapshot. Returns false (and changes nothing) when there is no such
    /// entry, the slot is missing, or this manager already governs it.
    pub fn restore(
        &mut self,
        catalog: &mut dyn TemplateCatalog,
        template: TemplateId,
        path: SlotPath,
        target: &AssetRef,
    ) -> bool {
        let key = EntryKey::new(target.clone(), Placement::for_slot(self.scope, template, path));
        if !self.entries.contains_key(&key) {
            debug!(
                "{} {} restore: no entry for {}",
                self.kind.label(),
                self.scope.label(),
                target
            );
            return false;
        }
        if self.governs(template, path) {
            return false;
        }
        let record = match catalog.slot(template, path) {
            Some(slot) if slot.shows(target) => PlacementRecord::snapshot(template, path, slot),
            _ => {
                debug!(
                    "{} {} restore: {:?} {:?} does not show {}",
                    self.kind.label(),
                    self.scope.label(),
                    template,
                    path,
                    target
                );
                return false;
            }
        };

        let scope = self.scope;
        let Some(entry) = self.entries.get_mut(&key) else {
            return false;
        };
        if !Self::write_replacement(scope, catalog, entry, &record) {
            return false;
        }
        entry.governed.push(record);
        catalog.mark_dirty(template);
        info!(
            "{} {} replacement {} -> {} restored on {:?} {:?}",
            self.kind.label(),
            scope.label(),
            entry.target,
            entry.replacement,
            template,
            path
        );
        true
    }
}
