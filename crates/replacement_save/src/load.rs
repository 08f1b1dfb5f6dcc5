//! Rebuild replacement layers from a [`ReplacementConfig`].

use bevy::prelude::*;

use replacement::{
    ApplyOutcome, ApplyRequest, AssetRef, OverrideLayers, Placement, SlotPath, TemplateCatalog,
    TemplateId, TemplateKind,
};

use crate::records::{ReplacementConfig, ReplacementRecord, TemplateReplacements};

/// What happened to each record during [`ReplacementConfig::apply_to`].
///
/// Nothing here is fatal: a record that cannot be resolved is counted and
/// skipped.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadReport {
    /// Records turned into live entries.
    pub applied: usize,
    /// Slots governed by those entries.
    pub governed: usize,
    pub missing_templates: usize,
    pub missing_assets: usize,
    /// Records the layers refused, or whose slot index is out of range.
    pub rejected: usize,
}

impl LoadReport {
    pub fn is_clean(&self) -> bool {
        self.missing_templates == 0 && self.missing_assets == 0 && self.rejected == 0
    }

    pub fn skipped(&self) -> usize {
        self.missing_templates + self.missing_assets + self.rejected
    }
}

impl ReplacementConfig {
    /// Re-apply every record on top of the current layers.
    ///
    /// Global records go first and individual records last, so each higher
    /// scope claims its slots from the lower ones exactly as it did when the
    /// configuration was captured.
    pub fn apply_to(
        &self,
        layers: &mut OverrideLayers,
        catalog: &mut dyn TemplateCatalog,
    ) -> LoadReport {
        let mut report = LoadReport::default();
        let mut loader = Loader {
            layers,
            catalog,
            report: &mut report,
        };

        for (kind, records) in [
            (TemplateKind::Building, &self.all_buildings),
            (TemplateKind::Network, &self.all_networks),
        ] {
            for record in records {
                loader.apply(kind, record, |_, _| Some(Placement::Global));
            }
        }

        for (kind, lists) in [
            (TemplateKind::Building, &self.buildings),
            (TemplateKind::Network, &self.networks),
        ] {
            loader.apply_lists(kind, lists, |template, _| Some(Placement::Template(template)));
        }

        for (kind, lists) in [
            (TemplateKind::Building, &self.individual_buildings),
            (TemplateKind::Network, &self.individual_networks),
        ] {
            loader.apply_lists(kind, lists, |template, record| {
                individual_path(kind, record).map(|path| Placement::Slot(template, path))
            });
        }

        if report.is_clean() {
            info!(
                "Loaded {} replacement(s) governing {} slot(s)",
                report.applied, report.governed
            );
        } else {
            warn!(
                "Loaded {} replacement(s), skipped {} ({} missing template(s), {} missing asset(s), {} rejected)",
                report.applied,
                report.skipped(),
                report.missing_templates,
                report.missing_assets,
                report.rejected
            );
        }
        report
    }
}

/// Slot address persisted for an individual record.
fn individual_path(kind: TemplateKind, record: &ReplacementRecord) -> Option<SlotPath> {
    let index = usize::try_from(record.target_index).ok()?;
    match kind {
        TemplateKind::Building => Some(SlotPath::building(index)),
        TemplateKind::Network => {
            let lane = usize::try_from(record.lane_index).ok()?;
            Some(SlotPath::network(lane, index))
        }
    }
}

struct Loader<'a> {
    layers: &'a mut OverrideLayers,
    catalog: &'a mut dyn TemplateCatalog,
    report: &'a mut LoadReport,
}

impl Loader<'_> {
    fn apply_lists(
        &mut self,
        kind: TemplateKind,
        lists: &[TemplateReplacements],
        placement: impl Fn(TemplateId, &ReplacementRecord) -> Option<Placement>,
    ) {
        for list in lists {
            let Some(template) = self.catalog.find_template(kind, &list.template_name) else {
                warn!(
                    "{} '{}' not loaded; skipping {} replacement(s)",
                    kind.label(),
                    list.template_name,
                    list.replacements.len()
                );
                self.report.missing_templates += list.replacements.len();
                continue;
            };
            for record in &list.replacements {
                self.apply(kind, record, |_, record| placement(template, record));
            }
        }
    }

    fn apply(
        &mut self,
        kind: TemplateKind,
        record: &ReplacementRecord,
        placement: impl FnOnce(TemplateKind, &ReplacementRecord) -> Option<Placement>,
    ) {
        let Some((target, replacement)) = self.resolve_assets(record) else {
            self.report.missing_assets += 1;
            return;
        };
        let Some(placement) = placement(kind, record) else {
            warn!(
                "replacement of {}: invalid slot index {} (lane {})",
                target, record.target_index, record.lane_index
            );
            self.report.rejected += 1;
            return;
        };
        let request = ApplyRequest::new(placement, target, replacement, record.delta());
        match self.layers.apply(&mut *self.catalog, kind, request) {
            ApplyOutcome::Applied { governed } => {
                self.report.applied += 1;
                self.report.governed += governed;
            }
            ApplyOutcome::Rejected(_) => self.report.rejected += 1,
        }
    }

    fn resolve_assets(&self, record: &ReplacementRecord) -> Option<(AssetRef, AssetRef)> {
        let kind = record.asset_kind();
        let target = self.catalog.find_asset(kind, &record.target_name);
        let replacement = self.catalog.find_asset(kind, &record.replace_name);
        match (target, replacement) {
            (Some(target), Some(replacement)) => Some((target, replacement)),
            _ => {
                warn!(
                    "unknown {} in replacement '{}' -> '{}'; skipping",
                    kind.label(),
                    record.target_name,
                    record.replace_name
                );
                None
            }
        }
    }
}
