//! Export live replacement layers into a [`ReplacementConfig`].

use bevy::prelude::*;

use replacement::{OverrideLayers, Placement, Scope, TemplateCatalog, TemplateKind};

use crate::records::{push_grouped, ReplacementConfig, ReplacementRecord, TemplateReplacements};

impl ReplacementConfig {
    /// Snapshot every entry of every manager.
    ///
    /// Entries whose template is no longer loaded cannot be named and are
    /// left out with a warning.
    pub fn capture(layers: &OverrideLayers, catalog: &dyn TemplateCatalog) -> Self {
        let mut config = ReplacementConfig::default();
        for kind in [TemplateKind::Building, TemplateKind::Network] {
            for scope in Scope::PRIORITY {
                for (key, entry) in layers.manager(kind, scope).entries() {
                    let mut record = ReplacementRecord::from_entry(entry);
                    match key.placement {
                        Placement::Global => config.global_mut(kind).push(record),
                        Placement::Template(template) => {
                            let Some(name) = catalog.template_name(template) else {
                                warn!(
                                    "capture: {:?} unloaded, dropping grouped replacement of {}",
                                    template, key.target
                                );
                                continue;
                            };
                            push_grouped(config.grouped_mut(kind), name, record);
                        }
                        Placement::Slot(template, path) => {
                            let Some(name) = catalog.template_name(template) else {
                                warn!(
                                    "capture: {:?} unloaded, dropping individual replacement of {}",
                                    template, key.target
                                );
                                continue;
                            };
                            record.target_index = path.index() as i32;
                            if let Some(lane) = path.lane() {
                                record.lane_index = lane as i32;
                            }
                            push_grouped(config.individual_mut(kind), name, record);
                        }
                    }
                }
            }
        }
        debug!("captured {} replacement record(s)", config.len());
        config
    }

    fn global_mut(&mut self, kind: TemplateKind) -> &mut Vec<ReplacementRecord> {
        match kind {
            TemplateKind::Building => &mut self.all_buildings,
            TemplateKind::Network => &mut self.all_networks,
        }
    }

    fn grouped_mut(&mut self, kind: TemplateKind) -> &mut Vec<TemplateReplacements> {
        match kind {
            TemplateKind::Building => &mut self.buildings,
            TemplateKind::Network => &mut self.networks,
        }
    }

    fn individual_mut(&mut self, kind: TemplateKind) -> &mut Vec<TemplateReplacements> {
        match kind {
            TemplateKind::Building => &mut self.individual_buildings,
            TemplateKind::Network => &mut self.individual_networks,
        }
    }
}
