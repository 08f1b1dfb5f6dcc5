//! In-memory template catalog.
//!
//! `PrefabCatalog` owns every loaded building and network template. It is the
//! one concrete [`TemplateCatalog`] adapter and doubles as the Bevy resource
//! the replacement plugin mutates.

use std::collections::{BTreeMap, BTreeSet};

use bevy::prelude::*;

use crate::assets::{AssetKind, AssetRef};

use super::access::TemplateCatalog;
use super::types::{PropSlot, SlotPath, TemplateId, TemplateKind};

// =============================================================================
// Template data
// =============================================================================

/// A building template: a flat list of prop/tree slots.
#[derive(Debug, Clone, PartialEq)]
pub struct BuildingTemplate {
    pub name: String,
    pub props: Vec<PropSlot>,
}

impl BuildingTemplate {
    pub fn new(name: impl Into<String>, props: Vec<PropSlot>) -> Self {
        Self {
            name: name.into(),
            props,
        }
    }
}

/// One lane of a network template. Lanes without props have an empty list.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct NetLane {
    pub props: Vec<PropSlot>,
}

impl NetLane {
    pub fn new(props: Vec<PropSlot>) -> Self {
        Self { props }
    }
}

/// A network template: lanes, each with its own prop slots.
#[derive(Debug, Clone, PartialEq)]
pub struct NetworkTemplate {
    pub name: String,
    pub lanes: Vec<NetLane>,
}

impl NetworkTemplate {
    pub fn new(name: impl Into<String>, lanes: Vec<NetLane>) -> Self {
        Self {
            name: name.into(),
            lanes,
        }
    }
}

#[derive(Debug, Clone)]
enum LoadedTemplate {
    Building(BuildingTemplate),
    Network(NetworkTemplate),
}

impl LoadedTemplate {
    fn kind(&self) -> TemplateKind {
        match self {
            LoadedTemplate::Building(_) => TemplateKind::Building,
            LoadedTemplate::Network(_) => TemplateKind::Network,
        }
    }

    fn name(&self) -> &str {
        match self {
            LoadedTemplate::Building(b) => &b.name,
            LoadedTemplate::Network(n) => &n.name,
        }
    }

    fn slots(&self) -> Box<dyn Iterator<Item = &PropSlot> + '_> {
        match self {
            LoadedTemplate::Building(b) => Box::new(b.props.iter()),
            LoadedTemplate::Network(n) => Box::new(n.lanes.iter().flat_map(|l| l.props.iter())),
        }
    }
}

// =============================================================================
// Resource
// =============================================================================

/// Every loaded template plus the set of known assets.
#[derive(Resource, Debug, Clone, Default)]
pub struct PrefabCatalog {
    templates: BTreeMap<TemplateId, LoadedTemplate>,
    assets: BTreeSet<AssetRef>,
    dirty: BTreeSet<TemplateId>,
    next_id: u32,
}

impl PrefabCatalog {
    /// Make an asset available for name lookup without placing it anywhere.
    pub fn register_asset(&mut self, asset: AssetRef) {
        self.assets.insert(asset);
    }

    pub fn load_building(&mut self, template: BuildingTemplate) -> TemplateId {
        self.insert(LoadedTemplate::Building(template))
    }

    pub fn load_network(&mut self, template: NetworkTemplate) -> TemplateId {
        self.insert(LoadedTemplate::Network(template))
    }

    fn insert(&mut self, template: LoadedTemplate) -> TemplateId {
        let id = TemplateId(self.next_id);
        self.next_id += 1;
        let found: Vec<AssetRef> = template.slots().filter_map(|s| s.asset.clone()).collect();
        self.assets.extend(found);
        debug!(
            "PrefabCatalog: loaded {} '{}' as {:?}",
            template.kind().label(),
            template.name(),
            id
        );
        self.templates.insert(id, template);
        id
    }

    /// Drop a template. Replacement records that still point at it are skipped
    /// on revert.
    pub fn unload(&mut self, template: TemplateId) -> bool {
        self.dirty.remove(&template);
        self.templates.remove(&template).is_some()
    }

    pub fn building(&self, template: TemplateId) -> Option<&BuildingTemplate> {
        match self.templates.get(&template) {
            Some(LoadedTemplate::Building(b)) => Some(b),
            _ => None,
        }
    }

    pub fn network(&self, template: TemplateId) -> Option<&NetworkTemplate> {
        match self.templates.get(&template) {
            Some(LoadedTemplate::Network(n)) => Some(n),
            _ => None,
        }
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    /// Templates marked dirty since the last call, in id order.
    pub fn take_dirty(&mut self) -> Vec<TemplateId> {
        std::mem::take(&mut self.dirty).into_iter().collect()
    }
}

impl TemplateCatalog for PrefabCatalog {
    fn templates(&self, kind: TemplateKind) -> Vec<TemplateId> {
        self.templates
            .iter()
            .filter(|(_, t)| t.kind() == kind)
            .map(|(id, _)| *id)
            .collect()
    }

    fn template_kind(&self, template: TemplateId) -> Option<TemplateKind> {
        self.templates.get(&template).map(LoadedTemplate::kind)
    }

    fn template_name(&self, template: TemplateId) -> Option<&str> {
        self.templates.get(&template).map(LoadedTemplate::name)
    }

    fn find_template(&self, kind: TemplateKind, name: &str) -> Option<TemplateId> {
        self.templates
            .iter()
            .find(|(_, t)| t.kind() == kind && t.name() == name)
            .map(|(id, _)| *id)
    }

    fn slot_paths(&self, template: TemplateId) -> Vec<SlotPath> {
        match self.templates.get(&template) {
            Some(LoadedTemplate::Building(b)) => (0..b.props.len()).map(SlotPath::building).collect(),
            Some(LoadedTemplate::Network(n)) => n
                .lanes
                .iter()
                .enumerate()
                .flat_map(|(lane, l)| (0..l.props.len()).map(move |i| SlotPath::network(lane, i)))
                .collect(),
            None => Vec::new(),
        }
    }

    fn slot(&self, template: TemplateId, path: SlotPath) -> Option<&PropSlot> {
        match (self.templates.get(&template)?, path) {
            (LoadedTemplate::Building(b), SlotPath::Building { index }) => b.props.get(index),
            (LoadedTemplate::Network(n), SlotPath::Network { lane, index }) => {
                n.lanes.get(lane)?.props.get(index)
            }
            _ => None,
        }
    }

    fn slot_mut(&mut self, template: TemplateId, path: SlotPath) -> Option<&mut PropSlot> {
        match (self.templates.get_mut(&template)?, path) {
            (LoadedTemplate::Building(b), SlotPath::Building { index }) => b.props.get_mut(index),
            (LoadedTemplate::Network(n), SlotPath::Network { lane, index }) => {
                n.lanes.get_mut(lane)?.props.get_mut(index)
            }
            _ => None,
        }
    }

    fn find_asset(&self, kind: AssetKind, name: &str) -> Option<AssetRef> {
        self.assets
            .iter()
            .find(|a| a.kind == kind && a.name == name)
            .cloned()
    }

    fn mark_dirty(&mut self, template: TemplateId) {
        if self.templates.contains_key(&template) {
            self.dirty.insert(template);
        }
    }
}
