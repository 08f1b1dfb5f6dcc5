//! # TestWorld: headless harness for replacement integration tests
//!
//! Wraps `bevy::app::App` + `ReplacementPlugin` so tests can load templates,
//! send requests as events, tick, and inspect the resulting resources.

use bevy::app::App;
use bevy::prelude::*;

use crate::assets::AssetRef;
use crate::catalog::{
    BuildingTemplate, NetworkTemplate, PrefabCatalog, PropSlot, SlotPath, TemplateId,
};
use crate::layers::OverrideLayers;
use crate::plugin::{ReplacementPlugin, ReplacementRequest, TemplatesChanged};
use crate::request_log::{RequestLog, RequestResult};

/// Every `TemplatesChanged` event seen so far, oldest first.
#[derive(Resource, Debug, Default)]
pub struct ChangedTemplatesLog {
    pub batches: Vec<Vec<TemplateId>>,
}

fn record_changed_templates(
    mut events: EventReader<TemplatesChanged>,
    mut log: ResMut<ChangedTemplatesLog>,
) {
    for event in events.read() {
        log.batches.push(event.templates.clone());
    }
}

pub struct TestWorld {
    app: App,
}

impl TestWorld {
    pub fn new() -> Self {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins);
        app.add_plugins(ReplacementPlugin);
        app.init_resource::<ChangedTemplatesLog>();
        app.add_systems(
            Update,
            record_changed_templates.after(crate::plugin::ReplacementSet),
        );
        app.update();
        Self { app }
    }

    // -----------------------------------------------------------------------
    // Setup (builder pattern)
    // -----------------------------------------------------------------------

    pub fn with_building(mut self, name: &str, props: Vec<PropSlot>) -> Self {
        self.catalog_mut()
            .load_building(BuildingTemplate::new(name, props));
        self
    }

    pub fn with_network(mut self, template: NetworkTemplate) -> Self {
        self.catalog_mut().load_network(template);
        self
    }

    pub fn with_asset(mut self, asset: AssetRef) -> Self {
        self.catalog_mut().register_asset(asset);
        self
    }

    // -----------------------------------------------------------------------
    // Driving
    // -----------------------------------------------------------------------

    /// Queue a request; it is processed on the next `tick`.
    pub fn send(&mut self, request: ReplacementRequest) {
        self.app.world_mut().send_event(request);
    }

    /// Send a request and run one update.
    pub fn request(&mut self, request: ReplacementRequest) -> Option<RequestResult> {
        self.send(request);
        self.tick(1);
        self.resource::<RequestLog>().last_result()
    }

    pub fn tick(&mut self, n: u32) {
        for _ in 0..n {
            self.app.update();
        }
    }

    // -----------------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------------

    pub fn resource<T: Resource>(&self) -> &T {
        self.app.world().resource::<T>()
    }

    pub fn catalog(&self) -> &PrefabCatalog {
        self.resource::<PrefabCatalog>()
    }

    pub fn catalog_mut(&mut self) -> Mut<'_, PrefabCatalog> {
        self.app.world_mut().resource_mut::<PrefabCatalog>()
    }

    pub fn layers(&self) -> &OverrideLayers {
        self.resource::<OverrideLayers>()
    }

    pub fn template(&self, name: &str) -> TemplateId {
        use crate::catalog::{TemplateCatalog, TemplateKind};
        let catalog = self.catalog();
        catalog
            .find_template(TemplateKind::Building, name)
            .or_else(|| catalog.find_template(TemplateKind::Network, name))
            .unwrap_or_else(|| panic!("template '{name}' not loaded"))
    }

    pub fn slot(&self, template: TemplateId, path: SlotPath) -> PropSlot {
        use crate::catalog::TemplateCatalog;
        self.catalog()
            .slot(template, path)
            .cloned()
            .unwrap_or_else(|| panic!("{template:?} has no slot {path:?}"))
    }

    pub fn changed_batches(&self) -> &[Vec<TemplateId>] {
        &self.resource::<ChangedTemplatesLog>().batches
    }
}

impl Default for TestWorld {
    fn default() -> Self {
        Self::new()
    }
}
