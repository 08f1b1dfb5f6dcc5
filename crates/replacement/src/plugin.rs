//! Plugin that wires the replacement layers into the app: resources, request
//! events, and the systems that drain them.

use bevy::prelude::*;

use crate::assets::AssetRef;
use crate::catalog::{PrefabCatalog, SlotPath, TemplateId, TemplateKind};
use crate::layers::{ApplyRequest, EntryKey, OverrideLayers, Scope};
use crate::request_log::{RequestLog, RequestResult};
use crate::SaveableRegistry;

/// A change to the replacement layers, usually sent by a UI panel.
#[derive(Event, Debug, Clone, PartialEq)]
pub enum ReplacementRequest {
    Apply {
        kind: TemplateKind,
        request: ApplyRequest,
    },
    /// Revert one entry. With `reinstate_shadowed`, slots it releases go back
    /// to the nearest lower-scope replacement still configured for them.
    Revert {
        kind: TemplateKind,
        key: EntryKey,
        reinstate_shadowed: bool,
    },
    Restore {
        kind: TemplateKind,
        scope: Scope,
        template: TemplateId,
        path: SlotPath,
        target: AssetRef,
    },
    RevertAll,
}

/// Sent once per frame with every template whose slots changed, so renderers
/// can refresh the affected instances.
#[derive(Event, Debug, Clone, PartialEq, Eq)]
pub struct TemplatesChanged {
    pub templates: Vec<TemplateId>,
}

#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub struct ReplacementSet;

/// Drains [`ReplacementRequest`] events in arrival order.
pub fn process_replacement_requests(
    mut requests: EventReader<ReplacementRequest>,
    mut layers: ResMut<OverrideLayers>,
    mut catalog: ResMut<PrefabCatalog>,
    mut log: ResMut<RequestLog>,
) {
    for request in requests.read() {
        let result = match request {
            ReplacementRequest::Apply { kind, request } => {
                RequestResult::Applied(layers.apply(&mut *catalog, *kind, request.clone()))
            }
            ReplacementRequest::Revert {
                kind,
                key,
                reinstate_shadowed,
            } => {
                let released = layers.revert(&mut *catalog, *kind, key, true);
                let reinstated = if *reinstate_shadowed {
                    layers.restore_shadowed(&mut *catalog, *kind, key.scope(), &released)
                } else {
                    0
                };
                RequestResult::Reverted {
                    released: released.len(),
                    reinstated,
                }
            }
            ReplacementRequest::Restore {
                kind,
                scope,
                template,
                path,
                target,
            } => RequestResult::Restored(layers.restore(
                &mut *catalog,
                *kind,
                *scope,
                *template,
                *path,
                target,
            )),
            ReplacementRequest::RevertAll => {
                RequestResult::RevertedAll(layers.revert_all(&mut *catalog))
            }
        };
        log.push(request.clone(), result);
    }
}

/// Publish templates touched since the last frame.
pub fn flush_dirty_templates(
    mut catalog: ResMut<PrefabCatalog>,
    mut changed: EventWriter<TemplatesChanged>,
) {
    if !catalog.is_changed() {
        return;
    }
    let templates = catalog.take_dirty();
    if !templates.is_empty() {
        debug!("{} template(s) changed", templates.len());
        changed.send(TemplatesChanged { templates });
    }
}

pub struct ReplacementPlugin;

impl Plugin for ReplacementPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<PrefabCatalog>();
        app.init_resource::<OverrideLayers>();
        app.init_resource::<RequestLog>();
        app.init_resource::<SaveableRegistry>();

        app.add_event::<ReplacementRequest>();
        app.add_event::<TemplatesChanged>();

        app.add_systems(
            Update,
            (process_replacement_requests, flush_dirty_templates)
                .chain()
                .in_set(ReplacementSet),
        );
    }
}
