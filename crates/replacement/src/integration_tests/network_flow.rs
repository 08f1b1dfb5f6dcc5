use bevy::math::Vec3;

use crate::assets::AssetRef;
use crate::catalog::{NetLane, NetworkTemplate, PropSlot, SlotPath, TemplateKind};
use crate::layers::{ApplyOutcome, ApplyRequest, EntryKey, Placement, Scope, TransformDelta};
use crate::request_log::RequestResult;
use crate::test_harness::TestWorld;
use crate::ReplacementRequest;

// ====================================================================
// Network lane replacements
// ====================================================================

fn road_world() -> TestWorld {
    TestWorld::new()
        .with_network(NetworkTemplate::new(
            "Boulevard",
            vec![
                NetLane::new(vec![
                    PropSlot::new(AssetRef::tree("plane")),
                    PropSlot::new(AssetRef::prop("streetlight")),
                ]),
                NetLane::new(vec![PropSlot::new(AssetRef::tree("plane"))
                    .with_offset(Vec3::new(0.0, 0.0, 4.0))]),
            ],
        ))
        .with_building("Depot", vec![PropSlot::new(AssetRef::tree("plane"))])
        .with_asset(AssetRef::tree("birch"))
}

fn network_apply(placement: Placement, delta: TransformDelta) -> ReplacementRequest {
    ReplacementRequest::Apply {
        kind: TemplateKind::Network,
        request: ApplyRequest::new(
            placement,
            AssetRef::tree("plane"),
            AssetRef::tree("birch"),
            delta,
        ),
    }
}

#[test]
fn test_global_network_replacement_leaves_buildings_alone() {
    let mut world = road_world();
    let boulevard = world.template("Boulevard");
    let depot = world.template("Depot");

    let result = world.request(network_apply(Placement::Global, TransformDelta::default()));
    assert_eq!(
        result,
        Some(RequestResult::Applied(ApplyOutcome::Applied { governed: 2 }))
    );
    assert_eq!(
        world.slot(boulevard, SlotPath::network(1, 0)).asset,
        Some(AssetRef::tree("birch"))
    );
    assert_eq!(
        world.slot(depot, SlotPath::building(0)).asset,
        Some(AssetRef::tree("plane"))
    );
    assert_eq!(world.changed_batches(), &[vec![boulevard]]);
}

#[test]
fn test_network_grouped_probability_and_offset() {
    let mut world = road_world();
    let boulevard = world.template("Boulevard");
    let delta = TransformDelta::new(0.0, Vec3::new(1.0, 0.0, 0.0)).with_probability(30);
    world.request(network_apply(Placement::Template(boulevard), delta));

    let slot = world.slot(boulevard, SlotPath::network(1, 0));
    assert_eq!(slot.offset, Vec3::new(1.0, 0.0, 4.0));
    assert_eq!(slot.probability, 30);
    assert_eq!(slot.base_probability, 100);

    world.request(ReplacementRequest::Revert {
        kind: TemplateKind::Network,
        key: EntryKey::grouped(AssetRef::tree("plane"), boulevard),
        reinstate_shadowed: false,
    });
    let slot = world.slot(boulevard, SlotPath::network(1, 0));
    assert_eq!(slot.offset, Vec3::new(0.0, 0.0, 4.0));
    assert_eq!(slot.probability, 100);
}

#[test]
fn test_network_individual_on_one_lane_shadows_grouped() {
    let mut world = road_world();
    let boulevard = world.template("Boulevard");
    let path = SlotPath::network(0, 0);

    world.request(network_apply(
        Placement::Template(boulevard),
        TransformDelta::default(),
    ));
    world.request(network_apply(
        Placement::Slot(boulevard, path),
        TransformDelta::new(180.0, Vec3::ZERO),
    ));

    let layers = world.layers();
    assert_eq!(
        layers.active_replacement(TemplateKind::Network, Scope::Individual, boulevard, path),
        Some(&AssetRef::tree("plane"))
    );
    assert_eq!(
        layers.active_replacement(TemplateKind::Network, Scope::Grouped, boulevard, path),
        None
    );
    assert_eq!(world.slot(boulevard, path).rotation, 180.0);

    let rows = layers.slot_summaries(world.catalog(), boulevard);
    let scopes: Vec<Option<Scope>> = rows.iter().map(|r| r.scope).collect();
    assert_eq!(
        scopes,
        vec![Some(Scope::Individual), None, Some(Scope::Grouped)]
    );
}

#[test]
fn test_network_template_rejected_by_building_layers() {
    let mut world = road_world();
    let boulevard = world.template("Boulevard");
    let result = world.request(ReplacementRequest::Apply {
        kind: TemplateKind::Building,
        request: ApplyRequest::new(
            Placement::Template(boulevard),
            AssetRef::tree("plane"),
            AssetRef::tree("birch"),
            TransformDelta::default(),
        ),
    });
    assert!(matches!(
        result,
        Some(RequestResult::Applied(ApplyOutcome::Rejected(_)))
    ));
    assert_eq!(
        world.slot(boulevard, SlotPath::network(0, 0)).asset,
        Some(AssetRef::tree("plane"))
    );
}
