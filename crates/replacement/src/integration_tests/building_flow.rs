use bevy::math::Vec3;

use crate::assets::AssetRef;
use crate::catalog::{PropSlot, SlotPath, TemplateCatalog, TemplateKind};
use crate::layers::{
    ApplyOutcome, ApplyRequest, EntryKey, Placement, RejectReason, Scope, TransformDelta,
};
use crate::request_log::{RequestLog, RequestResult};
use crate::test_harness::TestWorld;
use crate::{AssetKind, ReplacementRequest};

// ====================================================================
// Building replacement flow through events
// ====================================================================

fn bench() -> AssetRef {
    AssetRef::prop("bench")
}

fn bin() -> AssetRef {
    AssetRef::prop("bin")
}

fn kiosk() -> AssetRef {
    AssetRef::prop("kiosk")
}

fn town() -> TestWorld {
    TestWorld::new()
        .with_building(
            "Square",
            vec![
                PropSlot::new(bench()).with_rotation(90.0),
                PropSlot::new(AssetRef::prop("lamp")),
                PropSlot::new(bench()),
            ],
        )
        .with_building("Yard", vec![PropSlot::new(bench()), PropSlot::empty()])
        .with_asset(bin())
        .with_asset(kiosk())
}

fn apply(placement: Placement, target: AssetRef, replacement: AssetRef) -> ReplacementRequest {
    ReplacementRequest::Apply {
        kind: TemplateKind::Building,
        request: ApplyRequest::new(placement, target, replacement, TransformDelta::default()),
    }
}

#[test]
fn test_apply_event_rewrites_slots_and_reports_changed_templates() {
    let mut world = town();
    let square = world.template("Square");
    let yard = world.template("Yard");

    let result = world.request(apply(Placement::Global, bench(), bin()));
    assert_eq!(
        result,
        Some(RequestResult::Applied(ApplyOutcome::Applied { governed: 3 }))
    );
    assert_eq!(world.slot(square, SlotPath::building(0)).asset, Some(bin()));
    assert_eq!(world.slot(square, SlotPath::building(0)).rotation, 90.0);
    assert_eq!(world.slot(yard, SlotPath::building(0)).asset, Some(bin()));
    assert!(world.slot(yard, SlotPath::building(1)).asset.is_none());
    assert_eq!(world.changed_batches(), &[vec![square, yard]]);
}

#[test]
fn test_rejected_request_is_logged_and_changes_nothing() {
    let mut world = town();
    let result = world.request(apply(Placement::Global, bench(), AssetRef::tree("oak")));
    assert_eq!(
        result,
        Some(RequestResult::Applied(ApplyOutcome::Rejected(
            RejectReason::KindMismatch {
                target: AssetKind::Prop,
                replacement: AssetKind::Tree,
            }
        )))
    );
    assert!(world.layers().is_empty());
    assert!(world.changed_batches().is_empty());
}

#[test]
fn test_requests_in_one_frame_run_in_order() {
    let mut world = town();
    let square = world.template("Square");
    world.send(apply(Placement::Template(square), bench(), bin()));
    world.send(apply(Placement::Template(square), bench(), kiosk()));
    world.send(ReplacementRequest::Revert {
        kind: TemplateKind::Building,
        key: EntryKey::grouped(bench(), square),
        reinstate_shadowed: false,
    });
    world.tick(1);

    let log = world.resource::<RequestLog>();
    assert_eq!(log.len(), 3);
    assert_eq!(
        log.last_result(),
        Some(RequestResult::Reverted {
            released: 2,
            reinstated: 0,
        })
    );
    assert_eq!(world.slot(square, SlotPath::building(0)).asset, Some(bench()));
    assert!(world.layers().is_empty());
    // All three requests touched the same template within one frame.
    assert_eq!(world.changed_batches(), &[vec![square]]);
}

#[test]
fn test_revert_with_reinstate_brings_back_grouped_replacement() {
    let mut world = town();
    let square = world.template("Square");
    let path = SlotPath::building(2);

    world.request(apply(Placement::Template(square), bench(), bin()));
    world.request(apply(Placement::Slot(square, path), bench(), kiosk()));
    assert_eq!(world.slot(square, path).asset, Some(kiosk()));

    let result = world.request(ReplacementRequest::Revert {
        kind: TemplateKind::Building,
        key: EntryKey::individual(bench(), square, path),
        reinstate_shadowed: true,
    });
    assert_eq!(
        result,
        Some(RequestResult::Reverted {
            released: 1,
            reinstated: 1,
        })
    );
    assert_eq!(world.slot(square, path).asset, Some(bin()));
    let (scope, _, _) = world
        .layers()
        .governing(world.catalog(), square, path)
        .expect("grouped replacement governs the slot again");
    assert_eq!(scope, Scope::Grouped);
}

#[test]
fn test_revert_without_reinstate_leaves_original() {
    let mut world = town();
    let square = world.template("Square");
    let path = SlotPath::building(0);

    world.request(apply(Placement::Global, bench(), bin()));
    world.request(apply(Placement::Slot(square, path), bench(), kiosk()));
    world.request(ReplacementRequest::Revert {
        kind: TemplateKind::Building,
        key: EntryKey::individual(bench(), square, path),
        reinstate_shadowed: false,
    });

    let slot = world.slot(square, path);
    assert_eq!(slot.asset, Some(bench()));
    assert_eq!(slot.rotation, 90.0);
    assert!(world
        .layers()
        .governing(world.catalog(), square, path)
        .is_none());

    // An explicit restore request puts the global replacement back.
    let result = world.request(ReplacementRequest::Restore {
        kind: TemplateKind::Building,
        scope: Scope::Global,
        template: square,
        path,
        target: bench(),
    });
    assert_eq!(result, Some(RequestResult::Restored(true)));
    assert_eq!(world.slot(square, path).asset, Some(bin()));
}

#[test]
fn test_restore_without_entry_is_refused() {
    let mut world = town();
    let square = world.template("Square");
    let result = world.request(ReplacementRequest::Restore {
        kind: TemplateKind::Building,
        scope: Scope::Grouped,
        template: square,
        path: SlotPath::building(0),
        target: bench(),
    });
    assert_eq!(result, Some(RequestResult::Restored(false)));
    assert_eq!(world.slot(square, SlotPath::building(0)).asset, Some(bench()));
}

#[test]
fn test_revert_all_event_restores_authored_templates() {
    let mut world = town();
    let square = world.template("Square");
    let yard = world.template("Yard");
    let before = world.catalog().clone();

    world.send(apply(Placement::Global, bench(), bin()));
    world.send(ReplacementRequest::Apply {
        kind: TemplateKind::Building,
        request: ApplyRequest::new(
            Placement::Slot(square, SlotPath::building(1)),
            AssetRef::prop("lamp"),
            kiosk(),
            TransformDelta::new(45.0, Vec3::new(0.0, 1.0, 0.0)).with_probability(20),
        ),
    });
    world.tick(1);
    assert!(!world.layers().is_empty());

    let result = world.request(ReplacementRequest::RevertAll);
    assert_eq!(result, Some(RequestResult::RevertedAll(4)));
    assert!(world.layers().is_empty());
    for template in [square, yard] {
        for index in 0..2 {
            let path = SlotPath::building(index);
            assert_eq!(Some(&world.slot(template, path)), before.slot(template, path));
        }
    }
}

#[test]
fn test_unloaded_template_is_skipped_on_revert() {
    let mut world = town();
    let square = world.template("Square");
    let yard = world.template("Yard");
    world.request(apply(Placement::Global, bench(), bin()));

    world.catalog_mut().unload(yard);
    let result = world.request(ReplacementRequest::Revert {
        kind: TemplateKind::Building,
        key: EntryKey::global(bench()),
        reinstate_shadowed: false,
    });
    assert_eq!(
        result,
        Some(RequestResult::Reverted {
            released: 2,
            reinstated: 0,
        })
    );
    assert_eq!(world.slot(square, SlotPath::building(2)).asset, Some(bench()));
}
