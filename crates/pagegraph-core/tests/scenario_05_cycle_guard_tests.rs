/// Scenario 5: Cycle guard on move
///
/// Tests that an entity can never be moved beneath itself.
mod common;

use common::{accept_json, apply_json, sectioned_page};
use pagegraph_core::RejectionKind;
use serde_json::json;

#[test]
fn test_scenario_05_error_move_under_own_child() {
    // GIVEN section_a with child item_1
    let snapshot = sectioned_page();
    let before = snapshot.clone();

    // WHEN moving section_a under item_1
    let reduction = apply_json(
        snapshot,
        json!({"op": "entity.move", "ref": "section_a", "parent": "item_1"}),
    );

    // THEN it is rejected with cycle-detected
    let rejection = reduction.rejection().expect("should be rejected");
    assert_eq!(rejection.kind(), RejectionKind::CycleDetected);
    assert_eq!(rejection.entity_id(), Some("section_a"));

    // AND the tree is unchanged
    assert_eq!(reduction.snapshot, before);
}

#[test]
fn test_scenario_05_error_move_under_self() {
    let reduction = apply_json(
        sectioned_page(),
        json!({"op": "entity.move", "ref": "section_a", "parent": "section_a"}),
    );
    assert_eq!(
        reduction.rejection().map(|r| r.kind()),
        Some(RejectionKind::CycleDetected)
    );
}

#[test]
fn test_scenario_05_happy_move_across_sections() {
    // GIVEN item_2 under section_a
    let snapshot = sectioned_page();

    // WHEN moving it to the front of section_b
    let snapshot = accept_json(
        snapshot,
        json!({"op": "entity.move", "ref": "item_2", "parent": "section_b", "position": 0}),
    );

    // THEN both child lists and the parent pointer agree
    assert_eq!(snapshot.children_of("section_a").unwrap(), ["item_1"]);
    assert_eq!(snapshot.children_of("section_b").unwrap(), ["item_2"]);
    assert_eq!(snapshot.get_entity("item_2").unwrap().parent, "section_b");
}

#[test]
fn test_scenario_05_error_move_to_missing_parent() {
    let reduction = apply_json(
        sectioned_page(),
        json!({"op": "entity.move", "ref": "item_1", "parent": "nowhere"}),
    );
    assert_eq!(
        reduction.rejection().map(|r| r.kind()),
        Some(RejectionKind::ParentNotFound)
    );
}
