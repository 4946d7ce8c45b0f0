/// Scenario 4: Cascading removal
///
/// Tests that removing an entity tombstones its whole subtree in one write.
mod common;

use common::{accept, accept_json, apply_json, build, create, sectioned_page};
use pagegraph_core::RejectionKind;
use serde_json::json;

#[test]
fn test_scenario_04_happy_remove_marks_children() {
    // GIVEN section_a with children item_1 and item_2
    let snapshot = sectioned_page();
    let seq_before = snapshot.sequence();

    // WHEN removing section_a
    let snapshot = accept_json(snapshot, json!({"op": "entity.remove", "ref": "section_a"}));

    // THEN section_a and both items are removed
    for id in ["section_a", "item_1", "item_2"] {
        let entity = snapshot.get_entity_raw(id).expect("tombstone should remain");
        assert!(entity.removed, "{} should be removed", id);
        assert_eq!(entity.updated_seq, seq_before + 1);
    }

    // AND section_b is untouched
    assert!(snapshot.is_live("section_b"));

    // AND the whole cascade took a single stamp
    assert_eq!(snapshot.sequence(), seq_before + 1);
}

#[test]
fn test_scenario_04_happy_deep_cascade() {
    // GIVEN a three-level subtree
    let snapshot = accept(sectioned_page(), &create("detail", "item_1"));

    // WHEN removing the top of it
    let snapshot = accept_json(snapshot, json!({"op": "entity.remove", "ref": "section_a"}));

    // THEN the grandchild is removed too
    assert!(!snapshot.is_live("detail"));
    assert!(snapshot.live_children("root").contains(&"section_b"));
    assert!(!snapshot.live_children("root").contains(&"section_a"));
}

#[test]
fn test_scenario_04_error_remove_twice() {
    // GIVEN a removed section
    let snapshot = accept_json(sectioned_page(), json!({"op": "entity.remove", "ref": "section_a"}));

    // WHEN removing it again
    let reduction = apply_json(snapshot, json!({"op": "entity.remove", "ref": "section_a"}));

    // THEN the repeat is surfaced as an error
    assert_eq!(
        reduction.rejection().map(|r| r.kind()),
        Some(RejectionKind::EntityAlreadyRemoved)
    );
}

#[test]
fn test_scenario_04_happy_edges_to_removed_entities_stop_being_live() {
    // GIVEN an edge from item_1 to section_b
    let snapshot = accept_json(
        sectioned_page(),
        json!({"op": "rel.set", "from": "item_1", "to": "section_b", "type": "links_to"}),
    );

    // WHEN removing section_a (and with it item_1)
    let snapshot = accept_json(snapshot, json!({"op": "entity.remove", "ref": "section_a"}));

    // THEN the edge is kept but no longer live
    assert_eq!(snapshot.relationships().len(), 1);
    assert_eq!(snapshot.live_relationships().count(), 0);
}

#[test]
fn test_scenario_04_happy_cascade_leaves_props_and_display_untouched() {
    // GIVEN a subtree whose entities all carry props and a display hint
    let snapshot = build(vec![
        json!({"op": "entity.create", "id": "shopping", "parent": "root",
               "display": "checklist", "props": {"title": "Groceries"}}),
        json!({"op": "entity.create", "id": "milk", "parent": "shopping",
               "display": "item", "props": {"done": false, "qty": 2}}),
        json!({"op": "entity.create", "id": "brand", "parent": "milk",
               "props": {"name": "Local", "tags": ["organic"]}}),
    ]);
    let originals: Vec<_> = ["shopping", "milk", "brand"]
        .iter()
        .map(|id| snapshot.get_entity(id).unwrap().clone())
        .collect();

    // WHEN removing the top of the subtree
    let snapshot = accept_json(snapshot, json!({"op": "entity.remove", "ref": "shopping"}));

    // THEN every tombstone keeps its props, display, parent and children
    for original in &originals {
        let tombstone = snapshot.get_entity_raw(&original.id).unwrap();
        assert!(tombstone.removed, "{} should be removed", original.id);
        assert_eq!(tombstone.props, original.props);
        assert_eq!(tombstone.display, original.display);
        assert_eq!(tombstone.parent, original.parent);
        assert_eq!(tombstone.children, original.children);
    }
    assert_eq!(
        snapshot.get_entity_raw("milk").unwrap().props.get("qty"),
        Some(&json!(2))
    );
}
