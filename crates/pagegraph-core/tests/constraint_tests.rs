mod common;

use common::{accept_json, apply_json, build};
use pagegraph_core::{RejectionKind, Snapshot};
use serde_json::{json, Value};

fn dinner_party() -> Snapshot {
    build(vec![
        json!({"op": "entity.create", "id": "alice", "parent": "root", "props": {}}),
        json!({"op": "entity.create", "id": "bob", "parent": "root", "props": {}}),
        json!({"op": "entity.create", "id": "table_1", "parent": "root", "props": {}}),
        json!({"op": "entity.create", "id": "table_2", "parent": "root", "props": {}}),
    ])
}

fn seat(who: &str, table: &str) -> Value {
    json!({"op": "rel.set", "from": who, "to": table, "type": "seated_at", "cardinality": "many_to_one"})
}

fn keep_apart(strict: bool) -> Value {
    json!({
        "op": "constraint.add",
        "id": "keep_apart",
        "rule": {"kind": "exclusion", "a": "alice", "b": "bob", "type": "seated_at"},
        "strict": strict
    })
}

#[test]
fn test_strict_exclusion_rejects_violating_write() {
    // GIVEN a strict rule keeping alice and bob apart, and alice at table_1
    let snapshot = accept_json(dinner_party(), keep_apart(true));
    let snapshot = accept_json(snapshot, seat("alice", "table_1"));
    let before = snapshot.clone();

    // WHEN seating bob at table_1
    let reduction = apply_json(snapshot, seat("bob", "table_1"));

    // THEN the write is rejected and nothing changes
    let rejection = reduction.rejection().expect("should be rejected");
    assert_eq!(rejection.kind(), RejectionKind::ConstraintViolated);
    assert_eq!(rejection.entity_id(), Some("keep_apart"));
    assert_eq!(reduction.snapshot, before);

    // AND seating bob elsewhere is fine
    let reduction = apply_json(reduction.snapshot, seat("bob", "table_2"));
    assert!(reduction.is_accepted());
}

#[test]
fn test_advisory_exclusion_warns_once() {
    // GIVEN an advisory rule and alice at table_1
    let snapshot = accept_json(dinner_party(), keep_apart(false));
    let snapshot = accept_json(snapshot, seat("alice", "table_1"));

    // WHEN seating bob at table_1
    let reduction = apply_json(snapshot, seat("bob", "table_1"));

    // THEN the write is accepted with one warning
    assert!(reduction.is_accepted());
    let warnings = reduction.outcome.warnings();
    assert_eq!(warnings.len(), 1);
    assert_eq!(warnings[0].constraint_id, "keep_apart");

    // AND an unrelated later write does not repeat it
    let reduction = apply_json(
        reduction.snapshot,
        json!({"op": "entity.update", "ref": "alice", "props": {"diet": "vegan"}}),
    );
    assert!(reduction.is_accepted());
    assert!(reduction.outcome.warnings().is_empty());
}

#[test]
fn test_strict_rule_refused_when_already_violated() {
    // GIVEN alice and bob already share a table
    let snapshot = accept_json(dinner_party(), seat("alice", "table_1"));
    let snapshot = accept_json(snapshot, seat("bob", "table_1"));

    // WHEN registering a strict exclusion
    let reduction = apply_json(snapshot.clone(), keep_apart(true));

    // THEN registration is refused
    assert_eq!(
        reduction.rejection().map(|r| r.kind()),
        Some(RejectionKind::ConstraintViolated)
    );
    assert!(reduction.snapshot.get_constraint("keep_apart").is_none());

    // AND an advisory one is accepted with a warning
    let reduction = apply_json(snapshot, keep_apart(false));
    assert!(reduction.is_accepted());
    assert_eq!(reduction.outcome.warnings().len(), 1);
}

#[test]
fn test_strict_bound_caps_incoming_edges() {
    let snapshot = accept_json(
        dinner_party(),
        json!({
            "op": "constraint.add",
            "id": "table_1_for_one",
            "rule": {"kind": "bound", "entity": "table_1", "scope": "incoming", "type": "seated_at", "max": 1},
            "strict": true
        }),
    );
    let snapshot = accept_json(snapshot, seat("alice", "table_1"));

    let reduction = apply_json(snapshot, seat("bob", "table_1"));
    assert_eq!(
        reduction.rejection().map(|r| r.kind()),
        Some(RejectionKind::ConstraintViolated)
    );
}

#[test]
fn test_strict_bound_blocks_removing_last_child() {
    // GIVEN a list that must keep at least one item
    let snapshot = build(vec![
        json!({"op": "entity.create", "id": "list", "parent": "root", "props": {}}),
        json!({"op": "entity.create", "id": "milk", "parent": "list", "props": {}}),
        json!({
            "op": "constraint.add",
            "id": "list_non_empty",
            "rule": {"kind": "bound", "entity": "list", "scope": "children", "min": 1},
            "strict": true
        }),
    ]);

    // WHEN removing the only item
    let reduction = apply_json(snapshot, json!({"op": "entity.remove", "ref": "milk"}));

    // THEN it is rejected
    assert_eq!(
        reduction.rejection().map(|r| r.kind()),
        Some(RejectionKind::ConstraintViolated)
    );
    assert!(reduction.snapshot.is_live("milk"));
}

#[test]
fn test_requires_rule_warns_on_unmatched_edge() {
    let snapshot = accept_json(
        dinner_party(),
        json!({
            "op": "constraint.add",
            "id": "bob_follows_alice",
            "rule": {"kind": "requires", "a": "bob", "b": "alice", "type": "seated_at"}
        }),
    );

    let reduction = apply_json(snapshot, seat("bob", "table_2"));
    assert!(reduction.is_accepted());
    assert_eq!(reduction.outcome.warnings().len(), 1);

    let reduction = apply_json(reduction.snapshot, seat("alice", "table_2"));
    assert!(reduction.outcome.warnings().is_empty());
}

#[test]
fn test_duplicate_constraint_id_rejected() {
    let snapshot = accept_json(dinner_party(), keep_apart(false));
    let reduction = apply_json(snapshot, keep_apart(false));
    assert_eq!(
        reduction.rejection().map(|r| r.kind()),
        Some(RejectionKind::DuplicateIdentifier)
    );
}
