mod common;

use common::build;
use pagegraph_core::{replay_values, RejectionKind, Signal, Snapshot};
use serde_json::json;

#[test]
fn test_replay_from_checkpoint_matches_full_replay() {
    // GIVEN a log split into a prefix and a suffix
    let prefix = vec![
        json!({"op": "entity.create", "id": "list", "parent": "root", "props": {}}),
        json!({"op": "entity.create", "id": "milk", "parent": "list", "props": {"done": false}}),
    ];
    let suffix = vec![
        json!({"op": "entity.update", "ref": "milk", "props": {"done": true}}),
        json!({"op": "entity.create", "id": "eggs", "parent": "list", "props": {}}),
    ];
    let full: Vec<_> = prefix.iter().chain(suffix.iter()).cloned().collect();

    // WHEN replaying the whole log, and the suffix on top of a checkpoint
    let from_scratch = replay_values(Snapshot::new(), &full);
    let checkpoint = build(prefix);
    let from_checkpoint = replay_values(checkpoint, &suffix);

    // THEN both land on the same snapshot
    assert_eq!(from_scratch.snapshot, from_checkpoint.snapshot);
    assert_eq!(from_scratch.accepted_count(), 4);
}

#[test]
fn test_replay_records_rejections_and_continues() {
    let log = vec![
        json!({"op": "voice", "text": "Making a list"}),
        json!({"op": "entity.create", "id": "list", "parent": "root", "props": {}}),
        json!("not an object"),
        json!({"op": "entity.remove", "ref": "list"}),
        json!({"op": "entity.remove", "ref": "list"}),
    ];

    let result = replay_values(Snapshot::new(), &log);

    assert_eq!(result.outcomes.len(), 5);
    assert_eq!(result.rejected_count(), 2);
    assert_eq!(
        result.outcomes[2].rejection().map(|r| r.kind()),
        Some(RejectionKind::MalformedOperation)
    );
    assert_eq!(
        result.outcomes[4].rejection().map(|r| r.kind()),
        Some(RejectionKind::EntityAlreadyRemoved)
    );
    assert_eq!(
        result.signals,
        vec![Signal::Voice {
            text: "Making a list".to_string()
        }]
    );
    assert_eq!(result.snapshot.sequence(), 2);
}
