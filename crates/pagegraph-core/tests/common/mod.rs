use pagegraph_core::{reduce, reduce_value, Primitive, Props, Reduction, Snapshot};
use serde_json::Value;

/// Reduce a primitive that the test expects to be accepted
///
/// # Panics
///
/// Panics with the rejection if the kernel refuses it
#[allow(dead_code)]
pub fn accept(snapshot: Snapshot, primitive: &Primitive) -> Snapshot {
    let reduction = reduce(snapshot, primitive);
    if let Some(rejection) = reduction.rejection() {
        panic!("expected {} to be accepted, got {}", primitive.name(), rejection);
    }
    reduction.snapshot
}

/// Reduce a raw JSON record that the test expects to be accepted
#[allow(dead_code)]
pub fn accept_json(snapshot: Snapshot, raw: Value) -> Snapshot {
    let reduction = reduce_value(snapshot, &raw);
    if let Some(rejection) = reduction.rejection() {
        panic!("expected {} to be accepted, got {}", raw, rejection);
    }
    reduction.snapshot
}

/// Reduce a raw JSON record, whatever the outcome
#[allow(dead_code)]
pub fn apply_json(snapshot: Snapshot, raw: Value) -> Reduction {
    reduce_value(snapshot, &raw)
}

/// Apply a whole log of records that must all be accepted
#[allow(dead_code)]
pub fn build(records: Vec<Value>) -> Snapshot {
    records.into_iter().fold(Snapshot::new(), accept_json)
}

/// `entity.create` with empty props
#[allow(dead_code)]
pub fn create(id: &str, parent: &str) -> Primitive {
    Primitive::EntityCreate {
        id: id.to_string(),
        parent: parent.to_string(),
        display: None,
        props: Props::new(),
    }
}

/// Snapshot with `section_a` (children `item_1`, `item_2`) and `section_b`
/// under root
#[allow(dead_code)]
pub fn sectioned_page() -> Snapshot {
    [
        create("section_a", "root"),
        create("item_1", "section_a"),
        create("item_2", "section_a"),
        create("section_b", "root"),
    ]
    .iter()
    .fold(Snapshot::new(), accept)
}

/// Snapshot with live `p1`, `p2`, `p3`, `g1`, `g2` under root
#[allow(dead_code)]
pub fn people_and_guests() -> Snapshot {
    ["p1", "p2", "p3", "g1", "g2"]
        .iter()
        .map(|id| create(id, "root"))
        .collect::<Vec<_>>()
        .iter()
        .fold(Snapshot::new(), accept)
}

/// Edit a snapshot through its checkpoint JSON, bypassing every handler
///
/// Builds the deliberately broken states a corrupted checkpoint could hold.
#[allow(dead_code)]
pub fn tamper(snapshot: &Snapshot, edit: impl FnOnce(&mut Value)) -> Snapshot {
    let mut checkpoint = serde_json::to_value(snapshot).unwrap();
    edit(&mut checkpoint);
    serde_json::from_value(checkpoint).unwrap()
}
