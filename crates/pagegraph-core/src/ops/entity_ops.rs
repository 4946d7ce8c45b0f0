use std::collections::HashSet;

use super::cycle_guard::would_create_cycle;
use crate::errors::{PageGraphError, Result};
use crate::model::entity::{insert_child, remove_child};
use crate::model::{Entity, Props, ROOT_ID};
use crate::snapshot::Snapshot;

/// Look up a parent slot for create/move
///
/// `root` is always available. An absent entity is reported as
/// `ParentNotFound`; a removed one keeps `EntityAlreadyRemoved`.
fn require_parent(snapshot: &Snapshot, parent: &str) -> Result<()> {
    if parent == ROOT_ID {
        return Ok(());
    }
    snapshot.get_entity(parent).map(|_| ()).map_err(|e| match e {
        PageGraphError::EntityNotFound { entity_id } => PageGraphError::ParentNotFound {
            parent_id: entity_id,
        },
        other => other,
    })
}

/// Create an entity and append it to its parent's child order
///
/// Null-valued props are dropped rather than stored.
///
/// # Errors
/// * `DuplicateIdentifier` - id is `root` or already used (removed ids included)
/// * `ParentNotFound` - parent doesn't exist
/// * `EntityAlreadyRemoved` - parent was removed
pub fn create_entity(
    snapshot: &mut Snapshot,
    id: &str,
    parent: &str,
    display: Option<String>,
    props: &Props,
) -> Result<()> {
    if snapshot.is_identifier_taken(id) {
        return Err(PageGraphError::DuplicateIdentifier { id: id.to_string() });
    }
    require_parent(snapshot, parent)?;

    let seq = snapshot.stamp();
    let entity = Entity::new(
        id.to_string(),
        parent.to_string(),
        display,
        Props::from_patch(props),
        seq,
    );
    snapshot.insert_entity(entity);
    snapshot.children_of_mut(parent)?.push(id.to_string());

    Ok(())
}

/// Shallow-merge props into a live entity
///
/// # Errors
/// * `EntityNotFound` - entity doesn't exist
/// * `EntityAlreadyRemoved` - entity was removed
pub fn update_entity(snapshot: &mut Snapshot, entity_ref: &str, props: &Props) -> Result<()> {
    snapshot.get_entity(entity_ref)?;

    let seq = snapshot.stamp();
    let entity = snapshot.get_entity_mut(entity_ref)?;
    entity.props.merge(props);
    entity.updated_seq = seq;

    Ok(())
}

/// Soft-remove an entity together with its whole subtree
///
/// Descendants that were already removed keep their original stamp. Props,
/// child lists and relationships are left in place; edges touching a removed
/// entity simply stop being live.
///
/// # Returns
/// The identifiers newly marked removed, `entity_ref` first
///
/// # Errors
/// * `EntityNotFound` - entity doesn't exist
/// * `EntityAlreadyRemoved` - entity was already removed (not idempotent)
pub fn remove_entity(snapshot: &mut Snapshot, entity_ref: &str) -> Result<Vec<String>> {
    snapshot.get_entity(entity_ref)?;

    let mut targets = vec![entity_ref.to_string()];
    targets.extend(snapshot.descendants(entity_ref));

    let seq = snapshot.stamp();
    let mut removed = Vec::with_capacity(targets.len());
    for id in targets {
        if let Some(entity) = snapshot.entities.get_mut(&id) {
            if !entity.removed {
                entity.removed = true;
                entity.updated_seq = seq;
                removed.push(id);
            }
        }
    }

    Ok(removed)
}

/// Relocate an entity under a new parent
///
/// `position` indexes the destination child list (after the entity has been
/// taken out of its old slot) and is clamped to its length; `None` appends.
///
/// # Errors
/// * `EntityNotFound` / `EntityAlreadyRemoved` - for the moved entity
/// * `ParentNotFound` / `EntityAlreadyRemoved` - for the destination
/// * `CycleDetected` - destination is the entity or one of its descendants
pub fn move_entity(
    snapshot: &mut Snapshot,
    entity_ref: &str,
    parent: &str,
    position: Option<usize>,
) -> Result<()> {
    let old_parent = snapshot.get_entity(entity_ref)?.parent.clone();
    require_parent(snapshot, parent)?;

    if would_create_cycle(snapshot, entity_ref, parent) {
        return Err(PageGraphError::CycleDetected {
            entity_id: entity_ref.to_string(),
            parent_id: parent.to_string(),
        });
    }

    let seq = snapshot.stamp();
    remove_child(snapshot.children_of_mut(&old_parent)?, entity_ref);
    insert_child(
        snapshot.children_of_mut(parent)?,
        entity_ref.to_string(),
        position,
    );

    let entity = snapshot.get_entity_mut(entity_ref)?;
    entity.parent = parent.to_string();
    entity.updated_seq = seq;

    Ok(())
}

/// Replace the child order of an entity or of `root`
///
/// `children` must be exactly a permutation of the current live children.
/// The stored list is replaced verbatim, so removed children drop out of it.
///
/// # Errors
/// * `EntityNotFound` / `EntityAlreadyRemoved` - for `entity_ref`
/// * `ReorderSetMismatch` - duplicate, foreign, or missing child
pub fn reorder_children(snapshot: &mut Snapshot, entity_ref: &str, children: &[String]) -> Result<()> {
    if entity_ref != ROOT_ID {
        snapshot.get_entity(entity_ref)?;
    }

    let live: Vec<String> = snapshot
        .live_children(entity_ref)
        .into_iter()
        .map(str::to_string)
        .collect();

    let mismatch = |reason: String| PageGraphError::ReorderSetMismatch {
        entity_id: entity_ref.to_string(),
        reason,
    };

    let mut seen = HashSet::new();
    for child in children {
        if !seen.insert(child.as_str()) {
            return Err(mismatch(format!("'{}' is listed more than once", child)));
        }
        if !live.contains(child) {
            return Err(mismatch(format!("'{}' is not a live child", child)));
        }
    }
    if let Some(missing) = live.iter().find(|c| !seen.contains(c.as_str())) {
        return Err(mismatch(format!("live child '{}' is missing", missing)));
    }

    let seq = snapshot.stamp();
    *snapshot.children_of_mut(entity_ref)? = children.to_vec();
    if entity_ref != ROOT_ID {
        snapshot.get_entity_mut(entity_ref)?.updated_seq = seq;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn props(value: serde_json::Value) -> Props {
        serde_json::from_value(value).unwrap()
    }

    fn with_section() -> Snapshot {
        let mut snapshot = Snapshot::new();
        create_entity(&mut snapshot, "section", ROOT_ID, None, &Props::new()).unwrap();
        create_entity(&mut snapshot, "a", "section", None, &Props::new()).unwrap();
        create_entity(&mut snapshot, "b", "section", None, &Props::new()).unwrap();
        snapshot
    }

    #[test]
    fn test_create_appends_and_stamps() {
        let snapshot = with_section();
        assert_eq!(snapshot.root_children(), ["section"]);
        assert_eq!(snapshot.children_of("section").unwrap(), ["a", "b"]);
        assert_eq!(snapshot.sequence(), 3);
        assert_eq!(snapshot.get_entity("b").unwrap().created_seq, 3);
    }

    #[test]
    fn test_create_drops_null_props() {
        let mut snapshot = Snapshot::new();
        create_entity(
            &mut snapshot,
            "item",
            ROOT_ID,
            None,
            &props(json!({"label": "Milk", "done": null})),
        )
        .unwrap();
        let item = snapshot.get_entity("item").unwrap();
        assert!(item.props.contains_key("label"));
        assert!(!item.props.contains_key("done"));
    }

    #[test]
    fn test_create_rejects_root_and_duplicates() {
        let mut snapshot = with_section();
        assert!(matches!(
            create_entity(&mut snapshot, ROOT_ID, ROOT_ID, None, &Props::new()),
            Err(PageGraphError::DuplicateIdentifier { .. })
        ));
        assert!(matches!(
            create_entity(&mut snapshot, "a", ROOT_ID, None, &Props::new()),
            Err(PageGraphError::DuplicateIdentifier { .. })
        ));
    }

    #[test]
    fn test_create_parent_errors() {
        let mut snapshot = with_section();
        assert!(matches!(
            create_entity(&mut snapshot, "x", "ghost", None, &Props::new()),
            Err(PageGraphError::ParentNotFound { ref parent_id }) if parent_id == "ghost"
        ));

        remove_entity(&mut snapshot, "a").unwrap();
        assert!(matches!(
            create_entity(&mut snapshot, "x", "a", None, &Props::new()),
            Err(PageGraphError::EntityAlreadyRemoved { .. })
        ));
    }

    #[test]
    fn test_update_merges_and_deletes() {
        let mut snapshot = Snapshot::new();
        create_entity(
            &mut snapshot,
            "item",
            ROOT_ID,
            None,
            &props(json!({"label": "Milk", "qty": 1})),
        )
        .unwrap();
        update_entity(&mut snapshot, "item", &props(json!({"qty": null, "done": true}))).unwrap();

        let item = snapshot.get_entity("item").unwrap();
        assert_eq!(item.props.get("label"), Some(&json!("Milk")));
        assert_eq!(item.props.get("done"), Some(&json!(true)));
        assert!(!item.props.contains_key("qty"));
        assert_eq!(item.updated_seq, 2);
    }

    #[test]
    fn test_remove_cascades_and_is_not_idempotent() {
        let mut snapshot = with_section();
        let removed = remove_entity(&mut snapshot, "section").unwrap();
        assert_eq!(removed, vec!["section", "a", "b"]);
        assert!(!snapshot.is_live("a"));

        assert!(matches!(
            remove_entity(&mut snapshot, "section"),
            Err(PageGraphError::EntityAlreadyRemoved { .. })
        ));
    }

    #[test]
    fn test_move_with_clamped_position() {
        let mut snapshot = with_section();
        move_entity(&mut snapshot, "b", ROOT_ID, Some(0)).unwrap();
        assert_eq!(snapshot.root_children(), ["b", "section"]);
        assert_eq!(snapshot.children_of("section").unwrap(), ["a"]);
        assert_eq!(snapshot.get_entity("b").unwrap().parent, ROOT_ID);

        move_entity(&mut snapshot, "b", "section", Some(42)).unwrap();
        assert_eq!(snapshot.children_of("section").unwrap(), ["a", "b"]);
    }

    #[test]
    fn test_move_rejects_cycle() {
        let mut snapshot = with_section();
        assert!(matches!(
            move_entity(&mut snapshot, "section", "a", None),
            Err(PageGraphError::CycleDetected { .. })
        ));
        assert!(matches!(
            move_entity(&mut snapshot, "section", "section", None),
            Err(PageGraphError::CycleDetected { .. })
        ));
    }

    #[test]
    fn test_reorder_requires_exact_live_set() {
        let mut snapshot = with_section();
        let order = |ids: &[&str]| ids.iter().map(|s| s.to_string()).collect::<Vec<_>>();

        assert!(matches!(
            reorder_children(&mut snapshot, "section", &order(&["b"])),
            Err(PageGraphError::ReorderSetMismatch { .. })
        ));
        assert!(matches!(
            reorder_children(&mut snapshot, "section", &order(&["b", "a", "a"])),
            Err(PageGraphError::ReorderSetMismatch { .. })
        ));
        assert!(matches!(
            reorder_children(&mut snapshot, "section", &order(&["b", "a", "x"])),
            Err(PageGraphError::ReorderSetMismatch { .. })
        ));

        reorder_children(&mut snapshot, "section", &order(&["b", "a"])).unwrap();
        assert_eq!(snapshot.children_of("section").unwrap(), ["b", "a"]);
    }

    #[test]
    fn test_reorder_drops_removed_children() {
        let mut snapshot = with_section();
        remove_entity(&mut snapshot, "a").unwrap();
        reorder_children(&mut snapshot, "section", &["b".to_string()]).unwrap();
        assert_eq!(snapshot.children_of("section").unwrap(), ["b"]);
    }
}
