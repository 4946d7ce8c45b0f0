use crate::model::ROOT_ID;
use crate::snapshot::Snapshot;

/// Check if re-parenting `entity_id` under `candidate_parent` would create a cycle
///
/// Walks parent links upward from the candidate until it reaches `root` or
/// an unknown id. Meeting `entity_id` on the way means the candidate is the
/// entity itself or one of its descendants.
///
/// The walk is bounded by the entity count; a chain longer than that can
/// only be an existing loop and is treated as a cycle.
pub fn would_create_cycle(snapshot: &Snapshot, entity_id: &str, candidate_parent: &str) -> bool {
    let limit = snapshot.entities().len();
    let mut current = candidate_parent;

    for _ in 0..=limit {
        if current == entity_id {
            return true;
        }
        if current == ROOT_ID {
            return false;
        }
        match snapshot.get_entity_raw(current) {
            Some(entity) => current = entity.parent.as_str(),
            None => return false,
        }
    }

    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Entity, Props};

    fn chain() -> Snapshot {
        // root -> a -> b -> c
        let mut snapshot = Snapshot::new();
        for (id, parent) in [("a", ROOT_ID), ("b", "a"), ("c", "b")] {
            snapshot.insert_entity(Entity::new(
                id.to_string(),
                parent.to_string(),
                None,
                Props::new(),
                1,
            ));
        }
        snapshot
    }

    #[test]
    fn test_self_parent_is_cycle() {
        assert!(would_create_cycle(&chain(), "b", "b"));
    }

    #[test]
    fn test_descendant_parent_is_cycle() {
        let snapshot = chain();
        assert!(would_create_cycle(&snapshot, "a", "c"));
        assert!(would_create_cycle(&snapshot, "a", "b"));
    }

    #[test]
    fn test_sibling_or_ancestor_is_not_cycle() {
        let snapshot = chain();
        assert!(!would_create_cycle(&snapshot, "c", "a"));
        assert!(!would_create_cycle(&snapshot, "c", ROOT_ID));
        assert!(!would_create_cycle(&snapshot, "b", "unknown"));
    }
}
