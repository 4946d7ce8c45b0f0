use std::collections::{HashMap, HashSet};

use crate::model::ROOT_ID;
use crate::ops::cardinality;
use crate::snapshot::Snapshot;

/// Check if an entity is part of a cycle
///
/// Walks the parent chain; revisiting a node means the chain loops.
pub fn has_cycle(snapshot: &Snapshot, entity_id: &str) -> bool {
    let mut visited = HashSet::new();
    let mut current = Some(entity_id);

    while let Some(id) = current {
        if id == ROOT_ID {
            break;
        }
        if !visited.insert(id) {
            return true;
        }
        current = snapshot.get_entity_raw(id).map(|e| e.parent.as_str());
    }

    false
}

/// Find entities whose parent is neither `root` nor present in the snapshot
///
/// Removed entities are included: a tombstone still needs its parent.
///
/// Returns list of (entity_id, parent_id) tuples
pub fn find_orphans(snapshot: &Snapshot) -> Vec<(String, String)> {
    snapshot
        .entities()
        .values()
        .filter(|e| e.parent != ROOT_ID && snapshot.get_entity_raw(&e.parent).is_none())
        .map(|e| (e.id.clone(), e.parent.clone()))
        .collect()
}

/// Find disagreements between child lists and parent pointers
///
/// Reports a child listed under a parent it does not point to (or listed
/// twice, or not an entity at all), and a live entity missing from its
/// parent's child list. Each child list is indexed once, so the pass is
/// linear in the number of entities.
///
/// Returns list of (parent_id, child_id) tuples
pub fn find_child_list_mismatches(snapshot: &Snapshot) -> Vec<(String, String)> {
    let mut mismatches = Vec::new();
    let mut listed: HashMap<&str, HashSet<&str>> = HashMap::new();

    let owners = std::iter::once(ROOT_ID).chain(snapshot.entities().keys().map(String::as_str));
    for owner in owners {
        let Some(children) = snapshot.children_of(owner) else {
            continue;
        };
        let seen = listed.entry(owner).or_default();
        for child in children {
            let points_back = snapshot
                .get_entity_raw(child)
                .is_some_and(|c| c.parent == owner);
            if !points_back || !seen.insert(child.as_str()) {
                mismatches.push((owner.to_string(), child.clone()));
            }
        }
    }

    // A reorder may drop tombstones from the order, so only live entities
    // must be listed under their parent. Orphans are reported by find_orphans.
    for entity in snapshot.list_entities() {
        if let Some(children) = listed.get(entity.parent.as_str()) {
            if !children.contains(entity.id.as_str()) {
                mismatches.push((entity.parent.clone(), entity.id.clone()));
            }
        }
    }

    mismatches
}

/// Nearest removed ancestor of `entity_id`, if any
///
/// The walk stops at `root`, at a missing parent, or after as many steps as
/// there are entities.
pub fn removed_ancestor<'a>(snapshot: &'a Snapshot, entity_id: &str) -> Option<&'a str> {
    let limit = snapshot.entities().len();
    let mut current = snapshot.get_entity_raw(entity_id)?.parent.as_str();
    let mut steps = 0;

    while current != ROOT_ID && steps <= limit {
        let ancestor = snapshot.get_entity_raw(current)?;
        if ancestor.removed {
            return Some(ancestor.id.as_str());
        }
        current = ancestor.parent.as_str();
        steps += 1;
    }

    None
}

/// Find live entities with a removed ancestor
///
/// Returns list of (entity_id, ancestor_id) tuples, nearest removed ancestor
pub fn find_live_under_removed(snapshot: &Snapshot) -> Vec<(String, String)> {
    snapshot
        .list_entities()
        .into_iter()
        .filter_map(|entity| {
            removed_ancestor(snapshot, &entity.id)
                .map(|ancestor| (entity.id.clone(), ancestor.to_string()))
        })
        .collect()
}

/// Find relationship types holding more live edges than their cardinality allows
///
/// Returns list of (rel_type, endpoint, reason) tuples
pub fn find_cardinality_breaches(snapshot: &Snapshot) -> Vec<(String, String, String)> {
    cardinality::breaches(snapshot)
}
