use crate::errors::{PageGraphError, Result};
use crate::model::ROOT_ID;
use crate::snapshot::Snapshot;

use super::invariants;

/// Validate the entity tree
///
/// Checks, in order:
///
/// 1. Parent chains are acyclic
/// 2. Every non-root parent exists (tombstones included)
/// 3. Child lists and parent pointers agree
/// 4. No live entity sits under a removed ancestor
///
/// # Errors
/// Returns the first violation found. Call the individual finders in
/// [`invariants`] for exhaustive reporting.
pub fn validate_tree(snapshot: &Snapshot) -> Result<()> {
    for entity in snapshot.entities().values() {
        if invariants::has_cycle(snapshot, &entity.id) {
            return Err(PageGraphError::CycleDetected {
                entity_id: entity.id.clone(),
                parent_id: entity.parent.clone(),
            });
        }
    }

    let orphans = invariants::find_orphans(snapshot);
    if let Some((entity_id, parent_id)) = orphans.first() {
        return Err(PageGraphError::OrphanedEntity {
            entity_id: entity_id.clone(),
            parent_id: parent_id.clone(),
        });
    }

    let mismatches = invariants::find_child_list_mismatches(snapshot);
    if let Some((parent_id, child_id)) = mismatches.first() {
        return Err(PageGraphError::ChildListInconsistent {
            parent_id: parent_id.clone(),
            child_id: child_id.clone(),
        });
    }

    let stranded = invariants::find_live_under_removed(snapshot);
    if let Some((entity_id, ancestor_id)) = stranded.first() {
        return Err(PageGraphError::LiveUnderRemoved {
            entity_id: entity_id.clone(),
            ancestor_id: ancestor_id.clone(),
        });
    }

    Ok(())
}

/// Validate one entity's place in the tree after a create or move
///
/// Only the entity's ancestor chain and the child lists it touches are
/// read, so the cost is bounded by tree depth plus sibling count. The rest
/// of the tree is assumed valid. `vacated` is the parent a move just took
/// the entity away from; it must no longer list it.
///
/// # Errors
/// Returns the same violations as [`validate_tree`], restricted to
/// `entity_id`.
pub fn validate_placement(
    snapshot: &Snapshot,
    entity_id: &str,
    vacated: Option<&str>,
) -> Result<()> {
    let entity = snapshot.get_entity(entity_id)?;
    let parent = entity.parent.as_str();

    if invariants::has_cycle(snapshot, entity_id) {
        return Err(PageGraphError::CycleDetected {
            entity_id: entity_id.to_string(),
            parent_id: parent.to_string(),
        });
    }

    let Some(siblings) = snapshot.children_of(parent) else {
        return Err(PageGraphError::OrphanedEntity {
            entity_id: entity_id.to_string(),
            parent_id: parent.to_string(),
        });
    };
    if siblings.iter().filter(|c| c.as_str() == entity_id).count() != 1 {
        return Err(PageGraphError::ChildListInconsistent {
            parent_id: parent.to_string(),
            child_id: entity_id.to_string(),
        });
    }

    if let Some(old) = vacated.filter(|old| *old != parent) {
        let still_listed = snapshot
            .children_of(old)
            .is_some_and(|children| children.iter().any(|c| c == entity_id));
        if still_listed {
            return Err(PageGraphError::ChildListInconsistent {
                parent_id: old.to_string(),
                child_id: entity_id.to_string(),
            });
        }
    }

    if parent != ROOT_ID {
        if let Some(ancestor) = invariants::removed_ancestor(snapshot, entity_id) {
            return Err(PageGraphError::LiveUnderRemoved {
                entity_id: entity_id.to_string(),
                ancestor_id: ancestor.to_string(),
            });
        }
    }

    Ok(())
}

/// Validate the relationship set against the type registry
///
/// # Errors
/// Returns `MalformedOperation` for an edge whose type was never registered,
/// or `CardinalityConflict` for the first type holding too many live edges.
pub fn validate_relationships(snapshot: &Snapshot) -> Result<()> {
    if let Some(rel) = snapshot
        .relationships()
        .iter()
        .find(|r| snapshot.cardinality_of(&r.rel_type).is_none())
    {
        return Err(PageGraphError::MalformedOperation {
            reason: format!("relationship {} has an unregistered type", rel),
        });
    }

    let breaches = invariants::find_cardinality_breaches(snapshot);
    if let Some((rel_type, endpoint, reason)) = breaches.first() {
        return Err(PageGraphError::CardinalityConflict {
            rel_type: rel_type.clone(),
            endpoint: endpoint.clone(),
            reason: reason.clone(),
        });
    }

    Ok(())
}

/// Run every structural check over a snapshot
///
/// # Errors
/// Returns the first tree violation, then the first relationship violation.
pub fn validate_snapshot(snapshot: &Snapshot) -> Result<()> {
    validate_tree(snapshot)?;
    validate_relationships(snapshot)
}
