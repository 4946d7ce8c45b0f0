use tracing::debug;

use super::cardinality::{conflicts, displaces};
use crate::errors::{PageGraphError, Result};
use crate::model::{Cardinality, Relationship};
use crate::snapshot::Snapshot;

/// Write a typed edge, first removing the edges its cardinality forbids
///
/// An unseen type is registered with `cardinality` (default `many_to_many`)
/// and that mode is fixed from then on; for a registered type the supplied
/// cardinality is ignored. Writing an edge that already exists leaves a
/// single copy in its original position.
///
/// # Returns
/// The displaced edges, in stored order
///
/// # Errors
/// * `RelationshipEndpointMissing` - `from` or `to` is missing or removed
pub fn set_relationship(
    snapshot: &mut Snapshot,
    from: &str,
    to: &str,
    rel_type: &str,
    cardinality: Option<Cardinality>,
) -> Result<Vec<Relationship>> {
    for endpoint in [from, to] {
        if !snapshot.is_live(endpoint) {
            return Err(PageGraphError::RelationshipEndpointMissing {
                endpoint: endpoint.to_string(),
                rel_type: rel_type.to_string(),
            });
        }
    }

    let mode = match snapshot.cardinality_of(rel_type) {
        Some(registered) => {
            if let Some(requested) = cardinality.filter(|c| *c != registered) {
                debug!(
                    rel_type,
                    registered = %registered,
                    requested = %requested,
                    "cardinality already fixed; ignoring requested mode"
                );
            }
            registered
        }
        None => {
            let mode = cardinality.unwrap_or_default();
            snapshot
                .relationship_types
                .insert(rel_type.to_string(), mode);
            mode
        }
    };

    let candidate = Relationship::new(from, to, rel_type);
    let displaced: Vec<Relationship> = conflicts(snapshot, mode, &candidate)
        .into_iter()
        .cloned()
        .collect();

    snapshot.stamp();
    snapshot
        .relationships
        .retain(|existing| !displaces(mode, existing, &candidate));
    if !snapshot.relationships.contains(&candidate) {
        snapshot.relationships.push(candidate);
    }

    Ok(displaced)
}

/// Delete a typed edge if present
///
/// An absent edge is a no-op: nothing changes and no stamp is taken.
///
/// # Returns
/// `true` if an edge was removed
pub fn remove_relationship(snapshot: &mut Snapshot, from: &str, to: &str, rel_type: &str) -> bool {
    let target = Relationship::new(from, to, rel_type);
    match snapshot.relationships.iter().position(|r| *r == target) {
        Some(index) => {
            snapshot.relationships.remove(index);
            snapshot.stamp();
            true
        }
        None => false,
    }
}
