//! Cardinality engine
//!
//! Pure predicates over a snapshot's relationship set. `rel.set` uses
//! [`displaces`] to clear the edges a new one supersedes; the post-write
//! check uses [`breaches`] to confirm no type holds more live edges than
//! its mode allows.

use std::collections::BTreeMap;

use crate::model::{Cardinality, Relationship};
use crate::snapshot::Snapshot;

/// Check if writing `candidate` under `mode` must remove `existing`
///
/// An identical edge is never displaced; it is kept as the single copy.
pub fn displaces(mode: Cardinality, existing: &Relationship, candidate: &Relationship) -> bool {
    if existing.rel_type != candidate.rel_type || existing == candidate {
        return false;
    }
    match mode {
        Cardinality::OneToOne => existing.from == candidate.from || existing.to == candidate.to,
        Cardinality::ManyToOne => existing.from == candidate.from,
        Cardinality::ManyToMany => false,
    }
}

/// Edges `candidate` would displace, in stored order
pub fn conflicts<'a>(
    snapshot: &'a Snapshot,
    mode: Cardinality,
    candidate: &Relationship,
) -> Vec<&'a Relationship> {
    snapshot
        .relationships()
        .iter()
        .filter(|existing| displaces(mode, existing, candidate))
        .collect()
}

/// Find relationship types holding too many live edges at one endpoint
///
/// Types are visited in name order and endpoints in identifier order, so
/// the first breach is stable across runs.
///
/// Returns list of (rel_type, endpoint, reason) tuples
pub fn breaches(snapshot: &Snapshot) -> Vec<(String, String, String)> {
    let mut found = Vec::new();

    for (rel_type, mode) in snapshot.relationship_types() {
        let mut by_source: BTreeMap<&str, usize> = BTreeMap::new();
        let mut by_target: BTreeMap<&str, usize> = BTreeMap::new();

        for rel in snapshot
            .live_relationships()
            .filter(|r| &r.rel_type == rel_type)
        {
            *by_source.entry(rel.from.as_str()).or_insert(0) += 1;
            *by_target.entry(rel.to.as_str()).or_insert(0) += 1;
        }

        let check_sources = matches!(mode, Cardinality::OneToOne | Cardinality::ManyToOne);
        let check_targets = matches!(mode, Cardinality::OneToOne);

        if check_sources {
            for (endpoint, count) in by_source.iter().filter(|(_, n)| **n > 1) {
                found.push((
                    rel_type.clone(),
                    endpoint.to_string(),
                    format!("{} live edges leave it, {} allows one", count, mode),
                ));
            }
        }
        if check_targets {
            for (endpoint, count) in by_target.iter().filter(|(_, n)| **n > 1) {
                found.push((
                    rel_type.clone(),
                    endpoint.to_string(),
                    format!("{} live edges reach it, {} allows one", count, mode),
                ));
            }
        }
    }

    found
}
