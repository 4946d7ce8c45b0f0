//! Constraint engine
//!
//! Evaluates registered constraints against a snapshot. Evaluation reads
//! only the live tree and the live relationship set, visits constraints in
//! identifier order, and never mutates anything.
//!
//! ## Gate semantics
//!
//! [`gate`] compares the snapshot before a write with the candidate after
//! it. Any strict constraint violated by the candidate rejects the write.
//! An advisory constraint produces a warning only when the write newly
//! violates it; an advisory rule that was already broken stays quiet.

use std::collections::BTreeSet;

use crate::errors::{PageGraphError, Result};
use crate::model::{BoundScope, Constraint, ConstraintRule, ConstraintWarning};
use crate::snapshot::Snapshot;

/// Live targets of `from` over edges of `rel_type`
pub fn live_targets<'a>(snapshot: &'a Snapshot, from: &str, rel_type: &str) -> BTreeSet<&'a str> {
    snapshot
        .live_relationships()
        .filter(|r| r.from == from && r.rel_type == rel_type)
        .map(|r| r.to.as_str())
        .collect()
}

/// Live sources reaching `to` over edges of `rel_type`
pub fn live_sources<'a>(snapshot: &'a Snapshot, to: &str, rel_type: &str) -> BTreeSet<&'a str> {
    snapshot
        .live_relationships()
        .filter(|r| r.to == to && r.rel_type == rel_type)
        .map(|r| r.from.as_str())
        .collect()
}

/// Check a single rule, returning a description of the violation if any
pub fn check_rule(snapshot: &Snapshot, rule: &ConstraintRule) -> Option<String> {
    match rule {
        ConstraintRule::Exclusion { a, b, rel_type } => {
            let of_a = live_targets(snapshot, a, rel_type);
            let of_b = live_targets(snapshot, b, rel_type);
            of_a.intersection(&of_b).next().map(|shared| {
                format!(
                    "{} and {} both hold a live '{}' edge to {}",
                    a, b, rel_type, shared
                )
            })
        }
        ConstraintRule::Requires { a, b, rel_type } => {
            let of_a = live_targets(snapshot, a, rel_type);
            let of_b = live_targets(snapshot, b, rel_type);
            of_a.difference(&of_b).next().map(|unmatched| {
                format!(
                    "{} -> {} via '{}' has no matching edge from {}",
                    a, unmatched, rel_type, b
                )
            })
        }
        ConstraintRule::Bound {
            entity,
            scope,
            rel_type,
            min,
            max,
        } => {
            let rel_type = rel_type.as_deref().unwrap_or_default();
            let count = match scope {
                BoundScope::Children => snapshot.live_children(entity).len(),
                BoundScope::Outgoing => live_targets(snapshot, entity, rel_type).len(),
                BoundScope::Incoming => live_sources(snapshot, entity, rel_type).len(),
            };
            let what = match scope {
                BoundScope::Children => "live children".to_string(),
                _ => format!("{} '{}' edges", scope.as_str(), rel_type),
            };

            if let Some(lo) = min.filter(|lo| count < *lo) {
                return Some(format!("{} has {} {}, at least {} required", entity, count, what, lo));
            }
            if let Some(hi) = max.filter(|hi| count > *hi) {
                return Some(format!("{} has {} {}, at most {} allowed", entity, count, what, hi));
            }
            None
        }
    }
}

/// Every violated constraint with its description, in identifier order
pub fn evaluate(snapshot: &Snapshot) -> Vec<(&Constraint, String)> {
    snapshot
        .constraints()
        .values()
        .filter_map(|c| check_rule(snapshot, &c.rule).map(|msg| (c, msg)))
        .collect()
}

/// Gate a candidate snapshot against the registered constraints
///
/// # Errors
/// Returns `ConstraintViolated` for the first strict constraint `after`
/// violates.
pub fn gate(before: &Snapshot, after: &Snapshot) -> Result<Vec<ConstraintWarning>> {
    let mut warnings = Vec::new();

    for (constraint, message) in evaluate(after) {
        if constraint.strict {
            return Err(PageGraphError::ConstraintViolated {
                constraint_id: constraint.id.clone(),
                reason: message,
            });
        }
        if check_rule(before, &constraint.rule).is_none() {
            warnings.push(ConstraintWarning {
                constraint_id: constraint.id.clone(),
                message,
            });
        }
    }

    Ok(warnings)
}
