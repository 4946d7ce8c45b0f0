//! The reducer - single entry point for applying primitives
//!
//! ## Atomicity Contract
//!
//! `reduce()` takes the current snapshot by value and always hands a
//! snapshot back:
//! - **Accepted**: the handler ran against a private copy, the touched part
//!   of the tree and every constraint check passed, and the copy is returned
//! - **Rejected**: the snapshot passed in is returned untouched together
//!   with a structured [`Rejection`]
//! - **No panics**: malformed input becomes a `malformed-operation` rejection
//!
//! Signals (`voice`, `escalate`, `batch.*`) skip all of this and are
//! returned on the side channel.
//!
//! ## Example
//!
//! ```
//! use pagegraph_core::{reduce, Primitive, Props, Snapshot};
//!
//! let create = Primitive::EntityCreate {
//!     id: "chore_chart".to_string(),
//!     parent: "root".to_string(),
//!     display: Some("page".to_string()),
//!     props: Props::new(),
//! };
//!
//! let reduction = reduce(Snapshot::new(), &create);
//! assert!(reduction.is_accepted());
//! assert_eq!(reduction.snapshot.sequence(), 1);
//! ```

use serde::Serialize;
use serde_json::Value;
use std::time::Instant;
use tracing::debug;

use crate::constraint_engine;
use crate::errors::{Rejection, Result};
use crate::model::ConstraintWarning;
use crate::ops::{constraint_ops, entity_ops, meta_ops, rel_ops, style_ops};
use crate::primitive::{Primitive, Signal};
use crate::rules::{validation, well_formed};
use crate::snapshot::Snapshot;
use crate::{log_op_end, log_op_error, log_op_start};

/// Verdict on one primitive
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Outcome {
    /// Applied; advisory constraints newly violated by the write are listed
    Accepted {
        #[serde(skip_serializing_if = "Vec::is_empty")]
        warnings: Vec<ConstraintWarning>,
    },
    /// Refused; nothing was applied
    Rejected { rejection: Rejection },
}

impl Outcome {
    pub fn accepted() -> Self {
        Outcome::Accepted {
            warnings: Vec::new(),
        }
    }

    pub fn is_accepted(&self) -> bool {
        matches!(self, Outcome::Accepted { .. })
    }

    pub fn rejection(&self) -> Option<&Rejection> {
        match self {
            Outcome::Rejected { rejection } => Some(rejection),
            Outcome::Accepted { .. } => None,
        }
    }

    /// Advisory warnings; empty for rejections
    pub fn warnings(&self) -> &[ConstraintWarning] {
        match self {
            Outcome::Accepted { warnings } => warnings,
            Outcome::Rejected { .. } => &[],
        }
    }
}

/// Result of reducing one primitive
#[derive(Debug, Clone)]
pub struct Reduction {
    /// The snapshot to hold from now on (unchanged on rejection)
    pub snapshot: Snapshot,
    pub outcome: Outcome,
    /// Side-channel marker, set only for signal primitives
    pub signal: Option<Signal>,
}

impl Reduction {
    pub fn is_accepted(&self) -> bool {
        self.outcome.is_accepted()
    }

    pub fn rejection(&self) -> Option<&Rejection> {
        self.outcome.rejection()
    }
}

/// Apply one primitive to a snapshot
///
/// Never fails and never panics: every refusal is reported through
/// [`Outcome::Rejected`] with the original snapshot handed back.
pub fn reduce(snapshot: Snapshot, primitive: &Primitive) -> Reduction {
    let op = primitive.name();

    if let Some(signal) = primitive.signal() {
        debug!(
            component = module_path!(),
            op,
            event = crate::schema::EVENT_SIGNAL,
            "signal passed through"
        );
        return Reduction {
            snapshot,
            outcome: Outcome::accepted(),
            signal: Some(signal),
        };
    }

    let start = Instant::now();
    log_op_start!(op, entity_id = primitive.subject_id());

    match apply(&snapshot, primitive) {
        Ok((candidate, warnings)) => {
            log_op_end!(
                op,
                duration_ms = start.elapsed().as_millis() as u64,
                entity_id = primitive.subject_id(),
                sequence = candidate.sequence(),
                warnings = warnings.len() as u64
            );
            Reduction {
                snapshot: candidate,
                outcome: Outcome::Accepted { warnings },
                signal: None,
            }
        }
        Err(err) => {
            let rejection = Rejection::from(err).with_op(op);
            log_op_error!(
                op,
                rejection.clone(),
                duration_ms = start.elapsed().as_millis() as u64,
                entity_id = rejection.entity_id()
            );
            Reduction {
                snapshot,
                outcome: Outcome::Rejected { rejection },
                signal: None,
            }
        }
    }
}

/// Parse a raw JSON record and reduce it
///
/// A record that fails [`well_formed::parse_primitive`] is rejected as
/// `malformed-operation` without touching the snapshot.
pub fn reduce_value(snapshot: Snapshot, raw: &Value) -> Reduction {
    match well_formed::parse_primitive(raw) {
        Ok(primitive) => reduce(snapshot, &primitive),
        Err(err) => {
            let mut rejection = Rejection::from(err);
            if let Some(op) = raw.get("op").and_then(Value::as_str) {
                rejection = rejection.with_op(op);
            }
            log_op_error!(
                rejection.op().unwrap_or("unknown"),
                rejection.clone(),
                duration_ms = 0u64
            );
            Reduction {
                snapshot,
                outcome: Outcome::Rejected { rejection },
                signal: None,
            }
        }
    }
}

/// Run the handler for `primitive` against a copy of `before`
fn apply(before: &Snapshot, primitive: &Primitive) -> Result<(Snapshot, Vec<ConstraintWarning>)> {
    well_formed::validate_primitive(primitive)?;

    let mut candidate = before.clone();
    let mut warnings = Vec::new();

    match primitive {
        Primitive::EntityCreate {
            id,
            parent,
            display,
            props,
        } => {
            entity_ops::create_entity(&mut candidate, id, parent, display.clone(), props)?;
            validation::validate_placement(&candidate, id, None)?;
        }

        Primitive::EntityUpdate { entity_ref, props } => {
            entity_ops::update_entity(&mut candidate, entity_ref, props)?;
        }

        Primitive::EntityRemove { entity_ref } => {
            let removed = entity_ops::remove_entity(&mut candidate, entity_ref)?;
            debug!(entity_id = %entity_ref, count = removed.len(), "subtree removed");
        }

        Primitive::EntityMove {
            entity_ref,
            parent,
            position,
        } => {
            let vacated = before.get_entity_raw(entity_ref).map(|e| e.parent.as_str());
            entity_ops::move_entity(&mut candidate, entity_ref, parent, *position)?;
            validation::validate_placement(&candidate, entity_ref, vacated)?;
        }

        Primitive::EntityReorder {
            entity_ref,
            children,
        } => {
            entity_ops::reorder_children(&mut candidate, entity_ref, children)?;
        }

        Primitive::RelSet {
            from,
            to,
            rel_type,
            cardinality,
        } => {
            let displaced =
                rel_ops::set_relationship(&mut candidate, from, to, rel_type, *cardinality)?;
            for edge in &displaced {
                debug!(rel_type = %rel_type, edge = %edge, "edge displaced");
            }
            validation::validate_relationships(&candidate)?;
        }

        Primitive::RelRemove { from, to, rel_type } => {
            if !rel_ops::remove_relationship(&mut candidate, from, to, rel_type) {
                debug!(rel_type = %rel_type, "edge absent; nothing to remove");
                return Ok((candidate, warnings));
            }
        }

        Primitive::StyleSet { props } => style_ops::set_global_style(&mut candidate, props),

        Primitive::StyleEntity { entity_ref, props } => {
            style_ops::set_entity_style(&mut candidate, entity_ref, props)?;
        }

        Primitive::MetaSet { props } => meta_ops::set_meta(&mut candidate, props),

        Primitive::MetaAnnotate { note, pinned, at } => {
            meta_ops::annotate(&mut candidate, note, *pinned, *at);
        }

        Primitive::ConstraintAdd { id, rule, strict } => {
            // Registration checks the new rule itself; existing rules cannot
            // change state when only the registry grows
            warnings.extend(constraint_ops::add_constraint(&mut candidate, id, rule, *strict)?);
            return Ok((candidate, warnings));
        }

        Primitive::Voice { .. }
        | Primitive::Escalate { .. }
        | Primitive::BatchStart { .. }
        | Primitive::BatchEnd { .. } => return Ok((candidate, warnings)),
    }

    warnings.extend(constraint_engine::gate(before, &candidate)?);
    Ok((candidate, warnings))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::RejectionKind;
    use crate::model::{Props, ROOT_ID};
    use serde_json::json;

    fn create(id: &str, parent: &str) -> Primitive {
        Primitive::EntityCreate {
            id: id.to_string(),
            parent: parent.to_string(),
            display: None,
            props: Props::new(),
        }
    }

    #[test]
    fn test_rejection_returns_original_snapshot() {
        let first = reduce(Snapshot::new(), &create("page", ROOT_ID));
        let before = first.snapshot.clone();

        let second = reduce(first.snapshot, &create("page", ROOT_ID));
        assert_eq!(second.snapshot, before);
        let rejection = second.rejection().unwrap();
        assert_eq!(rejection.kind(), RejectionKind::DuplicateIdentifier);
        assert_eq!(rejection.op(), Some("entity.create"));
    }

    #[test]
    fn test_signal_is_side_channel_only() {
        let reduction = reduce(
            Snapshot::new(),
            &Primitive::Escalate {
                reason: Some("ambiguous layout".to_string()),
                tier: None,
            },
        );
        assert!(reduction.is_accepted());
        assert_eq!(reduction.snapshot.sequence(), 0);
        assert!(matches!(reduction.signal, Some(Signal::Escalate { .. })));
    }

    #[test]
    fn test_reduce_value_reports_malformed() {
        let reduction = reduce_value(Snapshot::new(), &json!({"op": "entity.update", "ref": "x"}));
        let rejection = reduction.rejection().unwrap();
        assert_eq!(rejection.kind(), RejectionKind::MalformedOperation);
        assert_eq!(rejection.op(), Some("entity.update"));
    }

    #[test]
    fn test_typed_primitive_with_bad_identifier_is_malformed() {
        let reduction = reduce(Snapshot::new(), &create("Not Snake", ROOT_ID));
        assert_eq!(
            reduction.rejection().map(|r| r.kind()),
            Some(RejectionKind::MalformedOperation)
        );
    }

    #[test]
    fn test_outcome_serializes_with_status_tag() {
        let json = serde_json::to_value(Outcome::accepted()).unwrap();
        assert_eq!(json, json!({"status": "accepted"}));
    }
}
