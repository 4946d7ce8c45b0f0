//! Primitive validator
//!
//! Snapshot-independent shape checks. A primitive that fails here is
//! rejected as `malformed-operation` before any handler sees it.

use serde_json::Value;

use super::identifier::check_identifier;
use crate::errors::{PageGraphError, Result};
use crate::model::ConstraintRule;
use crate::primitive::{Primitive, KNOWN_OPS};

/// Parse a raw JSON record into a validated primitive
///
/// Checks, in order: the record is an object, it carries a recognized `op`
/// tag, every required field for that op is present with the right type,
/// and [`validate_primitive`] passes.
///
/// # Errors
///
/// Returns `MalformedOperation` describing the first failed check.
pub fn parse_primitive(raw: &Value) -> Result<Primitive> {
    let object = raw
        .as_object()
        .ok_or_else(|| malformed("primitive must be a JSON object"))?;

    let op = match object.get("op") {
        Some(Value::String(op)) => op.as_str(),
        Some(_) => return Err(malformed("'op' must be a string")),
        None => return Err(malformed("missing 'op' tag")),
    };

    if !KNOWN_OPS.contains(&op) {
        return Err(malformed(format!("unrecognized primitive type '{}'", op)));
    }

    let primitive: Primitive = serde_json::from_value(raw.clone())
        .map_err(|e| malformed(format!("{}: {}", op, e)))?;

    validate_primitive(&primitive)?;
    Ok(primitive)
}

/// Validate identifier grammar and rule shape of a typed primitive
///
/// # Errors
///
/// Returns `MalformedOperation` describing the first offending field.
pub fn validate_primitive(primitive: &Primitive) -> Result<()> {
    match primitive {
        Primitive::EntityCreate { id, parent, .. } => {
            check_identifier("id", id)?;
            check_identifier("parent", parent)
        }
        Primitive::EntityUpdate { entity_ref, .. }
        | Primitive::EntityRemove { entity_ref }
        | Primitive::StyleEntity { entity_ref, .. } => check_identifier("ref", entity_ref),
        Primitive::EntityMove {
            entity_ref, parent, ..
        } => {
            check_identifier("ref", entity_ref)?;
            check_identifier("parent", parent)
        }
        Primitive::EntityReorder {
            entity_ref,
            children,
        } => {
            check_identifier("ref", entity_ref)?;
            children
                .iter()
                .try_for_each(|child| check_identifier("children", child))
        }
        Primitive::RelSet {
            from, to, rel_type, ..
        }
        | Primitive::RelRemove { from, to, rel_type } => {
            check_identifier("from", from)?;
            check_identifier("to", to)?;
            check_identifier("type", rel_type)
        }
        Primitive::MetaAnnotate { note, .. } => {
            if note.trim().is_empty() {
                return Err(malformed("'note' must not be empty"));
            }
            Ok(())
        }
        Primitive::ConstraintAdd { id, rule, .. } => {
            check_identifier("id", id)?;
            validate_rule(rule)
        }
        Primitive::StyleSet { .. }
        | Primitive::MetaSet { .. }
        | Primitive::Voice { .. }
        | Primitive::Escalate { .. }
        | Primitive::BatchStart { .. }
        | Primitive::BatchEnd { .. } => Ok(()),
    }
}

fn validate_rule(rule: &ConstraintRule) -> Result<()> {
    match rule {
        ConstraintRule::Exclusion { a, b, rel_type } | ConstraintRule::Requires { a, b, rel_type } => {
            check_identifier("rule.a", a)?;
            check_identifier("rule.b", b)?;
            check_identifier("rule.type", rel_type)?;
            if a == b {
                return Err(malformed(format!(
                    "{} rule must name two distinct entities",
                    rule.kind_name()
                )));
            }
            Ok(())
        }
        ConstraintRule::Bound {
            entity,
            scope,
            rel_type,
            min,
            max,
        } => {
            check_identifier("rule.entity", entity)?;
            match (scope.is_relational(), rel_type) {
                (true, Some(t)) => check_identifier("rule.type", t)?,
                (true, None) => {
                    return Err(malformed(format!(
                        "bound scope '{}' requires a relationship 'type'",
                        scope.as_str()
                    )))
                }
                (false, Some(_)) => {
                    return Err(malformed("bound scope 'children' takes no 'type'"))
                }
                (false, None) => {}
            }
            match (min, max) {
                (None, None) => Err(malformed("bound rule needs 'min' or 'max'")),
                (Some(lo), Some(hi)) if lo > hi => Err(malformed(format!(
                    "bound min {} is greater than max {}",
                    lo, hi
                ))),
                _ => Ok(()),
            }
        }
    }
}

fn malformed(reason: impl Into<String>) -> PageGraphError {
    PageGraphError::MalformedOperation {
        reason: reason.into(),
    }
}
