use crate::constraint_engine::check_rule;
use crate::errors::{PageGraphError, Result};
use crate::model::{Constraint, ConstraintRule, ConstraintWarning};
use crate::snapshot::Snapshot;

/// Register a named constraint
///
/// The rule is checked against the current state first. A strict rule that
/// is already violated is refused; an advisory one is registered and the
/// violation returned as a warning.
///
/// # Errors
/// * `DuplicateIdentifier` - a constraint with this id exists
/// * `ConstraintViolated` - strict rule already violated
pub fn add_constraint(
    snapshot: &mut Snapshot,
    id: &str,
    rule: &ConstraintRule,
    strict: bool,
) -> Result<Option<ConstraintWarning>> {
    if snapshot.get_constraint(id).is_some() {
        return Err(PageGraphError::DuplicateIdentifier { id: id.to_string() });
    }

    let violation = check_rule(snapshot, rule);
    if let (true, Some(reason)) = (strict, &violation) {
        return Err(PageGraphError::ConstraintViolated {
            constraint_id: id.to_string(),
            reason: reason.clone(),
        });
    }

    let seq = snapshot.stamp();
    snapshot.constraints.insert(
        id.to_string(),
        Constraint::new(id.to_string(), rule.clone(), strict, seq),
    );

    Ok(violation.map(|message| ConstraintWarning {
        constraint_id: id.to_string(),
        message,
    }))
}
