//! Constraint domain model
//!
//! Constraints are named rules over the live relationship set and the live
//! tree. A strict constraint gates writes; an advisory one only produces
//! warnings.

use serde::{Deserialize, Serialize};
use std::fmt;

/// What a bound rule counts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BoundScope {
    /// Live children of the entity
    Children,
    /// Live edges of the given type leaving the entity
    Outgoing,
    /// Live edges of the given type arriving at the entity
    Incoming,
}

impl BoundScope {
    pub fn as_str(&self) -> &'static str {
        match self {
            BoundScope::Children => "children",
            BoundScope::Outgoing => "outgoing",
            BoundScope::Incoming => "incoming",
        }
    }

    /// Check if this scope counts relationship edges (and so needs a type)
    pub fn is_relational(&self) -> bool {
        !matches!(self, BoundScope::Children)
    }
}

/// Rule evaluated by the constraint engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ConstraintRule {
    /// `a` and `b` must never share a live `type` target
    Exclusion {
        a: String,
        b: String,
        #[serde(rename = "type")]
        rel_type: String,
    },

    /// Every live `type` target of `a` must also be a live `type` target of `b`
    Requires {
        a: String,
        b: String,
        #[serde(rename = "type")]
        rel_type: String,
    },

    /// The counted set around `entity` must stay within `[min, max]`
    Bound {
        entity: String,
        scope: BoundScope,
        #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
        rel_type: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        min: Option<usize>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        max: Option<usize>,
    },
}

impl ConstraintRule {
    pub fn kind_name(&self) -> &'static str {
        match self {
            ConstraintRule::Exclusion { .. } => "exclusion",
            ConstraintRule::Requires { .. } => "requires",
            ConstraintRule::Bound { .. } => "bound",
        }
    }
}

/// A registered constraint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Constraint {
    pub id: String,
    pub rule: ConstraintRule,
    /// Strict constraints reject violating writes; advisory ones warn
    pub strict: bool,
    /// Sequence stamp of the registering write
    pub created_seq: u64,
}

impl Constraint {
    pub fn new(id: String, rule: ConstraintRule, strict: bool, seq: u64) -> Self {
        Self {
            id,
            rule,
            strict,
            created_seq: seq,
        }
    }
}

impl fmt::Display for Constraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Constraint({}, kind={}, strict={})",
            self.id,
            self.rule.kind_name(),
            self.strict
        )
    }
}

/// Advisory violation attached to an accepted outcome
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConstraintWarning {
    pub constraint_id: String,
    pub message: String,
}
