//! Primitive types - the declarative operations producers emit
//!
//! A primitive is a flat JSON record whose `op` member names its type
//! (`type` is a field of the `rel.*` primitives, so it cannot double as the
//! tag). Primitives are processed by [`crate::reduce::reduce`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::{Cardinality, ConstraintRule, Props};

/// Every `op` tag the dispatcher recognizes
pub const KNOWN_OPS: &[&str] = &[
    "entity.create",
    "entity.update",
    "entity.remove",
    "entity.move",
    "entity.reorder",
    "rel.set",
    "rel.remove",
    "style.set",
    "style.entity",
    "meta.set",
    "meta.annotate",
    "constraint.add",
    "voice",
    "escalate",
    "batch.start",
    "batch.end",
];

/// One declarative operation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op")]
pub enum Primitive {
    /// Create an entity under `parent` (an entity id or `root`)
    #[serde(rename = "entity.create")]
    EntityCreate {
        id: String,
        parent: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        display: Option<String>,
        props: Props,
    },

    /// Shallow-merge props into an entity
    #[serde(rename = "entity.update")]
    EntityUpdate {
        #[serde(rename = "ref")]
        entity_ref: String,
        props: Props,
    },

    /// Soft-remove an entity and its subtree
    #[serde(rename = "entity.remove")]
    EntityRemove {
        #[serde(rename = "ref")]
        entity_ref: String,
    },

    /// Relocate an entity under a new parent
    #[serde(rename = "entity.move")]
    EntityMove {
        #[serde(rename = "ref")]
        entity_ref: String,
        parent: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        position: Option<usize>,
    },

    /// Replace the child order of an entity (or `root`)
    #[serde(rename = "entity.reorder")]
    EntityReorder {
        #[serde(rename = "ref")]
        entity_ref: String,
        children: Vec<String>,
    },

    /// Write a typed edge, displacing edges its cardinality forbids
    #[serde(rename = "rel.set")]
    RelSet {
        from: String,
        to: String,
        #[serde(rename = "type")]
        rel_type: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        cardinality: Option<Cardinality>,
    },

    /// Delete a typed edge if present
    #[serde(rename = "rel.remove")]
    RelRemove {
        from: String,
        to: String,
        #[serde(rename = "type")]
        rel_type: String,
    },

    /// Merge into the global style document
    #[serde(rename = "style.set")]
    StyleSet { props: Props },

    /// Merge into one entity's style overrides
    #[serde(rename = "style.entity")]
    StyleEntity {
        #[serde(rename = "ref")]
        entity_ref: String,
        props: Props,
    },

    /// Merge document metadata
    #[serde(rename = "meta.set")]
    MetaSet { props: Props },

    /// Append a note to the document
    #[serde(rename = "meta.annotate")]
    MetaAnnotate {
        note: String,
        #[serde(default)]
        pinned: bool,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        at: Option<DateTime<Utc>>,
    },

    /// Register a named constraint
    #[serde(rename = "constraint.add")]
    ConstraintAdd {
        id: String,
        rule: ConstraintRule,
        #[serde(default)]
        strict: bool,
    },

    /// Presentational text line for the chat surface
    #[serde(rename = "voice")]
    Voice { text: String },

    /// Ask the caller to route to a stronger tier
    #[serde(rename = "escalate")]
    Escalate {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        reason: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        tier: Option<String>,
    },

    /// Rendering hint: a group of primitives begins
    #[serde(rename = "batch.start")]
    BatchStart {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        batch: Option<String>,
    },

    /// Rendering hint: the group ends
    #[serde(rename = "batch.end")]
    BatchEnd {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        batch: Option<String>,
    },
}

impl Primitive {
    /// The `op` tag of this primitive
    pub fn name(&self) -> &'static str {
        match self {
            Primitive::EntityCreate { .. } => "entity.create",
            Primitive::EntityUpdate { .. } => "entity.update",
            Primitive::EntityRemove { .. } => "entity.remove",
            Primitive::EntityMove { .. } => "entity.move",
            Primitive::EntityReorder { .. } => "entity.reorder",
            Primitive::RelSet { .. } => "rel.set",
            Primitive::RelRemove { .. } => "rel.remove",
            Primitive::StyleSet { .. } => "style.set",
            Primitive::StyleEntity { .. } => "style.entity",
            Primitive::MetaSet { .. } => "meta.set",
            Primitive::MetaAnnotate { .. } => "meta.annotate",
            Primitive::ConstraintAdd { .. } => "constraint.add",
            Primitive::Voice { .. } => "voice",
            Primitive::Escalate { .. } => "escalate",
            Primitive::BatchStart { .. } => "batch.start",
            Primitive::BatchEnd { .. } => "batch.end",
        }
    }

    /// The identifier this primitive is chiefly about, for log context
    pub fn subject_id(&self) -> Option<&str> {
        match self {
            Primitive::EntityCreate { id, .. } | Primitive::ConstraintAdd { id, .. } => Some(id),
            Primitive::EntityUpdate { entity_ref, .. }
            | Primitive::EntityRemove { entity_ref }
            | Primitive::EntityMove { entity_ref, .. }
            | Primitive::EntityReorder { entity_ref, .. }
            | Primitive::StyleEntity { entity_ref, .. } => Some(entity_ref),
            Primitive::RelSet { from, .. } | Primitive::RelRemove { from, .. } => Some(from),
            _ => None,
        }
    }

    /// Check if this primitive is a non-mutating signal
    pub fn is_signal(&self) -> bool {
        self.signal().is_some()
    }

    /// The side-channel signal this primitive carries, if it is one
    pub fn signal(&self) -> Option<Signal> {
        match self {
            Primitive::Voice { text } => Some(Signal::Voice { text: text.clone() }),
            Primitive::Escalate { reason, tier } => Some(Signal::Escalate {
                reason: reason.clone(),
                tier: tier.clone(),
            }),
            Primitive::BatchStart { batch } => Some(Signal::BatchStart {
                batch: batch.clone(),
            }),
            Primitive::BatchEnd { batch } => Some(Signal::BatchEnd {
                batch: batch.clone(),
            }),
            _ => None,
        }
    }
}

/// Non-mutating marker surfaced alongside a reduction
///
/// The kernel attaches no meaning to signals; chat UIs, tier routing and
/// render buffering act on them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "signal", rename_all = "snake_case")]
pub enum Signal {
    Voice {
        text: String,
    },
    Escalate {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        reason: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        tier: Option<String>,
    },
    BatchStart {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        batch: Option<String>,
    },
    BatchEnd {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        batch: Option<String>,
    },
}
