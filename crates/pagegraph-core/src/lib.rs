//! pagegraph core - the entity-graph reducer kernel
//!
//! A pure, deterministic state machine behind a chat-editable living page.
//! Producers emit small declarative primitives; [`reduce`] applies each to a
//! materialized [`Snapshot`] and returns the next snapshot together with an
//! [`Outcome`]:
//! - Entity tree with soft removal, cycle-guarded moves and exact reorders
//! - Typed relationships with per-type cardinality
//! - Strict and advisory constraints
//! - Opaque style and document metadata
//! - Replay and snapshot digests for determinism checks
//!
//! The kernel performs no I/O and holds no state between calls.

pub mod constraint_engine;
pub mod errors;
pub mod logging_facility;
pub mod model;
pub mod ops;
pub mod primitive;
pub mod reduce;
pub mod replay;
pub mod rules;
pub mod snapshot;

// Logging macros resolve field keys through `$crate::schema`
pub use pagegraph_core_types::schema;

// Re-export commonly used types
pub use errors::{PageGraphError, Rejection, RejectionKind, Result};
pub use model::{
    Cardinality, Constraint, ConstraintRule, ConstraintWarning, Entity, Props, Relationship,
    ROOT_ID,
};
pub use primitive::{Primitive, Signal};
pub use reduce::{reduce, reduce_value, Outcome, Reduction};
pub use replay::{replay, replay_values, Replay};
pub use snapshot::Snapshot;
