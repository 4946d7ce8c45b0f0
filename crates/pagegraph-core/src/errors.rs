use serde::Serialize;
use thiserror::Error;

/// Result type alias using PageGraphError
pub type Result<T> = std::result::Result<T, PageGraphError>;

// ========== Rejection Facility ==========

/// Closed taxonomy of rejection reasons
///
/// Every primitive the kernel refuses is classified into exactly one of
/// these kinds. Producers branch on the kind (or its stable code) to decide
/// whether to retry, re-plan, or escalate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum RejectionKind {
    DuplicateIdentifier,
    ParentNotFound,
    EntityNotFound,
    EntityAlreadyRemoved,
    CycleDetected,
    ReorderSetMismatch,
    RelationshipEndpointMissing,
    CardinalityConflict,
    ConstraintViolated,
    MalformedOperation,
}

impl RejectionKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            RejectionKind::DuplicateIdentifier => "ERR_DUPLICATE_IDENTIFIER",
            RejectionKind::ParentNotFound => "ERR_PARENT_NOT_FOUND",
            RejectionKind::EntityNotFound => "ERR_ENTITY_NOT_FOUND",
            RejectionKind::EntityAlreadyRemoved => "ERR_ENTITY_ALREADY_REMOVED",
            RejectionKind::CycleDetected => "ERR_CYCLE_DETECTED",
            RejectionKind::ReorderSetMismatch => "ERR_REORDER_SET_MISMATCH",
            RejectionKind::RelationshipEndpointMissing => "ERR_RELATIONSHIP_ENDPOINT_MISSING",
            RejectionKind::CardinalityConflict => "ERR_CARDINALITY_CONFLICT",
            RejectionKind::ConstraintViolated => "ERR_CONSTRAINT_VIOLATED",
            RejectionKind::MalformedOperation => "ERR_MALFORMED_OPERATION",
        }
    }

    /// Get the kebab-case reason name (`duplicate-identifier`, ...)
    pub fn as_str(&self) -> &'static str {
        match self {
            RejectionKind::DuplicateIdentifier => "duplicate-identifier",
            RejectionKind::ParentNotFound => "parent-not-found",
            RejectionKind::EntityNotFound => "entity-not-found",
            RejectionKind::EntityAlreadyRemoved => "entity-already-removed",
            RejectionKind::CycleDetected => "cycle-detected",
            RejectionKind::ReorderSetMismatch => "reorder-set-mismatch",
            RejectionKind::RelationshipEndpointMissing => "relationship-endpoint-missing",
            RejectionKind::CardinalityConflict => "cardinality-conflict",
            RejectionKind::ConstraintViolated => "constraint-violated",
            RejectionKind::MalformedOperation => "malformed-operation",
        }
    }
}

impl std::fmt::Display for RejectionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Structured rejection returned across the kernel boundary
///
/// Carries the classification plus enough context (primitive name, the
/// identifier at fault, a human-readable message) for a producer to repair
/// its next attempt.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Rejection {
    kind: RejectionKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    op: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    entity_id: Option<String>,
    message: String,
}

impl Rejection {
    /// Create a new rejection with the specified kind
    pub fn new(kind: RejectionKind) -> Self {
        Self {
            kind,
            op: None,
            entity_id: None,
            message: String::new(),
        }
    }

    /// Add primitive name context
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Add the identifier the rejection is about
    pub fn with_entity_id(mut self, id: impl Into<String>) -> Self {
        self.entity_id = Some(id.into());
        self
    }

    /// Add custom message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    pub fn kind(&self) -> RejectionKind {
        self.kind
    }

    /// Get the stable error code
    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    pub fn op(&self) -> Option<&str> {
        self.op.as_deref()
    }

    pub fn entity_id(&self) -> Option<&str> {
        self.entity_id.as_deref()
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl std::fmt::Display for Rejection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code(), self.kind)?;
        if let Some(op) = &self.op {
            write!(f, " in '{}'", op)?;
        }
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        if let Some(entity_id) = &self.entity_id {
            write!(f, " (id: {})", entity_id)?;
        }
        Ok(())
    }
}

impl std::error::Error for Rejection {}

// ========== End Rejection Facility ==========

/// Error taxonomy for kernel operations
///
/// Handlers and invariant checks return these; `reduce` folds them into a
/// [`Rejection`] before they leave the kernel.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PageGraphError {
    // ===== Identity =====
    /// Identifier already used by a live or removed entity, or a constraint
    #[error("Identifier already in use: {id}")]
    DuplicateIdentifier { id: String },

    // ===== Tree =====
    /// Parent entity does not exist
    #[error("Parent entity not found: {parent_id}")]
    ParentNotFound { parent_id: String },

    /// Entity does not exist
    #[error("Entity not found: {entity_id}")]
    EntityNotFound { entity_id: String },

    /// Entity exists but has been soft-removed
    #[error("Entity already removed: {entity_id}")]
    EntityAlreadyRemoved { entity_id: String },

    /// Reparenting would make an entity its own ancestor
    #[error("Cycle detected: {parent_id} is {entity_id} or one of its descendants")]
    CycleDetected {
        entity_id: String,
        parent_id: String,
    },

    /// Reorder list is not a permutation of the live children
    #[error("Reorder of {entity_id} rejected: {reason}")]
    ReorderSetMismatch { entity_id: String, reason: String },

    /// Entity names a parent that is absent from the snapshot
    #[error("Orphaned entity {entity_id}: parent {parent_id} does not exist")]
    OrphanedEntity {
        entity_id: String,
        parent_id: String,
    },

    /// A parent's child list and the children's parent pointers disagree
    #[error("Child list of {parent_id} is inconsistent at {child_id}")]
    ChildListInconsistent { parent_id: String, child_id: String },

    /// A live entity sits below a removed ancestor
    #[error("Live entity {entity_id} sits under removed ancestor {ancestor_id}")]
    LiveUnderRemoved {
        entity_id: String,
        ancestor_id: String,
    },

    // ===== Relationships =====
    /// A relationship endpoint is missing or removed
    #[error("Relationship endpoint missing for '{rel_type}': {endpoint}")]
    RelationshipEndpointMissing { endpoint: String, rel_type: String },

    /// A relationship type holds more live edges than its cardinality allows
    #[error("Cardinality conflict on '{rel_type}' at {endpoint}: {reason}")]
    CardinalityConflict {
        rel_type: String,
        endpoint: String,
        reason: String,
    },

    // ===== Constraints =====
    /// A strict constraint would be violated
    #[error("Constraint {constraint_id} violated: {reason}")]
    ConstraintViolated {
        constraint_id: String,
        reason: String,
    },

    // ===== Shape =====
    /// Primitive failed shape or identifier-grammar validation
    #[error("Malformed operation: {reason}")]
    MalformedOperation { reason: String },

    // ===== Generic =====
    /// Serialization error (JSON encoding/decoding)
    #[error("Serialization error: {message}")]
    Serialization { message: String },
}

impl PageGraphError {
    /// Classify this error into the closed rejection taxonomy
    pub fn kind(&self) -> RejectionKind {
        match self {
            PageGraphError::DuplicateIdentifier { .. } => RejectionKind::DuplicateIdentifier,
            PageGraphError::ParentNotFound { .. }
            | PageGraphError::OrphanedEntity { .. }
            | PageGraphError::ChildListInconsistent { .. } => RejectionKind::ParentNotFound,
            PageGraphError::EntityNotFound { .. } => RejectionKind::EntityNotFound,
            PageGraphError::EntityAlreadyRemoved { .. }
            | PageGraphError::LiveUnderRemoved { .. } => RejectionKind::EntityAlreadyRemoved,
            PageGraphError::CycleDetected { .. } => RejectionKind::CycleDetected,
            PageGraphError::ReorderSetMismatch { .. } => RejectionKind::ReorderSetMismatch,
            PageGraphError::RelationshipEndpointMissing { .. } => {
                RejectionKind::RelationshipEndpointMissing
            }
            PageGraphError::CardinalityConflict { .. } => RejectionKind::CardinalityConflict,
            PageGraphError::ConstraintViolated { .. } => RejectionKind::ConstraintViolated,
            PageGraphError::MalformedOperation { .. } | PageGraphError::Serialization { .. } => {
                RejectionKind::MalformedOperation
            }
        }
    }

    /// The identifier this error is about, if it names one
    pub fn subject_id(&self) -> Option<&str> {
        match self {
            PageGraphError::DuplicateIdentifier { id } => Some(id),
            PageGraphError::ParentNotFound { parent_id } => Some(parent_id),
            PageGraphError::EntityNotFound { entity_id }
            | PageGraphError::EntityAlreadyRemoved { entity_id }
            | PageGraphError::CycleDetected { entity_id, .. }
            | PageGraphError::ReorderSetMismatch { entity_id, .. }
            | PageGraphError::OrphanedEntity { entity_id, .. }
            | PageGraphError::LiveUnderRemoved { entity_id, .. } => Some(entity_id),
            PageGraphError::ChildListInconsistent { parent_id, .. } => Some(parent_id),
            PageGraphError::RelationshipEndpointMissing { endpoint, .. }
            | PageGraphError::CardinalityConflict { endpoint, .. } => Some(endpoint),
            PageGraphError::ConstraintViolated { constraint_id, .. } => Some(constraint_id),
            PageGraphError::MalformedOperation { .. } | PageGraphError::Serialization { .. } => {
                None
            }
        }
    }
}

impl From<PageGraphError> for Rejection {
    fn from(err: PageGraphError) -> Self {
        let mut rejection = Rejection::new(err.kind()).with_message(err.to_string());
        if let Some(id) = err.subject_id() {
            rejection = rejection.with_entity_id(id);
        }
        rejection
    }
}

/// Conversion from serde_json::Error to PageGraphError
impl From<serde_json::Error> for PageGraphError {
    fn from(err: serde_json::Error) -> Self {
        PageGraphError::Serialization {
            message: err.to_string(),
        }
    }
}
