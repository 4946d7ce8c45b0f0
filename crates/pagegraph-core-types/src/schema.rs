//! Canonical schema constants for structured logging
//!
//! These constants keep the kernel, the CLI and test capture agreeing on
//! field keys and event names.

// Canonical field keys for structured logging
pub const FIELD_COMPONENT: &str = "component";
pub const FIELD_OP: &str = "op";
pub const FIELD_EVENT: &str = "event";
pub const FIELD_DURATION_MS: &str = "duration_ms";
pub const FIELD_RUN_ID: &str = "run_id";

// Document identifiers
pub const FIELD_ENTITY_ID: &str = "entity_id";
pub const FIELD_REL_TYPE: &str = "rel_type";
pub const FIELD_CONSTRAINT_ID: &str = "constraint_id";
pub const FIELD_SEQUENCE: &str = "sequence";

// Outcome details
pub const FIELD_WARNINGS: &str = "warnings";
pub const FIELD_SIGNAL: &str = "signal";

// Error fields
pub const FIELD_ERR_KIND: &str = "err.kind";
pub const FIELD_ERR_CODE: &str = "err.code";

// Canonical event names
pub const EVENT_START: &str = "start";
pub const EVENT_END: &str = "end";
pub const EVENT_END_ERROR: &str = "end_error";
pub const EVENT_SIGNAL: &str = "signal";
