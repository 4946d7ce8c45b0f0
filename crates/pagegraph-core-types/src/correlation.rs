//! Correlation types for replay runs
//!
//! A run is one pass of a process over a primitive log (a CLI replay, a
//! server session). Run ids live at the process edge only: the kernel never
//! generates identifiers, so nothing here may leak into a snapshot.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a single replay run
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RunId(String);

impl RunId {
    /// Generate a new time-ordered RunId using UUIDv7
    pub fn new() -> Self {
        Self(Uuid::now_v7().to_string())
    }

    /// Get the string representation
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Create from an existing string (e.g. one handed over by a caller)
    pub fn from_string(s: String) -> Self {
        Self(s)
    }
}

impl Default for RunId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for RunId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Context carried through a replay run for log correlation
#[derive(Debug, Clone)]
pub struct RunContext {
    pub run_id: RunId,
    /// Where the primitives came from (a log path, a session name)
    pub source: Option<String>,
}

impl RunContext {
    /// Create a new context with a fresh RunId
    pub fn new() -> Self {
        Self {
            run_id: RunId::new(),
            source: None,
        }
    }

    /// Create a context with an existing RunId
    pub fn with_run_id(run_id: RunId) -> Self {
        Self {
            run_id,
            source: None,
        }
    }

    /// Record the primitive source
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }
}

impl Default for RunContext {
    fn default() -> Self {
        Self::new()
    }
}
