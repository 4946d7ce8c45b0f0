use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::props::Props;

/// Document-level metadata and the append-only annotation log
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct DocumentMeta {
    #[serde(default)]
    pub props: Props,
    #[serde(default)]
    pub annotations: Vec<Annotation>,
}

/// A note appended by `meta.annotate`
///
/// Stamped with the sequence number of the write; `at` is only ever the
/// producer-supplied timestamp, never the kernel's clock.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Annotation {
    pub note: String,
    #[serde(default)]
    pub pinned: bool,
    pub sequence: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub at: Option<DateTime<Utc>>,
}

impl DocumentMeta {
    pub fn new() -> Self {
        Self::default()
    }

    /// Annotations flagged as pinned, in append order
    pub fn pinned(&self) -> impl Iterator<Item = &Annotation> {
        self.annotations.iter().filter(|a| a.pinned)
    }
}
