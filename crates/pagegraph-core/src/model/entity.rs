use serde::{Deserialize, Serialize};

use super::props::Props;

/// Sentinel parent identifier for top-level entities
///
/// `root` is not an entity: it owns the top-level child order held on the
/// snapshot, and it is reserved so no entity can take its name.
pub const ROOT_ID: &str = "root";

/// Entity - one node of the page tree
///
/// Entities reference their parent and children by identifier only. The
/// identifier is immutable and never recycled, even after removal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    /// Unique snake_case identifier
    pub id: String,

    /// Parent identifier, or [`ROOT_ID`] for top-level entities
    pub parent: String,

    /// Opaque rendering hint (e.g. "page", "checklist")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display: Option<String>,

    /// Open property bag
    #[serde(default)]
    pub props: Props,

    /// Ordered child identifiers (may include removed children)
    #[serde(default)]
    pub children: Vec<String>,

    /// Tombstone flag - if true, this entity is soft-removed
    #[serde(default)]
    pub removed: bool,

    /// Sequence stamp of the write that created this entity
    pub created_seq: u64,

    /// Sequence stamp of the last write that touched this entity
    pub updated_seq: u64,
}

impl Entity {
    /// Create a new live entity stamped with `seq`
    pub fn new(
        id: String,
        parent: String,
        display: Option<String>,
        props: Props,
        seq: u64,
    ) -> Self {
        Self {
            id,
            parent,
            display,
            props,
            children: Vec::new(),
            removed: false,
            created_seq: seq,
            updated_seq: seq,
        }
    }

    /// Check if this entity hangs directly off the root
    pub fn is_top_level(&self) -> bool {
        self.parent == ROOT_ID
    }

    pub fn is_removed(&self) -> bool {
        self.removed
    }
}

/// Insert `id` into an ordered child list at `position` (clamped), or append
pub(crate) fn insert_child(children: &mut Vec<String>, id: String, position: Option<usize>) {
    match position {
        Some(index) if index < children.len() => children.insert(index, id),
        _ => children.push(id),
    }
}

/// Remove `id` from an ordered child list, returning whether it was present
pub(crate) fn remove_child(children: &mut Vec<String>, id: &str) -> bool {
    let before = children.len();
    children.retain(|child| child != id);
    children.len() != before
}
