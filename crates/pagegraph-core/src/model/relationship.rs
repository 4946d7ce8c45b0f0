use serde::{Deserialize, Serialize};
use std::fmt;

/// Uniqueness rule enforced for a relationship type
///
/// Fixed on the first `rel.set` that uses the type and immutable afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Cardinality {
    /// At most one edge per source and at most one per target
    OneToOne,
    /// At most one edge per source
    ManyToOne,
    /// Unconstrained
    #[default]
    ManyToMany,
}

impl Cardinality {
    pub fn as_str(&self) -> &'static str {
        match self {
            Cardinality::OneToOne => "one_to_one",
            Cardinality::ManyToOne => "many_to_one",
            Cardinality::ManyToMany => "many_to_many",
        }
    }
}

impl fmt::Display for Cardinality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A typed, directed edge between two entities
///
/// Relationships live beside the tree, not inside it: they model
/// cross-branch links ("assigned to", "hosting") that containment cannot.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Relationship {
    pub from: String,
    pub to: String,
    #[serde(rename = "type")]
    pub rel_type: String,
}

impl Relationship {
    pub fn new(
        from: impl Into<String>,
        to: impl Into<String>,
        rel_type: impl Into<String>,
    ) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            rel_type: rel_type.into(),
        }
    }

    /// Check if either endpoint is `id`
    pub fn touches(&self, id: &str) -> bool {
        self.from == id || self.to == id
    }
}

impl fmt::Display for Relationship {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.from, self.to, self.rel_type)
    }
}
