//! Snapshot - the aggregate root of a living page
//!
//! A snapshot is a plain value: the kernel clones it, mutates the clone and
//! hands the clone back, so a snapshot a caller already holds never changes
//! underneath it. Every collection is ordered (`BTreeMap` or an explicit
//! `Vec`) so that serialization and iteration are replay-deterministic.

pub mod digest;
pub mod sequence;

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, VecDeque};

use crate::errors::{PageGraphError, Result};
use crate::model::{
    Cardinality, Constraint, DocumentMeta, Entity, Relationship, StyleDocument, ROOT_ID,
};

pub use sequence::Sequence;

/// Complete materialized state of one document
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    pub(crate) meta: DocumentMeta,
    #[serde(default)]
    pub(crate) entities: BTreeMap<String, Entity>,
    /// Child order of the root sentinel
    #[serde(default)]
    pub(crate) root_children: Vec<String>,
    #[serde(default)]
    pub(crate) relationships: Vec<Relationship>,
    #[serde(default)]
    pub(crate) relationship_types: BTreeMap<String, Cardinality>,
    #[serde(default)]
    pub(crate) constraints: BTreeMap<String, Constraint>,
    #[serde(default)]
    pub(crate) styles: StyleDocument,
    #[serde(default)]
    pub(crate) sequence: Sequence,
}

impl Snapshot {
    /// Create an empty snapshot (no entities, sequence 0)
    pub fn new() -> Self {
        Self::default()
    }

    // ===== Entities =====

    /// Get a live entity by ID
    ///
    /// # Errors
    ///
    /// Returns `EntityNotFound` if the entity doesn't exist, or
    /// `EntityAlreadyRemoved` if it was soft-removed.
    pub fn get_entity(&self, id: &str) -> Result<&Entity> {
        let entity = self
            .entities
            .get(id)
            .ok_or_else(|| PageGraphError::EntityNotFound {
                entity_id: id.to_string(),
            })?;

        if entity.removed {
            return Err(PageGraphError::EntityAlreadyRemoved {
                entity_id: id.to_string(),
            });
        }

        Ok(entity)
    }

    /// Get a mutable reference to a live entity by ID
    ///
    /// # Errors
    ///
    /// Returns `EntityNotFound` if the entity doesn't exist, or
    /// `EntityAlreadyRemoved` if it was soft-removed.
    pub(crate) fn get_entity_mut(&mut self, id: &str) -> Result<&mut Entity> {
        let entity = self
            .entities
            .get_mut(id)
            .ok_or_else(|| PageGraphError::EntityNotFound {
                entity_id: id.to_string(),
            })?;

        if entity.removed {
            return Err(PageGraphError::EntityAlreadyRemoved {
                entity_id: id.to_string(),
            });
        }

        Ok(entity)
    }

    /// Get an entity regardless of its tombstone
    pub fn get_entity_raw(&self, id: &str) -> Option<&Entity> {
        self.entities.get(id)
    }

    /// Check if an identifier is taken (live, removed, or the root sentinel)
    pub fn is_identifier_taken(&self, id: &str) -> bool {
        id == ROOT_ID || self.entities.contains_key(id)
    }

    /// Check if `id` names a live entity
    pub fn is_live(&self, id: &str) -> bool {
        self.entities.get(id).is_some_and(|e| !e.removed)
    }

    /// All entities, removed ones included, keyed by ID
    pub fn entities(&self) -> &BTreeMap<String, Entity> {
        &self.entities
    }

    /// List all live entities in identifier order
    pub fn list_entities(&self) -> Vec<&Entity> {
        self.entities.values().filter(|e| !e.removed).collect()
    }

    /// Insert an entity as-is; handlers check preconditions first
    pub(crate) fn insert_entity(&mut self, entity: Entity) {
        self.entities.insert(entity.id.clone(), entity);
    }

    // ===== Tree =====

    /// Top-level child order
    pub fn root_children(&self) -> &[String] {
        &self.root_children
    }

    /// Stored child order of `parent` (an entity or the root sentinel)
    pub fn children_of(&self, parent: &str) -> Option<&[String]> {
        if parent == ROOT_ID {
            Some(&self.root_children)
        } else {
            self.entities.get(parent).map(|e| e.children.as_slice())
        }
    }

    pub(crate) fn children_of_mut(&mut self, parent: &str) -> Result<&mut Vec<String>> {
        if parent == ROOT_ID {
            Ok(&mut self.root_children)
        } else {
            self.entities
                .get_mut(parent)
                .map(|e| &mut e.children)
                .ok_or_else(|| PageGraphError::ParentNotFound {
                    parent_id: parent.to_string(),
                })
        }
    }

    /// Live children of `parent`, in stored order
    pub fn live_children(&self, parent: &str) -> Vec<&str> {
        self.children_of(parent)
            .unwrap_or_default()
            .iter()
            .filter(|id| self.is_live(id))
            .map(String::as_str)
            .collect()
    }

    /// All transitive descendants of `id` (removed ones included), breadth-first
    pub fn descendants(&self, id: &str) -> Vec<String> {
        let mut found = Vec::new();
        let mut queue: VecDeque<&str> = VecDeque::new();
        queue.push_back(id);

        while let Some(current) = queue.pop_front() {
            for child in self.children_of(current).unwrap_or_default() {
                // Guards against malformed child lists that loop back
                if child == id || found.contains(child) {
                    continue;
                }
                found.push(child.clone());
                queue.push_back(child);
            }
        }

        found
    }

    // ===== Relationships =====

    /// All stored edges in insertion order
    pub fn relationships(&self) -> &[Relationship] {
        &self.relationships
    }

    /// Edges whose endpoints are both live
    pub fn live_relationships(&self) -> impl Iterator<Item = &Relationship> {
        self.relationships
            .iter()
            .filter(|r| self.is_live(&r.from) && self.is_live(&r.to))
    }

    /// Relationship type registry
    pub fn relationship_types(&self) -> &BTreeMap<String, Cardinality> {
        &self.relationship_types
    }

    /// Registered cardinality of a relationship type
    pub fn cardinality_of(&self, rel_type: &str) -> Option<Cardinality> {
        self.relationship_types.get(rel_type).copied()
    }

    // ===== Constraints, styles, meta =====

    pub fn constraints(&self) -> &BTreeMap<String, Constraint> {
        &self.constraints
    }

    pub fn get_constraint(&self, id: &str) -> Option<&Constraint> {
        self.constraints.get(id)
    }

    pub fn styles(&self) -> &StyleDocument {
        &self.styles
    }

    pub fn meta(&self) -> &DocumentMeta {
        &self.meta
    }

    // ===== Sequencing =====

    /// Stamp of the most recent write
    pub fn sequence(&self) -> u64 {
        self.sequence.current()
    }

    /// Advance the sequencer for a write and return its stamp
    pub(crate) fn stamp(&mut self) -> u64 {
        self.sequence.advance()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Props;

    fn entity(id: &str, parent: &str) -> Entity {
        Entity::new(id.to_string(), parent.to_string(), None, Props::new(), 1)
    }

    #[test]
    fn test_new_snapshot() {
        let snapshot = Snapshot::new();
        assert_eq!(snapshot.list_entities().len(), 0);
        assert_eq!(snapshot.sequence(), 0);
        assert!(snapshot.is_identifier_taken(ROOT_ID));
    }

    #[test]
    fn test_get_nonexistent_entity() {
        let snapshot = Snapshot::new();
        let result = snapshot.get_entity("nonexistent");
        assert!(matches!(result, Err(PageGraphError::EntityNotFound { .. })));
    }

    #[test]
    fn test_get_removed_entity() {
        let mut snapshot = Snapshot::new();
        let mut e = entity("page", ROOT_ID);
        e.removed = true;
        snapshot.insert_entity(e);

        let result = snapshot.get_entity("page");
        assert!(matches!(
            result,
            Err(PageGraphError::EntityAlreadyRemoved { .. })
        ));
        assert!(snapshot.get_entity_raw("page").is_some());
        assert!(!snapshot.is_live("page"));
    }

    #[test]
    fn test_descendants_breadth_first() {
        let mut snapshot = Snapshot::new();
        let mut a = entity("a", ROOT_ID);
        a.children = vec!["b".to_string(), "c".to_string()];
        let mut b = entity("b", "a");
        b.children = vec!["d".to_string()];
        snapshot.insert_entity(a);
        snapshot.insert_entity(b);
        snapshot.insert_entity(entity("c", "a"));
        snapshot.insert_entity(entity("d", "b"));

        assert_eq!(snapshot.descendants("a"), vec!["b", "c", "d"]);
        assert!(snapshot.descendants("d").is_empty());
    }

    #[test]
    fn test_live_children_skips_removed() {
        let mut snapshot = Snapshot::new();
        let mut a = entity("a", ROOT_ID);
        a.children = vec!["b".to_string(), "c".to_string()];
        let mut c = entity("c", "a");
        c.removed = true;
        snapshot.insert_entity(a);
        snapshot.insert_entity(entity("b", "a"));
        snapshot.insert_entity(c);

        assert_eq!(snapshot.live_children("a"), vec!["b"]);
        assert!(snapshot.live_children("missing").is_empty());
    }
}
