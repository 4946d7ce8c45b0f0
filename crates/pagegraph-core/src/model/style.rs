use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::props::Props;

/// Opaque styling state
///
/// The kernel stores style values without interpreting them: a global
/// document plus per-entity overrides keyed by entity identifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct StyleDocument {
    #[serde(default)]
    pub global: Props,
    #[serde(default)]
    pub entities: BTreeMap<String, Props>,
}

impl StyleDocument {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the override bag for an entity, if any
    pub fn for_entity(&self, id: &str) -> Option<&Props> {
        self.entities.get(id)
    }

    /// Merge a patch into an entity's overrides, dropping the bag once empty
    pub(crate) fn merge_entity(&mut self, id: &str, patch: &Props) {
        let bag = self.entities.entry(id.to_string()).or_default();
        bag.merge(patch);
        if bag.is_empty() {
            self.entities.remove(id);
        }
    }
}
