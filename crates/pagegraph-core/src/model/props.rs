use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Open property bag for entities, styles and document metadata
///
/// Stores arbitrary JSON values under string keys. Keys are kept in a
/// `BTreeMap` so serialization and iteration order never depend on
/// insertion history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct Props {
    data: BTreeMap<String, Value>,
}

impl Props {
    /// Create a new empty property bag
    pub fn new() -> Self {
        Self {
            data: BTreeMap::new(),
        }
    }

    /// Build a stored bag from an incoming patch, dropping null values
    pub fn from_patch(patch: &Props) -> Self {
        let mut props = Self::new();
        props.merge(patch);
        props
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.data.get(key)
    }

    pub fn set(&mut self, key: impl Into<String>, value: Value) {
        self.data.insert(key.into(), value);
    }

    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.data.remove(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.data.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.data.keys()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.data.iter()
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Shallow-merge a patch into this bag
    ///
    /// New keys extend the bag, existing keys are overwritten, and an
    /// explicit `null` deletes the key.
    pub fn merge(&mut self, patch: &Props) {
        for (key, value) in &patch.data {
            if value.is_null() {
                self.data.remove(key);
            } else {
                self.data.insert(key.clone(), value.clone());
            }
        }
    }
}

impl From<BTreeMap<String, Value>> for Props {
    fn from(data: BTreeMap<String, Value>) -> Self {
        Self { data }
    }
}

impl From<Props> for BTreeMap<String, Value> {
    fn from(props: Props) -> Self {
        props.data
    }
}

impl<K: Into<String>> FromIterator<(K, Value)> for Props {
    fn from_iter<I: IntoIterator<Item = (K, Value)>>(iter: I) -> Self {
        Self {
            data: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}
