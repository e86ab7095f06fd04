use crate::value::Value;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

///
/// Asset
///
/// Catalog entry an offer is minted for.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Asset {
    pub id: String,
    #[serde(default)]
    pub properties: BTreeMap<String, Value>,
}

impl Asset {
    pub fn new(id: impl Into<String>, properties: BTreeMap<String, Value>) -> Self {
        Self {
            id: id.into(),
            properties,
        }
    }

    /// Asset with no properties beyond its id.
    pub fn bare(id: impl Into<String>) -> Self {
        Self::new(id, BTreeMap::new())
    }

    /// Builder-style property setter.
    #[must_use]
    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }

    #[must_use]
    pub fn property(&self, key: &str) -> Option<&Value> {
        self.properties.get(key)
    }
}
