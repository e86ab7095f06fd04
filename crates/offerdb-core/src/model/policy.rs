use crate::value::Value;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

///
/// Policy
///
/// Opaque usage policy. The engine never interprets it; it only scopes a
/// copy to the asset an offer is minted for.
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct Policy {
    #[serde(default)]
    pub uid: Option<String>,
    #[serde(default)]
    pub assigner: Option<String>,
    #[serde(default)]
    pub target: Option<String>,
    #[serde(default)]
    pub properties: BTreeMap<String, Value>,
}

impl Policy {
    /// Copy of this policy scoped to `target`; `self` is left untouched.
    #[must_use]
    pub fn with_target(&self, target: impl Into<String>) -> Self {
        Self {
            target: Some(target.into()),
            ..self.clone()
        }
    }
}

///
/// PolicyDefinition
///
/// Registry record: a policy under a stable id.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct PolicyDefinition {
    pub id: String,
    pub policy: Policy,
}

impl PolicyDefinition {
    pub fn new(id: impl Into<String>, policy: Policy) -> Self {
        Self {
            id: id.into(),
            policy,
        }
    }
}
