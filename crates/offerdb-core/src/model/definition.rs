use crate::db::query::Criterion;
use serde::{Deserialize, Serialize};

///
/// ContractDefinition
///
/// Named pairing of an asset selector with the policies offers are minted
/// under. Read-only to the engine.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct ContractDefinition {
    pub id: String,

    /// Carried for definition sources that gate visibility; the engine never
    /// evaluates it.
    #[serde(default)]
    pub access_policy_id: String,

    pub contract_policy_id: String,

    #[serde(default)]
    pub selector_criteria: Vec<Criterion>,
}

impl ContractDefinition {
    pub fn new(
        id: impl Into<String>,
        contract_policy_id: impl Into<String>,
        selector_criteria: Vec<Criterion>,
    ) -> Self {
        let contract_policy_id = contract_policy_id.into();

        Self {
            id: id.into(),
            access_policy_id: contract_policy_id.clone(),
            contract_policy_id,
            selector_criteria,
        }
    }

    #[must_use]
    pub fn with_access_policy(mut self, access_policy_id: impl Into<String>) -> Self {
        self.access_policy_id = access_policy_id.into();
        self
    }
}
