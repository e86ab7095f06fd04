use crate::{db::spi::PolicyRegistry, error::InternalError, model::PolicyDefinition};
use std::collections::BTreeMap;

///
/// MemoryPolicyStore
///

#[derive(Clone, Debug, Default)]
pub struct MemoryPolicyStore {
    policies: BTreeMap<String, PolicyDefinition>,
}

impl MemoryPolicyStore {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            policies: BTreeMap::new(),
        }
    }

    #[must_use]
    pub fn with_policies(policies: impl IntoIterator<Item = PolicyDefinition>) -> Self {
        let mut store = Self::new();
        for policy in policies {
            store.insert(policy);
        }

        store
    }

    pub fn insert(&mut self, definition: PolicyDefinition) -> Option<PolicyDefinition> {
        self.policies.insert(definition.id.clone(), definition)
    }

    pub fn remove(&mut self, id: &str) -> Option<PolicyDefinition> {
        self.policies.remove(id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.policies.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.policies.is_empty()
    }
}

impl PolicyRegistry for MemoryPolicyStore {
    fn find_by_id(&self, policy_id: &str) -> Result<Option<PolicyDefinition>, InternalError> {
        Ok(self.policies.get(policy_id).cloned())
    }
}
