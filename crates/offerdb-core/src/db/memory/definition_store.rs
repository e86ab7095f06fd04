use crate::{
    db::spi::{DefinitionSource, DefinitionStream},
    error::InternalError,
    model::{ContractDefinition, ParticipantAgent},
};

///
/// MemoryDefinitionStore
///
/// Exposes every stored definition to every agent, in insertion order.
///

#[derive(Clone, Debug, Default)]
pub struct MemoryDefinitionStore {
    definitions: Vec<ContractDefinition>,
}

impl MemoryDefinitionStore {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            definitions: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_definitions(definitions: impl IntoIterator<Item = ContractDefinition>) -> Self {
        Self {
            definitions: definitions.into_iter().collect(),
        }
    }

    pub fn push(&mut self, definition: ContractDefinition) {
        self.definitions.push(definition);
    }

    pub fn remove(&mut self, id: &str) -> Option<ContractDefinition> {
        let position = self
            .definitions
            .iter()
            .position(|definition| definition.id == id)?;

        Some(self.definitions.remove(position))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }
}

impl DefinitionSource for MemoryDefinitionStore {
    fn definitions_for<'a>(
        &'a self,
        _agent: &ParticipantAgent,
    ) -> Result<DefinitionStream<'a>, InternalError> {
        Ok(Box::new(self.definitions.iter().cloned().map(Ok)))
    }
}
