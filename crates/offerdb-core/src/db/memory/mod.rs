//! Reference collaborators backed by plain ordered collections.
//!
//! No persistence and no indexing: every catalog call scans. Iteration order
//! is insertion order, which keeps offer pagination deterministic.

mod agent;
mod asset_index;
mod definition_store;
mod policy_store;


pub use agent::ClaimTokenAgentService;
pub use asset_index::MemoryAssetIndex;
pub use definition_store::MemoryDefinitionStore;
pub use policy_store::MemoryPolicyStore;
