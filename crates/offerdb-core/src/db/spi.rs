//! Module: db::spi
//! Responsibility: collaborator contracts the offer executor drives.
//! Does not own: any storage, policy evaluation, or authentication.
//!
//! Every stream is pull-based and may be dropped mid-iteration; implementors
//! release per-call resources on drop, not only on exhaustion.

use crate::{
    db::query::{AssetQuery, Criterion},
    error::InternalError,
    model::{Asset, ClaimToken, ContractDefinition, ParticipantAgent, PolicyDefinition},
};

/// Ordered, lazily consumed definitions visible to one requester.
pub type DefinitionStream<'a> =
    Box<dyn Iterator<Item = Result<ContractDefinition, InternalError>> + 'a>;

/// Ordered, lazily consumed assets for one catalog request.
pub type AssetStream<'a> = Box<dyn Iterator<Item = Result<Asset, InternalError>> + 'a>;

///
/// ParticipantAgentService
///
/// Resolves a requester's claim token into the context definition sources
/// filter on.
///

pub trait ParticipantAgentService {
    fn create_for(&self, token: &ClaimToken) -> Result<ParticipantAgent, InternalError>;
}

///
/// DefinitionSource
///

pub trait DefinitionSource {
    fn definitions_for<'a>(
        &'a self,
        agent: &ParticipantAgent,
    ) -> Result<DefinitionStream<'a>, InternalError>;
}

///
/// AssetCatalog
///
/// `count` ignores pagination. `query` honors `offset`/`limit` exactly and
/// yields assets in a stable order consistent with `count`.
///

pub trait AssetCatalog {
    fn count(&self, filter: &[Criterion]) -> Result<u64, InternalError>;

    fn query<'a>(&'a self, query: &AssetQuery) -> Result<AssetStream<'a>, InternalError>;
}

///
/// PolicyRegistry
///
/// `Ok(None)` is absence, not failure.
///

pub trait PolicyRegistry {
    fn find_by_id(&self, policy_id: &str) -> Result<Option<PolicyDefinition>, InternalError>;
}
