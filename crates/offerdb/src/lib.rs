//! ## Crate layout
//! - `core`: the offer executor, collaborator contracts, domain records,
//!   configuration, and observability.
//! - `error`: the public error type every core error converts into.
//!
//! The `prelude` module mirrors the surface a connector needs to serve
//! paginated offer queries.

pub use offerdb_core as core;

pub mod error;

pub use error::Error;

use offerdb_core::{
    db::{
        OfferExecutor,
        query::{OfferQuery, QueryError, Range},
    },
    model::ContractOffer,
};

//
// Consts
//

/// Workspace version re-export for downstream tooling/tests.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Run one offer query over `[from, to)` and collect the page.
///
/// Signed bounds are validated here, so callers can pass raw request
/// parameters through. The first collaborator failure aborts the page.
pub fn fetch_page(
    executor: &OfferExecutor<'_>,
    query: OfferQuery,
    from: i64,
    to: i64,
) -> Result<Vec<ContractOffer>, Error> {
    let range = Range::try_from((from, to)).map_err(QueryError::from)?;
    let stream = executor.query_offers(query, range)?;

    stream
        .map(|offer| offer.map_err(Error::from))
        .collect()
}

///
/// Prelude
/// Offer vocabulary, executor, in-memory collaborators, and the public error.
///

pub mod prelude {
    pub use crate::{
        Error,
        core::{
            config::OfferConfig,
            db::{
                OfferExecutor, OfferStream,
                memory::{
                    ClaimTokenAgentService, MemoryAssetIndex, MemoryDefinitionStore,
                    MemoryPolicyStore,
                },
                query::{Criterion, CriterionOp, OfferQuery, Range},
            },
            model::{
                Asset, ClaimToken, ContractDefinition, ContractOffer, Policy, PolicyDefinition,
            },
            types::OfferId,
            value::Value,
        },
        fetch_page,
    };
}
