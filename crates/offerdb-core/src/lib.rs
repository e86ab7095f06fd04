//! Core runtime for offerdb: the lazy, range-paginated offer executor, its
//! collaborator contracts, domain records, and observability hooks.
#![warn(unreachable_pub)]

// public exports are one module level down
pub mod config;
pub mod db;
pub mod error;
pub mod model;
pub mod obs;
pub mod types;
pub mod value;

///
/// Prelude
///
/// Prelude contains only domain vocabulary and the executor entry point.
/// No errors, sinks, or in-memory collaborators are re-exported here.
///

pub mod prelude {
    pub use crate::{
        db::{
            OfferExecutor, OfferStream,
            query::{Criterion, CriterionOp, OfferQuery, Range},
        },
        model::{Asset, ClaimToken, ContractDefinition, ContractOffer, Policy},
        types::OfferId,
        value::Value,
    };
}
