//! Query inputs: the caller's request, its global window, and the filter
//! vocabulary shared with asset catalogs.

mod asset_query;
mod criterion;
mod range;

pub use asset_query::AssetQuery;
pub use criterion::{ASSET_ID_PROPERTY, Criterion, CriterionOp};
pub use range::{Range, RangeError};

use crate::model::{ClaimToken, ContractDefinition};
use thiserror::Error as ThisError;

///
/// QueryError
/// Rejections raised before any collaborator is invoked.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum QueryError {
    #[error("invalid range: {0}")]
    Range(#[from] RangeError),
}

///
/// OfferQuery
///
/// Requester claims plus extra asset criteria appended to every
/// definition's selector. Moved into a call and consumed once.
///

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct OfferQuery {
    pub claim_token: ClaimToken,
    pub assets_criteria: Vec<Criterion>,
}

impl OfferQuery {
    #[must_use]
    pub const fn new(claim_token: ClaimToken, assets_criteria: Vec<Criterion>) -> Self {
        Self {
            claim_token,
            assets_criteria,
        }
    }

    /// Combined filter for `definition`: selector criteria first, then the
    /// query's own criteria. Order is kept for deterministic catalog queries.
    #[must_use]
    pub fn filter_for(&self, definition: &ContractDefinition) -> Vec<Criterion> {
        definition
            .selector_criteria
            .iter()
            .chain(&self.assets_criteria)
            .cloned()
            .collect()
    }
}

///
/// TESTS
///
