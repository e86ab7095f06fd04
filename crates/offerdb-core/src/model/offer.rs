use crate::{
    model::{Asset, Policy},
    types::OfferId,
};

/// Provider identity stamped on every offer until participant ids are wired
/// through from the identity layer.
pub const PROVIDER_PLACEHOLDER: &str = "urn:connector:provider";

/// Consumer identity counterpart of [`PROVIDER_PLACEHOLDER`].
pub const CONSUMER_PLACEHOLDER: &str = "urn:connector:consumer";

///
/// ContractOffer
///
/// One (asset, policy scoped to that asset) pairing exposed to a requester.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ContractOffer {
    pub id: OfferId,
    pub policy: Policy,
    pub asset: Asset,
    pub provider: String,
    pub consumer: String,
}

impl ContractOffer {
    /// Mint an offer for `asset`, scoping a copy of `policy` to the asset id.
    #[must_use]
    pub fn mint(id: OfferId, policy: &Policy, asset: Asset) -> Self {
        Self {
            id,
            policy: policy.with_target(asset.id.clone()),
            asset,
            provider: PROVIDER_PLACEHOLDER.to_string(),
            consumer: CONSUMER_PLACEHOLDER.to_string(),
        }
    }
}
