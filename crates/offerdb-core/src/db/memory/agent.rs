use crate::{
    config::{DEFAULT_IDENTITY_CLAIM, OfferConfig},
    db::spi::ParticipantAgentService,
    error::InternalError,
    model::{ClaimToken, ParticipantAgent},
};
use std::collections::BTreeMap;

///
/// ClaimTokenAgentService
///
/// Copies a token's claims into an agent and lifts the identity claim into
/// the agent's `identity` attribute.
///

#[derive(Clone, Debug)]
pub struct ClaimTokenAgentService {
    identity_claim: String,
}

impl ClaimTokenAgentService {
    pub fn new(identity_claim: impl Into<String>) -> Self {
        Self {
            identity_claim: identity_claim.into(),
        }
    }

    #[must_use]
    pub fn from_config(config: &OfferConfig) -> Self {
        Self::new(config.identity_claim.clone())
    }
}

impl Default for ClaimTokenAgentService {
    fn default() -> Self {
        Self::new(DEFAULT_IDENTITY_CLAIM)
    }
}

impl ParticipantAgentService for ClaimTokenAgentService {
    fn create_for(&self, token: &ClaimToken) -> Result<ParticipantAgent, InternalError> {
        let mut attributes = BTreeMap::new();
        if let Some(identity) = token.claim(&self.identity_claim) {
            attributes.insert(
                ParticipantAgent::IDENTITY_ATTRIBUTE.to_string(),
                identity.to_string(),
            );
        }

        Ok(ParticipantAgent::new(token.claims.clone(), attributes))
    }
}
