use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

///
/// ClaimToken
///
/// Verified claims presented by a requester. Produced upstream by the
/// authentication layer; treated as opaque data here.
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct ClaimToken {
    #[serde(default)]
    pub claims: BTreeMap<String, String>,
}

impl ClaimToken {
    #[must_use]
    pub fn with_claim(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.claims.insert(key.into(), value.into());
        self
    }

    #[must_use]
    pub fn claim(&self, key: &str) -> Option<&str> {
        self.claims.get(key).map(String::as_str)
    }
}

///
/// ParticipantAgent
///
/// Requester context handed to definition sources.
///

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct ParticipantAgent {
    pub claims: BTreeMap<String, String>,
    pub attributes: BTreeMap<String, String>,
}

impl ParticipantAgent {
    /// Attribute key holding the requester's resolved identity.
    pub const IDENTITY_ATTRIBUTE: &'static str = "identity";

    #[must_use]
    pub const fn new(
        claims: BTreeMap<String, String>,
        attributes: BTreeMap<String, String>,
    ) -> Self {
        Self { claims, attributes }
    }

    #[must_use]
    pub fn identity(&self) -> Option<&str> {
        self.attributes
            .get(Self::IDENTITY_ATTRIBUTE)
            .map(String::as_str)
    }
}
