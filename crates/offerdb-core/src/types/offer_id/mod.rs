mod generator;

use crate::error::InternalError;
use derive_more::{Deref, Display};
use thiserror::Error as ThisError;

///
/// OfferIdError
///

#[derive(Clone, Copy, Debug, Eq, PartialEq, ThisError)]
pub enum OfferIdError {
    #[error("monotonic error - overflow")]
    GeneratorOverflow,
}

impl From<OfferIdError> for InternalError {
    fn from(err: OfferIdError) -> Self {
        Self::executor_internal(format!("offer id generation failed: {err}"))
    }
}

///
/// OfferId
///
/// `{definition_id}:{ulid}`. Unique per minted offer within a process; ids
/// are never reused across calls.
///

#[derive(Clone, Debug, Deref, Display, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct OfferId(String);

impl OfferId {
    pub const SEPARATOR: char = ':';

    /// Mint a fresh id for an offer of `definition_id`.
    pub fn generate(definition_id: &str) -> Result<Self, OfferIdError> {
        let ulid = generator::generate()?;

        Ok(Self(format!("{definition_id}{}{ulid}", Self::SEPARATOR)))
    }

    /// Definition id prefix. Definition ids may themselves contain the
    /// separator, so only the last segment is treated as the suffix.
    #[must_use]
    pub fn definition_id(&self) -> &str {
        self.0
            .rsplit_once(Self::SEPARATOR)
            .map_or(self.0.as_str(), |(definition_id, _)| definition_id)
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

///
/// TESTS
///
