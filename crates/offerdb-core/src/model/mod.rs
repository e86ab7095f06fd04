//! Domain records the offer engine reads and mints.
//!
//! Everything here is transient: built per call and dropped once the caller
//! has consumed its offers.

mod agent;
mod asset;
mod definition;
mod offer;
mod policy;

pub use agent::{ClaimToken, ParticipantAgent};
pub use asset::Asset;
pub use definition::ContractDefinition;
pub use offer::{CONSUMER_PLACEHOLDER, ContractOffer, PROVIDER_PLACEHOLDER};
pub use policy::{Policy, PolicyDefinition};

///
/// TESTS
///
