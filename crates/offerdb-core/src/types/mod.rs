mod offer_id;

pub use offer_id::{OfferId, OfferIdError};
