//! Offer execution: turns a validated query and range into a lazy offer
//! stream by driving the `spi` collaborators.

mod offer;
mod window;

#[cfg(test)]
mod tests;

pub use offer::{OfferExecutor, OfferStream};
