//! Query engine surface: inputs (`query`), collaborator contracts (`spi`),
//! the executor, and reference in-memory collaborators (`memory`).

pub mod executor;
pub mod memory;
pub mod query;
pub mod spi;

// re-exports
pub use executor::{OfferExecutor, OfferStream};
