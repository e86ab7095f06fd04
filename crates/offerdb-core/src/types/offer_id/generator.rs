use crate::types::OfferIdError;
use std::sync::{LazyLock, Mutex, PoisonError};
use ulid::{Generator, Ulid};

///
/// GENERATOR is lazily initiated with a Mutex
/// it has to keep state so ids minted in the same millisecond stay ordered
///

static GENERATOR: LazyLock<Mutex<Generator>> = LazyLock::new(|| Mutex::new(Generator::new()));

/// Generate a ULID using the process-wide monotonic generator.
pub(crate) fn generate() -> Result<Ulid, OfferIdError> {
    // the generator holds no invariant a panicking holder could break
    let mut generator = GENERATOR.lock().unwrap_or_else(PoisonError::into_inner);

    generator
        .generate()
        .map_err(|_| OfferIdError::GeneratorOverflow)
}

///
/// TESTS
///
