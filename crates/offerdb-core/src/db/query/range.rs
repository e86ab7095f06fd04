//! Module: query::range
//! Responsibility: the global `[from, to)` window requested by a caller.
//! Does not own: per-definition window derivation (see `executor::window`).

use serde::{Deserialize, Serialize};
use thiserror::Error as ThisError;

///
/// RangeError
/// Validation failures for a requested window. Never clamped.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq, ThisError)]
pub enum RangeError {
    #[error("range bounds must be non-negative (from {from}, to {to})")]
    Negative { from: i64, to: i64 },

    #[error("range end {to} precedes range start {from}")]
    Inverted { from: u64, to: u64 },

    #[error("range limit {limit} exceeds configured maximum {max}")]
    LimitExceeded { limit: u64, max: u64 },
}

///
/// Range
///
/// Half-open global window over the virtual concatenation of all matching
/// assets, in definition order then asset order.
///

#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(try_from = "RawRange")]
pub struct Range {
    from: u64,
    to: u64,
}

impl Range {
    pub const fn new(from: u64, to: u64) -> Result<Self, RangeError> {
        if to < from {
            return Err(RangeError::Inverted { from, to });
        }

        Ok(Self { from, to })
    }

    /// Window covering the first `limit` positions.
    #[must_use]
    pub const fn first(limit: u64) -> Self {
        Self { from: 0, to: limit }
    }

    #[must_use]
    pub const fn from(&self) -> u64 {
        self.from
    }

    #[must_use]
    pub const fn to(&self) -> u64 {
        self.to
    }

    #[must_use]
    pub const fn limit(&self) -> u64 {
        self.to - self.from
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.from == self.to
    }

    /// Reject windows wider than `max`, when a maximum is configured.
    pub const fn check_limit(&self, max: Option<u64>) -> Result<(), RangeError> {
        if let Some(max) = max
            && self.limit() > max
        {
            return Err(RangeError::LimitExceeded {
                limit: self.limit(),
                max,
            });
        }

        Ok(())
    }
}

impl TryFrom<(i64, i64)> for Range {
    type Error = RangeError;

    fn try_from((from, to): (i64, i64)) -> Result<Self, Self::Error> {
        let (Ok(from_u), Ok(to_u)) = (u64::try_from(from), u64::try_from(to)) else {
            return Err(RangeError::Negative { from, to });
        };

        Self::new(from_u, to_u)
    }
}

// Signed wire shape so negative bounds are reported instead of failing to parse.
#[derive(Deserialize)]
struct RawRange {
    from: i64,
    to: i64,
}

impl TryFrom<RawRange> for Range {
    type Error = RangeError;

    fn try_from(raw: RawRange) -> Result<Self, Self::Error> {
        Self::try_from((raw.from, raw.to))
    }
}

///
/// TESTS
///
