//! Runtime configuration for offer queries.
//!
//! Every field has a default, so an empty TOML document is a valid config.

use serde::Deserialize;
use std::{
    fs, io,
    path::{Path, PathBuf},
};
use thiserror::Error as ThisError;

/// Claim key copied into a participant agent's identity attribute by default.
pub const DEFAULT_IDENTITY_CLAIM: &str = "client_id";

///
/// ConfigError
///

#[derive(Debug, ThisError)]
pub enum ConfigError {
    #[error("failed to read config file '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("max_limit must be greater than zero when set")]
    ZeroMaxLimit,
}

///
/// OfferConfig
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct OfferConfig {
    /// Widest `[from, to)` window a single call may request.
    pub max_limit: Option<u64>,

    /// Record `MetricsEvent`s while streaming.
    pub metrics: bool,

    /// Claim key that names the requester.
    pub identity_claim: String,
}

impl Default for OfferConfig {
    fn default() -> Self {
        Self {
            max_limit: None,
            metrics: true,
            identity_claim: DEFAULT_IDENTITY_CLAIM.to_string(),
        }
    }
}

impl OfferConfig {
    pub fn from_toml_str(input: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(input)?;
        config.validate()?;

        Ok(config)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let input = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        Self::from_toml_str(&input)
    }

    #[must_use]
    pub fn with_max_limit(mut self, max_limit: u64) -> Self {
        self.max_limit = Some(max_limit);
        self
    }

    const fn validate(&self) -> Result<(), ConfigError> {
        if matches!(self.max_limit, Some(0)) {
            return Err(ConfigError::ZeroMaxLimit);
        }

        Ok(())
    }
}

///
/// TESTS
///
