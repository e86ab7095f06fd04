use derive_more::Display;
use offerdb_core::{
    config::ConfigError,
    db::query::{QueryError, RangeError},
    error::{ErrorClass, ErrorOrigin as CoreErrorOrigin, InternalError},
};
use serde::{Deserialize, Serialize};
use thiserror::Error as ThisError;

///
/// Error
/// Public error type with a stable kind + origin taxonomy.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize, ThisError)]
#[error("{message}")]
pub struct Error {
    pub kind: ErrorKind,
    pub origin: ErrorOrigin,
    pub message: String,
}

impl Error {
    pub fn new(kind: ErrorKind, origin: ErrorOrigin, message: impl Into<String>) -> Self {
        Self {
            kind,
            origin,
            message: message.into(),
        }
    }
}

impl From<InternalError> for Error {
    fn from(err: InternalError) -> Self {
        let kind = match err.class {
            ErrorClass::Unavailable => ErrorKind::Unavailable,
            ErrorClass::Internal => ErrorKind::Internal,
        };

        Self::new(kind, err.origin.into(), err.message)
    }
}

impl From<QueryError> for Error {
    fn from(err: QueryError) -> Self {
        let kind = match &err {
            QueryError::Range(RangeError::Negative { .. } | RangeError::Inverted { .. }) => {
                QueryErrorKind::InvalidRange
            }
            QueryError::Range(RangeError::LimitExceeded { .. }) => QueryErrorKind::LimitExceeded,
        };

        Self::new(ErrorKind::Query(kind), ErrorOrigin::Query, err.to_string())
    }
}

impl From<ConfigError> for Error {
    fn from(err: ConfigError) -> Self {
        Self::new(ErrorKind::Config, ErrorOrigin::Config, err.to_string())
    }
}

///
/// ErrorKind
/// Public error taxonomy for callers.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum ErrorKind {
    Query(QueryErrorKind),

    /// Configuration could not be read or failed validation.
    Config,

    /// A collaborator could not serve the request; retrying the whole call
    /// may succeed.
    Unavailable,

    /// The caller cannot remediate this.
    Internal,
}

///
/// QueryErrorKind
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum QueryErrorKind {
    /// Bounds are negative or `to` precedes `from`.
    InvalidRange,

    /// Window is wider than the configured maximum.
    LimitExceeded,
}

///
/// ErrorOrigin
/// Public origin taxonomy for callers.
///

#[derive(Clone, Copy, Debug, Deserialize, Display, Eq, PartialEq, Serialize)]
pub enum ErrorOrigin {
    Agent,
    Catalog,
    Config,
    Definition,
    Executor,
    Policy,
    Query,
}

impl From<CoreErrorOrigin> for ErrorOrigin {
    fn from(origin: CoreErrorOrigin) -> Self {
        match origin {
            CoreErrorOrigin::Agent => Self::Agent,
            CoreErrorOrigin::Catalog => Self::Catalog,
            CoreErrorOrigin::Definition => Self::Definition,
            CoreErrorOrigin::Executor => Self::Executor,
            CoreErrorOrigin::Policy => Self::Policy,
        }
    }
}

///
/// TESTS
///
