use derive_more::From;
use serde::{Deserialize, Serialize};
use std::fmt;

///
/// Value
///
/// Asset property and criterion operand value.
/// Untagged on the serde side so fixtures read like plain JSON.
///

#[derive(Clone, Debug, Deserialize, Eq, From, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    #[from(ignore)]
    Null,
    Bool(bool),
    Int(i64),
    Text(String),
    List(Vec<Self>),
}

impl Value {
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_list(&self) -> Option<&[Self]> {
        match self {
            Self::List(items) => Some(items),
            _ => None,
        }
    }

    /// Render scalar values as text for wildcard matching.
    /// Lists and null have no text form.
    #[must_use]
    pub fn to_text(&self) -> Option<String> {
        match self {
            Self::Bool(v) => Some(v.to_string()),
            Self::Int(v) => Some(v.to_string()),
            Self::Text(v) => Some(v.clone()),
            Self::Null | Self::List(_) => None,
        }
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => write!(f, "null"),
            Self::Bool(v) => write!(f, "{v}"),
            Self::Int(v) => write!(f, "{v}"),
            Self::Text(v) => write!(f, "'{v}'"),
            Self::List(items) => {
                write!(f, "(")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{item}")?;
                }
                write!(f, ")")
            }
        }
    }
}

///
/// TESTS
///
