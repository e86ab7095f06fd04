//! Module: query::criterion
//! Responsibility: filter criterion vocabulary and its per-asset evaluation.
//! Does not own: criterion ordering across definitions (see `OfferQuery`).

use crate::{model::Asset, value::Value};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Property name that resolves to the asset id rather than a property.
pub const ASSET_ID_PROPERTY: &str = "id";

///
/// CriterionOp
///

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum CriterionOp {
    #[serde(rename = "=")]
    Eq,
    #[serde(rename = "!=")]
    Ne,
    #[serde(rename = "in")]
    In,
    #[serde(rename = "not in")]
    NotIn,
    #[serde(rename = "like")]
    Like,
}

impl CriterionOp {
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Eq => "=",
            Self::Ne => "!=",
            Self::In => "in",
            Self::NotIn => "not in",
            Self::Like => "like",
        }
    }

    // Negated operators accept assets that lack the property.
    const fn matches_missing(self) -> bool {
        matches!(self, Self::Ne | Self::NotIn)
    }
}

impl fmt::Display for CriterionOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

///
/// Criterion
///
/// One predicate fragment `operand_left <op> operand_right`.
/// A filter is an ordered list of criteria read as a conjunction.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Criterion {
    pub operand_left: String,
    pub operator: CriterionOp,
    pub operand_right: Value,
}

impl Criterion {
    pub fn new(
        operand_left: impl Into<String>,
        operator: CriterionOp,
        operand_right: impl Into<Value>,
    ) -> Self {
        Self {
            operand_left: operand_left.into(),
            operator,
            operand_right: operand_right.into(),
        }
    }

    pub fn equals(operand_left: impl Into<String>, operand_right: impl Into<Value>) -> Self {
        Self::new(operand_left, CriterionOp::Eq, operand_right)
    }

    pub fn like(operand_left: impl Into<String>, pattern: impl Into<String>) -> Self {
        Self::new(operand_left, CriterionOp::Like, Value::Text(pattern.into()))
    }

    /// Evaluate this criterion against one asset.
    #[must_use]
    pub fn matches(&self, asset: &Asset) -> bool {
        let id_value;
        let left = if self.operand_left == ASSET_ID_PROPERTY {
            id_value = Value::Text(asset.id.clone());
            Some(&id_value)
        } else {
            asset.properties.get(&self.operand_left)
        };

        let Some(left) = left.filter(|value| !value.is_null()) else {
            return self.operator.matches_missing();
        };

        match self.operator {
            CriterionOp::Eq => left == &self.operand_right,
            CriterionOp::Ne => left != &self.operand_right,
            CriterionOp::In => self.right_contains(left),
            CriterionOp::NotIn => !self.right_contains(left),
            CriterionOp::Like => match (left.to_text(), self.operand_right.as_text()) {
                (Some(text), Some(pattern)) => like_matches(&text, pattern),
                _ => false,
            },
        }
    }

    // A scalar right operand behaves as a one-element list.
    fn right_contains(&self, left: &Value) -> bool {
        match self.operand_right.as_list() {
            Some(items) => items.contains(left),
            None => &self.operand_right == left,
        }
    }
}

impl fmt::Display for Criterion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {}",
            self.operand_left, self.operator, self.operand_right
        )
    }
}

/// Case-sensitive `%` wildcard match over the whole input.
pub(crate) fn like_matches(text: &str, pattern: &str) -> bool {
    let mut segments = pattern.split('%');
    let Some(head) = segments.next() else {
        return text.is_empty();
    };
    let Some(mut rest) = text.strip_prefix(head) else {
        return false;
    };

    let tail: Vec<&str> = segments.collect();
    let Some((last, middle)) = tail.split_last() else {
        // no wildcard at all: exact match
        return rest.is_empty();
    };

    for segment in middle {
        match rest.find(segment) {
            Some(at) => rest = &rest[at + segment.len()..],
            None => return false,
        }
    }

    rest.ends_with(last)
}

///
/// TESTS
///
