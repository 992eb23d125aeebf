//! Numeric comparisons typed by users on filter flags
//!
//! Accepted shapes, as whitespace-split tokens:
//! - `["12"]` - equality against 12
//! - `[">12"]` - operator glued to the operand
//! - `[">", "12"]` - operator and operand as separate tokens

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error when parsing a numeric comparison
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ComparisonParseError {
    /// No tokens, or an empty token
    #[error("Empty comparison")]
    Empty,
    /// More than two tokens
    #[error("Too many tokens in comparison: {0}")]
    TooManyTokens(usize),
    /// Operator other than `<`, `=` or `>`
    #[error("Unknown comparison operator: '{0}'")]
    UnknownOperator(String),
    /// Operand is not a non-negative base-10 integer
    #[error("Invalid comparison operand: '{0}'")]
    InvalidOperand(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ComparisonOp {
    #[serde(rename = "<")]
    LessThan,
    #[serde(rename = "=")]
    Equal,
    #[serde(rename = ">")]
    GreaterThan,
}

impl ComparisonOp {
    fn from_token(token: &str) -> Result<Self, ComparisonParseError> {
        match token {
            "<" => Ok(Self::LessThan),
            "=" => Ok(Self::Equal),
            ">" => Ok(Self::GreaterThan),
            other => Err(ComparisonParseError::UnknownOperator(other.to_string())),
        }
    }

    /// Aggregation operator name (`$lt`, `$eq`, `$gt`).
    pub fn operator_name(&self) -> &'static str {
        match self {
            Self::LessThan => "$lt",
            Self::Equal => "$eq",
            Self::GreaterThan => "$gt",
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Self::LessThan => "<",
            Self::Equal => "=",
            Self::GreaterThan => ">",
        }
    }
}

/// A parsed comparison like `>25`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NumericComparison {
    pub op: ComparisonOp,
    pub operand: u32,
}

impl NumericComparison {
    pub fn new(op: ComparisonOp, operand: u32) -> Self {
        Self { op, operand }
    }

    /// Parse a one- or two-token comparison.
    pub fn parse<S: AsRef<str>>(tokens: &[S]) -> Result<Self, ComparisonParseError> {
        match tokens {
            [] => Err(ComparisonParseError::Empty),
            [single] => {
                let single = single.as_ref();
                let first = single.chars().next().ok_or(ComparisonParseError::Empty)?;
                if first.is_ascii_digit() {
                    // A digit-leading token must be entirely the operand.
                    Ok(Self::new(ComparisonOp::Equal, parse_operand(single)?))
                } else {
                    let (op, operand) = single.split_at(first.len_utf8());
                    Ok(Self::new(
                        ComparisonOp::from_token(op)?,
                        parse_operand(operand)?,
                    ))
                }
            }
            [op, operand] => Ok(Self::new(
                ComparisonOp::from_token(op.as_ref())?,
                parse_operand(operand.as_ref())?,
            )),
            more => Err(ComparisonParseError::TooManyTokens(more.len())),
        }
    }

    /// Whether `value` satisfies this comparison.
    pub fn matches(&self, value: f64) -> bool {
        let operand = f64::from(self.operand);
        match self.op {
            ComparisonOp::LessThan => value < operand,
            ComparisonOp::Equal => value == operand,
            ComparisonOp::GreaterThan => value > operand,
        }
    }
}

impl fmt::Display for NumericComparison {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.op.symbol(), self.operand)
    }
}

fn parse_operand(text: &str) -> Result<u32, ComparisonParseError> {
    if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ComparisonParseError::InvalidOperand(text.to_string()));
    }
    text.parse()
        .map_err(|_| ComparisonParseError::InvalidOperand(text.to_string()))
}
