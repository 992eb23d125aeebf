//! Member-selectable collection ordering

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// How a member's collection is ordered in listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    #[default]
    Number,
    Iv,
    Level,
    Pokedex,
}

impl SortOrder {
    pub const ALL: [SortOrder; 4] = [
        SortOrder::Number,
        SortOrder::Iv,
        SortOrder::Level,
        SortOrder::Pokedex,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Number => "number",
            SortOrder::Iv => "iv",
            SortOrder::Level => "level",
            SortOrder::Pokedex => "pokedex",
        }
    }

    /// Human label used in confirmations.
    pub fn label(&self) -> &'static str {
        match self {
            SortOrder::Iv => "IV",
            other => other.as_str(),
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for SortOrder {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "number" => Ok(Self::Number),
            "iv" => Ok(Self::Iv),
            "level" => Ok(Self::Level),
            "pokedex" => Ok(Self::Pokedex),
            other => Err(DomainError::parse(format!("Unknown sort order: {}", other))),
        }
    }
}
