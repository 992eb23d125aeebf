use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::DomainError;

pub const MAX_NICKNAME_LEN: usize = 100;

/// Keyword that clears a nickname instead of setting one.
pub const RESET_KEYWORD: &str = "reset";

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Nickname(String);

impl Nickname {
    pub fn new(text: impl Into<String>) -> Result<Self, DomainError> {
        let text = text.into();
        if text.trim().is_empty() {
            return Err(DomainError::validation("Nickname cannot be empty"));
        }
        if text.chars().count() > MAX_NICKNAME_LEN {
            return Err(DomainError::validation("That nickname is too long."));
        }
        Ok(Self(text))
    }

    /// Parse user input; `reset` yields `None` (clear the nickname).
    pub fn parse_input(text: &str) -> Result<Option<Self>, DomainError> {
        if text == RESET_KEYWORD {
            return Ok(None);
        }
        Self::new(text).map(Some)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Nickname {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
