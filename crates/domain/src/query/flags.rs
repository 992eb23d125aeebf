//! Filter flags accepted by collection commands
//!
//! [`FilterFlag::ALL`] is in processing order: rarity flags first, then type,
//! favorite, name, level, and finally the IV comparisons whose computed
//! fields must be derived before they can be matched.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::entities::RarityClass;
use crate::error::DomainError;
use crate::value_objects::Stat;

use super::stage::IvExpr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FilterFlag {
    Mythical,
    Legendary,
    Ub,
    Type,
    Favorite,
    Name,
    Level,
    HpIv,
    AtkIv,
    DefIv,
    SpatkIv,
    SpdefIv,
    SpdIv,
    Iv,
}

/// Shape of the value a flag carries on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlagKind {
    /// Present or absent, no value
    Switch,
    /// One free-text token
    Text,
    /// One non-negative integer token
    Integer,
    /// One or more tokens forming a numeric comparison
    Comparison,
}

impl FilterFlag {
    pub const ALL: [FilterFlag; 14] = [
        FilterFlag::Mythical,
        FilterFlag::Legendary,
        FilterFlag::Ub,
        FilterFlag::Type,
        FilterFlag::Favorite,
        FilterFlag::Name,
        FilterFlag::Level,
        FilterFlag::HpIv,
        FilterFlag::AtkIv,
        FilterFlag::DefIv,
        FilterFlag::SpatkIv,
        FilterFlag::SpdefIv,
        FilterFlag::SpdIv,
        FilterFlag::Iv,
    ];

    /// Flags accepted by the bulk release command.
    pub const RELEASE: [FilterFlag; 9] = [
        FilterFlag::Type,
        FilterFlag::Name,
        FilterFlag::HpIv,
        FilterFlag::AtkIv,
        FilterFlag::DefIv,
        FilterFlag::SpatkIv,
        FilterFlag::SpdefIv,
        FilterFlag::SpdIv,
        FilterFlag::Iv,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FilterFlag::Mythical => "mythical",
            FilterFlag::Legendary => "legendary",
            FilterFlag::Ub => "ub",
            FilterFlag::Type => "type",
            FilterFlag::Favorite => "favorite",
            FilterFlag::Name => "name",
            FilterFlag::Level => "level",
            FilterFlag::HpIv => "hpiv",
            FilterFlag::AtkIv => "atkiv",
            FilterFlag::DefIv => "defiv",
            FilterFlag::SpatkIv => "spatkiv",
            FilterFlag::SpdefIv => "spdefiv",
            FilterFlag::SpdIv => "spdiv",
            FilterFlag::Iv => "iv",
        }
    }

    pub fn kind(&self) -> FlagKind {
        match self {
            FilterFlag::Mythical | FilterFlag::Legendary | FilterFlag::Ub | FilterFlag::Favorite => {
                FlagKind::Switch
            }
            FilterFlag::Type | FilterFlag::Name => FlagKind::Text,
            FilterFlag::Level => FlagKind::Integer,
            _ => FlagKind::Comparison,
        }
    }

    pub fn rarity_class(&self) -> Option<RarityClass> {
        match self {
            FilterFlag::Mythical => Some(RarityClass::Mythical),
            FilterFlag::Legendary => Some(RarityClass::Legendary),
            FilterFlag::Ub => Some(RarityClass::UltraBeast),
            _ => None,
        }
    }

    /// Expression deriving the value an IV flag compares against.
    pub fn iv_expr(&self) -> Option<IvExpr> {
        match self {
            FilterFlag::HpIv => Some(IvExpr::Stat(Stat::Hp)),
            FilterFlag::AtkIv => Some(IvExpr::Stat(Stat::Atk)),
            FilterFlag::DefIv => Some(IvExpr::Stat(Stat::Defn)),
            FilterFlag::SpatkIv => Some(IvExpr::Stat(Stat::Satk)),
            FilterFlag::SpdefIv => Some(IvExpr::Stat(Stat::Sdef)),
            FilterFlag::SpdIv => Some(IvExpr::Stat(Stat::Spd)),
            FilterFlag::Iv => Some(IvExpr::TotalPercent),
            _ => None,
        }
    }
}

impl fmt::Display for FilterFlag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for FilterFlag {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FilterFlag::ALL
            .into_iter()
            .find(|flag| flag.as_str() == s)
            .ok_or_else(|| DomainError::parse(format!("Unknown flag: --{}", s)))
    }
}

/// A user-supplied flag value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlagValue {
    Switch(bool),
    Text(String),
    Integer(u32),
    Tokens(Vec<String>),
}

/// Flags present on one command invocation, keyed by flag.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterFlags {
    values: BTreeMap<FilterFlag, FlagValue>,
}

impl FilterFlags {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, flag: FilterFlag, value: FlagValue) -> Self {
        self.set(flag, value);
        self
    }

    pub fn with_switch(self, flag: FilterFlag) -> Self {
        self.with(flag, FlagValue::Switch(true))
    }

    pub fn with_tokens<I, S>(self, flag: FilterFlag, tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.with(
            flag,
            FlagValue::Tokens(tokens.into_iter().map(Into::into).collect()),
        )
    }

    pub fn set(&mut self, flag: FilterFlag, value: FlagValue) {
        self.values.insert(flag, value);
    }

    pub fn get(&self, flag: FilterFlag) -> Option<&FlagValue> {
        self.values.get(&flag)
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
