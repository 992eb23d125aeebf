//! Natures and their stat multipliers

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::stats::Stat;
use crate::error::DomainError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Nature {
    Hardy,
    Lonely,
    Brave,
    Adamant,
    Naughty,
    Bold,
    Docile,
    Relaxed,
    Impish,
    Lax,
    Timid,
    Hasty,
    Serious,
    Jolly,
    Naive,
    Modest,
    Mild,
    Quiet,
    Bashful,
    Rash,
    Calm,
    Gentle,
    Sassy,
    Careful,
    Quirky,
}

impl Nature {
    pub const ALL: [Nature; 25] = [
        Nature::Hardy,
        Nature::Lonely,
        Nature::Brave,
        Nature::Adamant,
        Nature::Naughty,
        Nature::Bold,
        Nature::Docile,
        Nature::Relaxed,
        Nature::Impish,
        Nature::Lax,
        Nature::Timid,
        Nature::Hasty,
        Nature::Serious,
        Nature::Jolly,
        Nature::Naive,
        Nature::Modest,
        Nature::Mild,
        Nature::Quiet,
        Nature::Bashful,
        Nature::Rash,
        Nature::Calm,
        Nature::Gentle,
        Nature::Sassy,
        Nature::Careful,
        Nature::Quirky,
    ];

    /// Raised and lowered stat, or `None` for neutral natures.
    pub fn effect(&self) -> Option<(Stat, Stat)> {
        use Stat::*;
        match self {
            Nature::Hardy | Nature::Docile | Nature::Serious | Nature::Bashful | Nature::Quirky => {
                None
            }
            Nature::Lonely => Some((Atk, Defn)),
            Nature::Brave => Some((Atk, Spd)),
            Nature::Adamant => Some((Atk, Satk)),
            Nature::Naughty => Some((Atk, Sdef)),
            Nature::Bold => Some((Defn, Atk)),
            Nature::Relaxed => Some((Defn, Spd)),
            Nature::Impish => Some((Defn, Satk)),
            Nature::Lax => Some((Defn, Sdef)),
            Nature::Timid => Some((Spd, Atk)),
            Nature::Hasty => Some((Spd, Defn)),
            Nature::Jolly => Some((Spd, Satk)),
            Nature::Naive => Some((Spd, Sdef)),
            Nature::Modest => Some((Satk, Atk)),
            Nature::Mild => Some((Satk, Defn)),
            Nature::Quiet => Some((Satk, Spd)),
            Nature::Rash => Some((Satk, Sdef)),
            Nature::Calm => Some((Sdef, Atk)),
            Nature::Gentle => Some((Sdef, Defn)),
            Nature::Sassy => Some((Sdef, Spd)),
            Nature::Careful => Some((Sdef, Satk)),
        }
    }

    /// Multiplier applied to `stat` (0.9, 1.0 or 1.1).
    pub fn multiplier(&self, stat: Stat) -> f64 {
        match self.effect() {
            Some((up, _)) if up == stat => 1.1,
            Some((_, down)) if down == stat => 0.9,
            _ => 1.0,
        }
    }
}

impl fmt::Display for Nature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

impl FromStr for Nature {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Nature::ALL
            .into_iter()
            .find(|n| n.to_string().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| DomainError::parse(format!("Unknown nature: {}", s)))
    }
}
