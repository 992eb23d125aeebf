//! Stats, individual values, and base stats

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Highest value a single IV may take.
pub const MAX_IV: u8 = 31;

/// Sum of all six IVs at their maximum.
pub const MAX_IV_TOTAL: u32 = MAX_IV as u32 * 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stat {
    Hp,
    Atk,
    Defn,
    Satk,
    Sdef,
    Spd,
}

impl Stat {
    pub const ALL: [Stat; 6] = [
        Stat::Hp,
        Stat::Atk,
        Stat::Defn,
        Stat::Satk,
        Stat::Sdef,
        Stat::Spd,
    ];

    /// Stored document field holding this stat's IV.
    pub fn iv_field(&self) -> &'static str {
        match self {
            Stat::Hp => "iv_hp",
            Stat::Atk => "iv_atk",
            Stat::Defn => "iv_defn",
            Stat::Satk => "iv_satk",
            Stat::Sdef => "iv_sdef",
            Stat::Spd => "iv_spd",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Stat::Hp => "HP",
            Stat::Atk => "Attack",
            Stat::Defn => "Defense",
            Stat::Satk => "Sp. Atk",
            Stat::Sdef => "Sp. Def",
            Stat::Spd => "Speed",
        }
    }
}

impl fmt::Display for Stat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Individual values for all six stats, each in `0..=31`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ivs {
    pub hp: u8,
    pub atk: u8,
    pub defn: u8,
    pub satk: u8,
    pub sdef: u8,
    pub spd: u8,
}

impl Ivs {
    pub fn new(hp: u8, atk: u8, defn: u8, satk: u8, sdef: u8, spd: u8) -> Result<Self, DomainError> {
        let ivs = Self {
            hp,
            atk,
            defn,
            satk,
            sdef,
            spd,
        };
        if let Some(stat) = Stat::ALL.into_iter().find(|s| ivs.get(*s) > MAX_IV) {
            return Err(DomainError::validation(format!(
                "{} IV must be at most {}",
                stat, MAX_IV
            )));
        }
        Ok(ivs)
    }

    /// Build from a generator returning a value per stat, clamped to the IV range.
    pub fn generate(mut roll: impl FnMut(Stat) -> u8) -> Self {
        let mut next = |stat| roll(stat).min(MAX_IV);
        Self {
            hp: next(Stat::Hp),
            atk: next(Stat::Atk),
            defn: next(Stat::Defn),
            satk: next(Stat::Satk),
            sdef: next(Stat::Sdef),
            spd: next(Stat::Spd),
        }
    }

    pub fn get(&self, stat: Stat) -> u8 {
        match stat {
            Stat::Hp => self.hp,
            Stat::Atk => self.atk,
            Stat::Defn => self.defn,
            Stat::Satk => self.satk,
            Stat::Sdef => self.sdef,
            Stat::Spd => self.spd,
        }
    }

    pub fn total(&self) -> u32 {
        Stat::ALL.iter().map(|s| u32::from(self.get(*s))).sum()
    }

    /// Total IV as a fraction of the maximum, in `0.0..=1.0`.
    pub fn percentage(&self) -> f64 {
        f64::from(self.total()) / f64::from(MAX_IV_TOTAL)
    }
}

/// Species base stats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BaseStats {
    pub hp: u16,
    pub atk: u16,
    pub defn: u16,
    pub satk: u16,
    pub sdef: u16,
    pub spd: u16,
}

impl BaseStats {
    pub fn get(&self, stat: Stat) -> u16 {
        match stat {
            Stat::Hp => self.hp,
            Stat::Atk => self.atk,
            Stat::Defn => self.defn,
            Stat::Satk => self.satk,
            Stat::Sdef => self.sdef,
            Stat::Spd => self.spd,
        }
    }
}
