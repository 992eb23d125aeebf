//! Species entity - Static catalog entries that collection entries refer to

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::ids::SpeciesId;
use crate::value_objects::BaseStats;

/// Catalog tag used as a filter predicate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RarityClass {
    Mythical,
    Legendary,
    UltraBeast,
}

impl RarityClass {
    pub const ALL: [RarityClass; 3] = [
        RarityClass::Mythical,
        RarityClass::Legendary,
        RarityClass::UltraBeast,
    ];
}

/// A catalog species
///
/// Data-carrying struct loaded from the game data file; any combination of
/// flags is valid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Species {
    pub id: SpeciesId,
    pub name: String,
    #[serde(default)]
    pub types: Vec<String>,
    #[serde(default)]
    pub mythical: bool,
    #[serde(default)]
    pub legendary: bool,
    #[serde(default)]
    pub ultra_beast: bool,
    #[serde(default = "default_catchable")]
    pub catchable: bool,
    #[serde(default)]
    pub base_stats: BaseStats,
    #[serde(default)]
    pub image_url: Option<String>,
}

fn default_catchable() -> bool {
    true
}

impl Species {
    pub fn new(id: SpeciesId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            types: Vec::new(),
            mythical: false,
            legendary: false,
            ultra_beast: false,
            catchable: true,
            base_stats: BaseStats::default(),
            image_url: None,
        }
    }

    pub fn with_types<I, S>(mut self, types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.types = types.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_rarity(mut self, class: RarityClass) -> Self {
        match class {
            RarityClass::Mythical => self.mythical = true,
            RarityClass::Legendary => self.legendary = true,
            RarityClass::UltraBeast => self.ultra_beast = true,
        }
        self
    }

    pub fn with_base_stats(mut self, base_stats: BaseStats) -> Self {
        self.base_stats = base_stats;
        self
    }

    pub fn uncatchable(mut self) -> Self {
        self.catchable = false;
        self
    }

    pub fn has_rarity(&self, class: RarityClass) -> bool {
        match class {
            RarityClass::Mythical => self.mythical,
            RarityClass::Legendary => self.legendary,
            RarityClass::UltraBeast => self.ultra_beast,
        }
    }

    pub fn has_type(&self, type_name: &str) -> bool {
        self.types.iter().any(|t| t.eq_ignore_ascii_case(type_name))
    }
}

impl fmt::Display for Species {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}
