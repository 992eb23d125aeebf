//! Pokémon entity - One entry in a member's collection
//!
//! Entries are identified per owner by a sequence [`PokemonNumber`]; numbers
//! are never reused after a release.

use serde::{Deserialize, Serialize};

use crate::entities::Species;
use crate::ids::{PokemonNumber, SpeciesId, UserId};
use crate::value_objects::{Ivs, Nature, Nickname, Stat};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pokemon {
    pub number: PokemonNumber,
    pub owner_id: UserId,
    pub species_id: SpeciesId,
    pub level: u32,
    pub xp: u32,
    pub nature: Nature,
    pub ivs: Ivs,
    pub nickname: Option<Nickname>,
    pub favorite: bool,
}

impl Pokemon {
    /// A fresh level-1 entry with no xp, nickname or favorite marker.
    pub fn new(
        number: PokemonNumber,
        owner_id: UserId,
        species_id: SpeciesId,
        nature: Nature,
        ivs: Ivs,
    ) -> Self {
        Self {
            number,
            owner_id,
            species_id,
            level: 1,
            xp: 0,
            nature,
            ivs,
            nickname: None,
            favorite: false,
        }
    }

    pub fn with_level(mut self, level: u32) -> Self {
        self.level = level;
        self
    }

    pub fn with_favorite(mut self, favorite: bool) -> Self {
        self.favorite = favorite;
        self
    }

    pub fn with_nickname(mut self, nickname: Option<Nickname>) -> Self {
        self.nickname = nickname;
        self
    }

    /// XP needed to reach the next level.
    pub fn max_xp(&self) -> u32 {
        250 + 25 * self.level
    }

    /// Total IV as a fraction in `0.0..=1.0`.
    pub fn iv_percentage(&self) -> f64 {
        self.ivs.percentage()
    }

    /// Computed stat value for this entry's level, IV and nature.
    pub fn stat(&self, species: &Species, stat: Stat) -> u32 {
        let base = u32::from(species.base_stats.get(stat));
        let iv = u32::from(self.ivs.get(stat));
        let scaled = (2 * base + iv) * self.level / 100;
        match stat {
            Stat::Hp => scaled + self.level + 10,
            other => (f64::from(scaled + 5) * self.nature.multiplier(other)).floor() as u32,
        }
    }

    /// Species name followed by the quoted nickname, if any.
    pub fn display_name(&self, species: &Species) -> String {
        match &self.nickname {
            Some(nickname) => format!("{} \"{}\"", species.name, nickname),
            None => species.name.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value_objects::BaseStats;

    fn pikachu() -> Species {
        Species::new(SpeciesId::new(25), "Pikachu").with_base_stats(BaseStats {
            hp: 35,
            atk: 55,
            defn: 40,
            satk: 50,
            sdef: 50,
            spd: 90,
        })
    }

    fn entry() -> Pokemon {
        Pokemon::new(
            PokemonNumber::new(1),
            UserId::new(1),
            SpeciesId::new(25),
            Nature::Hardy,
            Ivs::new(31, 31, 31, 31, 31, 31).unwrap(),
        )
    }

    #[test]
    fn max_xp_scales_with_level() {
        assert_eq!(entry().max_xp(), 275);
        assert_eq!(entry().with_level(10).max_xp(), 500);
    }

    #[test]
    fn stats_follow_standard_formula() {
        let p = entry().with_level(50);
        // (2*35 + 31) * 50 / 100 + 50 + 10
        assert_eq!(p.stat(&pikachu(), Stat::Hp), 110);
        // (2*90 + 31) * 50 / 100 + 5
        assert_eq!(p.stat(&pikachu(), Stat::Spd), 110);
    }

    #[test]
    fn nature_modifies_stat() {
        let mut p = entry().with_level(50);
        p.nature = Nature::Timid;
        assert_eq!(p.stat(&pikachu(), Stat::Spd), 121);
    }

    #[test]
    fn display_name_includes_nickname() {
        let p = entry().with_nickname(Some(Nickname::new("Sparky").unwrap()));
        assert_eq!(p.display_name(&pikachu()), "Pikachu \"Sparky\"");
        assert_eq!(entry().display_name(&pikachu()), "Pikachu");
    }
}
