//! JSON-backed species catalog.

use std::collections::HashMap;
use std::path::Path;

use pokebot_domain::{RarityClass, Species, SpeciesId};
use serde::Deserialize;

use crate::infrastructure::ports::{CatalogError, CatalogPort, StarterGeneration};

const BUNDLED_CATALOG: &str = include_str!("../../data/catalog.json");

#[derive(Debug, Deserialize)]
struct CatalogFile {
    species: Vec<Species>,
    #[serde(default)]
    starters: Vec<StarterGeneration>,
}

/// Static game data, indexed by id and lowercase name.
#[derive(Debug)]
pub struct GameData {
    species: Vec<Species>,
    by_id: HashMap<SpeciesId, usize>,
    by_name: HashMap<String, usize>,
    starters: Vec<StarterGeneration>,
}

impl GameData {
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let file: CatalogFile =
            serde_json::from_str(json).map_err(|e| CatalogError::Load(e.to_string()))?;

        let mut species = file.species;
        species.sort_by_key(|s| s.id);

        let mut by_id = HashMap::with_capacity(species.len());
        let mut by_name = HashMap::with_capacity(species.len());
        for (idx, s) in species.iter().enumerate() {
            if by_id.insert(s.id, idx).is_some() {
                return Err(CatalogError::Load(format!("duplicate species id {}", s.id)));
            }
            by_name.insert(s.name.to_lowercase(), idx);
        }

        for generation in &file.starters {
            if let Some(missing) = generation
                .species
                .iter()
                .find(|name| !by_name.contains_key(&name.to_lowercase()))
            {
                return Err(CatalogError::Load(format!(
                    "starter {} is not in the species list",
                    missing
                )));
            }
        }

        Ok(Self {
            species,
            by_id,
            by_name,
            starters: file.starters,
        })
    }

    pub fn from_path(path: &Path) -> Result<Self, CatalogError> {
        let json = std::fs::read_to_string(path)
            .map_err(|e| CatalogError::Load(format!("{}: {}", path.display(), e)))?;
        Self::from_json(&json)
    }

    /// Catalog shipped with the binary.
    pub fn bundled() -> Result<Self, CatalogError> {
        Self::from_json(BUNDLED_CATALOG)
    }

    pub fn len(&self) -> usize {
        self.species.len()
    }

    pub fn is_empty(&self) -> bool {
        self.species.is_empty()
    }

    fn ids_where(&self, pred: impl Fn(&Species) -> bool) -> Vec<SpeciesId> {
        self.species
            .iter()
            .filter(|s| pred(s))
            .map(|s| s.id)
            .collect()
    }
}

impl CatalogPort for GameData {
    fn species(&self, id: SpeciesId) -> Option<Species> {
        self.by_id.get(&id).map(|idx| self.species[*idx].clone())
    }

    fn species_by_name(&self, name: &str) -> Result<Species, CatalogError> {
        self.by_name
            .get(&name.trim().to_lowercase())
            .map(|idx| self.species[*idx].clone())
            .ok_or_else(|| CatalogError::SpeciesNotFound(name.to_string()))
    }

    fn ids_for_rarity(&self, class: RarityClass) -> Vec<SpeciesId> {
        self.ids_where(|s| s.has_rarity(class))
    }

    fn ids_for_type(&self, type_name: &str) -> Vec<SpeciesId> {
        let type_name = type_name.trim();
        self.ids_where(|s| s.has_type(type_name))
    }

    fn starters(&self) -> Vec<StarterGeneration> {
        self.starters.clone()
    }
}
