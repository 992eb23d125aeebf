//! Release a single pokémon.

use std::sync::Arc;

use pokebot_domain::{ChannelId, Member};

use crate::infrastructure::ports::{CatalogPort, PokemonRepo};
use crate::use_cases::confirmation::{ConfirmationGate, ConfirmationOutcome, ConfirmationToken};

use super::{find_pokemon, species_of, CollectionError, PokemonSelector, Reply};

pub(super) const ABORTED: &str = "Aborted.";
pub(super) const TIMED_OUT: &str = "Time's up. Aborted.";

/// Release use case.
///
/// Selected and favorited entries are refused before anything is asked.
pub struct ReleasePokemon {
    pokemon_repo: Arc<dyn PokemonRepo>,
    catalog: Arc<dyn CatalogPort>,
    gate: Arc<ConfirmationGate>,
}

impl ReleasePokemon {
    pub fn new(
        pokemon_repo: Arc<dyn PokemonRepo>,
        catalog: Arc<dyn CatalogPort>,
        gate: Arc<ConfirmationGate>,
    ) -> Self {
        Self {
            pokemon_repo,
            catalog,
            gate,
        }
    }

    pub async fn execute(
        &self,
        member: &Member,
        channel: ChannelId,
        selector: PokemonSelector,
    ) -> Result<Reply, CollectionError> {
        let pokemon =
            find_pokemon(self.pokemon_repo.as_ref(), member.id, member.selected, selector).await?;

        if pokemon.number == member.selected {
            return Err(CollectionError::ReleaseSelected);
        }
        if pokemon.favorite {
            return Err(CollectionError::ReleaseFavorite);
        }

        let species = species_of(&self.catalog, &pokemon)?;
        let prompt = format!(
            "Are you sure you want to release your level {} {}. No. {}? This action is irreversible! [y/N]",
            pokemon.level, species.name, pokemon.number
        );
        let outcome = self
            .gate
            .request(member.id, channel, prompt, &ConfirmationToken::Yes)
            .await?;
        match outcome {
            ConfirmationOutcome::Confirmed => {}
            ConfirmationOutcome::Declined => return Ok(Reply::text(ABORTED)),
            ConfirmationOutcome::TimedOut => return Ok(Reply::text(TIMED_OUT)),
        }

        self.pokemon_repo
            .release(member.id, &[pokemon.number])
            .await?;
        tracing::info!(user_id = %member.id, number = %pokemon.number, "Released pokémon");

        Ok(Reply::text(format!(
            "You released your level {} {}. No. {}.",
            pokemon.level, species.name, pokemon.number
        )))
    }
}
