//! Collection use cases.
//!
//! Everything a started member does with their pokémon: listing, detail
//! view, renaming, favoriting, selecting, ordering and releasing, plus the
//! onboarding commands that create the collection in the first place.

mod error;
mod info;
mod list;
mod manage;
mod onboarding;
mod release;
mod release_all;

use std::sync::Arc;

use pokebot_domain::{FilterStage, Pokemon, PokemonNumber, Species, UserId};

use crate::infrastructure::ports::{CatalogPort, OutgoingMessage, PokemonRepo, RepoError};

pub use error::CollectionError;
pub use info::ShowInfo;
pub use list::{ListPokemon, ListRequest};
pub use manage::{SetNickname, SetOrder, SelectPokemon, ToggleFavorite};
pub use onboarding::{PickStarter, Redeem, ShowStarters};
pub use release::ReleasePokemon;
pub use release_all::ReleaseAll;

/// Container for collection use cases.
pub struct CollectionUseCases {
    pub list: Arc<ListPokemon>,
    pub info: Arc<ShowInfo>,
    pub nickname: Arc<SetNickname>,
    pub favorite: Arc<ToggleFavorite>,
    pub select: Arc<SelectPokemon>,
    pub order: Arc<SetOrder>,
    pub release: Arc<ReleasePokemon>,
    pub release_all: Arc<ReleaseAll>,
    pub starters: Arc<ShowStarters>,
    pub pick: Arc<PickStarter>,
    pub redeem: Arc<Redeem>,
}

/// What a command leaves for the caller to send.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    Send(OutgoingMessage),
    /// The use case already talked to the user.
    Done,
}

impl Reply {
    pub fn text(content: impl Into<String>) -> Self {
        Self::Send(OutgoingMessage::text(content))
    }
}

/// Which entry a single-pokémon command refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PokemonSelector {
    Selected,
    Number(PokemonNumber),
    /// Highest-numbered entry
    Latest,
}

impl PokemonSelector {
    /// `latest` or a number; anything else is `None`.
    pub fn parse(text: &str) -> Option<Self> {
        let text = text.trim();
        if text.eq_ignore_ascii_case("latest") {
            return Some(Self::Latest);
        }
        if !text.is_empty() && text.bytes().all(|b| b.is_ascii_digit()) {
            return text.parse().ok().map(|n| Self::Number(PokemonNumber::new(n)));
        }
        None
    }
}

/// Look up the entry `selector` refers to.
pub(crate) async fn find_pokemon(
    repo: &dyn PokemonRepo,
    owner: UserId,
    selected: PokemonNumber,
    selector: PokemonSelector,
) -> Result<Pokemon, CollectionError> {
    let stages = match selector {
        PokemonSelector::Selected => vec![FilterStage::number_is(selected)],
        PokemonSelector::Number(number) => vec![FilterStage::number_is(number)],
        PokemonSelector::Latest => vec![FilterStage::latest_first()],
    };
    repo.fetch_single(owner, &stages)
        .await?
        .ok_or(CollectionError::PokemonNotFound)
}

/// Catalog entry for a stored pokémon.
pub(crate) fn species_of(
    catalog: &Arc<dyn CatalogPort>,
    pokemon: &Pokemon,
) -> Result<Species, RepoError> {
    catalog
        .species(pokemon.species_id)
        .ok_or_else(|| RepoError::not_found("Species", pokemon.species_id))
}
