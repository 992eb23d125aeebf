//! Small single-entry and member-setting commands.

use std::sync::Arc;

use pokebot_domain::{Member, Nickname, SortOrder, MAX_NICKNAME_LEN};

use crate::infrastructure::ports::{
    CatalogPort, MemberRepo, MemberUpdate, PokemonRepo, PokemonUpdate,
};

use super::{find_pokemon, species_of, CollectionError, PokemonSelector, Reply};

/// Nickname use case; always applies to the selected pokémon.
pub struct SetNickname {
    pokemon_repo: Arc<dyn PokemonRepo>,
    catalog: Arc<dyn CatalogPort>,
}

impl SetNickname {
    pub fn new(pokemon_repo: Arc<dyn PokemonRepo>, catalog: Arc<dyn CatalogPort>) -> Self {
        Self {
            pokemon_repo,
            catalog,
        }
    }

    /// `reset` clears the nickname.
    pub async fn execute(&self, member: &Member, text: &str) -> Result<Reply, CollectionError> {
        if text.chars().count() > MAX_NICKNAME_LEN {
            return Err(CollectionError::NicknameTooLong);
        }
        let nickname = Nickname::parse_input(text)?;

        let pokemon = find_pokemon(
            self.pokemon_repo.as_ref(),
            member.id,
            member.selected,
            PokemonSelector::Selected,
        )
        .await?;
        let species = species_of(&self.catalog, &pokemon)?;

        self.pokemon_repo
            .update(
                member.id,
                pokemon.number,
                PokemonUpdate::SetNickname(nickname.clone()),
            )
            .await?;

        let message = match nickname {
            Some(nickname) => format!(
                "Changed nickname to `{}` for your level {} {}.",
                nickname, pokemon.level, species.name
            ),
            None => format!(
                "Removed nickname for your level {} {}.",
                pokemon.level, species.name
            ),
        };
        Ok(Reply::text(message))
    }
}

/// Favorite toggle use case.
pub struct ToggleFavorite {
    pokemon_repo: Arc<dyn PokemonRepo>,
    catalog: Arc<dyn CatalogPort>,
}

impl ToggleFavorite {
    pub fn new(pokemon_repo: Arc<dyn PokemonRepo>, catalog: Arc<dyn CatalogPort>) -> Self {
        Self {
            pokemon_repo,
            catalog,
        }
    }

    pub async fn execute(
        &self,
        member: &Member,
        selector: PokemonSelector,
    ) -> Result<Reply, CollectionError> {
        let pokemon =
            find_pokemon(self.pokemon_repo.as_ref(), member.id, member.selected, selector).await?;
        let species = species_of(&self.catalog, &pokemon)?;

        let favorite = !pokemon.favorite;
        self.pokemon_repo
            .update(member.id, pokemon.number, PokemonUpdate::SetFavorite(favorite))
            .await?;

        let verb = if favorite { "Favorited" } else { "Unfavorited" };
        Ok(Reply::text(format!(
            "{} your level {} {}.",
            verb,
            pokemon.level,
            pokemon.display_name(&species)
        )))
    }
}

/// Select use case.
pub struct SelectPokemon {
    member_repo: Arc<dyn MemberRepo>,
    pokemon_repo: Arc<dyn PokemonRepo>,
    catalog: Arc<dyn CatalogPort>,
}

impl SelectPokemon {
    pub fn new(
        member_repo: Arc<dyn MemberRepo>,
        pokemon_repo: Arc<dyn PokemonRepo>,
        catalog: Arc<dyn CatalogPort>,
    ) -> Self {
        Self {
            member_repo,
            pokemon_repo,
            catalog,
        }
    }

    pub async fn execute(
        &self,
        member: &Member,
        selector: PokemonSelector,
    ) -> Result<Reply, CollectionError> {
        let pokemon =
            find_pokemon(self.pokemon_repo.as_ref(), member.id, member.selected, selector).await?;
        let species = species_of(&self.catalog, &pokemon)?;

        self.member_repo
            .update(member.id, MemberUpdate::Select(pokemon.number))
            .await?;
        tracing::debug!(user_id = %member.id, number = %pokemon.number, "Selected pokémon");

        Ok(Reply::text(format!(
            "You selected your level {} {}. No. {}.",
            pokemon.level, species.name, pokemon.number
        )))
    }
}

/// Sort order use case.
pub struct SetOrder {
    member_repo: Arc<dyn MemberRepo>,
}

impl SetOrder {
    pub fn new(member_repo: Arc<dyn MemberRepo>) -> Self {
        Self { member_repo }
    }

    pub async fn execute(&self, member: &Member, text: &str) -> Result<Reply, CollectionError> {
        let order: SortOrder = text.parse().map_err(|_| CollectionError::InvalidOrder)?;
        self.member_repo
            .update(member.id, MemberUpdate::SetOrder(order))
            .await?;
        Ok(Reply::text(format!("Now ordering pokemon by {}.", order.label())))
    }
}
