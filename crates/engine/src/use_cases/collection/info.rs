//! Pokémon detail view, one entry per page.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use pokebot_domain::{ChannelId, FilterStage, Member, Pokemon, Species, Stat, UserId, MAX_IV};

use crate::infrastructure::ports::{CatalogPort, ChatPort, Embed, PokemonRepo, RepoError};
use crate::use_cases::pagination::{PageContent, PageController, PageSource};

use super::{find_pokemon, species_of, CollectionError, PokemonSelector, Reply};

/// Info use case.
///
/// Pages through the member's whole collection in their sort order, starting
/// on the requested entry.
pub struct ShowInfo {
    pokemon_repo: Arc<dyn PokemonRepo>,
    catalog: Arc<dyn CatalogPort>,
    chat: Arc<dyn ChatPort>,
    idle_timeout: Duration,
}

impl ShowInfo {
    pub fn new(
        pokemon_repo: Arc<dyn PokemonRepo>,
        catalog: Arc<dyn CatalogPort>,
        chat: Arc<dyn ChatPort>,
        idle_timeout: Duration,
    ) -> Self {
        Self {
            pokemon_repo,
            catalog,
            chat,
            idle_timeout,
        }
    }

    pub async fn execute(
        &self,
        member: &Member,
        channel: ChannelId,
        selector: PokemonSelector,
    ) -> Result<Reply, CollectionError> {
        let stages = vec![FilterStage::sort_by(member.order_by)];

        let number = match selector {
            PokemonSelector::Selected => member.selected,
            PokemonSelector::Number(number) => number,
            PokemonSelector::Latest => {
                find_pokemon(self.pokemon_repo.as_ref(), member.id, member.selected, selector)
                    .await?
                    .number
            }
        };
        let position = self
            .pokemon_repo
            .position_of(member.id, &stages, number)
            .await?
            .ok_or(CollectionError::PokemonNotFound)?;
        let total = self.pokemon_repo.count(member.id, &stages).await?;

        let source = InfoPageSource {
            pokemon_repo: self.pokemon_repo.clone(),
            catalog: self.catalog.clone(),
            owner: member.id,
            stages,
        };
        let controller = PageController::new(
            self.chat.clone(),
            Box::new(source),
            usize::try_from(total).unwrap_or(usize::MAX),
            member.id,
            channel,
            self.idle_timeout,
        );
        controller
            .run(i64::try_from(position).unwrap_or(i64::MAX))
            .await?;
        Ok(Reply::Done)
    }
}

struct InfoPageSource {
    pokemon_repo: Arc<dyn PokemonRepo>,
    catalog: Arc<dyn CatalogPort>,
    owner: UserId,
    stages: Vec<FilterStage>,
}

#[async_trait]
impl PageSource for InfoPageSource {
    async fn page(&self, index: usize) -> Result<PageContent, RepoError> {
        let entry = self
            .pokemon_repo
            .fetch_page(self.owner, &self.stages, index as u64, 1)
            .await?
            .into_iter()
            .next();
        let Some(pokemon) = entry else {
            return Ok(PageContent::Empty(
                CollectionError::PokemonNotFound.to_string(),
            ));
        };
        let species = species_of(&self.catalog, &pokemon)?;
        Ok(PageContent::Page(info_embed(&pokemon, &species).into()))
    }
}

fn info_embed(pokemon: &Pokemon, species: &Species) -> Embed {
    let mut title = format!("Level {} {}", pokemon.level, species.name);
    if let Some(nickname) = &pokemon.nickname {
        title.push_str(&format!(" \"{}\"", nickname));
    }

    let details = [
        format!("**XP:** {}/{}", pokemon.xp, pokemon.max_xp()),
        format!("**Nature:** {}", pokemon.nature),
    ];

    let mut stats: Vec<String> = Stat::ALL
        .iter()
        .map(|&stat| {
            format!(
                "**{}:** {} – IV: {}/{}",
                stat.label(),
                pokemon.stat(species, stat),
                pokemon.ivs.get(stat),
                MAX_IV
            )
        })
        .collect();
    stats.push(format!(
        "**Total IV:** {:.2}%",
        pokemon.iv_percentage() * 100.0
    ));

    Embed::new(title)
        .with_image(species.image_url.clone())
        .with_field("Details", details.join("\n"), false)
        .with_field("Stats", stats.join("\n"), false)
        .with_footer(format!("Displaying pokémon number {}.", pokemon.number))
}
