//! Getting pokémon into a collection: starters and redeems.

use std::sync::Arc;

use pokebot_domain::{Member, Pokemon, PokemonNumber, Species, UserId};

use crate::infrastructure::ports::{
    CatalogPort, Embed, MemberRepo, MemberUpdate, PokemonRepo, RandomPort,
};
use crate::infrastructure::random::{random_ivs, random_nature};

use super::{CollectionError, Reply};

/// Starter overview; needs no member.
pub struct ShowStarters {
    catalog: Arc<dyn CatalogPort>,
    prefix: String,
}

impl ShowStarters {
    pub fn new(catalog: Arc<dyn CatalogPort>, prefix: impl Into<String>) -> Self {
        Self {
            catalog,
            prefix: prefix.into(),
        }
    }

    pub fn execute(&self) -> Reply {
        let description = format!(
            "To start, choose one of the starter pokémon using the `{}pick <pokemon>` command. ",
            self.prefix
        );
        let embed = self.catalog.starters().into_iter().fold(
            Embed::new("Welcome to the world of Pokémon!").with_description(description),
            |embed, generation| {
                embed.with_field(generation.generation, generation.species.join(" · "), false)
            },
        );
        Reply::Send(embed.into())
    }
}

/// Pick use case: creates the member with their first pokémon.
pub struct PickStarter {
    member_repo: Arc<dyn MemberRepo>,
    pokemon_repo: Arc<dyn PokemonRepo>,
    catalog: Arc<dyn CatalogPort>,
    random: Arc<dyn RandomPort>,
    prefix: String,
}

impl PickStarter {
    pub fn new(
        member_repo: Arc<dyn MemberRepo>,
        pokemon_repo: Arc<dyn PokemonRepo>,
        catalog: Arc<dyn CatalogPort>,
        random: Arc<dyn RandomPort>,
        prefix: impl Into<String>,
    ) -> Self {
        Self {
            member_repo,
            pokemon_repo,
            catalog,
            random,
            prefix: prefix.into(),
        }
    }

    pub async fn execute(&self, user: UserId, name: &str) -> Result<Reply, CollectionError> {
        if self.member_repo.get(user).await?.is_some() {
            return Err(CollectionError::AlreadyStarted {
                prefix: self.prefix.clone(),
            });
        }

        let wanted = name.trim().to_lowercase();
        let is_starter = self
            .catalog
            .starters()
            .iter()
            .flat_map(|generation| generation.species.iter())
            .any(|species| species.to_lowercase() == wanted);
        if !is_starter {
            return Err(CollectionError::NotAStarter {
                prefix: self.prefix.clone(),
            });
        }
        let species = self
            .catalog
            .species_by_name(&wanted)
            .map_err(|_| CollectionError::NotAStarter {
                prefix: self.prefix.clone(),
            })?;

        let member = Member::with_starter(user);
        let starter = roll(self.random.as_ref(), member.selected, user, &species);
        self.member_repo.create(&member).await?;
        self.pokemon_repo.insert(&starter).await?;
        tracing::info!(user_id = %user, species = %species.name, "Member picked a starter");

        Ok(Reply::text(format!(
            "Congratulations on entering the world of pokémon! {} is your first pokémon. Type `{}info` to view it!",
            species.name, self.prefix
        )))
    }
}

/// Redeem use case.
pub struct Redeem {
    member_repo: Arc<dyn MemberRepo>,
    pokemon_repo: Arc<dyn PokemonRepo>,
    catalog: Arc<dyn CatalogPort>,
    random: Arc<dyn RandomPort>,
    prefix: String,
}

impl Redeem {
    pub fn new(
        member_repo: Arc<dyn MemberRepo>,
        pokemon_repo: Arc<dyn PokemonRepo>,
        catalog: Arc<dyn CatalogPort>,
        random: Arc<dyn RandomPort>,
        prefix: impl Into<String>,
    ) -> Self {
        Self {
            member_repo,
            pokemon_repo,
            catalog,
            random,
            prefix: prefix.into(),
        }
    }

    /// Without a species, shows the balance instead of spending.
    pub async fn execute(
        &self,
        member: &Member,
        species: Option<&str>,
    ) -> Result<Reply, CollectionError> {
        let Some(name) = species else {
            return Ok(self.balance(member));
        };

        if member.redeems == 0 {
            return Err(CollectionError::NoRedeems);
        }
        let species = self
            .catalog
            .species_by_name(name)
            .map_err(|_| CollectionError::UnknownSpecies(name.to_string()))?;
        if !species.catchable {
            return Err(CollectionError::NotRedeemable);
        }

        let pokemon = roll(self.random.as_ref(), member.next_id, member.id, &species);
        self.member_repo
            .update(member.id, MemberUpdate::SpendRedeem)
            .await?;
        self.pokemon_repo.insert(&pokemon).await?;
        tracing::info!(
            user_id = %member.id,
            species = %species.name,
            number = %pokemon.number,
            "Redeemed pokémon"
        );

        Ok(Reply::text(format!(
            "You used a redeem and received a {}! View it with `{}info latest`.",
            species.name, self.prefix
        )))
    }

    fn balance(&self, member: &Member) -> Reply {
        let embed = Embed::new(format!("Your Redeems: {}", member.redeems))
            .with_description(
                "You can use redeems to receive any pokémon of your choice. Currently, you can only receive redeems from giveaways.",
            )
            .with_field(
                format!("{}redeem <pokémon>", self.prefix),
                "Use a redeem to receive a pokémon of your choice.",
                true,
            );
        Reply::Send(embed.into())
    }
}

/// A fresh level-1 entry with random IVs and nature.
fn roll(random: &dyn RandomPort, number: PokemonNumber, owner: UserId, species: &Species) -> Pokemon {
    Pokemon::new(
        number,
        owner,
        species.id,
        random_nature(random),
        random_ivs(random),
    )
}
