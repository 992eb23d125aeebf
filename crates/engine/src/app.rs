//! Application state and composition.

use std::sync::Arc;

use crate::infrastructure::{
    ports::{CatalogPort, ChatPort, MemberRepo, PokemonRepo, RandomPort},
    settings::BotSettings,
};
use crate::use_cases::{
    collection::{
        CollectionUseCases, ListPokemon, PickStarter, Redeem, ReleaseAll, ReleasePokemon,
        SelectPokemon, SetNickname, SetOrder, ShowInfo, ShowStarters, ToggleFavorite,
    },
    ConfirmationGate, FilterCompiler,
};

/// Main application state.
///
/// Holds the stores, the chat adapter and every use case wired against them.
pub struct App {
    pub repositories: Repositories,
    pub catalog: Arc<dyn CatalogPort>,
    pub chat: Arc<dyn ChatPort>,
    pub use_cases: UseCases,
    pub settings: BotSettings,
}

/// Container for the store ports.
pub struct Repositories {
    pub member: Arc<dyn MemberRepo>,
    pub pokemon: Arc<dyn PokemonRepo>,
}

/// Container for all use cases.
pub struct UseCases {
    pub collection: CollectionUseCases,
}

impl App {
    pub fn new(
        member_repo: Arc<dyn MemberRepo>,
        pokemon_repo: Arc<dyn PokemonRepo>,
        catalog: Arc<dyn CatalogPort>,
        chat: Arc<dyn ChatPort>,
        random: Arc<dyn RandomPort>,
        settings: BotSettings,
    ) -> Self {
        let compiler = Arc::new(FilterCompiler::new(catalog.clone()));
        let gate = Arc::new(ConfirmationGate::new(chat.clone(), settings.confirm_timeout));
        let prefix = settings.prefix.as_str();

        let collection = CollectionUseCases {
            list: Arc::new(ListPokemon::new(
                pokemon_repo.clone(),
                catalog.clone(),
                chat.clone(),
                compiler.clone(),
                settings.page_size,
                settings.pagination_timeout,
            )),
            info: Arc::new(ShowInfo::new(
                pokemon_repo.clone(),
                catalog.clone(),
                chat.clone(),
                settings.pagination_timeout,
            )),
            nickname: Arc::new(SetNickname::new(pokemon_repo.clone(), catalog.clone())),
            favorite: Arc::new(ToggleFavorite::new(pokemon_repo.clone(), catalog.clone())),
            select: Arc::new(SelectPokemon::new(
                member_repo.clone(),
                pokemon_repo.clone(),
                catalog.clone(),
            )),
            order: Arc::new(SetOrder::new(member_repo.clone())),
            release: Arc::new(ReleasePokemon::new(
                pokemon_repo.clone(),
                catalog.clone(),
                gate.clone(),
            )),
            release_all: Arc::new(ReleaseAll::new(
                pokemon_repo.clone(),
                chat.clone(),
                compiler,
                gate,
            )),
            starters: Arc::new(ShowStarters::new(catalog.clone(), prefix)),
            pick: Arc::new(PickStarter::new(
                member_repo.clone(),
                pokemon_repo.clone(),
                catalog.clone(),
                random.clone(),
                prefix,
            )),
            redeem: Arc::new(Redeem::new(
                member_repo.clone(),
                pokemon_repo.clone(),
                catalog.clone(),
                random,
                prefix,
            )),
        };

        let repositories = Repositories {
            member: member_repo,
            pokemon: pokemon_repo,
        };

        Self {
            repositories,
            catalog,
            chat,
            use_cases: UseCases { collection },
            settings,
        }
    }
}
