//! Paged collection listing.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use pokebot_domain::{ChannelId, FilterFlags, FilterStage, Member, Pokemon, UserId};

use crate::infrastructure::ports::{CatalogPort, ChatPort, Embed, PokemonRepo, RepoError};
use crate::use_cases::filter::FilterCompiler;
use crate::use_cases::pagination::{
    page_count, PageContent, PageController, PageSource,
};

use super::{species_of, CollectionError, Reply};

const EMPTY_PAGE: &str = "There are no pokémon on this page!";

/// Arguments of one listing request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListRequest {
    /// 1-based page as typed by the user
    pub page: i64,
    pub flags: FilterFlags,
}

impl Default for ListRequest {
    fn default() -> Self {
        Self {
            page: 1,
            flags: FilterFlags::new(),
        }
    }
}

/// List use case.
///
/// Compiles the filters, counts the matches and hands a lazy page source to
/// the page controller.
pub struct ListPokemon {
    pokemon_repo: Arc<dyn PokemonRepo>,
    catalog: Arc<dyn CatalogPort>,
    chat: Arc<dyn ChatPort>,
    compiler: Arc<FilterCompiler>,
    page_size: u64,
    idle_timeout: Duration,
}

impl ListPokemon {
    pub fn new(
        pokemon_repo: Arc<dyn PokemonRepo>,
        catalog: Arc<dyn CatalogPort>,
        chat: Arc<dyn ChatPort>,
        compiler: Arc<FilterCompiler>,
        page_size: u64,
        idle_timeout: Duration,
    ) -> Self {
        Self {
            pokemon_repo,
            catalog,
            chat,
            compiler,
            page_size: page_size.max(1),
            idle_timeout,
        }
    }

    pub async fn execute(
        &self,
        member: &Member,
        channel: ChannelId,
        request: ListRequest,
    ) -> Result<Reply, CollectionError> {
        if request.page < 1 {
            return Err(CollectionError::NonPositivePage);
        }

        let mut stages = self.compiler.compile(&request.flags)?;
        stages.push(FilterStage::sort_by(member.order_by));

        let total = self.pokemon_repo.count(member.id, &stages).await?;
        if total == 0 {
            return Err(CollectionError::NoMatches);
        }
        tracing::info!(
            user_id = %member.id,
            matches = total,
            page = request.page,
            "Listing pokémon"
        );

        let source = ListPageSource {
            pokemon_repo: self.pokemon_repo.clone(),
            catalog: self.catalog.clone(),
            owner: member.id,
            stages,
            total,
            page_size: self.page_size,
        };
        let controller = PageController::new(
            self.chat.clone(),
            Box::new(source),
            page_count(total, self.page_size),
            member.id,
            channel,
            self.idle_timeout,
        );
        controller.run(request.page - 1).await?;
        Ok(Reply::Done)
    }
}

struct ListPageSource {
    pokemon_repo: Arc<dyn PokemonRepo>,
    catalog: Arc<dyn CatalogPort>,
    owner: UserId,
    stages: Vec<FilterStage>,
    total: u64,
    page_size: u64,
}

#[async_trait]
impl PageSource for ListPageSource {
    async fn page(&self, index: usize) -> Result<PageContent, RepoError> {
        let start = index as u64 * self.page_size;
        let entries = self
            .pokemon_repo
            .fetch_page(self.owner, &self.stages, start, self.page_size)
            .await?;
        if entries.is_empty() {
            return Ok(PageContent::Empty(EMPTY_PAGE.to_string()));
        }

        let rows = entries
            .iter()
            .map(|p| self.row(p))
            .collect::<Result<Vec<_>, _>>()?;
        let end = (start + self.page_size).min(self.total);
        let embed = Embed::new("Your pokémon")
            .with_description(rows.join("\n"))
            .with_footer(format!("Showing {}–{} out of {}.", start + 1, end, self.total));
        Ok(PageContent::Page(embed.into()))
    }
}

impl ListPageSource {
    fn row(&self, pokemon: &Pokemon) -> Result<String, RepoError> {
        let species = species_of(&self.catalog, pokemon)?;
        let mut name = pokemon.display_name(&species);
        if pokemon.favorite {
            name = format!("❤️ {}", name);
        }
        Ok(format!(
            "**{}** | Level: {} | Number: {} | IV: {:.2}%",
            name,
            pokemon.level,
            pokemon.number,
            pokemon.iv_percentage() * 100.0
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pokebot_domain::{FilterFlag, FlagValue, Nickname};

    use crate::infrastructure::ports::MockPokemonRepo;
    use crate::test_fixtures::{catalog, pokemon, store_with, ScriptedChat, CHANNEL, USER};

    fn use_case(
        repo: Arc<dyn PokemonRepo>,
        chat: Arc<ScriptedChat>,
    ) -> ListPokemon {
        let catalog = catalog();
        ListPokemon::new(
            repo,
            catalog.clone(),
            chat,
            Arc::new(FilterCompiler::new(catalog)),
            20,
            Duration::from_secs(120),
        )
    }

    fn member() -> Member {
        Member::with_starter(USER)
    }

    #[tokio::test]
    async fn mythical_level_filter_finds_single_entry() {
        let store = store_with(vec![
            pokemon(1, 1, 10),
            pokemon(2, 151, 20).with_level(50),
            pokemon(3, 251, 20).with_level(10),
            pokemon(4, 144, 20).with_level(50),
        ])
        .await;
        let chat = Arc::new(ScriptedChat::new(Vec::<&str>::new()));
        let request = ListRequest {
            page: 1,
            flags: FilterFlags::new()
                .with_switch(FilterFlag::Mythical)
                .with(FilterFlag::Level, FlagValue::Integer(50)),
        };

        let reply = use_case(store, chat.clone())
            .execute(&member(), CHANNEL, request)
            .await
            .unwrap();

        assert_eq!(reply, Reply::Done);
        let sent = chat.sent();
        assert_eq!(sent.len(), 1);
        let embed = sent[0].as_embed().unwrap();
        assert_eq!(
            embed.description.as_deref(),
            Some("**Mew** | Level: 50 | Number: 2 | IV: 64.52%")
        );
        assert_eq!(embed.footer.as_deref(), Some("Showing 1–1 out of 1."));
    }

    #[tokio::test]
    async fn rows_mark_favorites_and_nicknames() {
        let store = store_with(vec![pokemon(1, 25, 31)
            .with_favorite(true)
            .with_nickname(Some(Nickname::new("Sparky").unwrap()))])
        .await;
        let chat = Arc::new(ScriptedChat::new(Vec::<&str>::new()));

        use_case(store, chat.clone())
            .execute(&member(), CHANNEL, ListRequest::default())
            .await
            .unwrap();

        let embed = chat.sent()[0].as_embed().cloned().unwrap();
        assert_eq!(
            embed.description.as_deref(),
            Some("**❤️ Pikachu \"Sparky\"** | Level: 1 | Number: 1 | IV: 100.00%")
        );
    }

    #[tokio::test]
    async fn pages_hold_twenty_entries() {
        let entries = (1..=45).map(|n| pokemon(n, 25, 10)).collect();
        let store = store_with(entries).await;
        let chat = Arc::new(ScriptedChat::new(["next", "stop"]));

        use_case(store, chat.clone())
            .execute(&member(), CHANNEL, ListRequest { page: 2, ..Default::default() })
            .await
            .unwrap();

        let first = chat.sent()[0].as_embed().cloned().unwrap();
        assert_eq!(first.footer.as_deref(), Some("Showing 21–40 out of 45."));
        assert!(first.navigation);
        let last = chat.edits()[0].as_embed().cloned().unwrap();
        assert_eq!(last.footer.as_deref(), Some("Showing 41–45 out of 45."));
        assert_eq!(last.description.unwrap().lines().count(), 5);
    }

    #[tokio::test]
    async fn when_page_not_positive_returns_error() {
        let chat = Arc::new(ScriptedChat::new(Vec::<&str>::new()));
        let repo = MockPokemonRepo::new();

        let result = use_case(Arc::new(repo), chat.clone())
            .execute(&member(), CHANNEL, ListRequest { page: 0, ..Default::default() })
            .await;

        assert!(matches!(result, Err(CollectionError::NonPositivePage)));
        assert!(chat.events().is_empty());
    }

    #[tokio::test]
    async fn when_nothing_matches_returns_no_matches() {
        let mut repo = MockPokemonRepo::new();
        repo.expect_count().returning(|_, _| Ok(0));
        repo.expect_fetch_page().never();
        let chat = Arc::new(ScriptedChat::new(Vec::<&str>::new()));

        let result = use_case(Arc::new(repo), chat)
            .execute(&member(), CHANNEL, ListRequest::default())
            .await;

        assert!(matches!(result, Err(CollectionError::NoMatches)));
    }

    #[tokio::test]
    async fn when_name_unknown_no_query_runs() {
        let mut repo = MockPokemonRepo::new();
        repo.expect_count().never();
        let chat = Arc::new(ScriptedChat::new(Vec::<&str>::new()));
        let request = ListRequest {
            page: 1,
            flags: FilterFlags::new().with(FilterFlag::Name, FlagValue::Text("Agumon".into())),
        };

        let result = use_case(Arc::new(repo), chat)
            .execute(&member(), CHANNEL, request)
            .await;

        assert!(matches!(result, Err(CollectionError::Filter(_))));
    }

    #[tokio::test]
    async fn entries_released_after_count_show_empty_page() {
        let mut repo = MockPokemonRepo::new();
        repo.expect_count().returning(|_, _| Ok(3));
        repo.expect_fetch_page().returning(|_, _, _, _| Ok(Vec::new()));
        let chat = Arc::new(ScriptedChat::new(Vec::<&str>::new()));

        use_case(Arc::new(repo), chat.clone())
            .execute(&member(), CHANNEL, ListRequest::default())
            .await
            .unwrap();

        assert_eq!(chat.sent_texts(), vec![EMPTY_PAGE.to_string()]);
        assert_eq!(chat.waits(), 0);
    }
}
