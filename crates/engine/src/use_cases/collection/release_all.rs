//! Bulk release behind a count-bound confirmation.

use std::sync::Arc;

use pokebot_domain::{ChannelId, FilterFlags, FilterStage, Member, PokemonNumber};

use crate::infrastructure::ports::{ChatPort, OutgoingMessage, PokemonRepo};
use crate::use_cases::confirmation::{ConfirmationGate, ConfirmationOutcome, ConfirmationToken};
use crate::use_cases::filter::FilterCompiler;

use super::release::{ABORTED, TIMED_OUT};
use super::{CollectionError, Reply};

/// Release-all use case.
///
/// The selected entry and favorites are filtered out of both the count that
/// is shown and the set that is removed.
pub struct ReleaseAll {
    pokemon_repo: Arc<dyn PokemonRepo>,
    chat: Arc<dyn ChatPort>,
    compiler: Arc<FilterCompiler>,
    gate: Arc<ConfirmationGate>,
}

impl ReleaseAll {
    pub fn new(
        pokemon_repo: Arc<dyn PokemonRepo>,
        chat: Arc<dyn ChatPort>,
        compiler: Arc<FilterCompiler>,
        gate: Arc<ConfirmationGate>,
    ) -> Self {
        Self {
            pokemon_repo,
            chat,
            compiler,
            gate,
        }
    }

    pub async fn execute(
        &self,
        member: &Member,
        channel: ChannelId,
        flags: &FilterFlags,
    ) -> Result<Reply, CollectionError> {
        let mut stages = self.compiler.compile(flags)?;
        stages.push(FilterStage::exclude_number(member.selected));
        stages.push(FilterStage::exclude_favorites());

        let count = self.pokemon_repo.count(member.id, &stages).await?;
        if count == 0 {
            return Err(CollectionError::NoReleasableMatches);
        }

        let token = ConfirmationToken::release_count(count);
        let prompt = format!(
            "Are you sure you want to release {} pokémon? Favorited and selected pokémon won't be removed. Type `{}` to confirm.",
            count,
            token.phrase()
        );
        match self.gate.request(member.id, channel, prompt, &token).await? {
            ConfirmationOutcome::Confirmed => {}
            ConfirmationOutcome::Declined => {
                tracing::info!(user_id = %member.id, count, "Bulk release declined");
                return Ok(Reply::text(ABORTED));
            }
            ConfirmationOutcome::TimedOut => return Ok(Reply::text(TIMED_OUT)),
        }

        self.chat
            .send(
                channel,
                OutgoingMessage::text(format!(
                    "Releasing {} pokémon, this might take a while...",
                    count
                )),
            )
            .await?;

        let numbers: Vec<PokemonNumber> = self
            .pokemon_repo
            .fetch_page(member.id, &stages, 0, count)
            .await?
            .into_iter()
            .map(|p| p.number)
            .collect();
        let released = self.pokemon_repo.release(member.id, &numbers).await?;
        tracing::info!(user_id = %member.id, confirmed = count, released, "Bulk release finished");

        Ok(Reply::text(format!("You have released {} pokémon.", released)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use pokebot_domain::{FilterFlag, FlagValue};

    use crate::infrastructure::ports::MockPokemonRepo;
    use crate::test_fixtures::{catalog, pokemon, store_with, ScriptedChat, CHANNEL, USER};

    fn use_case(repo: Arc<dyn PokemonRepo>, chat: Arc<ScriptedChat>) -> ReleaseAll {
        ReleaseAll::new(
            repo,
            chat.clone(),
            Arc::new(FilterCompiler::new(catalog())),
            Arc::new(ConfirmationGate::new(chat, Duration::from_secs(15))),
        )
    }

    fn pikachu_flags() -> FilterFlags {
        FilterFlags::new().with(FilterFlag::Name, FlagValue::Text("pikachu".into()))
    }

    #[tokio::test]
    async fn favorites_and_selected_are_never_released() {
        let store = store_with(vec![
            pokemon(1, 25, 10),
            pokemon(2, 25, 10).with_favorite(true),
            pokemon(3, 25, 10),
            pokemon(4, 1, 10),
        ])
        .await;
        let chat = Arc::new(ScriptedChat::new(["confirm release 1"]));

        let reply = use_case(store.clone(), chat.clone())
            .execute(&Member::with_starter(USER), CHANNEL, &pikachu_flags())
            .await
            .unwrap();

        assert_eq!(reply, Reply::text("You have released 1 pokémon."));
        let texts = chat.sent_texts();
        assert!(texts[0].contains("release 1 pokémon?"));
        assert!(texts[0].contains("`confirm release 1`"));
        let remaining: Vec<u64> = store
            .fetch_page(USER, &[], 0, 10)
            .await
            .unwrap()
            .iter()
            .map(|p| p.number.get())
            .collect();
        assert_eq!(remaining, vec![1, 2, 4]);
    }

    #[tokio::test]
    async fn stale_confirmation_aborts_without_changes() {
        let store = store_with(vec![pokemon(1, 1, 10), pokemon(2, 25, 10), pokemon(3, 25, 10)]).await;
        let chat = Arc::new(ScriptedChat::new(["confirm release 1"]));

        let reply = use_case(store.clone(), chat.clone())
            .execute(&Member::with_starter(USER), CHANNEL, &FilterFlags::new())
            .await
            .unwrap();

        assert_eq!(reply, Reply::text(ABORTED));
        assert_eq!(store.count(USER, &[]).await.unwrap(), 3);
    }

    #[tokio::test]
    async fn when_only_protected_entries_match_returns_error() {
        let store = store_with(vec![pokemon(1, 25, 10), pokemon(2, 25, 10).with_favorite(true)]).await;
        let chat = Arc::new(ScriptedChat::new(Vec::<&str>::new()));

        let result = use_case(store, chat.clone())
            .execute(&Member::with_starter(USER), CHANNEL, &pikachu_flags())
            .await;

        assert!(matches!(result, Err(CollectionError::NoReleasableMatches)));
        assert!(chat.events().is_empty());
    }

    #[tokio::test]
    async fn timeout_releases_nothing() {
        let mut repo = MockPokemonRepo::new();
        repo.expect_count().returning(|_, _| Ok(4));
        repo.expect_fetch_page().never();
        repo.expect_release().never();
        let chat = Arc::new(ScriptedChat::new(Vec::<&str>::new()));

        let reply = use_case(Arc::new(repo), chat)
            .execute(&Member::with_starter(USER), CHANNEL, &FilterFlags::new())
            .await
            .unwrap();

        assert_eq!(reply, Reply::text(TIMED_OUT));
    }

    #[tokio::test]
    async fn pipeline_excludes_protected_entries() {
        let mut repo = MockPokemonRepo::new();
        repo.expect_count()
            .withf(|_, stages| {
                stages.ends_with(&[
                    FilterStage::exclude_number(PokemonNumber::new(1)),
                    FilterStage::exclude_favorites(),
                ])
            })
            .returning(|_, _| Ok(0));
        let chat = Arc::new(ScriptedChat::new(Vec::<&str>::new()));

        let result = use_case(Arc::new(repo), chat)
            .execute(&Member::with_starter(USER), CHANNEL, &FilterFlags::new())
            .await;

        assert!(matches!(result, Err(CollectionError::NoReleasableMatches)));
    }
}
