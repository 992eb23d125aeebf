//! Command routing.
//!
//! Turns one incoming chat message into at most one command invocation and
//! sends whatever the use case leaves to say.

use std::sync::Arc;

use pokebot_domain::Member;

use crate::app::App;
use crate::infrastructure::ports::{ChatError, IncomingMessage, OutgoingMessage};
use crate::use_cases::collection::{CollectionError, Reply};

use super::args::{parse_command, Command};
use super::error_sanitizer::sanitize_error;

pub struct CommandRouter {
    app: Arc<App>,
}

impl CommandRouter {
    pub fn new(app: Arc<App>) -> Self {
        Self { app }
    }

    /// Handle one message. Only chat failures while replying are returned.
    pub async fn handle(&self, message: &IncomingMessage) -> Result<(), ChatError> {
        let Some(parsed) = parse_command(&self.app.settings.prefix, &message.content) else {
            return Ok(());
        };
        let command = match parsed {
            Ok(command) => command,
            Err(e) => {
                tracing::debug!(user_id = %message.user, error = %e, "Rejected command arguments");
                return self.reply(message, OutgoingMessage::text(e.to_string())).await;
            }
        };

        let name = command.name();
        tracing::info!(user_id = %message.user, channel_id = %message.channel, command = name, "Handling command");

        let reply = match self.dispatch(message, command).await {
            Ok(Reply::Send(out)) => Some(out),
            Ok(Reply::Done) => None,
            Err(e) if e.is_user_facing() => {
                tracing::debug!(user_id = %message.user, command = name, error = %e, "Command declined");
                Some(OutgoingMessage::text(e.to_string()))
            }
            Err(e) => Some(OutgoingMessage::text(sanitize_error(&e, name))),
        };

        match reply {
            Some(out) => self.reply(message, out).await,
            None => Ok(()),
        }
    }

    async fn dispatch(
        &self,
        message: &IncomingMessage,
        command: Command,
    ) -> Result<Reply, CollectionError> {
        let collection = &self.app.use_cases.collection;
        let channel = message.channel;

        let member = match &command {
            Command::Start => return Ok(collection.starters.execute()),
            Command::Pick(name) => return collection.pick.execute(message.user, name).await,
            _ => self.started_member(message).await?,
        };
        let member = &member;

        match command {
            // Handled before the started check.
            Command::Start | Command::Pick(_) => Ok(Reply::Done),
            Command::Redeem(species) => collection.redeem.execute(member, species.as_deref()).await,
            Command::Nickname(text) => collection.nickname.execute(member, &text).await,
            Command::Favorite(selector) => collection.favorite.execute(member, selector).await,
            Command::Unfavorite => Ok(Reply::text(format!(
                "This command has been removed. Instead, use `{}favorite`, which will toggle favorite on a pokémon.",
                self.app.settings.prefix
            ))),
            Command::Info(selector) => collection.info.execute(member, channel, selector).await,
            Command::Select(selector) => collection.select.execute(member, selector).await,
            Command::Order(text) => collection.order.execute(member, &text).await,
            Command::Release(selector) => {
                collection.release.execute(member, channel, selector).await
            }
            Command::ReleaseAll(flags) => {
                collection.release_all.execute(member, channel, &flags).await
            }
            Command::Pokemon(request) => collection.list.execute(member, channel, request).await,
        }
    }

    async fn started_member(&self, message: &IncomingMessage) -> Result<Member, CollectionError> {
        self.app
            .repositories
            .member
            .get(message.user)
            .await?
            .ok_or_else(|| CollectionError::NotStarted {
                prefix: self.app.settings.prefix.clone(),
            })
    }

    async fn reply(&self, message: &IncomingMessage, out: OutgoingMessage) -> Result<(), ChatError> {
        self.app.chat.send(message.channel, out).await.map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use pokebot_domain::SortOrder;

    use crate::infrastructure::console::ConsoleChat;
    use crate::infrastructure::in_memory::InMemoryStore;
    use crate::infrastructure::ports::{MemberRepo, MockMemberRepo, PokemonRepo, RepoError};
    use crate::infrastructure::random::FixedRandom;
    use crate::infrastructure::settings::BotSettings;
    use crate::test_fixtures::{catalog, pokemon, store_with, ScriptedChat, CHANNEL, USER};

    fn settings() -> BotSettings {
        BotSettings {
            confirm_timeout: Duration::from_millis(50),
            pagination_timeout: Duration::from_millis(50),
            ..BotSettings::default()
        }
    }

    fn router(store: Arc<InMemoryStore>, chat: Arc<ScriptedChat>) -> CommandRouter {
        let app = App::new(
            store.clone(),
            store,
            catalog(),
            chat,
            Arc::new(FixedRandom(15)),
            settings(),
        );
        CommandRouter::new(Arc::new(app))
    }

    fn incoming(content: &str) -> IncomingMessage {
        IncomingMessage {
            user: USER,
            channel: CHANNEL,
            content: content.to_string(),
        }
    }

    #[tokio::test]
    async fn commands_before_start_get_a_hint() {
        let store = Arc::new(InMemoryStore::new());
        let chat = Arc::new(ScriptedChat::new(Vec::<&str>::new()));

        router(store, chat.clone())
            .handle(&incoming("p!pokemon"))
            .await
            .unwrap();

        assert_eq!(
            chat.sent_texts(),
            vec!["Please pick a starter pokémon by typing `p!start` before using this command!".to_string()]
        );
    }

    #[tokio::test]
    async fn pick_then_list() {
        let store = Arc::new(InMemoryStore::new());
        let chat = Arc::new(ScriptedChat::new(Vec::<&str>::new()));
        let router = router(store.clone(), chat.clone());

        router.handle(&incoming("p!pick charmander")).await.unwrap();
        router.handle(&incoming("p!pokemon")).await.unwrap();

        let sent = chat.sent();
        assert!(sent[0].as_text().unwrap().starts_with("Congratulations"));
        let listing = sent[1].as_embed().unwrap();
        assert_eq!(
            listing.description.as_deref(),
            Some("**Charmander** | Level: 1 | Number: 1 | IV: 48.39%")
        );
    }

    #[tokio::test]
    async fn other_text_is_ignored() {
        let store = Arc::new(InMemoryStore::new());
        let chat = Arc::new(ScriptedChat::new(Vec::<&str>::new()));

        router(store, chat.clone()).handle(&incoming("hello")).await.unwrap();

        assert!(chat.events().is_empty());
    }

    #[tokio::test]
    async fn argument_errors_are_reported() {
        let store = store_with(vec![pokemon(1, 1, 10)]).await;
        let chat = Arc::new(ScriptedChat::new(Vec::<&str>::new()));

        router(store, chat.clone())
            .handle(&incoming("p!pokemon --iv >x"))
            .await
            .unwrap();

        assert_eq!(chat.sent_texts(), vec!["Couldn't parse `--iv >x`".to_string()]);
    }

    #[tokio::test]
    async fn release_all_flow_end_to_end() {
        let store = store_with(vec![
            pokemon(1, 25, 10),
            pokemon(2, 25, 10),
            pokemon(3, 25, 10).with_favorite(true),
            pokemon(4, 4, 10),
        ])
        .await;
        let chat = Arc::new(ScriptedChat::new(["confirm release 1"]));

        router(store.clone(), chat.clone())
            .handle(&incoming("p!releaseall --name pikachu"))
            .await
            .unwrap();

        assert_eq!(
            chat.sent_texts().last().map(String::as_str),
            Some("You have released 1 pokémon.")
        );
        assert_eq!(store.count(USER, &[]).await.unwrap(), 3);
    }

    #[tokio::test]
    async fn command_typed_during_listing_runs_alongside_it() {
        let store = store_with((1..=45).map(|n| pokemon(n, 25, 10)).collect()).await;
        let console = Arc::new(ConsoleChat::new("p!"));
        let app = App::new(
            store.clone(),
            store.clone(),
            catalog(),
            console.clone(),
            Arc::new(FixedRandom(15)),
            BotSettings {
                pagination_timeout: Duration::from_secs(5),
                ..settings()
            },
        );
        let router = Arc::new(CommandRouter::new(Arc::new(app)));

        console.deliver(incoming("p!pokemon")).await;
        let listing = {
            let router = router.clone();
            let message = console.next_incoming().await.unwrap();
            tokio::spawn(async move { router.handle(&message).await })
        };
        while console.waiting().await == 0 {
            tokio::task::yield_now().await;
        }

        console.deliver(incoming("p!order level")).await;
        let order = console.next_incoming().await.unwrap();
        router.handle(&order).await.unwrap();

        let member = MemberRepo::get(store.as_ref(), USER).await.unwrap().unwrap();
        assert_eq!(member.order_by, SortOrder::Level);
        assert_eq!(console.waiting().await, 1);

        console.deliver(incoming("stop")).await;
        listing.await.unwrap().unwrap();
        assert_eq!(console.waiting().await, 0);
    }

    #[tokio::test]
    async fn store_failures_are_sanitized() {
        let mut members = MockMemberRepo::new();
        members
            .expect_get()
            .returning(|_| Err(RepoError::database("get_member", "socket closed")));
        let store = Arc::new(InMemoryStore::new());
        let chat = Arc::new(ScriptedChat::new(Vec::<&str>::new()));
        let app = App::new(
            Arc::new(members),
            store,
            catalog(),
            chat.clone(),
            Arc::new(FixedRandom(15)),
            settings(),
        );

        CommandRouter::new(Arc::new(app))
            .handle(&incoming("p!info"))
            .await
            .unwrap();

        assert_eq!(
            chat.sent_texts(),
            vec!["Something went wrong while running `info`. Please try again.".to_string()]
        );
    }
}
