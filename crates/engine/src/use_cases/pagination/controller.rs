//! Interactive paged display.
//!
//! Sends the first page, then waits for navigation messages from the invoking
//! user and edits the message in place. Pages are produced lazily, one per
//! displayed index.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use pokebot_domain::{ChannelId, UserId};

use crate::infrastructure::ports::{ChatError, ChatPort, OutgoingMessage, RepoError};

use super::state::{Direction, NavInput, PageState};

/// What a page source produced for one index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageContent {
    Page(OutgoingMessage),
    /// The page exists by count but its fetch came back empty.
    Empty(String),
}

/// Produces the content of a single page on demand.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PageSource: Send + Sync {
    async fn page(&self, index: usize) -> Result<PageContent, RepoError>;
}

#[derive(Debug, thiserror::Error)]
pub enum PaginationError {
    #[error("Repository error: {0}")]
    Repo(#[from] RepoError),
    #[error("Chat error: {0}")]
    Chat(#[from] ChatError),
}

/// Drives one paged session for a single user in a single channel.
pub struct PageController {
    chat: Arc<dyn ChatPort>,
    source: Box<dyn PageSource>,
    total_pages: usize,
    user: UserId,
    channel: ChannelId,
    idle_timeout: Duration,
}

impl PageController {
    pub fn new(
        chat: Arc<dyn ChatPort>,
        source: Box<dyn PageSource>,
        total_pages: usize,
        user: UserId,
        channel: ChannelId,
        idle_timeout: Duration,
    ) -> Self {
        Self {
            chat,
            source,
            total_pages,
            user,
            channel,
            idle_timeout,
        }
    }

    /// Run the session starting at `initial_page` (clamped).
    ///
    /// Returns the final state once the user stops or the idle timeout
    /// elapses. A single page, empty or not, is sent without controls and
    /// the session ends immediately.
    pub async fn run(&self, initial_page: i64) -> Result<PageState, PaginationError> {
        let mut state = PageState::new(self.total_pages, initial_page);
        let (message, empty) = self.render(state.index()).await?;

        if state.total_pages() == 1 {
            self.chat.send(self.channel, message).await?;
            return Ok(state.apply(NavInput::Stop));
        }

        let handle = self.chat.send(self.channel, message).await?;
        if empty {
            state = state.mark_empty(Direction::Forward);
        }

        loop {
            let reply = self
                .chat
                .await_next_message(self.user, self.channel, self.idle_timeout)
                .await?;
            let input = match reply {
                None => NavInput::Timeout,
                Some(text) => match NavInput::parse(&text) {
                    Some(input) => input,
                    None => continue,
                },
            };

            let next = state.apply(input);
            if next.is_terminated() {
                self.chat.remove_controls(handle).await?;
                tracing::debug!(
                    user_id = %self.user,
                    page = next.index(),
                    reason = ?input,
                    "Pagination session ended"
                );
                return Ok(next);
            }

            let Some(direction) = next.moved_from(&state) else {
                state = next;
                continue;
            };

            let (message, empty) = self.render(next.index()).await?;
            self.chat.edit(handle, message).await?;
            state = if empty {
                next.mark_empty(direction)
            } else {
                next.mark_rendered()
            };
        }
    }

    async fn render(&self, index: usize) -> Result<(OutgoingMessage, bool), RepoError> {
        let content = self.source.page(index).await?;
        let rendered = match content {
            PageContent::Page(OutgoingMessage::Embed(embed)) => {
                (embed.with_navigation(self.total_pages > 1).into(), false)
            }
            PageContent::Page(message) => (message, false),
            PageContent::Empty(text) => {
                tracing::debug!(page = index, "Page producer returned no content");
                (OutgoingMessage::Text(text), true)
            }
        };
        Ok(rendered)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::ports::Embed;
    use crate::test_fixtures::{ChatEvent, ScriptedChat};

    fn page(index: usize) -> PageContent {
        PageContent::Page(Embed::new(format!("page {}", index + 1)).into())
    }

    fn controller(chat: Arc<ScriptedChat>, source: MockPageSource, total: usize) -> PageController {
        PageController::new(
            chat,
            Box::new(source),
            total,
            UserId::new(1),
            ChannelId::new(10),
            Duration::from_secs(5),
        )
    }

    #[tokio::test]
    async fn when_initial_page_out_of_range_starts_on_last_page() {
        let chat = Arc::new(ScriptedChat::new(["stop"]));
        let mut source = MockPageSource::new();
        source
            .expect_page()
            .withf(|index| *index == 2)
            .times(1)
            .returning(|index| Ok(page(index)));

        let state = controller(chat.clone(), source, 3).run(99).await.unwrap();

        assert_eq!(state.index(), 2);
        assert!(state.is_terminated());
        let sent = chat.sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].as_embed().unwrap().title, "page 3");
        assert!(sent[0].as_embed().unwrap().navigation);
    }

    #[tokio::test]
    async fn navigation_edits_in_place_and_ignores_chatter() {
        let chat = Arc::new(ScriptedChat::new(["next", "hello there", "last", "next", "stop"]));
        let mut source = MockPageSource::new();
        source.expect_page().times(3).returning(|index| Ok(page(index)));

        let state = controller(chat.clone(), source, 4).run(0).await.unwrap();

        assert_eq!(state.index(), 3);
        let titles: Vec<String> = chat
            .edits()
            .iter()
            .map(|m| m.as_embed().unwrap().title.clone())
            .collect();
        assert_eq!(titles, vec!["page 2", "page 4"]);
    }

    #[tokio::test]
    async fn timeout_removes_controls_without_editing() {
        let chat = Arc::new(ScriptedChat::new(Vec::<&str>::new()));
        let mut source = MockPageSource::new();
        source.expect_page().times(1).returning(|index| Ok(page(index)));

        let state = controller(chat.clone(), source, 2).run(0).await.unwrap();

        assert!(state.is_terminated());
        assert!(chat.edits().is_empty());
        assert!(chat
            .events()
            .iter()
            .any(|e| matches!(e, ChatEvent::ControlsRemoved(_))));
    }

    #[tokio::test]
    async fn empty_page_blocks_further_forward_moves() {
        let chat = Arc::new(ScriptedChat::new(["next", "next", "last", "prev", "stop"]));
        let mut source = MockPageSource::new();
        source.expect_page().times(3).returning(|index| {
            if index == 1 {
                Ok(PageContent::Empty("There are no pokémon on this page!".into()))
            } else {
                Ok(page(index))
            }
        });

        let state = controller(chat.clone(), source, 5).run(0).await.unwrap();

        assert_eq!(state.index(), 0);
        let edits = chat.edits();
        assert_eq!(edits.len(), 2);
        assert_eq!(edits[0].as_text(), Some("There are no pokémon on this page!"));
        assert_eq!(edits[1].as_embed().unwrap().title, "page 1");
    }

    #[tokio::test]
    async fn single_page_is_sent_without_controls() {
        let chat = Arc::new(ScriptedChat::new(Vec::<&str>::new()));
        let mut source = MockPageSource::new();
        source.expect_page().times(1).returning(|index| Ok(page(index)));

        let state = controller(chat.clone(), source, 1).run(0).await.unwrap();

        assert!(state.is_terminated());
        assert!(!chat.sent()[0].as_embed().unwrap().navigation);
        assert_eq!(chat.waits(), 0);
    }

    #[tokio::test]
    async fn single_empty_page_ends_without_waiting() {
        let chat = Arc::new(ScriptedChat::new(["next"]));
        let mut source = MockPageSource::new();
        source
            .expect_page()
            .times(1)
            .returning(|_| Ok(PageContent::Empty("There are no pokémon on this page!".into())));

        let state = controller(chat.clone(), source, 1).run(0).await.unwrap();

        assert!(state.is_terminated());
        assert_eq!(chat.sent_texts(), vec!["There are no pokémon on this page!".to_string()]);
        assert_eq!(chat.waits(), 0);
        assert!(!chat
            .events()
            .iter()
            .any(|e| matches!(e, ChatEvent::ControlsRemoved(_))));
    }

    #[tokio::test]
    async fn when_source_fails_returns_repo_error() {
        let chat = Arc::new(ScriptedChat::new(Vec::<&str>::new()));
        let mut source = MockPageSource::new();
        source
            .expect_page()
            .returning(|_| Err(RepoError::database("fetch", "connection reset")));

        let result = controller(chat.clone(), source, 2).run(0).await;

        assert!(matches!(result, Err(PaginationError::Repo(_))));
        assert!(chat.sent().is_empty());
    }
}
