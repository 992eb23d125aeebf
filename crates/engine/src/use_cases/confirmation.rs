//! Confirmation prompts for destructive actions.

use std::sync::Arc;
use std::time::Duration;

use pokebot_domain::{ChannelId, UserId};

use crate::infrastructure::ports::{ChatError, ChatPort, OutgoingMessage};

/// The reply a prompt is waiting for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfirmationToken {
    /// `y`, case-insensitive
    Yes,
    /// An exact phrase, character for character
    Exact(String),
}

impl ConfirmationToken {
    /// Phrase binding a bulk release to the count that was shown.
    pub fn release_count(count: u64) -> Self {
        Self::Exact(format!("confirm release {}", count))
    }

    pub fn accepts(&self, reply: &str) -> bool {
        match self {
            Self::Yes => reply.trim().eq_ignore_ascii_case("y"),
            Self::Exact(phrase) => reply == phrase,
        }
    }

    pub fn phrase(&self) -> &str {
        match self {
            Self::Yes => "y",
            Self::Exact(phrase) => phrase,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmationOutcome {
    Confirmed,
    Declined,
    TimedOut,
}

/// Sends a prompt and waits a bounded time for the user's answer.
pub struct ConfirmationGate {
    chat: Arc<dyn ChatPort>,
    timeout: Duration,
}

impl ConfirmationGate {
    pub fn new(chat: Arc<dyn ChatPort>, timeout: Duration) -> Self {
        Self { chat, timeout }
    }

    /// Only the first reply from `user` in `channel` counts.
    pub async fn request(
        &self,
        user: UserId,
        channel: ChannelId,
        prompt: impl Into<String>,
        token: &ConfirmationToken,
    ) -> Result<ConfirmationOutcome, ChatError> {
        self.chat.send(channel, OutgoingMessage::text(prompt)).await?;

        let outcome = match self.chat.await_next_message(user, channel, self.timeout).await? {
            None => ConfirmationOutcome::TimedOut,
            Some(reply) if token.accepts(&reply) => ConfirmationOutcome::Confirmed,
            Some(_) => ConfirmationOutcome::Declined,
        };
        tracing::debug!(user_id = %user, token = token.phrase(), ?outcome, "Confirmation answered");
        Ok(outcome)
    }
}
