//! Console chat adapter.
//!
//! Lines typed on stdin become messages from the configured user and
//! channel; everything the bot sends is rendered to stdout as text.
//!
//! Prefixed lines are commands and always reach the router, even while a
//! paged or confirmation session is open. Any other line answers the newest
//! session waiting on that user and channel, or is dropped.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::{mpsc, oneshot, Mutex};

use pokebot_domain::{ChannelId, UserId};

use crate::infrastructure::ports::{
    ChatError, ChatPort, Embed, IncomingMessage, MessageHandle, OutgoingMessage,
};

/// A session blocked in `await_next_message`.
struct Waiter {
    id: u64,
    user: UserId,
    channel: ChannelId,
    reply: oneshot::Sender<String>,
}

#[derive(Default)]
struct Waiters {
    pending: Vec<Waiter>,
    closed: bool,
}

pub struct ConsoleChat {
    prefix: String,
    commands_tx: Mutex<Option<mpsc::Sender<IncomingMessage>>>,
    commands: Mutex<mpsc::Receiver<IncomingMessage>>,
    waiters: Mutex<Waiters>,
    next_id: AtomicU64,
    next_waiter: AtomicU64,
}

impl ConsoleChat {
    pub fn new(prefix: impl Into<String>) -> Self {
        let (tx, rx) = mpsc::channel(64);
        Self {
            prefix: prefix.into(),
            commands_tx: Mutex::new(Some(tx)),
            commands: Mutex::new(rx),
            waiters: Mutex::new(Waiters::default()),
            next_id: AtomicU64::new(1),
            next_waiter: AtomicU64::new(1),
        }
    }

    /// Spawn a stdin reader attributing every line to `user` in `channel`.
    pub fn spawn_stdin(prefix: impl Into<String>, user: UserId, channel: ChannelId) -> Arc<Self> {
        let chat = Arc::new(Self::new(prefix));
        let reader = chat.clone();
        tokio::spawn(async move {
            let mut lines = BufReader::new(tokio::io::stdin()).lines();
            loop {
                match lines.next_line().await {
                    Ok(Some(content)) => {
                        reader
                            .deliver(IncomingMessage {
                                user,
                                channel,
                                content,
                            })
                            .await;
                    }
                    Ok(None) => break,
                    Err(e) => {
                        tracing::warn!(error = %e, "Failed to read stdin");
                        break;
                    }
                }
            }
            reader.close().await;
        });
        chat
    }

    /// Route one incoming message to the command queue or a waiting session.
    pub async fn deliver(&self, message: IncomingMessage) {
        if message.content.trim_start().starts_with(&self.prefix) {
            let sender = self.commands_tx.lock().await.clone();
            match sender {
                Some(tx) if tx.send(message).await.is_ok() => {}
                _ => tracing::debug!("Command arrived after input closed"),
            }
            return;
        }

        let mut waiters = self.waiters.lock().await;
        let position = waiters
            .pending
            .iter()
            .rposition(|w| w.user == message.user && w.channel == message.channel);
        let Some(position) = position else {
            tracing::debug!(
                user_id = %message.user,
                channel_id = %message.channel,
                "Dropped message with no waiting session"
            );
            return;
        };
        let waiter = waiters.pending.remove(position);
        if waiter.reply.send(message.content).is_err() {
            tracing::debug!(user_id = %message.user, "Session stopped waiting before the reply");
        }
    }

    /// Stop taking input. Open waits fail with `ChatError::Closed` and
    /// `next_incoming` returns `None` once queued commands are drained.
    pub async fn close(&self) {
        self.commands_tx.lock().await.take();
        let mut waiters = self.waiters.lock().await;
        waiters.closed = true;
        waiters.pending.clear();
    }

    /// Next command message; `None` once input is closed.
    pub async fn next_incoming(&self) -> Option<IncomingMessage> {
        self.commands.lock().await.recv().await
    }

    #[cfg(test)]
    pub(crate) async fn waiting(&self) -> usize {
        self.waiters.lock().await.pending.len()
    }
}

#[async_trait]
impl ChatPort for ConsoleChat {
    async fn send(
        &self,
        channel: ChannelId,
        message: OutgoingMessage,
    ) -> Result<MessageHandle, ChatError> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        println!("{}", render(&message));
        Ok(MessageHandle { channel, id })
    }

    async fn edit(&self, handle: MessageHandle, message: OutgoingMessage) -> Result<(), ChatError> {
        println!("[message {} edited]\n{}", handle.id, render(&message));
        Ok(())
    }

    async fn remove_controls(&self, handle: MessageHandle) -> Result<(), ChatError> {
        println!("[navigation closed on message {}]", handle.id);
        Ok(())
    }

    async fn await_next_message(
        &self,
        user: UserId,
        channel: ChannelId,
        timeout: Duration,
    ) -> Result<Option<String>, ChatError> {
        let id = self.next_waiter.fetch_add(1, Ordering::Relaxed);
        let (reply, rx) = oneshot::channel();
        {
            let mut waiters = self.waiters.lock().await;
            if waiters.closed {
                return Err(ChatError::Closed);
            }
            waiters.pending.push(Waiter {
                id,
                user,
                channel,
                reply,
            });
        }

        match tokio::time::timeout(timeout, rx).await {
            Ok(Ok(content)) => Ok(Some(content)),
            Ok(Err(_)) => Err(ChatError::Closed),
            Err(_) => {
                self.waiters.lock().await.pending.retain(|w| w.id != id);
                Ok(None)
            }
        }
    }
}

/// Plain-text rendering of an outgoing message.
pub fn render(message: &OutgoingMessage) -> String {
    match message {
        OutgoingMessage::Text(text) => text.clone(),
        OutgoingMessage::Embed(embed) => render_embed(embed),
    }
}

fn render_embed(embed: &Embed) -> String {
    let mut out = format!("== {} ==", embed.title);
    if let Some(description) = &embed.description {
        out.push('\n');
        out.push_str(description);
    }
    for field in &embed.fields {
        out.push_str(&format!("\n-- {} --\n{}", field.name, field.value));
    }
    if let Some(image) = &embed.image_url {
        out.push_str(&format!("\n[image: {}]", image));
    }
    if let Some(footer) = &embed.footer {
        out.push_str(&format!("\n{}", footer));
    }
    if embed.navigation {
        out.push_str("\n[first | prev | next | last | page N | stop]");
    }
    out
}
