//! Shared test helpers.
//!
//! A chat fake that replays scripted replies and records everything the bot
//! sends, plus builders for catalog, store and collection entries.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use pokebot_domain::{
    ChannelId, Ivs, Member, Nature, Pokemon, PokemonNumber, SpeciesId, UserId,
};

use crate::infrastructure::catalog::GameData;
use crate::infrastructure::in_memory::InMemoryStore;
use crate::infrastructure::ports::{
    ChatError, ChatPort, MemberRepo, MessageHandle, OutgoingMessage, PokemonRepo,
};

pub const USER: UserId = UserId::new(100);
pub const CHANNEL: ChannelId = ChannelId::new(200);

// =============================================================================
// Scripted Chat
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatEvent {
    Sent(MessageHandle, OutgoingMessage),
    Edited(MessageHandle, OutgoingMessage),
    ControlsRemoved(MessageHandle),
    Waited { user: UserId, channel: ChannelId },
}

/// Replays replies in order; once they run out every wait times out.
pub struct ScriptedChat {
    replies: Mutex<VecDeque<String>>,
    events: Mutex<Vec<ChatEvent>>,
    next_id: AtomicU64,
}

impl ScriptedChat {
    pub fn new<I, S>(replies: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            replies: Mutex::new(replies.into_iter().map(Into::into).collect()),
            events: Mutex::new(Vec::new()),
            next_id: AtomicU64::new(1),
        }
    }

    pub fn events(&self) -> Vec<ChatEvent> {
        self.events.lock().unwrap().clone()
    }

    pub fn sent(&self) -> Vec<OutgoingMessage> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                ChatEvent::Sent(_, message) => Some(message),
                _ => None,
            })
            .collect()
    }

    /// Text of every plain-text message sent.
    pub fn sent_texts(&self) -> Vec<String> {
        self.sent()
            .iter()
            .filter_map(|m| m.as_text().map(str::to_string))
            .collect()
    }

    pub fn edits(&self) -> Vec<OutgoingMessage> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                ChatEvent::Edited(_, message) => Some(message),
                _ => None,
            })
            .collect()
    }

    pub fn waits(&self) -> usize {
        self.events()
            .iter()
            .filter(|e| matches!(e, ChatEvent::Waited { .. }))
            .count()
    }

    fn record(&self, event: ChatEvent) {
        self.events.lock().unwrap().push(event);
    }
}

#[async_trait]
impl ChatPort for ScriptedChat {
    async fn send(
        &self,
        channel: ChannelId,
        message: OutgoingMessage,
    ) -> Result<MessageHandle, ChatError> {
        let handle = MessageHandle {
            channel,
            id: self.next_id.fetch_add(1, Ordering::Relaxed),
        };
        self.record(ChatEvent::Sent(handle, message));
        Ok(handle)
    }

    async fn edit(&self, handle: MessageHandle, message: OutgoingMessage) -> Result<(), ChatError> {
        self.record(ChatEvent::Edited(handle, message));
        Ok(())
    }

    async fn remove_controls(&self, handle: MessageHandle) -> Result<(), ChatError> {
        self.record(ChatEvent::ControlsRemoved(handle));
        Ok(())
    }

    async fn await_next_message(
        &self,
        user: UserId,
        channel: ChannelId,
        _timeout: Duration,
    ) -> Result<Option<String>, ChatError> {
        self.record(ChatEvent::Waited { user, channel });
        Ok(self.replies.lock().unwrap().pop_front())
    }
}

// =============================================================================
// Catalog and Store
// =============================================================================

pub fn catalog() -> Arc<GameData> {
    Arc::new(GameData::bundled().expect("bundled catalog parses"))
}

/// A level-1 Hardy entry with every IV set to `iv`.
pub fn pokemon(number: u64, species: u32, iv: u8) -> Pokemon {
    let ivs = Ivs::new(iv, iv, iv, iv, iv, iv).expect("iv in range");
    Pokemon::new(
        PokemonNumber::new(number),
        USER,
        SpeciesId::new(species),
        Nature::Hardy,
        ivs,
    )
}

/// Store holding `member` (numbered past the given entries) and `entries`.
pub async fn seeded_store(member: Member, entries: Vec<Pokemon>) -> Arc<InMemoryStore> {
    let store = Arc::new(InMemoryStore::new());
    let highest = entries.iter().map(|p| p.number.get()).max().unwrap_or(0);
    let member = Member {
        next_id: PokemonNumber::new(highest + 1),
        ..member
    };
    MemberRepo::create(store.as_ref(), &member).await.unwrap();
    for entry in &entries {
        PokemonRepo::insert(store.as_ref(), entry).await.unwrap();
    }
    store
}

/// A started member with the given entries; number 1 is selected.
pub async fn store_with(entries: Vec<Pokemon>) -> Arc<InMemoryStore> {
    seeded_store(Member::with_starter(USER), entries).await
}
