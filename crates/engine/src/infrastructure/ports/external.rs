//! External service port traits (chat platform, species catalog).

use std::time::Duration;

use async_trait::async_trait;
use pokebot_domain::{ChannelId, RarityClass, Species, SpeciesId, UserId};

use super::error::{CatalogError, ChatError};
use super::types::{MessageHandle, OutgoingMessage, StarterGeneration};

// =============================================================================
// Chat Platform
// =============================================================================

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ChatPort: Send + Sync {
    async fn send(
        &self,
        channel: ChannelId,
        message: OutgoingMessage,
    ) -> Result<MessageHandle, ChatError>;

    async fn edit(&self, handle: MessageHandle, message: OutgoingMessage) -> Result<(), ChatError>;

    /// Detach navigation controls from a message, leaving its content as is.
    async fn remove_controls(&self, handle: MessageHandle) -> Result<(), ChatError>;

    /// Wait for the next message from `user` in `channel`.
    ///
    /// Messages from anyone else, or elsewhere, are skipped and dropped.
    /// Command messages are never returned here; they go to the router as
    /// new commands. Returns `Ok(None)` when `timeout` elapses first.
    async fn await_next_message(
        &self,
        user: UserId,
        channel: ChannelId,
        timeout: Duration,
    ) -> Result<Option<String>, ChatError>;
}

// =============================================================================
// Species Catalog
// =============================================================================

#[cfg_attr(test, mockall::automock)]
pub trait CatalogPort: Send + Sync {
    fn species(&self, id: SpeciesId) -> Option<Species>;
    /// Case-insensitive lookup by species name.
    fn species_by_name(&self, name: &str) -> Result<Species, CatalogError>;
    fn ids_for_rarity(&self, class: RarityClass) -> Vec<SpeciesId>;
    /// Species having `type_name` as one of their types; empty when unknown.
    fn ids_for_type(&self, type_name: &str) -> Vec<SpeciesId>;
    fn starters(&self) -> Vec<StarterGeneration>;
}
