//! Port traits for infrastructure boundaries.
//!
//! These are the ONLY abstractions in the engine. Everything else is concrete types.
//! Ports exist for:
//! - Document storage (members and their collections)
//! - The chat platform (send, edit, wait for replies)
//! - The static species catalog
//! - Randomness (for testing)

mod error;
mod external;
mod repos;
mod testing;
pub mod types;

// =============================================================================
// Repository Ports
// =============================================================================
pub use repos::{MemberRepo, MemberUpdate, PokemonRepo, PokemonUpdate};

// =============================================================================
// External Service Ports
// =============================================================================
pub use external::{CatalogPort, ChatPort};

pub use types::{
    Embed, EmbedField, IncomingMessage, MessageHandle, OutgoingMessage, StarterGeneration,
    EMBED_COLOR,
};

// =============================================================================
// Test-Only Mocks (only available during test builds)
// =============================================================================
#[cfg(test)]
pub use external::{MockCatalogPort, MockChatPort};
#[cfg(test)]
pub use repos::{MockMemberRepo, MockPokemonRepo};
#[cfg(test)]
pub use testing::MockRandomPort;

// =============================================================================
// Testing Ports
// =============================================================================
pub use testing::RandomPort;

// =============================================================================
// Error Types
// =============================================================================
pub use error::{CatalogError, ChatError, RepoError};
