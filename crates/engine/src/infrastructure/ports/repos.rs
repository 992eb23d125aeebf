//! Repository port traits for database access.
//!
//! Collection queries take an ordered pipeline of [`FilterStage`]s scoped to
//! one owner; the store applies them in order and never re-validates them.

use async_trait::async_trait;
use pokebot_domain::{FilterStage, Member, Nickname, Pokemon, PokemonNumber, SortOrder, UserId};

use super::error::RepoError;

/// Partial update applied to a member document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MemberUpdate {
    Select(PokemonNumber),
    SetOrder(SortOrder),
    /// Consume one redeem and advance the next pokémon number
    SpendRedeem,
}

/// Partial update applied to one collection entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PokemonUpdate {
    SetNickname(Option<Nickname>),
    SetFavorite(bool),
}

// =============================================================================
// Database Ports (one per document type)
// =============================================================================

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MemberRepo: Send + Sync {
    async fn get(&self, id: UserId) -> Result<Option<Member>, RepoError>;
    async fn create(&self, member: &Member) -> Result<(), RepoError>;
    async fn update(&self, id: UserId, update: MemberUpdate) -> Result<(), RepoError>;
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PokemonRepo: Send + Sync {
    // Queries
    async fn count(&self, owner: UserId, stages: &[FilterStage]) -> Result<u64, RepoError>;
    async fn fetch_page(
        &self,
        owner: UserId,
        stages: &[FilterStage],
        offset: u64,
        limit: u64,
    ) -> Result<Vec<Pokemon>, RepoError>;
    /// First entry produced by the pipeline, if any.
    async fn fetch_single(
        &self,
        owner: UserId,
        stages: &[FilterStage],
    ) -> Result<Option<Pokemon>, RepoError>;
    /// Zero-based position of `number` in the pipeline output.
    async fn position_of(
        &self,
        owner: UserId,
        stages: &[FilterStage],
        number: PokemonNumber,
    ) -> Result<Option<u64>, RepoError>;

    // Mutations
    async fn insert(&self, pokemon: &Pokemon) -> Result<(), RepoError>;
    async fn update(
        &self,
        owner: UserId,
        number: PokemonNumber,
        update: PokemonUpdate,
    ) -> Result<(), RepoError>;
    /// Remove the listed entries; returns how many were removed.
    async fn release(&self, owner: UserId, numbers: &[PokemonNumber]) -> Result<u64, RepoError>;
}
