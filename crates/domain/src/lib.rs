//! Pokebot domain types.
//!
//! Pure data and validation for the collection game: catalog species,
//! collection entries, members, and the filter pipeline that queries them.
//! No I/O lives here.

pub mod entities;
pub mod error;
pub mod ids;
pub mod query;
pub mod value_objects;

pub use entities::{Member, Pokemon, RarityClass, Species};
pub use error::DomainError;
pub use ids::{ChannelId, PokemonNumber, SpeciesId, UserId};
pub use query::{
    pipeline_document, Condition, Field, FilterFlag, FilterFlags, FilterStage, FlagKind,
    FlagValue, IvExpr, Scalar, SortKey,
};
pub use value_objects::{
    BaseStats, ComparisonOp, ComparisonParseError, Ivs, Nature, Nickname, NumericComparison,
    SortOrder, Stat, MAX_IV, MAX_IV_TOTAL, MAX_NICKNAME_LEN,
};
