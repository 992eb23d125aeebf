//! Collection command errors.

use pokebot_domain::DomainError;

use crate::infrastructure::ports::{ChatError, RepoError};
use crate::use_cases::filter::FilterRejected;
use crate::use_cases::pagination::PaginationError;

/// Errors that can occur while handling a collection command.
///
/// Every variant except `Repo` and `Chat` is a corrective message for the
/// invoking user; those two end the invocation as failures.
#[derive(Debug, thiserror::Error)]
pub enum CollectionError {
    #[error("Please pick a starter pokémon by typing `{prefix}start` before using this command!")]
    NotStarted { prefix: String },
    #[error("Page must be positive!")]
    NonPositivePage,
    #[error("Found no pokémon matching this search.")]
    NoMatches,
    #[error("Found no pokémon matching this search (excluding favorited and selected pokémon).")]
    NoReleasableMatches,
    #[error("Couldn't find that pokémon!")]
    PokemonNotFound,
    #[error("You can't release your selected pokémon!")]
    ReleaseSelected,
    #[error("You can't release favorited pokémon!")]
    ReleaseFavorite,
    #[error("You don't have any redeems!")]
    NoRedeems,
    #[error("Could not find a pokemon matching `{0}`.")]
    UnknownSpecies(String),
    #[error("You can't redeem this pokémon!")]
    NotRedeemable,
    #[error("You have already chosen a starter pokémon! View your pokémon with `{prefix}pokemon`.")]
    AlreadyStarted { prefix: String },
    #[error("Please select one of the starter pokémon. To view them, type `{prefix}start`.")]
    NotAStarter { prefix: String },
    #[error("That nickname is too long.")]
    NicknameTooLong,
    #[error("Please specify either `number`, `IV`, `level`, or `pokedex`.")]
    InvalidOrder,
    #[error("{0}")]
    Validation(#[from] DomainError),
    #[error("{0}")]
    Filter(#[from] FilterRejected),
    #[error("Repository error: {0}")]
    Repo(#[from] RepoError),
    #[error("Chat error: {0}")]
    Chat(#[from] ChatError),
}

impl CollectionError {
    /// Whether this error is shown to the user rather than treated as a failure.
    pub fn is_user_facing(&self) -> bool {
        !matches!(self, Self::Repo(_) | Self::Chat(_))
    }
}

impl From<PaginationError> for CollectionError {
    fn from(err: PaginationError) -> Self {
        match err {
            PaginationError::Repo(e) => Self::Repo(e),
            PaginationError::Chat(e) => Self::Chat(e),
        }
    }
}
