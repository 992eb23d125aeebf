//! Use cases - User story orchestration.
//!
//! The filter compiler, paging and confirmation flows are shared building
//! blocks; the collection module orchestrates them into commands.

pub mod collection;
pub mod confirmation;
pub mod filter;
pub mod pagination;

pub use collection::{CollectionError, CollectionUseCases, PokemonSelector, Reply};
pub use confirmation::{ConfirmationGate, ConfirmationOutcome, ConfirmationToken};
pub use filter::{FilterCompiler, FilterRejected};
pub use pagination::{PageContent, PageController, PageSource, PageState};
