//! Domain entities - Core business objects with identity

mod member;
mod pokemon;
mod species;

pub use member::Member;
pub use pokemon::Pokemon;
pub use species::{RarityClass, Species};
