//! Pokebot Engine library.
//!
//! Collection commands for a chat bot: filtering, paged listings and
//! confirmation-gated releases.
//!
//! ## Structure
//!
//! - `use_cases/` - Command orchestration over the ports
//! - `infrastructure/` - Port traits and their adapters
//! - `api/` - Command parsing and routing
//! - `app` - Application composition

pub mod api;
pub mod app;
pub mod infrastructure;
pub mod use_cases;

/// Test fixtures shared by the unit tests.
#[cfg(test)]
pub mod test_fixtures;

pub use app::App;
