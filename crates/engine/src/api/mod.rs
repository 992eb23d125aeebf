//! API layer - chat command entry points.

pub mod args;
pub mod commands;
pub mod error_sanitizer;

pub use commands::CommandRouter;
