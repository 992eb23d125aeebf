//! Infrastructure implementations.
//!
//! Contains port trait implementations for external dependencies.

pub mod catalog;
pub mod console;
pub mod in_memory;
pub mod ports;
pub mod random;
pub mod settings;
