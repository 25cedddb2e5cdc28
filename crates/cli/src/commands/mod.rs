//! Subcommand implementations.

pub mod menu;
pub mod order;
pub mod validate;
