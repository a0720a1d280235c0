//! Tooling Layer
//!
//! Command-line surface over the lookup core.

pub mod cli;

pub use cli::{Cli, CliContext, Commands};
