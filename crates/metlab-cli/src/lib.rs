//! `metlab` command-line front end.

pub mod cli;
pub mod commands;

pub use cli::{Cli, Commands};
