//! Padel score tracker CLI library.
//!
//! This crate provides the CLI interface for the score tracker.

mod cli;
pub mod commands;
mod config;
pub mod timer;

pub use cli::{Cli, Commands};
pub use config::Config;
