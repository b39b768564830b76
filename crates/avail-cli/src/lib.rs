//! Availability report CLI library.
//!
//! This crate provides the `avail` command-line interface on top of the
//! `avail-core` interval engine.

mod cli;
pub mod commands;
mod config;
pub mod input;

pub use cli::{Cli, Commands};
pub use config::Config;
