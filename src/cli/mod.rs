//! CLI module for zephyr - command-line interface and subcommands.
//!
//! Provides the main entry point: the TUI by default, plus headless
//! watch, one-shot fetch and local evaluation commands.

pub mod commands;

pub use commands::{Cli, Commands};
