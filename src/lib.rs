//! Zephyr - polls an endpoint for arithmetic operations
//!
//! Each poll fetches a two-operand record, evaluates it, renders the result
//! as decimal or hex, and publishes it newest-first to a display.

pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod poller;
pub mod source;
pub mod tui;

pub use error::{Result, ZephyrError};
