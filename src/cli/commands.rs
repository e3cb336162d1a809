//! CLI command definitions using clap.
//!
//! Defines the main CLI structure and subcommands:
//! - (none): launch the TUI
//! - watch: poll headlessly, printing results to stdout
//! - once: fetch and evaluate a single record
//! - eval: evaluate an operation locally

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::domain::FormatterChoice;

/// Zephyr - polls an endpoint for arithmetic operations and shows the results
#[derive(Parser, Debug)]
#[command(name = "zephyr")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Optional config file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Endpoint to poll (overrides config)
    #[arg(short, long, global = true)]
    pub url: Option<String>,

    /// Milliseconds between polls (overrides config)
    #[arg(short, long, global = true)]
    pub interval_ms: Option<u64>,

    /// Output format: ARITHMETIC or HEX (overrides config)
    #[arg(short, long, global = true)]
    pub format: Option<FormatterChoice>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,
}

impl Cli {
    /// Check if verbose mode is enabled
    pub fn is_verbose(&self) -> bool {
        self.verbose
    }
}

/// Main subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Poll without the TUI, printing each result on its own line
    Watch {
        /// Stop after this many results (at least 1)
        #[arg(short = 'n', long, value_parser = clap::value_parser!(u64).range(1..))]
        count: Option<u64>,
    },

    /// Fetch and evaluate one record, then exit
    Once,

    /// Evaluate an operation locally
    #[command(allow_negative_numbers = true)]
    Eval {
        /// Left operand
        a: i32,
        /// Operator: + - * /
        op: String,
        /// Right operand
        b: i32,
    },
}
