//! Command-line configuration
//!
//! [`Cli`] is parsed with clap and converted into the [`SessionConfig`] that
//! sizes the sheet and bounds evaluation.

use crate::interpreter::constants::{DEFAULT_COLS, DEFAULT_MAX_DEPTH, DEFAULT_ROWS};
use clap::builder::TypedValueParser;
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug, Clone)]
#[command(name = "cellscript")]
#[command(version, about = "A spreadsheet formula language with a terminal grid editor")]
pub struct Cli {
    /// Number of rows shown in the sheet
    #[arg(long, default_value_t = DEFAULT_ROWS, value_parser = clap::value_parser!(u16).range(1..=1000).map(usize::from))]
    pub rows: usize,

    /// Number of columns shown in the sheet
    #[arg(long, default_value_t = DEFAULT_COLS, value_parser = clap::value_parser!(u16).range(1..=1000).map(usize::from))]
    pub cols: usize,

    /// Maximum nesting depth for parsing and evaluation
    #[arg(long, default_value_t = DEFAULT_MAX_DEPTH, value_parser = clap::value_parser!(u16).range(1..=4096).map(usize::from))]
    pub max_depth: usize,

    /// Clear variables before each top-level formula instead of sharing them
    #[arg(long)]
    pub isolate_variables: bool,

    /// Write tracing output to this file (the TUI owns the terminal)
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Evaluate a formula without opening the TUI (repeatable, shares one session)
    #[arg(long = "eval", value_name = "FORMULA", allow_hyphen_values = true)]
    pub eval: Vec<String>,

    /// With --eval, also print the canonical form of each formula
    #[arg(long, requires = "eval")]
    pub canonical: bool,
}

impl Cli {
    pub fn session_config(&self) -> SessionConfig {
        SessionConfig {
            rows: self.rows,
            cols: self.cols,
            max_depth: self.max_depth,
            isolate_variables: self.isolate_variables,
        }
    }

    /// Headless mode runs when at least one `--eval` was given
    pub fn is_headless(&self) -> bool {
        !self.eval.is_empty()
    }
}

/// Settings for a [`Session`](crate::session::Session)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionConfig {
    pub rows: usize,
    pub cols: usize,
    pub max_depth: usize,
    pub isolate_variables: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        SessionConfig {
            rows: DEFAULT_ROWS,
            cols: DEFAULT_COLS,
            max_depth: DEFAULT_MAX_DEPTH,
            isolate_variables: false,
        }
    }
}
