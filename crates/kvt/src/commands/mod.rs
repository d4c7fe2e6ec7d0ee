//! Command implementations for the kvt CLI.
//!
//! This module contains the actual command handlers that are invoked by the CLI.

pub mod apply;
pub mod completions;
pub mod config;
pub mod parse;
pub mod query;
pub mod suggest;
pub mod types;

use std::path::PathBuf;

use kvtags_rs::error::KeyValueError;
use kvtags_rs::input::KeyValueInput;

use crate::cli::Cli;

use self::config::Config;

/// Error type for command execution.
#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    /// Type schema or key lookup error.
    #[error("{0}")]
    KeyValue(#[from] KeyValueError),

    /// Input that could not be parsed.
    #[error("input error: {0}")]
    Input(String),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error.
    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for command execution.
pub type Result<T> = std::result::Result<T, CommandError>;

/// Context for command execution, containing common dependencies.
pub struct CommandContext {
    /// Whether to output JSON.
    pub json_output: bool,
    /// Whether to use colors.
    pub use_colors: bool,
    /// Whether to be quiet (errors only).
    pub quiet: bool,
    /// Whether to be verbose.
    pub verbose: bool,
    /// Config file given on the command line or through `KVT_CONFIG`.
    pub config_path: Option<PathBuf>,
}

impl CommandContext {
    /// Creates a new command context from CLI arguments.
    pub fn from_cli(cli: &Cli) -> Self {
        Self {
            json_output: cli.json,
            use_colors: !cli.no_color,
            quiet: cli.quiet,
            verbose: cli.verbose,
            config_path: cli.config.clone(),
        }
    }

    /// Loads the configuration this invocation runs with.
    pub fn load_config(&self) -> Result<Config> {
        let path = config::get_config_path(self.config_path.as_deref())?;
        config::load_config_from(&path)
    }

    /// Loads the configuration and builds an input session from its schema.
    pub fn load_session(&self) -> Result<KeyValueInput> {
        self.load_config()?.build_session()
    }
}
