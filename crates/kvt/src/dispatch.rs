//! Command dispatch module for routing CLI commands to their handlers.

use crate::cli::{Cli, Commands, ConfigCommands, Shell};
use crate::commands::{self, CommandContext, CommandError, Result};

/// A parsed command with borrowed arguments, ready to run.
pub enum Dispatch<'a> {
    Parse(&'a [String]),
    Suggest {
        key: Option<&'a str>,
        prefix: &'a str,
    },
    Query(&'a [String]),
    Types,
    Apply {
        modifier: &'a str,
        base: f64,
        round: &'a str,
    },
    Config(Option<&'a ConfigCommands>),
    Completions(&'a Shell),
    Help,
}

impl<'a> Dispatch<'a> {
    /// Creates a dispatch from the CLI command.
    pub fn from_cli(cli: &'a Cli) -> Self {
        match &cli.command {
            Some(Commands::Parse { text }) => Self::Parse(text),
            Some(Commands::Suggest { key, prefix }) => Self::Suggest {
                key: key.as_deref(),
                prefix,
            },
            Some(Commands::Query { text }) => Self::Query(text),
            Some(Commands::Types) => Self::Types,
            Some(Commands::Apply {
                modifier,
                base,
                round,
            }) => Self::Apply {
                modifier,
                base: *base,
                round,
            },
            Some(Commands::Config { command }) => Self::Config(command.as_ref()),
            Some(Commands::Completions { shell }) => Self::Completions(shell),
            None => Self::Help,
        }
    }

    /// Executes the command.
    pub fn execute(&self, ctx: &CommandContext) -> Result<()> {
        match self {
            Self::Parse(text) => commands::parse::execute(ctx, text),
            Self::Suggest { key, prefix } => commands::suggest::execute(ctx, *key, prefix),
            Self::Query(text) => commands::query::execute(ctx, text),
            Self::Types => commands::types::execute(ctx),
            Self::Apply {
                modifier,
                base,
                round,
            } => commands::apply::execute(ctx, modifier, *base, round),
            Self::Config(command) => dispatch_config(ctx, *command),
            Self::Completions(shell) => {
                commands::completions::execute(shell).map_err(CommandError::Io)
            }
            Self::Help => {
                if !ctx.quiet {
                    println!("kvt - typed key-value tag parser");
                    println!("Use --help for usage information");
                }
                Ok(())
            }
        }
    }
}

/// Dispatch config subcommands.
fn dispatch_config(ctx: &CommandContext, command: Option<&ConfigCommands>) -> Result<()> {
    match command {
        Some(ConfigCommands::Show) | None => commands::config::execute_show(ctx),
        Some(ConfigCommands::Path) => commands::config::execute_path(ctx),
        Some(ConfigCommands::Init { force }) => commands::config::execute_init(ctx, *force),
    }
}
