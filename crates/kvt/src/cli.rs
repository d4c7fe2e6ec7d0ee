//! CLI argument parsing using clap derive macros.
//!
//! This module defines the command-line interface for the kvt CLI.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// kvt - Typed key-value tag parsing from the command line
#[derive(Parser, Debug)]
#[command(name = "kvt")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Verbose output (show debug information)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Quiet mode (errors only)
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Force JSON output
    #[arg(long, global = true)]
    pub json: bool,

    /// Disable colors in output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Config file with the type schema (default: ~/.config/kvt/config.toml)
    #[arg(long, global = true, env = "KVT_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Parse text into typed entries
    #[command(alias = "p")]
    Parse {
        /// Text to parse, e.g. `price: >= 10 "big sale"`
        #[arg(required = true, num_args = 1.., allow_hyphen_values = true)]
        text: Vec<String>,
    },

    /// Show suggestions for a key or value prefix
    #[command(alias = "s")]
    Suggest {
        /// Suggest values for this type instead of type names
        #[arg(short, long)]
        key: Option<String>,

        /// Text typed so far
        #[arg(default_value = "", allow_hyphen_values = true)]
        prefix: String,
    },

    /// Parse text and print the resulting query fragments
    #[command(alias = "q")]
    Query {
        /// Text to parse
        #[arg(required = true, num_args = 1.., allow_hyphen_values = true)]
        text: Vec<String>,
    },

    /// List the configured types
    #[command(alias = "t")]
    Types,

    /// Apply a number modifier to a base value
    Apply {
        /// Modifier such as `+5`, `*2` or `÷ 3`
        #[arg(allow_hyphen_values = true)]
        modifier: String,

        /// Base value
        #[arg(allow_hyphen_values = true)]
        base: f64,

        /// Rounding of the result: not, up, down or math
        #[arg(short, long, default_value = "not")]
        round: String,
    },

    /// Manage the configuration file
    Config {
        #[command(subcommand)]
        command: Option<ConfigCommands>,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        shell: Shell,
    },
}

/// Shell types for completions
#[derive(ValueEnum, Clone, Debug)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    Powershell,
}

/// Config subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show the current configuration and schema
    Show,

    /// Print config file path
    Path,

    /// Write the default configuration file
    Init {
        /// Overwrite an existing file
        #[arg(short, long)]
        force: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_global_flags() {
        let cli = Cli::parse_from(["kvt", "--verbose", "types"]);
        assert!(cli.verbose);
        assert!(!cli.quiet);
        assert!(!cli.json);

        let cli = Cli::parse_from(["kvt", "--quiet", "--json", "types"]);
        assert!(!cli.verbose);
        assert!(cli.quiet);
        assert!(cli.json);
    }

    #[test]
    fn test_verbose_conflicts_with_quiet() {
        assert!(Cli::try_parse_from(["kvt", "-v", "-q", "types"]).is_err());
    }

    #[test]
    fn test_no_color_flag() {
        let cli = Cli::parse_from(["kvt", "--no-color", "types"]);
        assert!(cli.no_color);
    }

    #[test]
    fn test_config_flag() {
        let cli = Cli::parse_from(["kvt", "--config", "/tmp/schema.toml", "types"]);
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/schema.toml")));
    }

    #[test]
    fn test_parse_collects_words() {
        let cli = Cli::parse_from(["kvt", "parse", "price:", "<", "20", "\"big sale\""]);
        if let Some(Commands::Parse { text }) = cli.command {
            assert_eq!(text, ["price:", "<", "20", "\"big sale\""]);
        } else {
            panic!("Expected Parse command");
        }
    }

    #[test]
    fn test_parse_requires_text() {
        assert!(Cli::try_parse_from(["kvt", "parse"]).is_err());
    }

    #[test]
    fn test_parse_alias() {
        let cli = Cli::parse_from(["kvt", "p", "done:"]);
        assert!(matches!(cli.command, Some(Commands::Parse { .. })));
    }

    #[test]
    fn test_suggest_with_key() {
        let cli = Cli::parse_from(["kvt", "suggest", "--key", "price", "<"]);
        if let Some(Commands::Suggest { key, prefix }) = cli.command {
            assert_eq!(key.as_deref(), Some("price"));
            assert_eq!(prefix, "<");
        } else {
            panic!("Expected Suggest command");
        }
    }

    #[test]
    fn test_suggest_prefix_defaults_to_empty() {
        let cli = Cli::parse_from(["kvt", "s"]);
        if let Some(Commands::Suggest { key, prefix }) = cli.command {
            assert!(key.is_none());
            assert_eq!(prefix, "");
        } else {
            panic!("Expected Suggest command");
        }
    }

    #[test]
    fn test_query_alias() {
        let cli = Cli::parse_from(["kvt", "q", "done:", "ja"]);
        assert!(matches!(cli.command, Some(Commands::Query { .. })));
    }

    #[test]
    fn test_types_alias() {
        let cli = Cli::parse_from(["kvt", "t"]);
        assert!(matches!(cli.command, Some(Commands::Types)));
    }

    #[test]
    fn test_apply_accepts_negative_values() {
        let cli = Cli::parse_from(["kvt", "apply", "-5", "-10.5", "--round", "up"]);
        if let Some(Commands::Apply {
            modifier,
            base,
            round,
        }) = cli.command
        {
            assert_eq!(modifier, "-5");
            assert_eq!(base, -10.5);
            assert_eq!(round, "up");
        } else {
            panic!("Expected Apply command");
        }
    }

    #[test]
    fn test_apply_round_defaults_to_not() {
        let cli = Cli::parse_from(["kvt", "apply", "+5", "10"]);
        if let Some(Commands::Apply { round, .. }) = cli.command {
            assert_eq!(round, "not");
        } else {
            panic!("Expected Apply command");
        }
    }

    #[test]
    fn test_config_init_force() {
        let cli = Cli::parse_from(["kvt", "config", "init", "--force"]);
        assert!(matches!(
            cli.command,
            Some(Commands::Config {
                command: Some(ConfigCommands::Init { force: true })
            })
        ));
    }

    #[test]
    fn test_config_without_subcommand() {
        let cli = Cli::parse_from(["kvt", "config"]);
        assert!(matches!(cli.command, Some(Commands::Config { command: None })));
    }

    #[test]
    fn test_completions_shell() {
        let cli = Cli::parse_from(["kvt", "completions", "zsh"]);
        if let Some(Commands::Completions { shell }) = cli.command {
            assert!(matches!(shell, Shell::Zsh));
        } else {
            panic!("Expected Completions command");
        }
    }
}
