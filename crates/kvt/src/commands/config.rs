//! Config command implementation.
//!
//! The config file holds the type schema the other commands parse with.
//! It is located at ~/.config/kvt/config.toml unless overridden with
//! `--config` or `KVT_CONFIG`. Without a file the built-in schema is used.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use directories::BaseDirs;
use kvtags_rs::config::{build_types, TypeSpec};
use kvtags_rs::construction::ConstructionData;
use kvtags_rs::input::KeyValueInput;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{CommandContext, CommandError, Result};

/// Current config file version. Increment when making breaking changes to schema.
const CONFIG_VERSION: u32 = 1;

/// Environment variable overriding the config file location.
const CONFIG_ENV: &str = "KVT_CONFIG";

/// Default config file contents.
pub const DEFAULT_CONFIG: &str = r#"# kvt - key-value tag parser configuration

# Config schema version (do not modify)
version = 1

# Text typed without a key is searched for with this type
fallback_type = "text"

# Suggest tags that were already entered
# allow_duplicates = true

[[types]]
id = "done"
label = "Done"
aliases = ["erledigt"]
kind = "boolean"

[[types]]
id = "order"
label = "Order"
aliases = ["sort"]
kind = "sort"

[[types]]
id = "price"
label = "Price"
aliases = ["preis", "cost"]
kind = "number"
# delimiters = { decimal = ",", groups = "." }

[[types]]
id = "due"
label = "Due"
aliases = ["fällig"]
kind = "date"
# display_format = "%d.%m.%Y"
# parse_formats = ["%d.%m.%Y", "%d.%m."]

[[types]]
id = "adjust"
label = "Adjust"
kind = "number_modifier"

[[types]]
id = "color"
label = "Color"
aliases = ["farbe"]
kind = "tag"
tags = ["red", "green", "blue"]
allow_other = true

[[types]]
id = "text"
label = "Text"
aliases = ["search"]
kind = "regex"

# Entries shown alongside typed entries
# [[default_entries]]
# key = "order"
# value = "asc"
"#;

/// Configuration file structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Config schema version for migrations.
    /// Defaults to current version when not present in file.
    #[serde(default = "default_version")]
    pub version: u32,

    /// Whether tag suggestions may repeat tags already entered.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allow_duplicates: Option<bool>,

    /// Type used for text typed without a key.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fallback_type: Option<String>,

    /// The type schema.
    #[serde(default)]
    pub types: Vec<TypeSpec>,

    /// Entries present in every session.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub default_entries: Vec<ConstructionData>,
}

/// Returns the current config version (used by serde default).
fn default_version() -> u32 {
    CONFIG_VERSION
}

impl Config {
    /// Parses a config file's contents.
    pub fn parse(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)
            .map_err(|e| CommandError::Config(format!("Failed to parse config: {}", e)))?;
        migrate_config(config)
    }

    /// The schema used when no config file exists.
    pub fn builtin() -> Result<Self> {
        Self::parse(DEFAULT_CONFIG)
    }

    /// Builds an input session from the schema.
    pub fn build_session(&self) -> Result<KeyValueInput> {
        if self.types.is_empty() {
            return Err(CommandError::Config("No types configured".to_string()));
        }

        let types = build_types(&self.types).map_err(|e| CommandError::Config(e.to_string()))?;
        let mut input = KeyValueInput::multiple(types)
            .with_allow_duplicates(self.allow_duplicates.unwrap_or(true));

        if let Some(id) = &self.fallback_type {
            input = input
                .with_fallback_type(id)
                .map_err(|e| CommandError::Config(format!("fallback_type: {}", e)))?;
        }

        Ok(input.with_default_entries(&self.default_entries))
    }
}

/// Gets the config file path.
///
/// The resolution order is:
/// 1. `--config` flag (clap also fills this from `KVT_CONFIG`)
/// 2. `KVT_CONFIG` environment variable
/// 3. `$XDG_CONFIG_HOME/kvt/config.toml`
/// 4. `~/.config/kvt/config.toml`
pub fn get_config_path(override_path: Option<&Path>) -> Result<PathBuf> {
    if let Some(path) = override_path {
        return Ok(path.to_path_buf());
    }

    if let Ok(path) = env::var(CONFIG_ENV) {
        return Ok(PathBuf::from(path));
    }

    if let Ok(xdg_config) = env::var("XDG_CONFIG_HOME") {
        return Ok(PathBuf::from(xdg_config).join("kvt").join("config.toml"));
    }

    BaseDirs::new()
        .map(|dirs| dirs.home_dir().join(".config").join("kvt").join("config.toml"))
        .ok_or_else(|| CommandError::Config("Could not determine config directory".to_string()))
}

/// Loads the configuration from `path`, falling back to the built-in schema.
pub fn load_config_from(path: &Path) -> Result<Config> {
    if !path.exists() {
        debug!(path = %path.display(), "No config file, using built-in schema");
        return Config::builtin();
    }

    let content = fs::read_to_string(path)
        .map_err(|e| CommandError::Config(format!("Failed to read config: {}", e)))?;

    debug!(path = %path.display(), "Loaded config");
    Config::parse(&content)
}

/// Migrates config to current version if needed.
fn migrate_config(mut config: Config) -> Result<Config> {
    config.version = CONFIG_VERSION;
    Ok(config)
}

/// Executes the config show command.
pub fn execute_show(ctx: &CommandContext) -> Result<()> {
    let path = get_config_path(ctx.config_path.as_deref())?;
    let config = load_config_from(&path)?;

    if ctx.json_output {
        let output = serde_json::json!({
            "path": path.display().to_string(),
            "exists": path.exists(),
            "config": config,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else if !ctx.quiet {
        use owo_colors::OwoColorize;

        let header = "Configuration";
        if ctx.use_colors {
            println!("{}\n", header.green().bold());
        } else {
            println!("{}\n", header);
        }

        println!("File: {}", path.display());
        println!("Exists: {}\n", path.exists());
        if !path.exists() {
            println!("(No config file exists. Run 'kvt config init' to create one.)\n");
        }

        println!("Settings:");
        println!("  version: {}", config.version);
        if let Some(ref fallback) = config.fallback_type {
            println!("  fallback_type: {}", fallback);
        }
        if let Some(allow) = config.allow_duplicates {
            println!("  allow_duplicates: {}", allow);
        }
        println!("  types: {}", config.types.len());
        for entry in &config.default_entries {
            println!("  default: {} = {}", entry.key, entry.value);
        }
    }

    Ok(())
}

/// Executes the config path command.
pub fn execute_path(ctx: &CommandContext) -> Result<()> {
    let path = get_config_path(ctx.config_path.as_deref())?;

    if ctx.json_output {
        let output = serde_json::json!({
            "path": path.display().to_string(),
            "exists": path.exists(),
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        println!("{}", path.display());
    }

    Ok(())
}

/// Executes the config init command.
pub fn execute_init(ctx: &CommandContext, force: bool) -> Result<()> {
    let path = get_config_path(ctx.config_path.as_deref())?;
    write_default_config(&path, force)?;

    if ctx.json_output {
        let output = serde_json::json!({
            "status": "success",
            "path": path.display().to_string(),
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else if !ctx.quiet {
        println!("Created default config at: {}", path.display());
    }

    Ok(())
}

/// Writes the default config to `path`, refusing to overwrite unless `force`.
fn write_default_config(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        return Err(CommandError::Config(format!(
            "Config file already exists at {}. Use --force to overwrite",
            path.display()
        )));
    }

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .map_err(|e| CommandError::Config(format!("Failed to create config directory: {e}")))?;
    }

    fs::write(path, DEFAULT_CONFIG)
        .map_err(|e| CommandError::Config(format!("Failed to write config: {}", e)))?;

    Ok(())
}
