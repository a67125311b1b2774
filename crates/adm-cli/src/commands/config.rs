//! Config command implementations

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Subcommand;

use crate::output::{print_info, print_success};
use adm_core::config::{self, ConfigOverrides};
use adm_core::ClientConfig;

#[derive(Debug, Clone, Subcommand)]
pub enum ConfigAction {
    /// Show the effective configuration
    Show,
    /// Show the config file path
    Path,
    /// Write a default config file
    Init {
        /// Overwrite an existing file
        #[arg(short, long)]
        force: bool,
    },
    /// Get a config value
    Get { key: String },
    /// Set a config value
    Set { key: String, value: String },
}

/// Run a config subcommand
pub fn handle(
    config_path: Option<&Path>,
    overrides: &ConfigOverrides,
    action: ConfigAction,
) -> Result<()> {
    match action {
        ConfigAction::Show => config_show(config_path, overrides),
        ConfigAction::Path => {
            println!("{}", target_path(config_path).display());
            Ok(())
        }
        ConfigAction::Init { force } => config_init(config_path, force),
        ConfigAction::Get { key } => config_get(config_path, overrides, &key),
        ConfigAction::Set { key, value } => config_set(config_path, &key, &value),
    }
}

fn target_path(config_path: Option<&Path>) -> PathBuf {
    config_path
        .map(Path::to_path_buf)
        .unwrap_or_else(config::default_config_path)
}

/// Print the effective configuration with the token masked
pub fn config_show(config_path: Option<&Path>, overrides: &ConfigOverrides) -> Result<()> {
    let effective = ClientConfig::load(config_path, overrides)?;
    let path = target_path(config_path);

    if path.exists() {
        print_info(&format!("Configuration file: {}", path.display()));
    } else {
        print_info("No configuration file found, showing defaults");
    }
    println!("{}", toml::to_string_pretty(&effective.redacted())?);
    Ok(())
}

/// Write the commented default configuration
pub fn config_init(config_path: Option<&Path>, force: bool) -> Result<()> {
    let path = target_path(config_path);

    if path.exists() && !force {
        anyhow::bail!(
            "Config file already exists: {} (use --force to overwrite)",
            path.display()
        );
    }

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create config directory: {}", parent.display()))?;
    }
    std::fs::write(&path, config::default_config_document())
        .with_context(|| format!("Failed to write config file: {}", path.display()))?;

    print_success(&format!("Configuration written to {}", path.display()));
    Ok(())
}

/// Print one effective config value
pub fn config_get(config_path: Option<&Path>, overrides: &ConfigOverrides, key: &str) -> Result<()> {
    let effective = ClientConfig::load(config_path, overrides)?;
    let content = toml::to_string(&effective)?;

    match config::get_key(&content, key)? {
        Some(toml::Value::String(s)) => println!("{}", s),
        Some(value) => println!("{}", value),
        None => print_info(&format!("{} is not set", key)),
    }
    Ok(())
}

/// Set a value in the config file, creating the file when needed
pub fn config_set(config_path: Option<&Path>, key: &str, value: &str) -> Result<()> {
    let path = target_path(config_path);

    let content = match std::fs::read_to_string(&path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            print_info("Creating default configuration...");
            config::default_config_document()
        }
        Err(e) => {
            return Err(e).with_context(|| format!("Failed to read config file: {}", path.display()))
        }
    };

    let updated = config::set_key(&content, key, value)?;

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(&path, updated)
        .with_context(|| format!("Failed to write config file: {}", path.display()))?;

    print_success(&format!("Set {} = {}", key, value));
    Ok(())
}
