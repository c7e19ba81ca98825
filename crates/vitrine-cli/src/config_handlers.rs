//! Handlers for `vitrine config` subcommands.
//!
//! Handlers return the text for stdout; notes meant for a human go to
//! stderr directly.

use std::path::{Path, PathBuf};

use vitrine_core::{Error, Result};

use crate::cli::ConfigAction;
use crate::config::{resolver, VitrineConfig, PROJECT};

// ============================================================================
// Command dispatch
// ============================================================================

/// Handle a config subcommand. `effective` is the config after env and flag
/// overrides; `get` reads the file layer only.
pub fn handle_config_command(
    config_path: Option<&str>,
    action: ConfigAction,
    effective: &VitrineConfig,
) -> Result<String> {
    match action {
        ConfigAction::Path => cmd_config_path(config_path),
        ConfigAction::Get { key } => {
            let (config, _) = VitrineConfig::load(config_path)?;
            cmd_config_get(&config, &key)
        }
        ConfigAction::Init { file, force } => {
            let path = match file.as_deref().or(config_path) {
                Some(p) => PathBuf::from(p),
                None => resolver()
                    .default_config_file()
                    .ok_or_else(|| Error::config("could not determine config directory"))?,
            };
            cmd_config_init(&path, force)
        }
        ConfigAction::Show => effective.to_toml_string(),
    }
}

// ============================================================================
// Handlers
// ============================================================================

/// Resolved config file path.
pub fn cmd_config_path(config_path: Option<&str>) -> Result<String> {
    let path = resolver()
        .config_file(config_path)
        .ok_or_else(|| Error::config("could not determine config directory for this platform"))?;
    if !path.exists() {
        eprintln!("(file does not exist, run `{PROJECT} config init` to create it)");
    }
    Ok(format!("{}\n", path.display()))
}

/// Value at a dotted key.
pub fn cmd_config_get(config: &VitrineConfig, key: &str) -> Result<String> {
    let value = toml::Value::try_from(config).map_err(|e| Error::config(e.to_string()))?;
    match get_nested_value(&value, key) {
        Some(val) => Ok(format!("{}\n", format_toml_value(val))),
        None => Err(Error::config(format!("key '{key}' not found in configuration"))),
    }
}

/// Write the default configuration to `path`.
pub fn cmd_config_init(path: &Path, force: bool) -> Result<String> {
    if path.exists() && !force {
        return Err(Error::config(format!(
            "config file already exists at {}, use --force to overwrite",
            path.display()
        )));
    }
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| Error::io_with_path(e, parent))?;
    }

    let text = VitrineConfig::default().to_toml_string()?;
    std::fs::write(path, text).map_err(|e| Error::io_with_path(e, path))?;
    log::info!("Wrote default config to {}", path.display());
    Ok(format!("Config file created at {}\n", path.display()))
}

// ============================================================================
// TOML helpers
// ============================================================================

/// Walk a dotted key through nested tables.
pub fn get_nested_value<'a>(value: &'a toml::Value, key: &str) -> Option<&'a toml::Value> {
    key.split('.')
        .try_fold(value, |current, part| current.as_table()?.get(part))
}

/// Scalars print bare; arrays print inline; tables print as TOML.
pub fn format_toml_value(value: &toml::Value) -> String {
    match value {
        toml::Value::String(s) => s.clone(),
        toml::Value::Integer(i) => i.to_string(),
        toml::Value::Float(f) => f.to_string(),
        toml::Value::Boolean(b) => b.to_string(),
        toml::Value::Datetime(dt) => dt.to_string(),
        toml::Value::Array(items) => {
            let parts: Vec<String> = items.iter().map(format_toml_value).collect();
            format!("[{}]", parts.join(", "))
        }
        toml::Value::Table(_) => toml::to_string_pretty(value)
            .map(|s| s.trim_end().to_string())
            .unwrap_or_else(|_| format!("{value:?}")),
    }
}

// ============================================================================
// Tests
// ============================================================================
