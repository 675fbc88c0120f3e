//! TOML and JSON configuration file parsing

use super::Config;
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

/// Parse a configuration file, choosing the format by extension
///
/// `.json` files are parsed as JSON, everything else as TOML.
pub fn parse_config_file(path: &Path) -> Result<Config> {
    let is_json = path
        .extension()
        .map(|ext| ext.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    if is_json {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        parse_json_string(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    } else {
        parse_toml_file(path)
    }
}

/// Parse TOML configuration file
pub fn parse_toml_file(path: &Path) -> Result<Config> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    parse_toml_string(&contents)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))
}

/// Parse TOML configuration from string
pub fn parse_toml_string(contents: &str) -> Result<Config> {
    let config: Config = ::toml::from_str(contents)
        .context("Failed to parse TOML configuration")?;

    Ok(config)
}

/// Parse JSON configuration from string
pub fn parse_json_string(contents: &str) -> Result<Config> {
    let config: Config = serde_json::from_str(contents)
        .context("Failed to parse JSON configuration")?;

    Ok(config)
}
