//! Configuration file support for macos-fetch.
//!
//! Provides YAML-based defaults for the `installer` subcommand through
//! `macos-fetch.config.yml` files. Command-line flags always win over
//! values read here.

use anyhow::{bail, Context};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::shared::Result;

pub const CONFIG_FILENAME: &str = "macos-fetch.config.yml";

/// Top-level configuration file schema.
#[derive(Debug, Deserialize, Default)]
pub struct ConfigFile {
    pub workdir: Option<PathBuf>,
    pub catalog_url: Option<String>,
    pub seed_program: Option<String>,
    pub ignore_cache: Option<bool>,
    pub raw: Option<bool>,
    pub include_betas: Option<bool>,
    /// Captures unknown fields for warnings.
    #[serde(flatten)]
    pub unknown_fields: HashMap<String, serde_yaml_ng::Value>,
}

/// Load config from an explicit path. Returns an error if the file is not found.
pub fn load_config_from_path(path: &Path) -> Result<ConfigFile> {
    let content = std::fs::read_to_string(path).with_context(|| {
        format!(
            "Failed to read config file: {}\n\n💡 Hint: Check that the file exists and is readable.",
            path.display()
        )
    })?;

    let config: ConfigFile = serde_yaml_ng::from_str(&content).with_context(|| {
        format!(
            "Failed to parse config file: {}\n\n💡 Hint: Ensure the file contains valid YAML syntax.",
            path.display()
        )
    })?;

    validate_config(&config)?;
    warn_unknown_fields(&config);

    Ok(config)
}

/// Auto-discover config in a directory. Returns `None` silently if not found.
pub fn discover_config(dir: &Path) -> Result<Option<ConfigFile>> {
    let config_path = dir.join(CONFIG_FILENAME);
    if !config_path.exists() {
        return Ok(None);
    }
    load_config_from_path(&config_path).map(Some)
}

fn validate_config(config: &ConfigFile) -> Result<()> {
    if let Some(catalog_url) = config.catalog_url.as_deref() {
        let parsed = url::Url::parse(catalog_url).with_context(|| {
            format!(
                "Invalid config: catalog_url '{}' is not a valid URL.",
                catalog_url
            )
        })?;
        if !matches!(parsed.scheme(), "http" | "https") {
            bail!(
                "Invalid config: catalog_url must use http or https, got '{}'.\n\n\
                 💡 Hint: Use the full URL of an Apple software update catalog.",
                parsed.scheme()
            );
        }
    }
    if config
        .seed_program
        .as_deref()
        .is_some_and(|program| program.trim().is_empty())
    {
        bail!(
            "Invalid config: seed_program must not be empty.\n\n\
             💡 Hint: Use a program name such as DeveloperSeed, or remove the field."
        );
    }
    Ok(())
}

fn warn_unknown_fields(config: &ConfigFile) {
    let mut keys: Vec<&String> = config.unknown_fields.keys().collect();
    keys.sort();
    for key in keys {
        eprintln!(
            "⚠️  Warning: Unknown config field '{}' will be ignored.",
            key
        );
    }
}
