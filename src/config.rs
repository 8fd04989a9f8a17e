//! Parses config file
//!
//! The config is optional. Without one every field takes its default.
use std::{
    env,
    path::{Path, PathBuf},
};

use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct Config {
    /// Where `layout capture` writes and `layout compare` reads when no
    /// directory is given on the command line.
    pub reference_dir: Option<PathBuf>,
    pub validate_on_inspect: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            reference_dir: None,
            validate_on_inspect: true,
        }
    }
}

pub static CONFIG_FILE_NAME: &str = "packtool.toml";

/// Parse `packtool.toml` in the same folder as the binary, if there is one.
pub fn parse_config() -> eyre::Result<Config> {
    let path = match env::current_exe() {
        Ok(path) => path
            .parent()
            .map(|parent| parent.join(CONFIG_FILE_NAME))
            .unwrap_or_else(|| PathBuf::from(CONFIG_FILE_NAME)),
        Err(_) => PathBuf::from(CONFIG_FILE_NAME),
    };

    if !path.exists() {
        log::debug!("no config at `{}`, using defaults", path.display());
        return Ok(Config::default());
    }

    parse_config_from_file(path.as_path())
}

pub fn parse_config_from_file(path: &Path) -> eyre::Result<Config> {
    let buffer = std::fs::read_to_string(path)?;

    let mut config: Config = toml::from_str(&buffer)?;

    // relative to the config file, not to wherever the tool runs from
    if let (Some(dir), Some(root)) = (config.reference_dir.as_ref(), path.parent()) {
        if dir.is_relative() {
            config.reference_dir = Some(root.join(dir));
        }
    }

    log::debug!("loaded config from `{}`: {config:?}", path.display());

    Ok(config)
}

/// The file given on the command line wins over the one next to the binary.
pub fn load_config(path: Option<&Path>) -> eyre::Result<Config> {
    match path {
        Some(path) => parse_config_from_file(path),
        None => parse_config(),
    }
}
