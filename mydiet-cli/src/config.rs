use anyhow::{Context, Result};
use mydiet_normalize::ConvertOptions;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::state::{ensure_mydiet_home, mydiet_home};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub conversion: ConvertOptions,
    #[serde(default)]
    pub output: OutputSection,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OutputSection {
    /// Indent the JSON written by `mydiet convert`
    #[serde(default)]
    pub pretty: bool,
}

pub fn config_path() -> Result<PathBuf> {
    Ok(mydiet_home()?.join("config.toml"))
}

/// `path` when given (`--config` / `MYDIET_CONFIG`), else the default location.
pub fn resolve_config_path(path: Option<&Path>) -> Result<PathBuf> {
    match path {
        Some(p) => Ok(p.to_path_buf()),
        None => config_path(),
    }
}

/// Load from `path`, or the default location. A missing file means defaults.
pub fn load_config(path: Option<&Path>) -> Result<Config> {
    let p = resolve_config_path(path)?;
    if !p.exists() {
        return Ok(Config::default());
    }
    let s = fs::read_to_string(&p).with_context(|| format!("read {}", p.display()))?;
    parse_config(&s).with_context(|| format!("parse {}", p.display()))
}

pub fn parse_config(s: &str) -> Result<Config> {
    Ok(toml::from_str(s)?)
}

pub fn render_config(cfg: &Config) -> Result<String> {
    toml::to_string_pretty(cfg).context("serialize config")
}

/// Write the default config to the file `load_config` would read, unless one
/// is already there. Returns that file and whether it was written.
pub fn init_config(path: Option<&Path>) -> Result<(PathBuf, bool)> {
    let p = match path {
        Some(_) => resolve_config_path(path)?,
        None => ensure_mydiet_home()?.join("config.toml"),
    };
    if p.exists() {
        return Ok((p, false));
    }
    if let Some(dir) = p.parent().filter(|d| !d.as_os_str().is_empty()) {
        fs::create_dir_all(dir).with_context(|| format!("create {}", dir.display()))?;
    }
    let s = render_config(&Config::default())?;
    fs::write(&p, s).with_context(|| format!("write {}", p.display()))?;
    Ok((p, true))
}
