use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;

pub fn mydiet_home() -> Result<PathBuf> {
    if let Ok(dir) = std::env::var("MYDIET_HOME") {
        if !dir.trim().is_empty() {
            return Ok(PathBuf::from(dir));
        }
    }
    let home = std::env::var("HOME").context("HOME is not set")?;
    Ok(PathBuf::from(home).join(".mydiet"))
}

pub fn ensure_mydiet_home() -> Result<PathBuf> {
    let dir = mydiet_home()?;
    fs::create_dir_all(&dir).with_context(|| format!("create {}", dir.display()))?;
    Ok(dir)
}
