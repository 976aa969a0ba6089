use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;

/// `$SPENDWATCH_HOME`, else `~/.spendwatch`
pub fn spendwatch_home() -> Result<PathBuf> {
    if let Some(dir) = std::env::var_os("SPENDWATCH_HOME").filter(|v| !v.is_empty()) {
        return Ok(PathBuf::from(dir));
    }
    let home = std::env::var("HOME").context("HOME is not set")?;
    Ok(PathBuf::from(home).join(".spendwatch"))
}

pub fn ensure_spendwatch_home() -> Result<PathBuf> {
    let dir = spendwatch_home()?;
    fs::create_dir_all(&dir).with_context(|| format!("create {}", dir.display()))?;
    Ok(dir)
}

pub fn expenses_path() -> Result<PathBuf> {
    Ok(ensure_spendwatch_home()?.join("expenses.json"))
}
