use anyhow::{Context, Result};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use spendwatch_core::{parse_timezone, DetectionConfig};
use std::fs;
use std::path::{Path, PathBuf};

use crate::state::ensure_spendwatch_home;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub detection: DetectionConfig,
    #[serde(default)]
    pub profile: ProfileSection,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileSection {
    /// IANA timezone used to decide what "today" is
    #[serde(default = "default_timezone")]
    pub timezone: String,
}

impl Default for ProfileSection {
    fn default() -> Self {
        Self {
            timezone: default_timezone(),
        }
    }
}

fn default_timezone() -> String {
    "Asia/Kolkata".to_string()
}

impl Config {
    pub fn timezone(&self) -> Result<Tz> {
        parse_timezone(&self.profile.timezone)
    }

    /// Detection settings with any command-line overrides applied.
    /// With `clamp`, out-of-range overrides are pulled into range instead
    /// of rejected.
    pub fn detection_with(
        &self,
        window_days: Option<u32>,
        sensitivity: Option<f64>,
        min_history: Option<usize>,
        clamp: bool,
    ) -> Result<DetectionConfig> {
        let base = self.detection;
        let cfg = DetectionConfig {
            window_days: window_days.unwrap_or(base.window_days),
            sensitivity: sensitivity.unwrap_or(base.sensitivity),
            min_history: min_history.unwrap_or(base.min_history),
        };
        if clamp {
            return Ok(cfg.clamped());
        }
        cfg.validate().context("invalid detection settings")?;
        Ok(cfg)
    }
}

pub fn config_path() -> Result<PathBuf> {
    Ok(ensure_spendwatch_home()?.join("config.toml"))
}

pub fn load_config() -> Result<Config> {
    load_config_from(&config_path()?)
}

pub fn load_config_from(p: &Path) -> Result<Config> {
    if !p.exists() {
        return Ok(Config::default());
    }
    let s = fs::read_to_string(p).with_context(|| format!("read {}", p.display()))?;
    let cfg: Config = toml::from_str(&s).with_context(|| format!("parse {}", p.display()))?;
    cfg.detection
        .validate()
        .with_context(|| format!("[detection] in {}", p.display()))?;
    cfg.timezone()
        .with_context(|| format!("[profile] in {}", p.display()))?;
    tracing::debug!(path = %p.display(), "loaded config");
    Ok(cfg)
}

pub fn save_config_to(cfg: &Config, p: &Path) -> Result<()> {
    let s = toml::to_string_pretty(cfg).context("serialize config")?;
    fs::write(p, s).with_context(|| format!("write {}", p.display()))?;
    Ok(())
}

pub fn init_config() -> Result<()> {
    let p = config_path()?;
    if p.exists() {
        println!("Config already exists: {}", p.display());
        return Ok(());
    }
    save_config_to(&Config::default(), &p)?;
    println!("Wrote {}", p.display());
    Ok(())
}
