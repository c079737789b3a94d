//! Runtime settings: optional TOML file, then environment overrides.

use anyhow::Context;
use serde::Deserialize;
use std::path::{Path, PathBuf};

pub const CONFIG_PATH_ENV: &str = "SEKOLAHD_CONFIG";
pub const SEED_ENV: &str = "SEKOLAHD_SEED";
pub const NOTICE_SECS_ENV: &str = "SEKOLAHD_NOTICE_SECS";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Load the built-in school roster at startup.
    pub seed_mock_data: bool,
    /// How long the host should show an import notice before dismissing it.
    pub notice_dismiss_secs: u64,
    pub log_filter: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            seed_mock_data: true,
            notice_dismiss_secs: 5,
            log_filter: "info".to_string(),
        }
    }
}

impl Config {
    pub fn notice_dismiss_ms(&self) -> u64 {
        self.notice_dismiss_secs.saturating_mul(1000)
    }

    pub fn from_toml_str(text: &str) -> anyhow::Result<Self> {
        toml::from_str(text).context("invalid config file")
    }

    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.to_string_lossy()))?;
        Self::from_toml_str(&text)
    }

    /// Reads the file named by `SEKOLAHD_CONFIG` (if any) and applies env overrides.
    pub fn load() -> anyhow::Result<(Self, Option<PathBuf>)> {
        let path = std::env::var_os(CONFIG_PATH_ENV).map(PathBuf::from);
        let mut cfg = match path.as_deref() {
            Some(p) => Self::from_file(p)?,
            None => Self::default(),
        };
        cfg.apply_overrides(
            std::env::var(SEED_ENV).ok().as_deref(),
            std::env::var(NOTICE_SECS_ENV).ok().as_deref(),
        )?;
        Ok((cfg, path))
    }

    pub fn apply_overrides(
        &mut self,
        seed: Option<&str>,
        notice_secs: Option<&str>,
    ) -> anyhow::Result<()> {
        if let Some(raw) = seed {
            self.seed_mock_data = parse_boolish(raw)
                .with_context(|| format!("{} must be a boolean, got {:?}", SEED_ENV, raw))?;
        }
        if let Some(raw) = notice_secs {
            self.notice_dismiss_secs = raw
                .trim()
                .parse::<u64>()
                .with_context(|| format!("{} must be a whole number, got {:?}", NOTICE_SECS_ENV, raw))?;
        }
        Ok(())
    }
}

fn parse_boolish(s: &str) -> Option<bool> {
    match s.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "y" => Some(true),
        "0" | "false" | "no" | "n" => Some(false),
        _ => None,
    }
}
