use std::{fs, path::Path};

use anyhow::Context as _;
use logger::LogSeverity;
use serde::Deserialize;

/// Settings document accepted from `--config` and `--config-url`.
#[derive(Deserialize, Debug, Default, Clone, Copy, PartialEq)]
#[serde(default)]
pub struct Config {
    pub min_severity: LogSeverity,
}

impl Config {
    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        Self::from_json(&text).with_context(|| format!("Invalid config file {}", path.display()))
    }

    pub fn from_url(url: &str) -> anyhow::Result<Self> {
        json_fetch::get_json(url).with_context(|| format!("Failed to fetch config from {url}"))
    }

    pub fn from_json(text: &str) -> anyhow::Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Later sources win: file, then URL, then an explicit level.
    pub fn resolve(
        file: Option<&Path>,
        url: Option<&str>,
        level: Option<LogSeverity>,
    ) -> anyhow::Result<Self> {
        let mut config = Config::default();
        if let Some(path) = file {
            config = Self::from_file(path)?;
        }
        if let Some(url) = url {
            config = Self::from_url(url)?;
        }
        if let Some(level) = level {
            config.min_severity = level;
        }
        Ok(config)
    }
}
