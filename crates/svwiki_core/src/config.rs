use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::store::Namespace;

pub const DEFAULT_DATA_DIR: &str = "json";

#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq, Eq)]
pub struct SiteConfig {
    #[serde(default)]
    pub data: DataSection,
}

#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq, Eq)]
pub struct DataSection {
    pub dir: Option<PathBuf>,
    pub namespace: Option<String>,
}

impl SiteConfig {
    /// Resolve the data directory: env SVWIKI_DATA_DIR > config > default.
    pub fn data_dir(&self) -> PathBuf {
        if let Ok(value) = env::var("SVWIKI_DATA_DIR") {
            let trimmed = value.trim();
            if !trimmed.is_empty() {
                return PathBuf::from(trimmed);
            }
        }
        self.data
            .dir
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR))
    }

    /// Resolve the content namespace: env SVWIKI_NAMESPACE > config > vanilla.
    pub fn namespace(&self) -> Result<Namespace> {
        if let Ok(value) = env::var("SVWIKI_NAMESPACE") {
            let trimmed = value.trim();
            if !trimmed.is_empty() {
                return Namespace::parse(trimmed);
            }
        }
        match &self.data.namespace {
            Some(value) => Namespace::parse(value),
            None => Ok(Namespace::default()),
        }
    }
}

/// Load and parse a SiteConfig from a TOML file. Returns default if file doesn't exist.
pub fn load_config(config_path: &Path) -> Result<SiteConfig> {
    if !config_path.exists() {
        return Ok(SiteConfig::default());
    }
    let content = fs::read_to_string(config_path)
        .with_context(|| format!("failed to read {}", config_path.display()))?;
    let parsed: SiteConfig = toml::from_str(&content)
        .with_context(|| format!("failed to parse {}", config_path.display()))?;
    Ok(parsed)
}
