// File: src/config.rs
// Purpose: Configuration parsing from routefs.toml

use anyhow::{Context, Result};
use routefs_router::FileFilter;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Default location of the configuration file
pub const CONFIG_FILE: &str = "routefs.toml";

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub routing: RoutingConfig,
}

/// Routing configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoutingConfig {
    /// Directory containing route files (default: "routes")
    #[serde(default = "default_dir")]
    pub dir: String,

    /// Regex a route file name must match; takes precedence over `extension`
    #[serde(default)]
    pub pattern: Option<String>,

    /// Extension of route files (default: "js")
    #[serde(default)]
    pub extension: Option<String>,

    /// Whether symbolic links are followed while scanning
    #[serde(default = "default_false")]
    pub follow_links: bool,
}

fn default_dir() -> String {
    crate::loader::DEFAULT_TARGET.to_string()
}

fn default_false() -> bool {
    false
}

impl Default for RoutingConfig {
    fn default() -> Self {
        Self {
            dir: default_dir(),
            pattern: None,
            extension: None,
            follow_links: false,
        }
    }
}

impl RoutingConfig {
    /// Build the file filter this configuration describes
    pub fn filter(&self) -> routefs_router::Result<FileFilter> {
        match (&self.pattern, &self.extension) {
            (Some(pattern), _) => FileFilter::pattern(pattern),
            (None, Some(extension)) => Ok(FileFilter::extension(extension)),
            (None, None) => Ok(FileFilter::default()),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        // If file doesn't exist or is empty, return default config
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;

        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {:?}", path))?;

        Ok(config)
    }

    /// Load configuration from default path (./routefs.toml)
    pub fn load_default() -> Result<Self> {
        Self::load(CONFIG_FILE)
    }
}
