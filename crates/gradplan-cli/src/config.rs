//! Configuration file management for gradplan.
//!
//! Provides a TOML-based config file at `~/.config/gradplan/config.toml` and
//! a resolution chain: CLI flag > env var > config file > default.

use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Plan file used when nothing else is configured.
pub const DEFAULT_PLAN_FILE: &str = "degree-plan.json";

// -----------------------------------------------------------------------
// Config file types
// -----------------------------------------------------------------------

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct ConfigFile {
    #[serde(default)]
    pub files: FilesSection,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct FilesSection {
    /// Path to the plan document.
    pub plan: Option<String>,
    /// Path to the catalog TOML.
    pub catalog: Option<String>,
}

// -----------------------------------------------------------------------
// Paths
// -----------------------------------------------------------------------

/// Return the gradplan config directory.
///
/// Always uses XDG layout: `$XDG_CONFIG_HOME/gradplan` or
/// `~/.config/gradplan`. We intentionally ignore the platform-specific
/// `dirs::config_dir()` (which returns `~/Library/Application Support` on
/// macOS).
pub fn config_dir() -> PathBuf {
    if let Ok(xdg) = std::env::var("XDG_CONFIG_HOME") {
        return PathBuf::from(xdg).join("gradplan");
    }
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config")
        .join("gradplan")
}

/// Return the path to the gradplan config file.
pub fn config_path() -> PathBuf {
    config_dir().join("config.toml")
}

// -----------------------------------------------------------------------
// Read / write
// -----------------------------------------------------------------------

/// Load and parse the config file. Returns an error if it does not exist.
pub fn load_config() -> Result<ConfigFile> {
    let path = config_path();
    let contents = std::fs::read_to_string(&path)
        .with_context(|| format!("failed to read config file at {}", path.display()))?;
    let config: ConfigFile = toml::from_str(&contents).context("failed to parse config file")?;
    Ok(config)
}

/// Serialize and write the config file, creating parent dirs as needed.
pub fn save_config(config: &ConfigFile) -> Result<()> {
    let path = config_path();
    let dir = config_dir();
    std::fs::create_dir_all(&dir)
        .with_context(|| format!("failed to create config directory {}", dir.display()))?;

    let contents = toml::to_string_pretty(config).context("failed to serialize config")?;
    std::fs::write(&path, &contents)
        .with_context(|| format!("failed to write config file at {}", path.display()))?;

    Ok(())
}

// -----------------------------------------------------------------------
// Resolved config
// -----------------------------------------------------------------------

/// Fully resolved file locations, ready for use.
#[derive(Debug)]
pub struct GradplanConfig {
    pub plan_path: PathBuf,
    /// Catalog location, when one is configured. Commands that need a
    /// catalog fall back to the path recorded in the plan document.
    pub catalog_path: Option<PathBuf>,
}

impl GradplanConfig {
    /// Resolve file locations using the chain: CLI flag > env var > config
    /// file > default.
    ///
    /// - Plan: `cli_plan` > `GRADPLAN_PLAN` env > `files.plan` > [`DEFAULT_PLAN_FILE`]
    /// - Catalog: `cli_catalog` > `GRADPLAN_CATALOG` env > `files.catalog` > none
    pub fn resolve(cli_plan: Option<&str>, cli_catalog: Option<&str>) -> Result<Self> {
        let file_config = load_config().ok();

        let plan_path = if let Some(path) = cli_plan {
            PathBuf::from(path)
        } else if let Ok(path) = std::env::var("GRADPLAN_PLAN") {
            PathBuf::from(path)
        } else if let Some(path) = file_config.as_ref().and_then(|c| c.files.plan.as_deref()) {
            PathBuf::from(path)
        } else {
            PathBuf::from(DEFAULT_PLAN_FILE)
        };

        let catalog_path = if let Some(path) = cli_catalog {
            Some(PathBuf::from(path))
        } else if let Ok(path) = std::env::var("GRADPLAN_CATALOG") {
            Some(PathBuf::from(path))
        } else {
            file_config
                .as_ref()
                .and_then(|c| c.files.catalog.as_deref())
                .map(PathBuf::from)
        };

        Ok(Self {
            plan_path,
            catalog_path,
        })
    }
}

// -----------------------------------------------------------------------
// Tests
// -----------------------------------------------------------------------
