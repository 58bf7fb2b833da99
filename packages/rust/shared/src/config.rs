//! Application configuration for DividendLens.
//!
//! User config lives at `~/.dividendlens/dividendlens.toml`.
//! CLI flags override config file values, which override defaults.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{DividendLensError, Result};
use crate::types::{DEFAULT_INTRO_LABEL, DuplicatePolicy};

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "dividendlens.toml";

/// Default config directory name under the user's home.
const CONFIG_DIR_NAME: &str = ".dividendlens";

// ---------------------------------------------------------------------------
// Config structs (matching dividendlens.toml schema)
// ---------------------------------------------------------------------------

/// Top-level application config, deserialized from TOML.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Analysis document settings.
    #[serde(default)]
    pub analysis: AnalysisConfig,

    /// Dashboard data settings.
    #[serde(default)]
    pub dashboard: DashboardConfig,
}

/// `[analysis]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Path of the free-text analysis document.
    #[serde(default = "default_analysis_path")]
    pub path: String,

    /// Title of the implicit section before the first heading.
    #[serde(default = "default_intro_label")]
    pub intro_label: String,

    /// Handling of headings that clean to an existing title.
    #[serde(default)]
    pub duplicates: DuplicatePolicy,

    /// Sections whose title contains one of these are expanded by default.
    #[serde(default = "default_expand_markers")]
    pub expand_markers: Vec<String>,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            path: default_analysis_path(),
            intro_label: default_intro_label(),
            duplicates: DuplicatePolicy::default(),
            expand_markers: default_expand_markers(),
        }
    }
}

fn default_analysis_path() -> String {
    "Analisi_FDJ.txt".into()
}
fn default_intro_label() -> String {
    DEFAULT_INTRO_LABEL.into()
}
fn default_expand_markers() -> Vec<String> {
    vec!["Dividendi storici".into()]
}

/// `[dashboard]` section.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DashboardConfig {
    /// External TOML dataset replacing the built-in one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dataset_path: Option<String>,
}

// ---------------------------------------------------------------------------
// Config loading
// ---------------------------------------------------------------------------

/// Get the path to the config directory (`~/.dividendlens/`).
pub fn config_dir() -> Result<PathBuf> {
    let home = dirs::home_dir()
        .ok_or_else(|| DividendLensError::config("could not determine home directory"))?;
    Ok(home.join(CONFIG_DIR_NAME))
}

/// Get the path to the config file (`~/.dividendlens/dividendlens.toml`).
pub fn config_file_path() -> Result<PathBuf> {
    Ok(config_dir()?.join(CONFIG_FILE_NAME))
}

/// Load the application config from disk. Returns defaults if the file does not exist.
pub fn load_config() -> Result<AppConfig> {
    let path = config_file_path()?;

    if !path.exists() {
        tracing::debug!(?path, "config file not found, using defaults");
        return Ok(AppConfig::default());
    }

    load_config_from(&path)
}

/// Load the application config from a specific file path.
pub fn load_config_from(path: &Path) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path).map_err(|e| DividendLensError::io(path, e))?;

    toml::from_str(&content).map_err(|e| {
        DividendLensError::config(format!("failed to parse {}: {e}", path.display()))
    })
}

/// Create the config directory and write a default config file.
/// Returns the path to the created file.
pub fn init_config() -> Result<PathBuf> {
    let dir = config_dir()?;
    write_default_config(&dir)
}

fn write_default_config(dir: &Path) -> Result<PathBuf> {
    std::fs::create_dir_all(dir).map_err(|e| DividendLensError::io(dir, e))?;

    let path = dir.join(CONFIG_FILE_NAME);
    let config = AppConfig::default();
    let content =
        toml::to_string_pretty(&config).map_err(|e| DividendLensError::config(e.to_string()))?;

    std::fs::write(&path, content).map_err(|e| DividendLensError::io(&path, e))?;
    tracing::info!(?path, "created default config file");

    Ok(path)
}
