use crate::domain::{Category, TagOrder};
use crate::error::{ChangelogError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// File name looked up in the working directory
pub const LOCAL_CONFIG_FILE: &str = "changelog-handler.toml";

/// File name looked up in the user config directory
pub const USER_CONFIG_FILE: &str = ".changelog-handler.toml";

/// Represents the complete configuration for changelog-handler.
///
/// Contains the changelog file name and output preferences.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Config {
    #[serde(default = "default_changelog_file")]
    pub changelog_file: String,

    #[serde(default)]
    pub output: OutputConfig,
}

/// Returns the default changelog file name.
fn default_changelog_file() -> String {
    "CHANGELOG.md".to_string()
}

/// Returns the canonical category order as names.
fn default_tag_order() -> Vec<String> {
    Category::ALL.iter().map(|c| c.to_string()).collect()
}

/// Configuration for how extracted changes are written.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct OutputConfig {
    #[serde(default = "default_tag_order")]
    pub tag_order: Vec<String>,

    #[serde(default)]
    pub add_link: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        OutputConfig {
            tag_order: default_tag_order(),
            add_link: false,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            changelog_file: default_changelog_file(),
            output: OutputConfig::default(),
        }
    }
}

impl Config {
    /// Category order from the configuration, validated.
    pub fn tag_order(&self) -> Result<TagOrder> {
        TagOrder::from_names(&self.output.tag_order)
            .map_err(|e| ChangelogError::config(format!("output.tag_order: {}", e)))
    }
}

/// Loads configuration from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter
/// 2. `changelog-handler.toml` in current directory
/// 3. `.changelog-handler.toml` in user config directory
/// 4. Default configuration if no file found
///
/// # Returns
/// * `Ok(Config)` - Loaded or default configuration
/// * `Err` - If file exists but cannot be read or parsed
pub fn load_config(config_path: Option<&str>) -> Result<Config> {
    let config_str = if let Some(path) = config_path {
        fs::read_to_string(path)?
    } else if Path::new(LOCAL_CONFIG_FILE).exists() {
        fs::read_to_string(LOCAL_CONFIG_FILE)?
    } else if let Some(config_dir) = dirs::config_dir() {
        let config_path = config_dir.join(USER_CONFIG_FILE);
        if config_path.exists() {
            fs::read_to_string(config_path)?
        } else {
            return Ok(Config::default());
        }
    } else {
        return Ok(Config::default());
    };

    let config: Config =
        toml::from_str(&config_str).map_err(|e| ChangelogError::config(e.to_string()))?;
    tracing::debug!(?config, "loaded configuration");
    Ok(config)
}
