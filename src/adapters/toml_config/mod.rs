// TOML config adapter - Configuration management using TOML files

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use crate::domain::errors::*;
use crate::domain::model::{OutputFormat, QualityTier};
use crate::utils::logging::is_valid_level;

const CONFIG_DIR: &str = "clipbatch";
const CONFIG_FILE: &str = "config.toml";

/// Program names or paths of the external tools
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ToolsConfig {
    pub ytdlp: String,
    pub ffmpeg: String,
    pub ffprobe: String,
}

impl Default for ToolsConfig {
    fn default() -> Self {
        Self {
            ytdlp: "yt-dlp".to_string(),
            ffmpeg: "ffmpeg".to_string(),
            ffprobe: "ffprobe".to_string(),
        }
    }
}

/// Defaults for options the command line may leave out
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DefaultsConfig {
    pub format: OutputFormat,
    pub quality: QualityTier,
    pub keep_original: bool,
    /// Where remote sources are downloaded; the output directory when unset
    pub download_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingConfig {
    pub level: String,
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

/// Complete configuration
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ClipperConfig {
    pub tools: ToolsConfig,
    pub defaults: DefaultsConfig,
    pub logging: LoggingConfig,
}

impl ClipperConfig {
    /// Validate values serde cannot check on its own
    pub fn validate(&self) -> Result<(), ClipperError> {
        if !is_valid_level(&self.logging.level) {
            return Err(ClipperError::Config(format!(
                "Invalid log level: {}. Use trace, debug, info, warn, error or off, optionally as target=level directives",
                self.logging.level
            )));
        }
        for (key, value) in [
            ("tools.ytdlp", &self.tools.ytdlp),
            ("tools.ffmpeg", &self.tools.ffmpeg),
            ("tools.ffprobe", &self.tools.ffprobe),
        ] {
            if value.trim().is_empty() {
                return Err(ClipperError::Config(format!("{} cannot be empty", key)));
            }
        }
        Ok(())
    }
}

/// TOML configuration loader
pub struct TomlConfigAdapter;

impl TomlConfigAdapter {
    /// Parse configuration from TOML text
    pub fn parse(content: &str) -> Result<ClipperConfig, ClipperError> {
        let config: ClipperConfig = toml::from_str(content)
            .map_err(|e| ClipperError::Config(format!("Failed to parse TOML config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Load a configuration file that must exist
    pub fn load_file(path: &Path) -> Result<ClipperConfig, ClipperError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            ClipperError::Config(format!(
                "Failed to read config file {}: {}",
                path.display(),
                e
            ))
        })?;
        Self::parse(&content)
    }

    /// Load `explicit` if given, else the default file if present, else defaults.
    ///
    /// Also returns the file that was read, if any. Nothing is logged here
    /// since this runs before the subscriber exists.
    pub fn load(explicit: Option<&Path>) -> Result<(ClipperConfig, Option<PathBuf>), ClipperError> {
        if let Some(path) = explicit {
            return Ok((Self::load_file(path)?, Some(path.to_path_buf())));
        }
        match Self::default_config_path() {
            Some(path) if path.is_file() => Ok((Self::load_file(&path)?, Some(path))),
            _ => Ok((ClipperConfig::default(), None)),
        }
    }

    /// `%APPDATA%`, then `$XDG_CONFIG_HOME`, then `~/.config`
    pub fn default_config_path() -> Option<PathBuf> {
        let base = std::env::var_os("APPDATA")
            .map(PathBuf::from)
            .or_else(|| std::env::var_os("XDG_CONFIG_HOME").map(PathBuf::from))
            .or_else(|| std::env::var_os("HOME").map(|home| PathBuf::from(home).join(".config")))?;
        Some(base.join(CONFIG_DIR).join(CONFIG_FILE))
    }
}
