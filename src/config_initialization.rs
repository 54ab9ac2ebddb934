//! Configuration initialization and hierarchy management

use std::path::PathBuf;

use tracing::{debug, info};

use crate::adapters::toml_config::{ClipperConfig, TomlConfigAdapter};
use crate::cli::{Cli, Commands};
use crate::domain::errors::ClipperError;

/// Prefix of every environment override
pub const ENV_PREFIX: &str = "CLIPBATCH_";

/// Effective configuration and where it came from
#[derive(Debug, Clone)]
pub struct LoadedConfiguration {
    pub config: ClipperConfig,
    /// Configuration file that was read, if any
    pub file: Option<PathBuf>,
    /// Number of `CLIPBATCH_*` variables applied
    pub env_overrides: usize,
}

impl LoadedConfiguration {
    /// Emit the loading events once the subscriber is installed
    pub fn log_sources(&self) {
        match &self.file {
            Some(path) => info!("Loaded configuration from {}", path.display()),
            None => debug!("No config file found, using defaults"),
        }
        if self.env_overrides > 0 {
            debug!("Applied {} environment variable overrides", self.env_overrides);
        }
    }
}

/// Build the effective configuration: CLI > Env > File > Defaults
pub fn initialize_configuration(cli: &Cli) -> Result<LoadedConfiguration, ClipperError> {
    load_configuration(cli, |key| std::env::var(key).ok())
}

/// Same as [`initialize_configuration`] with environment lookups through `lookup`
pub fn load_configuration<F>(cli: &Cli, lookup: F) -> Result<LoadedConfiguration, ClipperError>
where
    F: Fn(&str) -> Option<String>,
{
    let (mut config, file) = TomlConfigAdapter::load(cli.config.as_deref())?;
    let env_overrides = apply_env_overrides(&mut config, lookup)?;
    apply_cli_overrides(&mut config, cli);
    config.validate()?;
    Ok(LoadedConfiguration {
        config,
        file,
        env_overrides,
    })
}

/// Apply `CLIPBATCH_*` variables looked up through `lookup`.
///
/// Returns the number of overrides applied.
pub fn apply_env_overrides<F>(config: &mut ClipperConfig, lookup: F) -> Result<usize, ClipperError>
where
    F: Fn(&str) -> Option<String>,
{
    let var = |name: &str| {
        let key = format!("{}{}", ENV_PREFIX, name);
        lookup(&key).map(|value| (key, value))
    };
    let mut applied = 0;

    if let Some((_, value)) = var("YTDLP") {
        config.tools.ytdlp = value;
        applied += 1;
    }
    if let Some((_, value)) = var("FFMPEG") {
        config.tools.ffmpeg = value;
        applied += 1;
    }
    if let Some((_, value)) = var("FFPROBE") {
        config.tools.ffprobe = value;
        applied += 1;
    }
    if let Some((key, value)) = var("FORMAT") {
        config.defaults.format = value
            .parse()
            .map_err(|e| ClipperError::Config(format!("{}: {}", key, e)))?;
        applied += 1;
    }
    if let Some((key, value)) = var("QUALITY") {
        config.defaults.quality = value
            .parse()
            .map_err(|e| ClipperError::Config(format!("{}: {}", key, e)))?;
        applied += 1;
    }
    if let Some((key, value)) = var("KEEP_ORIGINAL") {
        config.defaults.keep_original = parse_bool(&key, &value)?;
        applied += 1;
    }
    if let Some((_, value)) = var("DOWNLOAD_DIR") {
        config.defaults.download_dir = Some(PathBuf::from(value));
        applied += 1;
    }
    if let Some((_, value)) = var("LOG_LEVEL") {
        config.logging.level = value;
        applied += 1;
    }
    if let Some((key, value)) = var("LOG_JSON") {
        config.logging.json = parse_bool(&key, &value)?;
        applied += 1;
    }

    Ok(applied)
}

/// Apply command-line flags on top of everything else
pub fn apply_cli_overrides(config: &mut ClipperConfig, cli: &Cli) {
    if let Some(level) = &cli.log_level {
        config.logging.level = level.clone();
    }
    if cli.log_json {
        config.logging.json = true;
    }

    if let Commands::Run(args) = &cli.command {
        if let Some(format) = args.format {
            config.defaults.format = format;
        }
        if let Some(quality) = args.quality {
            config.defaults.quality = quality;
        }
        if args.keep_original {
            config.defaults.keep_original = true;
        }
        if let Some(dir) = &args.download_dir {
            config.defaults.download_dir = Some(dir.clone());
        }
    }
}

fn parse_bool(key: &str, value: &str) -> Result<bool, ClipperError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        _ => Err(ClipperError::Config(format!(
            "{}: expected a boolean, got '{}'",
            key, value
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{OutputFormat, QualityTier};
    use clap::Parser;
    use std::collections::HashMap;
    use tempfile::TempDir;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_env_overrides() {
        let mut config = ClipperConfig::default();
        let applied = apply_env_overrides(
            &mut config,
            env(&[
                ("CLIPBATCH_FFMPEG", "/usr/local/bin/ffmpeg"),
                ("CLIPBATCH_QUALITY", "720p"),
                ("CLIPBATCH_KEEP_ORIGINAL", "yes"),
                ("CLIPBATCH_LOG_JSON", "1"),
                ("UNRELATED", "x"),
            ]),
        )
        .unwrap();

        assert_eq!(applied, 4);
        assert_eq!(config.tools.ffmpeg, "/usr/local/bin/ffmpeg");
        assert_eq!(config.defaults.quality, QualityTier::P720);
        assert!(config.defaults.keep_original);
        assert!(config.logging.json);
        assert_eq!(config.tools.ytdlp, "yt-dlp");
    }

    #[test]
    fn test_bad_env_values_are_config_errors() {
        let mut config = ClipperConfig::default();
        let err = apply_env_overrides(&mut config, env(&[("CLIPBATCH_FORMAT", "flv")])).unwrap_err();
        assert!(matches!(err, ClipperError::Config(ref m) if m.contains("CLIPBATCH_FORMAT")));

        let err =
            apply_env_overrides(&mut config, env(&[("CLIPBATCH_KEEP_ORIGINAL", "maybe")])).unwrap_err();
        assert!(matches!(err, ClipperError::Config(_)));
    }

    #[test]
    fn test_cli_beats_env() {
        let mut config = ClipperConfig::default();
        apply_env_overrides(
            &mut config,
            env(&[("CLIPBATCH_FORMAT", "avi"), ("CLIPBATCH_LOG_LEVEL", "warn")]),
        )
        .unwrap();

        let cli = Cli::try_parse_from([
            "clipbatch",
            "--log-level",
            "debug",
            "run",
            "--file",
            "a.mp4",
            "--output-dir",
            "out",
            "--format",
            "mov",
            "--keep-original",
        ])
        .unwrap();
        apply_cli_overrides(&mut config, &cli);

        assert_eq!(config.defaults.format, OutputFormat::Mov);
        assert_eq!(config.logging.level, "debug");
        assert!(config.defaults.keep_original);
    }

    #[test]
    fn test_unset_cli_flags_keep_lower_layers() {
        let mut config = ClipperConfig::default();
        config.defaults.format = OutputFormat::Mkv;
        let cli = Cli::try_parse_from(["clipbatch", "run", "--file", "a.mp4", "--output-dir", "out"])
            .unwrap();
        apply_cli_overrides(&mut config, &cli);
        assert_eq!(config.defaults.format, OutputFormat::Mkv);
        assert!(!config.logging.json);
    }

    #[test]
    fn test_loaded_configuration_records_sources() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[defaults]\nformat = \"mkv\"\n").unwrap();

        let cli = Cli::try_parse_from([
            "clipbatch",
            "--config",
            path.to_str().unwrap(),
            "--log-level",
            "warn,clipbatch::tool=debug",
            "check",
        ])
        .unwrap();
        let loaded = load_configuration(&cli, env(&[("CLIPBATCH_FFPROBE", "/opt/ffprobe")])).unwrap();

        assert_eq!(loaded.file, Some(path));
        assert_eq!(loaded.env_overrides, 1);
        assert_eq!(loaded.config.defaults.format, OutputFormat::Mkv);
        assert_eq!(loaded.config.tools.ffprobe, "/opt/ffprobe");
        assert_eq!(loaded.config.logging.level, "warn,clipbatch::tool=debug");
    }

    #[test]
    fn test_unknown_level_word_rejected() {
        let cli = Cli::try_parse_from(["clipbatch", "--log-level", "chatty", "check"]).unwrap();
        let err = load_configuration(&cli, env(&[])).unwrap_err();
        assert!(matches!(err, ClipperError::Config(ref m) if m.contains("chatty")));
    }
}
