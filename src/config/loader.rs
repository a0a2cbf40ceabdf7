//! Configuration Loader - File Loading and Validation
//!
//! Handles loading `config.toml`, validating all parameters,
//! and providing clear error messages for misconfiguration.

use std::path::Path;

use anyhow::{Context, Result};

use super::AppConfig;

/// Default config file looked up in the working directory.
pub const DEFAULT_CONFIG_PATH: &str = "config.toml";

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Load and validate configuration from a TOML file.
///
/// # Errors
/// Returns detailed error if:
/// - File doesn't exist or can't be read
/// - TOML parsing fails
/// - Validation rules are violated
pub fn load_config(path: &Path) -> Result<AppConfig> {
  let content = std::fs::read_to_string(path)
    .with_context(|| format!("Failed to read config file: {}", path.display()))?;

  parse_config(&content).with_context(|| format!("Invalid config file: {}", path.display()))
}

/// The file `load_or_default` reads: the explicit path, else
/// `config.toml` if it exists, else none.
pub fn config_path(explicit: Option<&Path>) -> Option<&Path> {
  explicit.or_else(|| {
    let default_path = Path::new(DEFAULT_CONFIG_PATH);
    default_path.exists().then_some(default_path)
  })
}

/// Load the file chosen by [`config_path`], or fall back to built-in
/// defaults when there is none.
///
/// Runs before logging is installed, so it does not log; callers report
/// the source once the subscriber is up.
pub fn load_or_default(explicit: Option<&Path>) -> Result<AppConfig> {
  config_path(explicit).map_or_else(|| Ok(AppConfig::default()), load_config)
}

/// Parse and validate configuration text.
pub fn parse_config(content: &str) -> Result<AppConfig> {
  let config: AppConfig = toml::from_str(content).context("Failed to parse TOML")?;
  validate_config(&config)?;
  Ok(config)
}

/// Validate all configuration parameters.
fn validate_config(config: &AppConfig) -> Result<()> {
  anyhow::ensure!(
    LOG_LEVELS.contains(&config.app.log_level.to_ascii_lowercase().as_str()),
    "log_level must be one of {:?}, got '{}'",
    LOG_LEVELS,
    config.app.log_level
  );

  anyhow::ensure!(
    !config.storage.data_dir.trim().is_empty(),
    "storage.data_dir must not be empty"
  );

  anyhow::ensure!(
    config.dashboard.refresh_interval_seconds > 0,
    "dashboard.refresh_interval_seconds must be positive"
  );
  anyhow::ensure!(
    config.dashboard.top_lawyers > 0,
    "dashboard.top_lawyers must be positive"
  );

  Ok(())
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::config::LogFormat;

  #[test]
  fn test_load_nonexistent_file() {
    let result = load_config(Path::new("nonexistent.toml"));
    assert!(result.is_err());
  }

  #[test]
  fn test_empty_config_uses_defaults() {
    let config = parse_config("").unwrap();
    assert_eq!(config.app.log_level, "info");
    assert_eq!(config.app.log_format, LogFormat::Compact);
    assert_eq!(config.storage.data_dir, "data");
    assert!(config.storage.seed_sample_data);
    assert_eq!(config.dashboard.refresh_interval_seconds, 300);
    assert_eq!(config.dashboard.top_lawyers, 5);
  }

  #[test]
  fn test_full_config() {
    let config = parse_config(
      r#"
        [app]
        name = "office"
        log_level = "debug"
        log_format = "json"

        [storage]
        data_dir = "/var/lib/ltms"
        seed_sample_data = false

        [dashboard]
        refresh_interval_seconds = 60
        top_lawyers = 3
      "#,
    )
    .unwrap();

    assert_eq!(config.app.name, "office");
    assert_eq!(config.app.log_format, LogFormat::Json);
    assert_eq!(config.storage.data_dir, "/var/lib/ltms");
    assert!(!config.storage.seed_sample_data);
    assert_eq!(config.dashboard.refresh_interval_seconds, 60);
    assert_eq!(config.dashboard.top_lawyers, 3);
  }

  #[test]
  fn test_rejects_bad_values() {
    assert!(parse_config("[app]\nlog_level = \"loud\"").is_err());
    assert!(parse_config("[dashboard]\nrefresh_interval_seconds = 0").is_err());
    assert!(parse_config("[storage]\ndata_dir = \"  \"").is_err());
  }

  #[test]
  fn test_config_path_prefers_explicit_file() {
    let explicit = Path::new("/etc/ltms/custom.toml");
    assert_eq!(config_path(Some(explicit)), Some(explicit));

    let fallback = config_path(None);
    assert_eq!(
      fallback.is_some(),
      Path::new(DEFAULT_CONFIG_PATH).exists(),
      "falls back to config.toml only when it exists"
    );
  }

  #[test]
  fn test_explicit_missing_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("absent.toml");
    assert!(load_or_default(Some(&path)).is_err());
  }

  #[test]
  fn test_load_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "[dashboard]\ntop_lawyers = 10\n").unwrap();

    let config = load_or_default(Some(&path)).unwrap();
    assert_eq!(config.dashboard.top_lawyers, 10);
  }
}
