//! Configuration Module - TOML-based Application Configuration
//!
//! Loads and validates configuration from `config.toml`. Every field has
//! a default, so an absent file or an empty table is a valid config.
//! Command-line flags override file values in `main`.

pub mod loader;

use serde::Deserialize;

/// Top-level configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
  /// Application identity and logging.
  #[serde(default)]
  pub app: AppSettings,
  /// Where and how collections are stored.
  #[serde(default)]
  pub storage: StorageConfig,
  /// Dashboard refresh behaviour.
  #[serde(default)]
  pub dashboard: DashboardConfig,
}

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
  /// Human-readable single-line output.
  #[default]
  Compact,
  /// Structured JSON lines.
  Json,
}

/// Application identity configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AppSettings {
  /// Human-readable instance name.
  #[serde(default = "default_name")]
  pub name: String,
  /// Log level (trace, debug, info, warn, error).
  #[serde(default = "default_log_level")]
  pub log_level: String,
  #[serde(default)]
  pub log_format: LogFormat,
}

impl Default for AppSettings {
  fn default() -> Self {
    Self {
      name: default_name(),
      log_level: default_log_level(),
      log_format: LogFormat::default(),
    }
  }
}

/// Persistence configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
  /// Directory holding one JSON file per storage key.
  #[serde(default = "default_data_dir")]
  pub data_dir: String,
  /// Seed sample lawyers/transactions into an empty store.
  #[serde(default = "default_true")]
  pub seed_sample_data: bool,
}

impl Default for StorageConfig {
  fn default() -> Self {
    Self {
      data_dir: default_data_dir(),
      seed_sample_data: true,
    }
  }
}

/// Dashboard configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DashboardConfig {
  /// Seconds between dashboard refreshes in watch mode.
  #[serde(default = "default_refresh_interval")]
  pub refresh_interval_seconds: u64,
  /// Number of lawyers listed in the dashboard ranking.
  #[serde(default = "default_top_lawyers")]
  pub top_lawyers: usize,
}

impl Default for DashboardConfig {
  fn default() -> Self {
    Self {
      refresh_interval_seconds: default_refresh_interval(),
      top_lawyers: default_top_lawyers(),
    }
  }
}

// Default value functions for serde

fn default_name() -> String {
  "ltms".to_string()
}

fn default_log_level() -> String {
  "info".to_string()
}

fn default_data_dir() -> String {
  "data".to_string()
}

fn default_true() -> bool {
  true
}

fn default_refresh_interval() -> u64 {
  300 // 5 minutes
}

fn default_top_lawyers() -> usize {
  5
}
