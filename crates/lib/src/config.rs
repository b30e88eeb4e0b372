//! Logging configuration.
//!
//! Whether binding logs are produced at all is a process-wide decision read
//! from the environment once and then carried around as a [`LoggingGate`].
//! Every recorder holds a clone of the gate and reads it on each call, so
//! flipping it takes effect immediately for all recorders sharing it.

use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use thiserror::Error;
use tracing::debug;

use crate::consts::LOG_ENABLED_ENV;
use crate::platform::paths::log_dir;

/// Errors that can occur when reading settings.
#[derive(Debug, Error)]
pub enum ConfigError {
  #[error("invalid value for {var}: '{value}' (expected 1/0, true/false, yes/no, on/off)")]
  InvalidFlag { var: &'static str, value: String },
}

/// Settings for binding logs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogSettings {
  /// Whether binding logs are produced.
  pub enabled: bool,
  /// Directory the file sink writes to.
  pub log_dir: PathBuf,
}

impl LogSettings {
  /// Read settings from `BINDTRACE_LOG` and `BINDTRACE_LOG_DIR`.
  pub fn from_env() -> Result<Self, ConfigError> {
    let enabled = match std::env::var(LOG_ENABLED_ENV) {
      Ok(value) => parse_flag(LOG_ENABLED_ENV, &value)?,
      Err(_) => false,
    };
    let settings = Self {
      enabled,
      log_dir: log_dir(),
    };
    debug!(enabled = settings.enabled, log_dir = %settings.log_dir.display(), "loaded log settings");
    Ok(settings)
  }
}

fn parse_flag(var: &'static str, value: &str) -> Result<bool, ConfigError> {
  match value.trim().to_ascii_lowercase().as_str() {
    "1" | "true" | "yes" | "on" => Ok(true),
    "" | "0" | "false" | "no" | "off" => Ok(false),
    _ => Err(ConfigError::InvalidFlag {
      var,
      value: value.to_string(),
    }),
  }
}

/// Shared switch deciding whether binding logs are produced.
///
/// Clones share the same flag.
#[derive(Debug, Clone, Default)]
pub struct LoggingGate {
  enabled: Arc<AtomicBool>,
}

impl LoggingGate {
  pub fn new(enabled: bool) -> Self {
    Self {
      enabled: Arc::new(AtomicBool::new(enabled)),
    }
  }

  pub fn enabled() -> Self {
    Self::new(true)
  }

  pub fn disabled() -> Self {
    Self::new(false)
  }

  pub fn from_settings(settings: &LogSettings) -> Self {
    Self::new(settings.enabled)
  }

  pub fn is_enabled(&self) -> bool {
    self.enabled.load(Ordering::Acquire)
  }

  pub fn set_enabled(&self, enabled: bool) {
    self.enabled.store(enabled, Ordering::Release);
  }
}
