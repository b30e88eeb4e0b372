use crate::consts::{APP_NAME, LOG_DIR_ENV};
use std::path::PathBuf;

/// Returns the user's home directory
#[cfg(windows)]
pub fn home_dir() -> Option<PathBuf> {
  std::env::var_os("USERPROFILE").map(PathBuf::from)
}

/// Returns the user's home directory
#[cfg(not(windows))]
pub fn home_dir() -> Option<PathBuf> {
  std::env::var_os("HOME").map(PathBuf::from)
}

/// Returns the directory for cache files for the application
#[cfg(windows)]
pub fn cache_dir() -> PathBuf {
  match std::env::var_os("LOCALAPPDATA") {
    Some(local_appdata) => PathBuf::from(local_appdata).join(APP_NAME).join("Cache"),
    None => std::env::temp_dir().join(APP_NAME),
  }
}

/// Returns the directory for cache files for the application
#[cfg(not(windows))]
pub fn cache_dir() -> PathBuf {
  let cache_home = std::env::var("XDG_CACHE_HOME")
    .map(PathBuf::from)
    .ok()
    .or_else(|| home_dir().map(|home| home.join(".cache")));
  match cache_home {
    Some(dir) => dir.join(APP_NAME),
    None => std::env::temp_dir().join(APP_NAME),
  }
}

/// Returns the directory binding logs are written to.
///
/// `BINDTRACE_LOG_DIR` wins over the platform cache directory.
pub fn log_dir() -> PathBuf {
  match std::env::var_os(LOG_DIR_ENV) {
    Some(dir) if !dir.is_empty() => PathBuf::from(dir),
    _ => cache_dir().join("logs"),
  }
}
