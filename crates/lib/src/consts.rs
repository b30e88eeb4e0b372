/// Application name used for directory layout.
pub const APP_NAME: &str = "bindtrace";

/// Environment variable that switches binding logs on or off.
pub const LOG_ENABLED_ENV: &str = "BINDTRACE_LOG";

/// Environment variable that overrides the log directory.
pub const LOG_DIR_ENV: &str = "BINDTRACE_LOG_DIR";

/// Extension for log files written by the file sink.
pub const LOG_FILE_EXT: &str = "log";
