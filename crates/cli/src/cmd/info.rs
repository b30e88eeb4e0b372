//! Info command implementation.
//!
//! Shows whether binding logs are on and where they are written.

use anyhow::Result;
use bindtrace_lib::LogSettings;
use bindtrace_lib::platform::host_arch;

use crate::output::{on_off, print_info, print_json, print_stat};

pub fn cmd_info(json: bool) -> Result<()> {
  let settings = LogSettings::from_env()?;
  let arch = host_arch()
    .map(|arch| arch.to_string())
    .unwrap_or_else(|| "unknown".to_string());

  if json {
    let json_output = serde_json::json!({
      "enabled": settings.enabled,
      "log_dir": settings.log_dir,
      "arch": arch,
    });
    return print_json(&json_output);
  }

  print_info("Binding log settings:");
  print_stat("Logging", on_off(settings.enabled));
  print_stat("Log directory", &settings.log_dir.display().to_string());
  print_stat("Processor architecture", &arch);
  Ok(())
}
