//! Message sinks.
//!
//! A sink is where a binding log's lines end up. The recorder owns exactly
//! one sink per binding attempt and obtains it from the context's
//! [`SinkFactory`].

mod file;
mod memory;

pub use file::{FileSink, FileSinkFactory};
pub use memory::{MemorySink, MemorySinkFactory, SinkEntry, SinkJournal};

use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::context::{BindRequest, ContextInfo};
use crate::error::SinkError;
use crate::module::ResolvedModule;

/// Category tag attached to sink operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct LogCategory(pub &'static str);

impl LogCategory {
  /// The category every recorder operation uses.
  pub const DEFAULT: LogCategory = LogCategory("default");
}

impl fmt::Display for LogCategory {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.0)
  }
}

/// 32-bit status code. Negative values are failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StatusCode(pub i32);

impl StatusCode {
  pub const SUCCESS: StatusCode = StatusCode(0);

  pub fn is_failure(self) -> bool {
    self.0 < 0
  }
}

impl fmt::Display for StatusCode {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "0x{:08X}", self.0 as u32)
  }
}

impl FromStr for StatusCode {
  type Err = ParseIntError;

  /// Accepts `0x`-prefixed hex or signed decimal.
  fn from_str(s: &str) -> Result<Self, Self::Err> {
    let s = s.trim();
    match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
      Some(hex) => u32::from_str_radix(hex, 16).map(|v| StatusCode(v as i32)),
      None => s.parse::<i32>().map(StatusCode),
    }
  }
}

/// Destination for binding log lines.
pub trait MessageSink {
  /// Record one formatted line.
  fn log_message(&mut self, category: LogCategory, text: &str) -> Result<(), SinkError>;

  /// Record the status code of the attempt.
  fn set_result_code(&mut self, category: LogCategory, code: StatusCode) -> Result<(), SinkError>;

  /// Persist what has been recorded so far.
  fn flush(&mut self, category: LogCategory) -> Result<(), SinkError>;
}

/// Builds a fresh sink for each binding attempt.
pub trait SinkFactory {
  fn create(
    &self,
    context: &ContextInfo,
    request: &BindRequest<'_>,
    parent: Option<&dyn ResolvedModule>,
  ) -> Result<Box<dyn MessageSink>, SinkError>;
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn status_code_display_is_hex() {
    assert_eq!(StatusCode::SUCCESS.to_string(), "0x00000000");
    assert_eq!(StatusCode(0x80070002_u32 as i32).to_string(), "0x80070002");
  }

  #[test]
  fn status_code_parses_hex_and_decimal() {
    assert_eq!("0x80070005".parse::<StatusCode>().unwrap(), StatusCode(0x80070005_u32 as i32));
    assert_eq!("-2147024894".parse::<StatusCode>().unwrap(), StatusCode(0x80070002_u32 as i32));
    assert_eq!("1".parse::<StatusCode>().unwrap(), StatusCode(1));
    assert!("0xZZ".parse::<StatusCode>().is_err());
  }

  #[test]
  fn status_code_sign_decides_outcome() {
    assert!(!StatusCode::SUCCESS.is_failure());
    assert!(!StatusCode(1).is_failure());
    assert!(StatusCode(-1).is_failure());
  }
}
