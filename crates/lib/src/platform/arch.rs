use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Processor architecture a module was built for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProcessorArch {
  /// Architecture-neutral (IL-only) module.
  Msil,
  X86,
  Amd64,
  Arm,
  Arm64,
}

impl ProcessorArch {
  /// Detect the current CPU architecture at runtime
  pub fn current() -> Option<Self> {
    match std::env::consts::ARCH {
      "x86" => Some(Self::X86),
      "x86_64" => Some(Self::Amd64),
      "arm" => Some(Self::Arm),
      "aarch64" => Some(Self::Arm64),
      _ => None,
    }
  }

  /// Returns the identifier used in display names
  pub fn as_str(&self) -> &'static str {
    match self {
      Self::Msil => "MSIL",
      Self::X86 => "x86",
      Self::Amd64 => "AMD64",
      Self::Arm => "ARM",
      Self::Arm64 => "ARM64",
    }
  }
}

impl fmt::Display for ProcessorArch {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.as_str())
  }
}

/// Error returned when an architecture identifier is not recognized.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown processor architecture: {0}")]
pub struct UnknownArch(pub String);

impl FromStr for ProcessorArch {
  type Err = UnknownArch;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s.to_ascii_lowercase().as_str() {
      "msil" | "neutral" => Ok(Self::Msil),
      "x86" => Ok(Self::X86),
      "amd64" | "x86_64" => Ok(Self::Amd64),
      "arm" => Ok(Self::Arm),
      "arm64" | "aarch64" => Ok(Self::Arm64),
      _ => Err(UnknownArch(s.to_string())),
    }
  }
}
