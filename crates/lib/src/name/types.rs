use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::{DisplayFlags, ModuleReference};
use crate::platform::ProcessorArch;

/// Errors that can occur when parsing a display name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NameParseError {
  #[error("display name has an empty module name")]
  EmptyName,

  #[error("display name starts with '{0}' instead of a module name")]
  MissingName(String),

  #[error("malformed display name token '{0}' (expected Key=Value)")]
  MalformedToken(String),

  #[error("display name key '{0}' appears more than once")]
  DuplicateKey(String),

  #[error("invalid version '{0}' (expected 2 to 4 numeric components)")]
  InvalidVersion(String),

  #[error(transparent)]
  UnknownArchitecture(#[from] crate::platform::UnknownArch),

  #[error("invalid Retargetable value '{0}' (expected Yes or No)")]
  InvalidRetargetable(String),
}

/// Module version with two to four components.
///
/// Only the components that were supplied are rendered, so `1.0` stays `1.0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Version {
  pub major: u16,
  pub minor: u16,
  pub build: Option<u16>,
  pub revision: Option<u16>,
}

impl Version {
  pub fn new(major: u16, minor: u16) -> Self {
    Self {
      major,
      minor,
      build: None,
      revision: None,
    }
  }

  pub fn full(major: u16, minor: u16, build: u16, revision: u16) -> Self {
    Self {
      major,
      minor,
      build: Some(build),
      revision: Some(revision),
    }
  }
}

impl fmt::Display for Version {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}.{}", self.major, self.minor)?;
    if let Some(build) = self.build {
      write!(f, ".{}", build)?;
      if let Some(revision) = self.revision {
        write!(f, ".{}", revision)?;
      }
    }
    Ok(())
  }
}

impl FromStr for Version {
  type Err = NameParseError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    let invalid = || NameParseError::InvalidVersion(s.to_string());
    let parts = s
      .trim()
      .split('.')
      .map(|part| part.parse::<u16>().map_err(|_| invalid()))
      .collect::<Result<Vec<_>, _>>()?;

    match parts.as_slice() {
      [major, minor] => Ok(Self::new(*major, *minor)),
      [major, minor, build] => Ok(Self {
        build: Some(*build),
        ..Self::new(*major, *minor)
      }),
      [major, minor, build, revision] => Ok(Self::full(*major, *minor, *build, *revision)),
      _ => Err(invalid()),
    }
  }
}

/// A named module reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleName {
  pub name: String,
  pub version: Option<Version>,
  pub arch: Option<ProcessorArch>,
  pub retargetable: bool,
}

impl ModuleName {
  pub fn new(name: impl Into<String>) -> Self {
    Self {
      name: name.into(),
      version: None,
      arch: None,
      retargetable: false,
    }
  }

  pub fn with_version(mut self, version: Version) -> Self {
    self.version = Some(version);
    self
  }

  pub fn with_arch(mut self, arch: ProcessorArch) -> Self {
    self.arch = Some(arch);
    self
  }

  pub fn with_retargetable(mut self, retargetable: bool) -> Self {
    self.retargetable = retargetable;
    self
  }
}

impl ModuleReference for ModuleName {
  fn has_version(&self) -> bool {
    self.version.is_some()
  }

  fn display_name(&self, flags: DisplayFlags) -> String {
    let mut out = self.name.clone();
    if flags.version
      && let Some(version) = &self.version
    {
      out.push_str(&format!(", Version={}", version));
    }
    if flags.architecture
      && let Some(arch) = &self.arch
    {
      out.push_str(&format!(", ProcessorArchitecture={}", arch));
    }
    if flags.retargetable && self.retargetable {
      out.push_str(", Retargetable=Yes");
    }
    out
  }
}

impl fmt::Display for ModuleName {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.display_name(DisplayFlags::FULL))
  }
}

impl FromStr for ModuleName {
  type Err = NameParseError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    let mut tokens = s.split(',').map(str::trim);
    let name = tokens.next().unwrap_or_default();
    if name.is_empty() {
      return Err(NameParseError::EmptyName);
    }
    if name.contains('=') {
      return Err(NameParseError::MissingName(name.to_string()));
    }

    let mut module = ModuleName::new(name);
    let mut seen: Vec<String> = Vec::new();

    for token in tokens {
      let Some((key, value)) = token.split_once('=') else {
        return Err(NameParseError::MalformedToken(token.to_string()));
      };
      let key = key.trim().to_ascii_lowercase();
      let value = value.trim();
      if seen.contains(&key) {
        return Err(NameParseError::DuplicateKey(key));
      }

      match key.as_str() {
        "version" => module.version = Some(value.parse()?),
        "processorarchitecture" => module.arch = Some(value.parse()?),
        "retargetable" => {
          module.retargetable = match value.to_ascii_lowercase().as_str() {
            "yes" => true,
            "no" => false,
            _ => return Err(NameParseError::InvalidRetargetable(value.to_string())),
          }
        }
        // Culture, PublicKeyToken and friends are not rendered.
        _ => {}
      }
      seen.push(key);
    }

    Ok(module)
  }
}
