//! Module references and their display names.
//!
//! A binding request either names a module (`Foo, Version=1.0`) or points at
//! a raw path. [`ModuleReference`] is the read-only view the recorder needs
//! of a named request; [`ModuleName`] is the concrete implementation.

mod types;

pub use types::{ModuleName, NameParseError, Version};

/// Selects which optional parts appear in a rendered display name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DisplayFlags {
  pub version: bool,
  pub architecture: bool,
  pub retargetable: bool,
}

impl DisplayFlags {
  /// Name only.
  pub const NAME: Self = Self {
    version: false,
    architecture: false,
    retargetable: false,
  };

  /// Version and architecture, used when reporting bound modules.
  pub const VERSION_AND_ARCH: Self = Self {
    version: true,
    architecture: true,
    retargetable: false,
  };

  /// Everything, used for the pre-bind request line.
  pub const FULL: Self = Self {
    version: true,
    architecture: true,
    retargetable: true,
  };
}

/// Read-only view of a named binding request.
pub trait ModuleReference {
  /// Whether the request pins an explicit version.
  fn has_version(&self) -> bool;

  /// Render the display name with the parts selected by `flags`.
  fn display_name(&self, flags: DisplayFlags) -> String;
}
