//! Resolved modules and bind outcomes.

use std::path::{Path, PathBuf};

use crate::error::AccessorError;
use crate::name::{DisplayFlags, ModuleName, ModuleReference};

/// Read-only view of a module the binder has loaded.
///
/// Used both for the bound module of a [`BindResult`] and for the parent
/// module that triggered a bind.
pub trait ResolvedModule {
  /// Display name of the module. May fail.
  fn display_name(&self) -> Result<String, AccessorError>;

  /// Loaded from the shared, system-wide location.
  fn is_shared_location(&self) -> bool;

  /// Supplied as in-memory bytes with no backing file.
  fn is_in_memory_only(&self) -> bool;

  /// Location on disk. Only meaningful when neither flag above is set.
  fn file_path(&self) -> Result<PathBuf, AccessorError>;
}

/// Concrete module record.
///
/// The two origin flags are independent so a record may carry contradictory
/// data; classification order is decided by the recorder, not here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedModule {
  pub name: ModuleName,
  pub shared: bool,
  pub in_memory: bool,
  pub path: Option<PathBuf>,
}

impl LoadedModule {
  pub fn shared(name: ModuleName) -> Self {
    Self {
      name,
      shared: true,
      in_memory: false,
      path: None,
    }
  }

  pub fn in_memory(name: ModuleName) -> Self {
    Self {
      name,
      shared: false,
      in_memory: true,
      path: None,
    }
  }

  pub fn from_file(name: ModuleName, path: impl AsRef<Path>) -> Self {
    Self {
      name,
      shared: false,
      in_memory: false,
      path: Some(path.as_ref().to_path_buf()),
    }
  }
}

impl ResolvedModule for LoadedModule {
  fn display_name(&self) -> Result<String, AccessorError> {
    Ok(self.name.display_name(DisplayFlags::VERSION_AND_ARCH))
  }

  fn is_shared_location(&self) -> bool {
    self.shared
  }

  fn is_in_memory_only(&self) -> bool {
    self.in_memory
  }

  fn file_path(&self) -> Result<PathBuf, AccessorError> {
    self.path.clone().ok_or_else(|| AccessorError::MissingPath {
      name: self.name.name.clone(),
    })
  }
}

/// Outcome of a successful bind: the name that was bound and the module it
/// was bound to.
#[derive(Clone, Copy)]
pub struct BindResult<'a> {
  pub name: &'a dyn ModuleReference,
  pub module: &'a dyn ResolvedModule,
}

impl<'a> BindResult<'a> {
  pub fn new(name: &'a dyn ModuleReference, module: &'a dyn ResolvedModule) -> Self {
    Self { name, module }
  }

  /// Bind result for a [`LoadedModule`], reporting the module's own name.
  pub fn for_module(module: &'a LoadedModule) -> Self {
    Self {
      name: &module.name,
      module,
    }
  }
}
