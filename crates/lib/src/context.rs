//! Binding contexts.
//!
//! A [`BindingContext`] is one logical resolution scope. It owns the single
//! [`BindingLog`] reused by every bind attempt in the scope, together with
//! the factory that produces a sink per attempt.

use std::fmt;

use crate::binding_log::BindingLog;
use crate::config::LoggingGate;
use crate::messages::MessageCatalog;
use crate::name::{DisplayFlags, ModuleReference};
use crate::sink::SinkFactory;

/// Identity of a binding context, handed to sink factories.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContextInfo {
  pub name: String,
}

impl ContextInfo {
  pub fn new(name: impl Into<String>) -> Self {
    Self { name: name.into() }
  }
}

/// What a bind attempt asked for: a module name or a raw path.
#[derive(Clone, Copy)]
pub enum BindRequest<'a> {
  Name(&'a dyn ModuleReference),
  Path(&'a str),
}

impl fmt::Display for BindRequest<'_> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      BindRequest::Name(name) => f.write_str(&name.display_name(DisplayFlags::FULL)),
      BindRequest::Path(path) => f.write_str(path),
    }
  }
}

impl fmt::Debug for BindRequest<'_> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      BindRequest::Name(_) => f.debug_tuple("Name").field(&self.to_string()).finish(),
      BindRequest::Path(path) => f.debug_tuple("Path").field(path).finish(),
    }
  }
}

/// Owner of one binding log and its sink factory.
pub struct BindingContext {
  info: ContextInfo,
  factory: Box<dyn SinkFactory>,
  log: BindingLog,
}

impl BindingContext {
  pub fn new(name: impl Into<String>, gate: LoggingGate, factory: Box<dyn SinkFactory>) -> Self {
    Self {
      info: ContextInfo::new(name),
      factory,
      log: BindingLog::new(gate),
    }
  }

  /// Replace the message catalog used by this context's binding log.
  pub fn with_catalog(mut self, catalog: Box<dyn MessageCatalog>) -> Self {
    self.log.set_catalog(catalog);
    self
  }

  pub fn info(&self) -> &ContextInfo {
    &self.info
  }

  /// The binding log owned by this context. Always the same instance.
  pub fn binding_log(&mut self) -> &mut BindingLog {
    &mut self.log
  }

  pub(crate) fn parts_mut(&mut self) -> (&ContextInfo, &dyn SinkFactory, &mut BindingLog) {
    (&self.info, self.factory.as_ref(), &mut self.log)
  }
}

impl fmt::Debug for BindingContext {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("BindingContext")
      .field("info", &self.info)
      .field("log", &self.log)
      .finish_non_exhaustive()
  }
}
