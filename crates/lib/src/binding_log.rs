//! Binding log recorder.
//!
//! A [`BindingLog`] traces one bind attempt at a time. Each attempt starts
//! with [`BindingLog::create_in_context`] (or the path variant), which drops
//! the previous attempt's sink, obtains a new one from the context and
//! writes the pre-bind state block:
//!
//! ```text
//! === Pre-bind state information ===
//! LOG: DisplayName = Foo, Version=1.0 (Fully-specified)
//! Calling module: (Unknown).
//! ===
//! ```
//!
//! The binder then reports the outcome with [`BindingLog::log_result`] or
//! [`BindingLog::log_status`] and finishes with [`BindingLog::flush`].
//!
//! Every operation is a successful no-op while the [`LoggingGate`] is
//! closed or no sink is attached, so callers never need to check first.

use std::fmt;

use tracing::debug;

use crate::config::LoggingGate;
use crate::context::{BindRequest, BindingContext, ContextInfo};
use crate::error::{BindLogError, SinkError};
use crate::messages::{DefaultCatalog, MessageCatalog, MessageId, format_template};
use crate::module::{BindResult, ResolvedModule};
use crate::name::{DisplayFlags, ModuleReference};
use crate::sink::{LogCategory, MessageSink, SinkFactory, StatusCode};

/// Records binding decisions into the sink of the current attempt.
pub struct BindingLog {
  gate: LoggingGate,
  catalog: Box<dyn MessageCatalog>,
  sink: Option<Box<dyn MessageSink>>,
}

impl BindingLog {
  pub fn new(gate: LoggingGate) -> Self {
    Self::with_catalog(gate, Box::new(DefaultCatalog))
  }

  pub fn with_catalog(gate: LoggingGate, catalog: Box<dyn MessageCatalog>) -> Self {
    Self {
      gate,
      catalog,
      sink: None,
    }
  }

  pub(crate) fn set_catalog(&mut self, catalog: Box<dyn MessageCatalog>) {
    self.catalog = catalog;
  }

  /// Whether binding logs are being produced at all.
  pub fn is_active(&self) -> bool {
    self.gate.is_enabled()
  }

  /// Whether a sink is attached.
  pub fn has_sink(&self) -> bool {
    self.sink.is_some()
  }

  fn is_recording(&self) -> bool {
    self.is_active() && self.sink.is_some()
  }

  /// Start a new attempt in `context` for a named request.
  ///
  /// Fails with [`BindLogError::InvalidArgument`] when `name` is `None`,
  /// before the current sink is touched.
  pub fn create_in_context(
    context: &mut BindingContext,
    name: Option<&dyn ModuleReference>,
    parent: Option<&dyn ResolvedModule>,
  ) -> Result<(), BindLogError> {
    let (info, factory, log) = context.parts_mut();
    if !log.is_active() {
      return Ok(());
    }
    let name = name.ok_or(BindLogError::InvalidArgument("module name"))?;
    log.initialize(info, factory, BindRequest::Name(name), parent)
  }

  /// Start a new attempt in `context` for a request by raw path.
  pub fn create_in_context_for_path(
    context: &mut BindingContext,
    path: &str,
    parent: Option<&dyn ResolvedModule>,
  ) -> Result<(), BindLogError> {
    let (info, factory, log) = context.parts_mut();
    if !log.is_active() {
      return Ok(());
    }
    log.initialize(info, factory, BindRequest::Path(path), parent)
  }

  fn initialize(
    &mut self,
    info: &ContextInfo,
    factory: &dyn SinkFactory,
    request: BindRequest<'_>,
    parent: Option<&dyn ResolvedModule>,
  ) -> Result<(), BindLogError> {
    // The old sink must be gone even if the factory fails below.
    self.invalidate();

    let sink = factory.create(info, &request, parent)?;
    self.sink = Some(sink);
    debug!(context = %info.name, request = %request, "attached binding log sink");

    self.log_pre_bind_state(&request, parent)
  }

  /// Release the current sink, if any.
  pub fn invalidate(&mut self) {
    if let Some(sink) = self.sink.take() {
      drop(sink);
      debug!("released binding log sink");
    }
  }

  fn log_pre_bind_state(
    &mut self,
    request: &BindRequest<'_>,
    parent: Option<&dyn ResolvedModule>,
  ) -> Result<(), BindLogError> {
    let line = self.message(MessageId::PreBindStateBegin)?;
    self.log(&line)?;

    let line = match request {
      BindRequest::Name(name) => {
        let id = if name.has_version() {
          MessageId::PreBindStateByName
        } else {
          MessageId::PreBindStateByNamePartial
        };
        self.format(id, &name.display_name(DisplayFlags::FULL))?
      }
      BindRequest::Path(path) => self.format(MessageId::PreBindStateWhereRef, path)?,
    };
    self.log(&line)?;

    let line = match parent {
      Some(parent) => {
        let parent_name = parent.display_name()?;
        self.format(MessageId::PreBindStateCaller, &parent_name)?
      }
      None => self.message(MessageId::PreBindStateCallerUnknown)?,
    };
    self.log(&line)?;

    let line = self.message(MessageId::PreBindStateEnd)?;
    self.log(&line)
  }

  fn message(&self, id: MessageId) -> Result<String, BindLogError> {
    Ok(self.catalog.load(id)?.into_owned())
  }

  fn format(&self, id: MessageId, value: &str) -> Result<String, BindLogError> {
    let template = self.catalog.load(id)?;
    Ok(format_template(&template, value))
  }

  /// Write one line to the sink.
  pub fn log(&mut self, text: &str) -> Result<(), BindLogError> {
    if !self.is_active() {
      return Ok(());
    }
    match self.sink.as_mut() {
      Some(sink) => Ok(sink.log_message(LogCategory::DEFAULT, text)?),
      None => Ok(()),
    }
  }

  /// Write `prefix` immediately followed by `text` as one line.
  pub fn log_prefixed(&mut self, prefix: &str, text: &str) -> Result<(), BindLogError> {
    self.log(&format!("{}{}", prefix, text))
  }

  /// Write a module name (with version and architecture) after `prefix`.
  pub fn log_reference_name(
    &mut self,
    prefix: Option<&str>,
    name: Option<&dyn ModuleReference>,
  ) -> Result<(), BindLogError> {
    if !self.is_recording() {
      return Ok(());
    }
    let prefix = prefix.ok_or(BindLogError::InvalidArgument("prefix"))?;
    let name = name.ok_or(BindLogError::InvalidArgument("module name"))?;
    self.log_prefixed(prefix, &name.display_name(DisplayFlags::VERSION_AND_ARCH))
  }

  /// Record the status code of the attempt.
  pub fn log_status(&mut self, code: StatusCode) -> Result<(), BindLogError> {
    if !self.is_active() {
      return Ok(());
    }
    match self.sink.as_mut() {
      Some(sink) => Ok(sink.set_result_code(LogCategory::DEFAULT, code)?),
      None => Ok(()),
    }
  }

  /// Record what the request was bound to and where it came from.
  ///
  /// Origin is checked in order: shared location, in-memory bytes, file.
  /// Lines written before a failure stay in the log.
  pub fn log_result(&mut self, result: &BindResult<'_>) -> Result<(), BindLogError> {
    if !self.is_recording() {
      return Ok(());
    }

    let bound = result.name.display_name(DisplayFlags::VERSION_AND_ARCH);
    let line = self.format(MessageId::BoundToId, &bound)?;
    self.log(&line)?;

    let module = result.module;
    let line = if module.is_shared_location() {
      self.message(MessageId::BoundShared)?
    } else if module.is_in_memory_only() {
      self.message(MessageId::BoundByteArray)?
    } else {
      let path = module.file_path()?;
      self.format(MessageId::BoundToLocation, &path.display().to_string())?
    };
    self.log(&line)
  }

  /// Flush the sink.
  ///
  /// An access-denied failure is not reported: the log entry on disk was
  /// created under a different identity and cannot be rewritten from here.
  pub fn flush(&mut self) -> Result<(), BindLogError> {
    if !self.is_active() {
      return Ok(());
    }
    let Some(sink) = self.sink.as_mut() else {
      return Ok(());
    };
    match sink.flush(LogCategory::DEFAULT) {
      Ok(()) => Ok(()),
      Err(SinkError::AccessDenied) => {
        debug!("ignoring access denied while flushing binding log");
        Ok(())
      }
      Err(err) => Err(err.into()),
    }
  }
}

impl fmt::Debug for BindingLog {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("BindingLog")
      .field("active", &self.is_active())
      .field("has_sink", &self.has_sink())
      .finish()
  }
}

impl Drop for BindingLog {
  fn drop(&mut self) {
    self.invalidate();
  }
}
