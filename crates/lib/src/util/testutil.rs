//! Test utilities for bindtrace-lib.
//!
//! Collaborator fakes that fail in controlled ways.

use std::cell::{Cell, RefCell};
use std::io;
use std::path::PathBuf;
use std::rc::Rc;

use crate::context::{BindRequest, ContextInfo};
use crate::error::{AccessorError, SinkError};
use crate::module::ResolvedModule;
use crate::sink::{LogCategory, MemorySinkFactory, MessageSink, SinkFactory, StatusCode};

/// Factory that never produces a sink.
pub struct FailingFactory;

impl SinkFactory for FailingFactory {
  fn create(
    &self,
    _context: &ContextInfo,
    _request: &BindRequest<'_>,
    _parent: Option<&dyn ResolvedModule>,
  ) -> Result<Box<dyn MessageSink>, SinkError> {
    Err(SinkError::Rejected {
      code: StatusCode(0x8007000E_u32 as i32),
      reason: "out of memory".to_string(),
    })
  }
}

/// Memory-backed factory that can be switched into failing mode after the
/// context has taken ownership of it.
#[derive(Clone, Default)]
pub struct FlakyFactory {
  pub inner: MemorySinkFactory,
  pub fail: Rc<Cell<bool>>,
}

impl SinkFactory for FlakyFactory {
  fn create(
    &self,
    context: &ContextInfo,
    request: &BindRequest<'_>,
    parent: Option<&dyn ResolvedModule>,
  ) -> Result<Box<dyn MessageSink>, SinkError> {
    if self.fail.get() {
      return FailingFactory.create(context, request, parent);
    }
    self.inner.create(context, request, parent)
  }
}

/// Sink whose flush fails with the error produced by `error`.
pub struct FlushFailingSink {
  error: fn() -> SinkError,
}

impl MessageSink for FlushFailingSink {
  fn log_message(&mut self, _category: LogCategory, _text: &str) -> Result<(), SinkError> {
    Ok(())
  }

  fn set_result_code(&mut self, _category: LogCategory, _code: StatusCode) -> Result<(), SinkError> {
    Ok(())
  }

  fn flush(&mut self, _category: LogCategory) -> Result<(), SinkError> {
    Err((self.error)())
  }
}

/// Factory producing [`FlushFailingSink`]s.
pub struct FlushFailingFactory(pub fn() -> SinkError);

impl SinkFactory for FlushFailingFactory {
  fn create(
    &self,
    _context: &ContextInfo,
    _request: &BindRequest<'_>,
    _parent: Option<&dyn ResolvedModule>,
  ) -> Result<Box<dyn MessageSink>, SinkError> {
    Ok(Box::new(FlushFailingSink { error: self.0 }))
  }
}

/// Sink that records lines until its `fail_message_at`-th message (1-based),
/// which fails with an I/O error. Result codes fail when `fail_result_code`
/// is set.
pub struct FaultySink {
  lines: Rc<RefCell<Vec<String>>>,
  calls: usize,
  fail_message_at: Option<usize>,
  fail_result_code: bool,
}

impl MessageSink for FaultySink {
  fn log_message(&mut self, _category: LogCategory, text: &str) -> Result<(), SinkError> {
    self.calls += 1;
    if self.fail_message_at == Some(self.calls) {
      return Err(SinkError::Io(io::Error::other("disk full")));
    }
    self.lines.borrow_mut().push(text.to_string());
    Ok(())
  }

  fn set_result_code(&mut self, _category: LogCategory, _code: StatusCode) -> Result<(), SinkError> {
    if self.fail_result_code {
      return Err(SinkError::Io(io::Error::other("disk full")));
    }
    Ok(())
  }

  fn flush(&mut self, _category: LogCategory) -> Result<(), SinkError> {
    Ok(())
  }
}

/// Factory producing [`FaultySink`]s that share one line buffer.
#[derive(Clone, Default)]
pub struct FaultyFactory {
  pub lines: Rc<RefCell<Vec<String>>>,
  pub fail_message_at: Option<usize>,
  pub fail_result_code: bool,
}

impl FaultyFactory {
  pub fn lines(&self) -> Vec<String> {
    self.lines.borrow().clone()
  }
}

impl SinkFactory for FaultyFactory {
  fn create(
    &self,
    _context: &ContextInfo,
    _request: &BindRequest<'_>,
    _parent: Option<&dyn ResolvedModule>,
  ) -> Result<Box<dyn MessageSink>, SinkError> {
    Ok(Box::new(FaultySink {
      lines: Rc::clone(&self.lines),
      calls: 0,
      fail_message_at: self.fail_message_at,
      fail_result_code: self.fail_result_code,
    }))
  }
}

/// Module whose display name accessor always fails.
pub struct BrokenModule;

impl ResolvedModule for BrokenModule {
  fn display_name(&self) -> Result<String, AccessorError> {
    Err(AccessorError::DisplayName {
      reason: "image is not loaded".to_string(),
    })
  }

  fn is_shared_location(&self) -> bool {
    false
  }

  fn is_in_memory_only(&self) -> bool {
    false
  }

  fn file_path(&self) -> Result<PathBuf, AccessorError> {
    Err(AccessorError::MissingPath {
      name: "broken".to_string(),
    })
  }
}
