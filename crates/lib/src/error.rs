//! Error types for binding logs.

use std::io;

use thiserror::Error;

use crate::messages::MessageId;
use crate::sink::StatusCode;

/// Errors returned by [`BindingLog`](crate::binding_log::BindingLog) operations.
#[derive(Debug, Error)]
pub enum BindLogError {
  /// A required input was missing.
  #[error("invalid argument: {0} is required")]
  InvalidArgument(&'static str),

  /// A message template could not be loaded.
  #[error("message template '{0}' could not be loaded")]
  ResourceLookup(MessageId),

  /// The underlying sink failed.
  #[error("binding log sink failed: {0}")]
  Sink(#[from] SinkError),

  /// A module accessor failed while composing a line.
  #[error(transparent)]
  Accessor(#[from] AccessorError),
}

/// Errors reported by a [`MessageSink`](crate::sink::MessageSink) or its factory.
#[derive(Debug, Error)]
pub enum SinkError {
  /// The sink refused access to its backing store.
  #[error("access denied")]
  AccessDenied,

  /// An I/O operation on the backing store failed.
  #[error("I/O error: {0}")]
  Io(#[source] io::Error),

  /// The sink rejected the operation with a status code.
  #[error("rejected with {code}: {reason}")]
  Rejected { code: StatusCode, reason: String },
}

impl From<io::Error> for SinkError {
  fn from(err: io::Error) -> Self {
    match err.kind() {
      io::ErrorKind::PermissionDenied => SinkError::AccessDenied,
      _ => SinkError::Io(err),
    }
  }
}

/// Errors reported by module accessors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AccessorError {
  /// The display name of a module could not be produced.
  #[error("failed to get display name: {reason}")]
  DisplayName { reason: String },

  /// A file-backed module has no path.
  #[error("module '{name}' has no file path")]
  MissingPath { name: String },
}
