//! Message templates for binding log lines.
//!
//! Every line the recorder writes is produced from a template looked up by
//! [`MessageId`]. Templates contain at most one `{0}` placeholder.
//!
//! # Table format
//!
//! [`TableCatalog`] reads a flat JSON object keyed by snake_case id:
//!
//! ```json
//! {
//!   "pre_bind_state_begin": "=== Pre-bind state information ===",
//!   "bound_to_location": "LOG: Module is bound to location {0}."
//! }
//! ```

use std::borrow::Cow;
use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::io;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::error::BindLogError;

/// Placeholder substituted by [`format_template`].
pub const PLACEHOLDER: &str = "{0}";

/// Identifies one kind of log line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageId {
  PreBindStateBegin,
  PreBindStateByName,
  PreBindStateByNamePartial,
  PreBindStateWhereRef,
  PreBindStateCaller,
  PreBindStateCallerUnknown,
  PreBindStateEnd,
  BoundToId,
  BoundShared,
  BoundByteArray,
  BoundToLocation,
}

impl MessageId {
  pub const ALL: [MessageId; 11] = [
    MessageId::PreBindStateBegin,
    MessageId::PreBindStateByName,
    MessageId::PreBindStateByNamePartial,
    MessageId::PreBindStateWhereRef,
    MessageId::PreBindStateCaller,
    MessageId::PreBindStateCallerUnknown,
    MessageId::PreBindStateEnd,
    MessageId::BoundToId,
    MessageId::BoundShared,
    MessageId::BoundByteArray,
    MessageId::BoundToLocation,
  ];

  pub fn as_str(&self) -> &'static str {
    match self {
      Self::PreBindStateBegin => "pre_bind_state_begin",
      Self::PreBindStateByName => "pre_bind_state_by_name",
      Self::PreBindStateByNamePartial => "pre_bind_state_by_name_partial",
      Self::PreBindStateWhereRef => "pre_bind_state_where_ref",
      Self::PreBindStateCaller => "pre_bind_state_caller",
      Self::PreBindStateCallerUnknown => "pre_bind_state_caller_unknown",
      Self::PreBindStateEnd => "pre_bind_state_end",
      Self::BoundToId => "bound_to_id",
      Self::BoundShared => "bound_shared",
      Self::BoundByteArray => "bound_byte_array",
      Self::BoundToLocation => "bound_to_location",
    }
  }
}

impl fmt::Display for MessageId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

/// Source of message templates.
pub trait MessageCatalog {
  /// Load the template for `id`.
  fn load(&self, id: MessageId) -> Result<Cow<'_, str>, BindLogError>;
}

/// Substitute `value` for the placeholder in `template`.
pub fn format_template(template: &str, value: &str) -> String {
  template.replace(PLACEHOLDER, value)
}

/// Built-in English templates.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultCatalog;

impl DefaultCatalog {
  fn template(id: MessageId) -> &'static str {
    match id {
      MessageId::PreBindStateBegin => "=== Pre-bind state information ===",
      MessageId::PreBindStateByName => "LOG: DisplayName = {0} (Fully-specified)",
      MessageId::PreBindStateByNamePartial => "LOG: DisplayName = {0} (Partial)",
      MessageId::PreBindStateWhereRef => "LOG: Where-ref bind. Location = {0}",
      MessageId::PreBindStateCaller => "Calling module: {0}.",
      MessageId::PreBindStateCallerUnknown => "Calling module: (Unknown).",
      MessageId::PreBindStateEnd => "===",
      MessageId::BoundToId => "LOG: Binding succeeds. Returns module {0}.",
      MessageId::BoundShared => "LOG: Module was loaded from the shared module location.",
      MessageId::BoundByteArray => "LOG: Module was loaded from a byte array.",
      MessageId::BoundToLocation => "LOG: Module is bound to location {0}.",
    }
  }
}

impl MessageCatalog for DefaultCatalog {
  fn load(&self, id: MessageId) -> Result<Cow<'_, str>, BindLogError> {
    Ok(Cow::Borrowed(Self::template(id)))
  }
}

/// Errors that can occur when loading a [`TableCatalog`].
#[derive(Debug, Error)]
pub enum CatalogError {
  #[error("failed to read message table: {0}")]
  Read(#[source] io::Error),

  #[error("failed to parse message table: {0}")]
  Parse(#[source] serde_json::Error),
}

/// Templates supplied by the caller, e.g. a localized table.
///
/// Ids missing from the table fail with
/// [`BindLogError::ResourceLookup`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TableCatalog {
  templates: HashMap<MessageId, String>,
}

impl TableCatalog {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn with(mut self, id: MessageId, template: impl Into<String>) -> Self {
    self.templates.insert(id, template.into());
    self
  }

  /// Copy of the built-in English templates, to override selectively.
  pub fn english() -> Self {
    let templates = MessageId::ALL
      .iter()
      .map(|id| (*id, DefaultCatalog::template(*id).to_string()))
      .collect();
    Self { templates }
  }

  pub fn from_json_str(json: &str) -> Result<Self, CatalogError> {
    serde_json::from_str(json).map_err(CatalogError::Parse)
  }

  pub fn load_file(path: &Path) -> Result<Self, CatalogError> {
    let content = fs::read_to_string(path).map_err(CatalogError::Read)?;
    let table = Self::from_json_str(&content)?;
    debug!(path = %path.display(), templates = table.len(), "loaded message table");
    Ok(table)
  }

  pub fn len(&self) -> usize {
    self.templates.len()
  }

  pub fn is_empty(&self) -> bool {
    self.templates.is_empty()
  }
}

impl MessageCatalog for TableCatalog {
  fn load(&self, id: MessageId) -> Result<Cow<'_, str>, BindLogError> {
    self
      .templates
      .get(&id)
      .map(|t| Cow::Borrowed(t.as_str()))
      .ok_or(BindLogError::ResourceLookup(id))
  }
}
