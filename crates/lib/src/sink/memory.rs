use std::cell::RefCell;
use std::rc::Rc;

use serde::Serialize;
use tracing::debug;

use super::{LogCategory, MessageSink, SinkFactory, StatusCode};
use crate::context::{BindRequest, ContextInfo};
use crate::error::SinkError;
use crate::module::ResolvedModule;

/// One operation recorded by a [`MemorySink`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SinkEntry {
  Message { category: LogCategory, text: String },
  ResultCode { category: LogCategory, code: StatusCode },
  Flush { category: LogCategory },
}

#[derive(Debug, Default)]
struct JournalState {
  label: String,
  entries: Vec<SinkEntry>,
  released: bool,
}

/// Shared view of everything a [`MemorySink`] recorded.
///
/// The journal outlives its sink, so callers can inspect a trace after the
/// recorder has moved on to the next attempt.
#[derive(Debug, Clone, Default)]
pub struct SinkJournal(Rc<RefCell<JournalState>>);

impl SinkJournal {
  fn with_label(label: String) -> Self {
    Self(Rc::new(RefCell::new(JournalState {
      label,
      ..JournalState::default()
    })))
  }

  fn push(&self, entry: SinkEntry) {
    self.0.borrow_mut().entries.push(entry);
  }

  /// Context and request the sink was created for.
  pub fn label(&self) -> String {
    self.0.borrow().label.clone()
  }

  pub fn entries(&self) -> Vec<SinkEntry> {
    self.0.borrow().entries.clone()
  }

  /// Text of every logged line, in order.
  pub fn messages(&self) -> Vec<String> {
    self
      .0
      .borrow()
      .entries
      .iter()
      .filter_map(|entry| match entry {
        SinkEntry::Message { text, .. } => Some(text.clone()),
        _ => None,
      })
      .collect()
  }

  /// Most recently recorded status code.
  pub fn result_code(&self) -> Option<StatusCode> {
    self.0.borrow().entries.iter().rev().find_map(|entry| match entry {
      SinkEntry::ResultCode { code, .. } => Some(*code),
      _ => None,
    })
  }

  pub fn flush_count(&self) -> usize {
    self
      .0
      .borrow()
      .entries
      .iter()
      .filter(|entry| matches!(entry, SinkEntry::Flush { .. }))
      .count()
  }

  /// Whether the sink writing to this journal has been dropped.
  pub fn is_released(&self) -> bool {
    self.0.borrow().released
  }
}

/// Sink that keeps every entry in memory.
#[derive(Debug)]
pub struct MemorySink {
  journal: SinkJournal,
}

impl MemorySink {
  pub fn new(label: impl Into<String>) -> Self {
    Self {
      journal: SinkJournal::with_label(label.into()),
    }
  }

  pub fn journal(&self) -> SinkJournal {
    self.journal.clone()
  }
}

impl MessageSink for MemorySink {
  fn log_message(&mut self, category: LogCategory, text: &str) -> Result<(), SinkError> {
    self.journal.push(SinkEntry::Message {
      category,
      text: text.to_string(),
    });
    Ok(())
  }

  fn set_result_code(&mut self, category: LogCategory, code: StatusCode) -> Result<(), SinkError> {
    self.journal.push(SinkEntry::ResultCode { category, code });
    Ok(())
  }

  fn flush(&mut self, category: LogCategory) -> Result<(), SinkError> {
    self.journal.push(SinkEntry::Flush { category });
    Ok(())
  }
}

impl Drop for MemorySink {
  fn drop(&mut self) {
    self.journal.0.borrow_mut().released = true;
  }
}

/// Factory producing [`MemorySink`]s and remembering their journals.
#[derive(Debug, Clone, Default)]
pub struct MemorySinkFactory {
  journals: Rc<RefCell<Vec<SinkJournal>>>,
}

impl MemorySinkFactory {
  pub fn new() -> Self {
    Self::default()
  }

  /// Journals of every sink created so far, oldest first.
  pub fn journals(&self) -> Vec<SinkJournal> {
    self.journals.borrow().clone()
  }

  pub fn latest(&self) -> Option<SinkJournal> {
    self.journals.borrow().last().cloned()
  }

  pub fn created(&self) -> usize {
    self.journals.borrow().len()
  }

  /// Number of sinks created by this factory that are still alive.
  pub fn live(&self) -> usize {
    self.journals.borrow().iter().filter(|j| !j.is_released()).count()
  }
}

impl SinkFactory for MemorySinkFactory {
  fn create(
    &self,
    context: &ContextInfo,
    request: &BindRequest<'_>,
    _parent: Option<&dyn ResolvedModule>,
  ) -> Result<Box<dyn MessageSink>, SinkError> {
    let sink = MemorySink::new(format!("{}: {}", context.name, request));
    debug!(label = %sink.journal.label(), "created memory sink");
    self.journals.borrow_mut().push(sink.journal());
    Ok(Box::new(sink))
  }
}
