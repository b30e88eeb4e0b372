//! Shared helpers for recorder integration tests.

use bindtrace_lib::sink::{MemorySinkFactory, SinkJournal};
use bindtrace_lib::{BindingContext, LoggingGate};

/// Context backed by an in-memory sink factory.
pub fn memory_context(enabled: bool) -> (BindingContext, MemorySinkFactory) {
  let factory = MemorySinkFactory::new();
  let context = BindingContext::new(
    "integration",
    LoggingGate::new(enabled),
    Box::new(factory.clone()),
  );
  (context, factory)
}

/// Journal of the most recently created sink.
pub fn latest(factory: &MemorySinkFactory) -> SinkJournal {
  factory.latest().expect("no sink was created")
}
