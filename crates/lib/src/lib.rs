//! bindtrace-lib: Binding log recorder
//!
//! This crate traces how a module binder resolves a request:
//! - `BindingLog`: per-context recorder writing the pre-bind state block,
//!   the bind result and the status of each attempt
//! - `BindingContext`: resolution scope owning one recorder and a sink factory
//! - `MessageSink`: destination for log lines (in memory or on disk)
//! - `MessageCatalog`: templates every log line is rendered from

pub mod binding_log;
pub mod config;
pub mod consts;
pub mod context;
pub mod error;
pub mod messages;
pub mod module;
pub mod name;
pub mod platform;
pub mod sink;
pub mod util;

pub use binding_log::BindingLog;
pub use config::{LogSettings, LoggingGate};
pub use context::{BindRequest, BindingContext, ContextInfo};
pub use error::{AccessorError, BindLogError, SinkError};
pub use module::{BindResult, LoadedModule, ResolvedModule};
pub use name::{DisplayFlags, ModuleName, ModuleReference, Version};
pub use sink::{LogCategory, MessageSink, SinkFactory, StatusCode};
