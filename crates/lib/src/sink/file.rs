//! File-backed sink.
//!
//! Lines are buffered in memory and written out on flush, one file per
//! binding request:
//!
//! ```text
//! {log_dir}/
//! └── <context>/
//!     └── <request>.log
//! ```
//!
//! A named request's stem joins the simple name with its version and
//! architecture (`Foo-1.0-x86`), so different versions of one module keep
//! separate files. Repeating the same request replaces the earlier file.
//!
//! A flush rewrites the whole file so repeated flushes never duplicate
//! lines.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use super::{LogCategory, MessageSink, SinkFactory, StatusCode};
use crate::consts::LOG_FILE_EXT;
use crate::context::{BindRequest, ContextInfo};
use crate::error::SinkError;
use crate::module::ResolvedModule;
use crate::name::DisplayFlags;

/// Sink writing one log file per binding request.
#[derive(Debug)]
pub struct FileSink {
  path: PathBuf,
  header: String,
  lines: Vec<String>,
  result: Option<StatusCode>,
}

impl FileSink {
  pub fn new(path: PathBuf, header: impl Into<String>) -> Self {
    Self {
      path,
      header: header.into(),
      lines: Vec::new(),
      result: None,
    }
  }

  pub fn path(&self) -> &Path {
    &self.path
  }

  fn render(&self) -> String {
    let mut out = String::new();
    out.push_str(&self.header);
    out.push('\n');
    for line in &self.lines {
      out.push_str(line);
      out.push('\n');
    }
    if let Some(code) = self.result {
      out.push_str(&format!("Result: {}\n", code));
    }
    out
  }
}

impl MessageSink for FileSink {
  fn log_message(&mut self, _category: LogCategory, text: &str) -> Result<(), SinkError> {
    self.lines.push(text.to_string());
    Ok(())
  }

  fn set_result_code(&mut self, _category: LogCategory, code: StatusCode) -> Result<(), SinkError> {
    self.result = Some(code);
    Ok(())
  }

  fn flush(&mut self, category: LogCategory) -> Result<(), SinkError> {
    if let Some(parent) = self.path.parent() {
      fs::create_dir_all(parent)?;
    }
    fs::write(&self.path, self.render())?;
    debug!(
      path = %self.path.display(),
      category = %category,
      lines = self.lines.len(),
      "flushed binding log"
    );
    Ok(())
  }
}

/// Factory creating [`FileSink`]s under a log directory.
#[derive(Debug, Clone)]
pub struct FileSinkFactory {
  dir: PathBuf,
}

impl FileSinkFactory {
  pub fn new(dir: impl Into<PathBuf>) -> Self {
    Self { dir: dir.into() }
  }

  /// Where the log for `request` in `context` is written.
  pub fn log_path(&self, context: &ContextInfo, request: &BindRequest<'_>) -> PathBuf {
    let stem = match request {
      BindRequest::Name(name) => name_stem(&name.display_name(DisplayFlags::VERSION_AND_ARCH)),
      BindRequest::Path(path) => Path::new(path)
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string()),
    };
    self
      .dir
      .join(sanitize_component(&context.name))
      .join(format!("{}.{}", sanitize_component(&stem), LOG_FILE_EXT))
  }
}

impl SinkFactory for FileSinkFactory {
  fn create(
    &self,
    context: &ContextInfo,
    request: &BindRequest<'_>,
    _parent: Option<&dyn ResolvedModule>,
  ) -> Result<Box<dyn MessageSink>, SinkError> {
    let path = self.log_path(context, request);
    info!(path = %path.display(), "binding log for {}", request);
    let header = format!("*** Binding log entry ({}) ***", context.name);
    Ok(Box::new(FileSink::new(path, header)))
  }
}

/// `Foo, Version=1.0, ProcessorArchitecture=x86` becomes `Foo-1.0-x86`.
fn name_stem(display_name: &str) -> String {
  display_name
    .split(", ")
    .map(|part| part.split_once('=').map_or(part, |(_, value)| value))
    .collect::<Vec<_>>()
    .join("-")
}

/// Replace characters that are unsafe in a file name with `_`.
fn sanitize_component(raw: &str) -> String {
  let cleaned: String = raw
    .chars()
    .map(|c| {
      if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
        c
      } else {
        '_'
      }
    })
    .collect();
  match cleaned.trim_matches('.') {
    "" => "_".to_string(),
    _ => cleaned,
  }
}
