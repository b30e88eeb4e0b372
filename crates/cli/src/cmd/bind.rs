//! Bind command implementation.
//!
//! Drives one bind attempt through a binding context so its trace can be
//! inspected without a real binder.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use tracing::debug;

use bindtrace_lib::messages::TableCatalog;
use bindtrace_lib::sink::{FileSinkFactory, MemorySinkFactory};
use bindtrace_lib::{
  BindRequest, BindResult, BindingContext, BindingLog, LoadedModule, LogSettings, LoggingGate, ModuleName,
  ResolvedModule, SinkFactory, StatusCode,
};

use crate::output::{print_result_code, print_success, print_warning};

/// Where the bound module came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Origin {
  Shared,
  InMemory,
  File(PathBuf),
}

/// Where the trace goes: printed from memory, or written under the log dir.
enum Destination {
  Stdout(MemorySinkFactory),
  File(FileSinkFactory),
}

impl Destination {
  fn factory(&self) -> Box<dyn SinkFactory> {
    match self {
      Destination::Stdout(memory) => Box::new(memory.clone()),
      Destination::File(files) => Box::new(files.clone()),
    }
  }
}

#[derive(Debug, Clone)]
pub struct BindArgs {
  pub name: Option<String>,
  pub path: Option<String>,
  pub parent: Option<String>,
  pub origin: Option<Origin>,
  pub status: Option<String>,
  pub context: String,
  pub log_dir: Option<PathBuf>,
  pub messages: Option<PathBuf>,
  pub stdout: bool,
  pub enable: bool,
}

fn parse_name(raw: &str, flag: &str) -> Result<ModuleName> {
  raw
    .parse::<ModuleName>()
    .with_context(|| format!("invalid {} '{}'", flag, raw))
}

/// Name reported for a module requested by path.
fn name_from_path(path: &str) -> ModuleName {
  let stem = Path::new(path)
    .file_stem()
    .map(|stem| stem.to_string_lossy().into_owned())
    .unwrap_or_else(|| path.to_string());
  ModuleName::new(stem)
}

pub fn cmd_bind(args: BindArgs) -> Result<()> {
  let mut settings = LogSettings::from_env()?;
  if args.enable {
    settings.enabled = true;
  }
  if let Some(dir) = &args.log_dir {
    settings.log_dir = dir.clone();
  }

  let gate = LoggingGate::from_settings(&settings);
  if !gate.is_enabled() {
    print_warning("Binding logs are disabled (set BINDTRACE_LOG=1 or pass --enable)");
    return Ok(());
  }

  let name = args.name.as_deref().map(|raw| parse_name(raw, "--name")).transpose()?;
  let parent = args
    .parent
    .as_deref()
    .map(|raw| parse_name(raw, "--parent"))
    .transpose()?
    .map(|name| LoadedModule {
      name,
      shared: false,
      in_memory: false,
      path: None,
    });
  let status = args
    .status
    .as_deref()
    .map(|raw| {
      raw
        .parse::<StatusCode>()
        .with_context(|| format!("invalid --status '{}'", raw))
    })
    .transpose()?;
  let catalog = match &args.messages {
    Some(path) => Some(TableCatalog::load_file(path).with_context(|| format!("loading {}", path.display()))?),
    None => None,
  };

  let destination = if args.stdout {
    Destination::Stdout(MemorySinkFactory::new())
  } else {
    Destination::File(FileSinkFactory::new(&settings.log_dir))
  };

  let mut context = BindingContext::new(args.context, gate, destination.factory());
  if let Some(catalog) = catalog {
    context = context.with_catalog(Box::new(catalog));
  }

  let parent_ref = parent.as_ref().map(|p| p as &dyn ResolvedModule);
  let (request, bound_name) = match (&name, args.path.as_deref()) {
    (Some(name), _) => (BindRequest::Name(name), name.clone()),
    (None, Some(path)) => (BindRequest::Path(path), name_from_path(path)),
    (None, None) => bail!("either --name or --path is required"),
  };
  debug!(request = %request, stdout = args.stdout, "recording bind attempt");

  match request {
    BindRequest::Name(name) => BindingLog::create_in_context(&mut context, Some(name), parent_ref)?,
    BindRequest::Path(path) => BindingLog::create_in_context_for_path(&mut context, path, parent_ref)?,
  }

  if let Some(origin) = args.origin {
    let module = match origin {
      Origin::Shared => LoadedModule::shared(bound_name),
      Origin::InMemory => LoadedModule::in_memory(bound_name),
      Origin::File(path) => LoadedModule::from_file(bound_name, path),
    };
    context.binding_log().log_result(&BindResult::for_module(&module))?;
  }

  if let Some(status) = status {
    context.binding_log().log_status(status)?;
  }
  context.binding_log().flush()?;

  match &destination {
    Destination::Stdout(memory) => {
      if let Some(journal) = memory.latest() {
        for line in journal.messages() {
          println!("{}", line);
        }
        if let Some(code) = journal.result_code() {
          print_result_code(code);
        }
      }
    }
    Destination::File(files) => {
      let path = files.log_path(context.info(), &request);
      print_success(&format!("Binding log written to {}", path.display()));
    }
  }

  Ok(())
}
