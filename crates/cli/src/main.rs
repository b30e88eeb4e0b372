mod cmd;
mod output;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::cmd::{BindArgs, Origin, cmd_bind, cmd_info};
use crate::output::print_error;

/// bindtrace - trace module binding decisions
#[derive(Parser)]
#[command(name = "bindtrace")]
#[command(author, version, about, long_about = None)]
struct Cli {
  /// Enable verbose output
  #[arg(short, long, global = true)]
  verbose: bool,

  #[command(subcommand)]
  command: Commands,
}

#[derive(Subcommand)]
enum Commands {
  /// Record one bind attempt
  Bind(BindCommand),

  /// Show logging settings
  Info {
    /// Print as JSON
    #[arg(long)]
    json: bool,
  },
}

#[derive(Args)]
struct BindCommand {
  #[command(flatten)]
  request: RequestArgs,

  /// Display name of the module that triggered the bind
  #[arg(long)]
  parent: Option<String>,

  #[command(flatten)]
  origin: OriginArgs,

  /// Status code of the attempt (hex with 0x prefix, or decimal)
  #[arg(long, allow_hyphen_values = true)]
  status: Option<String>,

  /// Binding context name
  #[arg(long, default_value = "bindtrace")]
  context: String,

  /// Directory to write logs to (overrides BINDTRACE_LOG_DIR)
  #[arg(long)]
  log_dir: Option<PathBuf>,

  /// JSON message table replacing the built-in templates
  #[arg(long)]
  messages: Option<PathBuf>,

  /// Print the trace instead of writing a log file
  #[arg(long)]
  stdout: bool,

  /// Log even when BINDTRACE_LOG is off
  #[arg(long)]
  enable: bool,
}

#[derive(Args)]
#[group(required = true, multiple = false)]
struct RequestArgs {
  /// Display name of the requested module, e.g. "Foo, Version=1.0"
  #[arg(long)]
  name: Option<String>,

  /// Raw path of the requested module
  #[arg(long)]
  path: Option<String>,
}

#[derive(Args)]
#[group(required = false, multiple = false)]
struct OriginArgs {
  /// Bound from the shared module location
  #[arg(long)]
  shared: bool,

  /// Bound from in-memory bytes
  #[arg(long)]
  in_memory: bool,

  /// Bound from this file
  #[arg(long)]
  location: Option<PathBuf>,
}

impl OriginArgs {
  fn into_origin(self) -> Option<Origin> {
    if self.shared {
      Some(Origin::Shared)
    } else if self.in_memory {
      Some(Origin::InMemory)
    } else {
      self.location.map(Origin::File)
    }
  }
}

impl From<BindCommand> for BindArgs {
  fn from(command: BindCommand) -> Self {
    BindArgs {
      name: command.request.name,
      path: command.request.path,
      parent: command.parent,
      origin: command.origin.into_origin(),
      status: command.status,
      context: command.context,
      log_dir: command.log_dir,
      messages: command.messages,
      stdout: command.stdout,
      enable: command.enable,
    }
  }
}

fn main() -> ExitCode {
  let cli = Cli::parse();

  let filter = if cli.verbose {
    EnvFilter::new("debug")
  } else {
    EnvFilter::from_default_env()
  };
  tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_writer(std::io::stderr)
    .without_time()
    .init();

  let result = match cli.command {
    Commands::Bind(command) => cmd_bind(command.into()),
    Commands::Info { json } => cmd_info(json),
  };

  match result {
    Ok(()) => ExitCode::SUCCESS,
    Err(err) => {
      print_error(&format!("{:#}", err));
      ExitCode::FAILURE
    }
  }
}
