use std::fs;

use bindtrace_lib::sink::FileSinkFactory;
use bindtrace_lib::{BindRequest, BindResult, BindingContext, BindingLog, LoadedModule, LoggingGate, ModuleName};
use tempfile::TempDir;

#[test]
fn attempt_is_written_on_flush() {
  let temp = TempDir::new().unwrap();
  let factory = FileSinkFactory::new(temp.path());
  let mut context = BindingContext::new("my app", LoggingGate::enabled(), Box::new(factory.clone()));
  let name: ModuleName = "Foo, Version=2.0".parse().unwrap();
  let path = factory.log_path(context.info(), &BindRequest::Name(&name));

  BindingLog::create_in_context(&mut context, Some(&name), None).unwrap();
  assert!(!path.exists(), "nothing is written before flush");

  let module = LoadedModule::in_memory(name.clone());
  let log = context.binding_log();
  log.log_result(&BindResult::for_module(&module)).unwrap();
  log.flush().unwrap();

  assert_eq!(path, temp.path().join("my_app").join("Foo-2.0.log"));
  let content = fs::read_to_string(&path).unwrap();
  let lines: Vec<&str> = content.lines().collect();
  assert_eq!(lines[0], "*** Binding log entry (my app) ***");
  assert_eq!(lines[2], "LOG: DisplayName = Foo, Version=2.0 (Fully-specified)");
  assert_eq!(lines.last().unwrap(), &"LOG: Module was loaded from a byte array.");
}

#[test]
fn disabled_gate_writes_nothing() {
  let temp = TempDir::new().unwrap();
  let mut context = BindingContext::new(
    "app",
    LoggingGate::disabled(),
    Box::new(FileSinkFactory::new(temp.path())),
  );

  BindingLog::create_in_context_for_path(&mut context, "/tmp/x.dll", None).unwrap();
  context.binding_log().flush().unwrap();

  assert_eq!(fs::read_dir(temp.path()).unwrap().count(), 0);
}
