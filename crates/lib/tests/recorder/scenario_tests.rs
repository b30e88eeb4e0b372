use bindtrace_lib::messages::{DefaultCatalog, MessageCatalog, MessageId};
use bindtrace_lib::{BindResult, BindingLog, LoadedModule, ModuleName, StatusCode, Version};

use super::common::{latest, memory_context};

fn template(id: MessageId) -> String {
  DefaultCatalog.load(id).unwrap().into_owned()
}

#[test]
fn disabled_gate_ignores_every_call() {
  let (mut context, factory) = memory_context(false);
  let module = LoadedModule::from_file(ModuleName::new("Foo"), "/opt/Foo.dll");

  BindingLog::create_in_context(&mut context, None, None).unwrap();
  BindingLog::create_in_context_for_path(&mut context, "/tmp/x.dll", Some(&module)).unwrap();
  context
    .binding_log()
    .log_result(&BindResult::for_module(&module))
    .unwrap();
  context.binding_log().flush().unwrap();

  assert_eq!(factory.created(), 0);
}

#[test]
fn fully_specified_name_without_parent() {
  let (mut context, factory) = memory_context(true);
  let name = ModuleName::new("Foo").with_version(Version::new(1, 0));
  BindingLog::create_in_context(&mut context, Some(&name), None).unwrap();

  let messages = latest(&factory).messages();
  assert_eq!(messages.len(), 4);
  assert_eq!(messages[0], template(MessageId::PreBindStateBegin));
  assert!(messages[1].contains("Foo, Version=1.0"));
  assert!(messages[1].ends_with("(Fully-specified)"));
  assert_eq!(messages[2], template(MessageId::PreBindStateCallerUnknown));
  assert_eq!(messages[3], template(MessageId::PreBindStateEnd));
}

#[test]
fn raw_path_with_parent() {
  let (mut context, factory) = memory_context(true);
  let parent = LoadedModule::shared(ModuleName::new("Bar"));
  BindingLog::create_in_context_for_path(&mut context, "/tmp/x.dll", Some(&parent)).unwrap();

  let messages = latest(&factory).messages();
  assert!(messages[1].contains("/tmp/x.dll"));
  assert!(messages[2].contains("Bar"));
  assert_ne!(messages[2], template(MessageId::PreBindStateCallerUnknown));
}

#[test]
fn contradictory_origin_reports_shared_location() {
  let (mut context, factory) = memory_context(true);
  let name = ModuleName::new("Foo").with_version(Version::new(1, 0));
  BindingLog::create_in_context(&mut context, Some(&name), None).unwrap();

  let mut module = LoadedModule::shared(name.clone());
  module.in_memory = true;
  context
    .binding_log()
    .log_result(&BindResult::for_module(&module))
    .unwrap();

  let messages = latest(&factory).messages();
  assert_eq!(messages.last().unwrap(), &template(MessageId::BoundShared));
  assert!(!messages.contains(&template(MessageId::BoundByteArray)));
}

#[test]
fn full_attempt_then_next_attempt() {
  let (mut context, factory) = memory_context(true);
  let name: ModuleName = "Foo, Version=1.0.0.0, ProcessorArchitecture=MSIL".parse().unwrap();
  let module = LoadedModule::from_file(name.clone(), "/opt/app/Foo.dll");

  BindingLog::create_in_context(&mut context, Some(&name), None).unwrap();
  let log = context.binding_log();
  log.log_result(&BindResult::for_module(&module)).unwrap();
  log.log_status(StatusCode::SUCCESS).unwrap();
  log.flush().unwrap();

  let first = latest(&factory);
  assert_eq!(first.messages().len(), 6);
  assert_eq!(first.result_code(), Some(StatusCode::SUCCESS));
  assert_eq!(first.flush_count(), 1);

  let partial = ModuleName::new("Baz");
  BindingLog::create_in_context(&mut context, Some(&partial), Some(&module)).unwrap();
  assert!(first.is_released());

  let second = latest(&factory);
  assert!(second.messages()[1].ends_with("(Partial)"));
  assert_eq!(
    second.messages()[2],
    "Calling module: Foo, Version=1.0.0.0, ProcessorArchitecture=MSIL."
  );
  assert_eq!(factory.live(), 1);
}
