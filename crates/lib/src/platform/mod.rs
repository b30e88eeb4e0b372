pub mod arch;
pub mod paths;

pub use arch::{ProcessorArch, UnknownArch};

/// Returns the processor architecture of the running process
///
/// Returns `None` if the architecture has no display-name identifier
pub fn host_arch() -> Option<ProcessorArch> {
  ProcessorArch::current()
}
