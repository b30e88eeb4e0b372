mod bind;
mod info;

pub use bind::{BindArgs, Origin, cmd_bind};
pub use info::cmd_info;
