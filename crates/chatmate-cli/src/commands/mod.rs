//! Command implementations for chatmate-cli

pub mod cleanup;
pub mod context;
pub mod install;
pub mod list;
pub mod paths;
pub mod render;
pub mod status;
pub mod uninstall;

pub use cleanup::run_cleanup;
pub use context::Context;
pub use install::run_install;
pub use list::run_list;
pub use paths::run_paths;
pub use status::run_status;
pub use uninstall::run_uninstall;
