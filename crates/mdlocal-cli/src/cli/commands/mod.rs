//! CLI command handlers, one per run mode.

mod clone_dir;
mod clone_file;
mod plan;

pub use clone_dir::run_clone_dir;
pub use clone_file::run_clone_file;
pub use plan::run_plan;
