// derush-cli/src/lib.rs
//
// Library portion of the Derush CLI application.
// Contains argument definitions and command logic.

pub mod cli;
pub mod commands;
pub mod error;
pub mod logging;
pub mod progress;
pub mod terminal;

// Re-export items needed by the binary or integration tests
pub use cli::{Cli, Commands, RenderArgs, ScanArgs};
pub use commands::render::run_render;
pub use commands::scan::run_scan;
