//! Command implementations for the CLI.
//!
//! Each submodule contains the implementation of a specific command.

/// Module containing the implementation of the `scan` command.
/// This command probes every clip of a directory and writes the rushes sheet.
pub mod scan;

/// Module containing the implementation of the `render` command.
/// This command lays a rushes sheet out as a PDF document.
pub mod render;
