//! Terminal output helpers for status and result lines.
//!
//! Colour is applied through `console`, which turns styling off on its own
//! when the stream is not a terminal.

use console::style;

/// Print a status line (key-value pair)
pub fn print_status(label: &str, value: &str) {
    println!("  {:<16} {}", format!("{label}:"), value);
}

/// Print a success message
pub fn print_success(message: &str) {
    println!();
    println!("  {} {}", style("✓").green().bold(), style(message).green());
}

/// Print a warning line
pub fn print_warning(message: &str) {
    println!("  {} {}", style("!").yellow().bold(), message);
}

/// Print an error message on stderr
pub fn print_error(message: &str) {
    eprintln!("{} {}", style("Error:").red().bold(), message);
}
