// ============================================================================
// derush-cli/src/error.rs
// ============================================================================
//
// CLI ERROR HANDLING: Result alias and exit codes
//
// The CLI reuses the core error type; this module only decides how an error
// ends the process.

use derush_core::{CoreError, CoreResult};

/// Type alias for CLI results using CoreError.
pub type CliResult<T> = CoreResult<T>;

/// Exit status for a run that failed.
pub const EXIT_FAILURE: i32 = 1;

/// Exit status for command-line usage errors, as reported by clap.
pub const EXIT_USAGE: i32 = 2;

/// Maps a core error to the process exit status.
pub fn exit_code(err: &CoreError) -> i32 {
    match err {
        CoreError::Config(_) => EXIT_USAGE,
        _ => EXIT_FAILURE,
    }
}
