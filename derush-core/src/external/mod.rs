// ============================================================================
// derush-core/src/external/mod.rs
// ============================================================================
//
// EXTERNAL TOOLS: Interactions with the ffprobe Executable
//
// This module encapsulates every subprocess call the extractor makes. The
// `MediaProbe` trait is the seam: the batch driver only talks to the trait,
// the concrete `FfprobeCli` shells out to ffprobe, and tests provide their
// own implementations.
//
// KEY COMPONENTS:
// - MediaProbe trait (availability check, timecode query, duration query)
// - FfprobeCli implementation
// - Dependency checking

// ---- Internal crate imports ----
use crate::error::{CoreResult, command_failed_error, command_start_error};

// ---- Standard library imports ----
use std::path::Path;
use std::process::{Command, Stdio};

// ============================================================================
// SUBMODULES
// ============================================================================

/// Contains the ffprobe command-line implementation of `MediaProbe`
pub mod ffprobe_executor;

// ============================================================================
// RE-EXPORTS
// ============================================================================

pub use ffprobe_executor::FfprobeCli;

// ============================================================================
// PROBE ABSTRACTION
// ============================================================================

/// Queries a media file for the values the rushes sheet needs.
///
/// The two queries are independent: a failing duration query does not imply
/// anything about the timecode query and vice versa.
pub trait MediaProbe {
    /// Checks that the probe tool can be invoked at all.
    ///
    /// Called once before a batch starts; an error here aborts the batch.
    fn ensure_available(&self) -> CoreResult<()>;

    /// Starting timecode tag of the file, `None` when the tag is absent.
    fn probe_timecode(&self, path: &Path) -> CoreResult<Option<String>>;

    /// Container duration in seconds.
    fn probe_duration(&self, path: &Path) -> CoreResult<f64>;
}

impl<P: MediaProbe + ?Sized> MediaProbe for &P {
    fn ensure_available(&self) -> CoreResult<()> {
        (**self).ensure_available()
    }

    fn probe_timecode(&self, path: &Path) -> CoreResult<Option<String>> {
        (**self).probe_timecode(path)
    }

    fn probe_duration(&self, path: &Path) -> CoreResult<f64> {
        (**self).probe_duration(path)
    }
}

// ============================================================================
// DEPENDENCY CHECKING
// ============================================================================

/// Checks if a required external command is available and executable.
///
/// Runs `<cmd_name> -version` and requires a zero exit status. A tool that
/// starts but cannot even report its version is treated as unusable.
///
/// # Returns
///
/// * `Ok(())` - The command ran and exited successfully
/// * `Err(CoreError::DependencyNotFound)` - The command does not exist
/// * `Err(CoreError::CommandStart)` - The command exists but failed to start
/// * `Err(CoreError::CommandFailed)` - The command exited with an error
pub fn check_dependency(cmd_name: &str) -> CoreResult<()> {
    let result = Command::new(cmd_name)
        .arg("-version")
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::piped())
        .output();

    match result {
        Ok(output) if output.status.success() => {
            log::debug!("Found dependency: {cmd_name}");
            Ok(())
        }
        Ok(output) => {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let err = command_failed_error(format!("{cmd_name} -version"), output.status, stderr);
            log::error!("Dependency check for '{cmd_name}' failed: {err}");
            Err(err)
        }
        Err(e) => {
            let err = command_start_error(cmd_name, e);
            log::error!("Dependency check for '{cmd_name}' failed: {err}");
            Err(err)
        }
    }
}
