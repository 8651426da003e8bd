// ============================================================================
// derush-core/src/error.rs
// ============================================================================
//
// ERROR HANDLING: Error Types for the Derush Core Library
//
// This module defines the error taxonomy shared by both pipelines:
// - Environment errors (missing ffprobe, missing source directory, missing
//   sheet): fatal, reported before any work starts
// - Probe errors (ffprobe start/exit/parse failures): recovered per file by
//   the extraction step
// - Format errors (malformed timecodes): fatal
// - Layout and PDF errors: fatal to the render step only

// ---- External crate imports ----
use thiserror::Error;

// ---- Standard library imports ----
use std::io;
use std::path::PathBuf;
use std::process::ExitStatus;

// ============================================================================
// ERROR TYPE
// ============================================================================

/// Errors produced by the derush core library.
#[derive(Error, Debug)]
pub enum CoreError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Required external tool '{0}' was not found. Install ffmpeg (which ships ffprobe) and make sure it is on PATH")]
    DependencyNotFound(String),

    #[error("Failed to start command '{0}': {1}")]
    CommandStart(String, io::Error),

    #[error("Command '{0}' failed with {1}: {2}")]
    CommandFailed(String, ExitStatus, String),

    #[error("Could not parse probe output: {0}")]
    ProbeParse(String),

    #[error("Invalid timecode '{0}': expected HH:MM:SS:FF")]
    TimecodeFormat(String),

    #[error("Source directory does not exist: {}", .0.display())]
    SourceDirNotFound(PathBuf),

    #[error("Sheet file does not exist: {}", .0.display())]
    SheetNotFound(PathBuf),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Row {row} has {found} columns but the column schema defines {expected}")]
    ColumnMismatch {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("Row {row} is {height:.1}pt tall and does not fit in the {available:.1}pt page frame")]
    RowTooTall {
        row: usize,
        height: f32,
        available: f32,
    },

    #[error("PDF generation failed: {0}")]
    Pdf(String),

    #[error("Invalid configuration: {0}")]
    Config(String),
}

/// Result type alias for derush core operations.
pub type CoreResult<T> = std::result::Result<T, CoreError>;

// ============================================================================
// CONSTRUCTORS
// ============================================================================

/// Builds a [`CoreError::CommandStart`], mapping a missing executable to
/// [`CoreError::DependencyNotFound`].
pub fn command_start_error(cmd: impl Into<String>, err: io::Error) -> CoreError {
    let cmd = cmd.into();
    if err.kind() == io::ErrorKind::NotFound {
        CoreError::DependencyNotFound(cmd)
    } else {
        CoreError::CommandStart(cmd, err)
    }
}

/// Builds a [`CoreError::CommandFailed`] from an exit status and captured stderr.
pub fn command_failed_error(
    cmd: impl Into<String>,
    status: ExitStatus,
    stderr: impl Into<String>,
) -> CoreError {
    CoreError::CommandFailed(cmd.into(), status, stderr.into().trim().to_string())
}

impl CoreError {
    /// Whether this error comes from the host environment rather than the data.
    #[must_use]
    pub fn is_environment_error(&self) -> bool {
        matches!(
            self,
            CoreError::DependencyNotFound(_)
                | CoreError::SourceDirNotFound(_)
                | CoreError::SheetNotFound(_)
        )
    }
}
