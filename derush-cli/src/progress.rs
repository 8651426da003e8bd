// ============================================================================
// derush-cli/src/progress.rs
// ============================================================================
//
// PROGRESS REPORTING: Terminal progress bar for the scan batch
//
// Implements the core `ProgressReporter` trait with an indicatif bar drawn on
// stderr, redrawn in place for every clip:
//
//   [=========================-------------------------] 50.0% - A001C002.MXF
//
// The bar is hidden when stderr is not a terminal. Log records and per-clip
// warnings go through `MultiProgress::suspend` so they never tear the bar.

// ---- Internal crate imports ----
use crate::terminal::print_warning;

// ---- External crate imports ----
use derush_core::progress_reporting::{ProgressReporter, batch_percent};
use indicatif::{MultiProgress, ProgressBar, ProgressDrawTarget, ProgressState, ProgressStyle};

// ---- Standard library imports ----
use std::fmt::Write as _;
use std::io::{self, IsTerminal, Write as _};

/// Width of the bar in characters.
const PROGRESS_BAR_LENGTH: usize = 50;

/// Progress bar for the scan command.
#[derive(Debug)]
pub struct TerminalProgress {
    bar: ProgressBar,
}

impl TerminalProgress {
    /// Adds a scan bar to `progress`.
    pub fn new(progress: &MultiProgress) -> Self {
        let bar = progress.add(ProgressBar::new(0));
        bar.set_style(progress_style());
        Self { bar }
    }
}

/// Draw area shared by the progress bars and the logger.
///
/// Drawing is disabled when stderr is not a terminal.
pub fn shared_progress() -> MultiProgress {
    if io::stderr().is_terminal() {
        MultiProgress::new()
    } else {
        MultiProgress::with_draw_target(ProgressDrawTarget::hidden())
    }
}

/// Writes to stderr with the progress bars cleared for the duration.
pub struct SuspendingStderr {
    progress: MultiProgress,
}

impl SuspendingStderr {
    pub fn new(progress: MultiProgress) -> Self {
        Self { progress }
    }
}

impl io::Write for SuspendingStderr {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.progress.suspend(|| io::stderr().write(buf))
    }

    fn write_all(&mut self, buf: &[u8]) -> io::Result<()> {
        self.progress.suspend(|| io::stderr().write_all(buf))
    }

    fn flush(&mut self) -> io::Result<()> {
        io::stderr().flush()
    }
}

fn progress_style() -> ProgressStyle {
    let template = format!("[{{bar:{PROGRESS_BAR_LENGTH}}}] {{batch_percent}}% - {{msg}}");
    ProgressStyle::with_template(&template)
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .with_key("batch_percent", |state: &ProgressState, w: &mut dyn std::fmt::Write| {
            let total = state.len().unwrap_or(0) as usize;
            let _ = write!(w, "{:.1}", batch_percent(state.pos() as usize, total));
        })
        .progress_chars("==-")
}

impl ProgressReporter for TerminalProgress {
    fn start(&self, total: usize) {
        self.bar.set_length(total as u64);
        self.bar.set_position(0);
    }

    fn advance(&self, index: usize, _total: usize, filename: &str) {
        self.bar.set_position(index as u64);
        self.bar.set_message(filename.to_string());
    }

    fn degraded(&self, filename: &str, reason: &str) {
        self.bar
            .suspend(|| print_warning(&format!("{filename}: {reason}")));
    }

    fn finish(&self) {
        self.bar.finish();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn hidden() -> MultiProgress {
        MultiProgress::with_draw_target(ProgressDrawTarget::hidden())
    }

    #[test]
    fn test_bar_follows_the_batch() {
        let multi = hidden();
        let progress = TerminalProgress::new(&multi);
        progress.start(4);
        progress.advance(2, 4, "A002.MXF");
        assert_eq!(progress.bar.length(), Some(4));
        assert_eq!(progress.bar.position(), 2);
        assert_eq!(progress.bar.message(), "A002.MXF");

        progress.degraded("A002.MXF", "no starting timecode");
        assert_eq!(progress.bar.position(), 2);

        progress.finish();
        assert!(progress.bar.is_finished());
    }

    #[test]
    fn test_suspending_stderr_accepts_writes() {
        let mut writer = SuspendingStderr::new(hidden());
        assert!(writer.write_all(b"").is_ok());
        assert!(writer.flush().is_ok());
    }
}
