//! Progress Reporting API
//!
//! The batch driver reports where it is through this trait so the core
//! library stays free of terminal formatting. The CLI draws a progress bar;
//! tests and library consumers that do not care use [`SilentReporter`].

/// Receives progress events from the extraction batch.
///
/// Events arrive in order: one `start`, then one `advance` per file with a
/// 1-based index, then one `finish`.
pub trait ProgressReporter {
    /// A batch of `total` files is about to be processed.
    fn start(&self, total: usize);

    /// File number `index` (1-based) out of `total` is being processed.
    fn advance(&self, index: usize, total: usize, filename: &str);

    /// A file could only be logged with degraded values.
    fn degraded(&self, filename: &str, reason: &str) {
        let _ = (filename, reason);
    }

    /// The batch is over.
    fn finish(&self);
}

/// Reporter that discards every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentReporter;

impl ProgressReporter for SilentReporter {
    fn start(&self, _total: usize) {}

    fn advance(&self, _index: usize, _total: usize, _filename: &str) {}

    fn finish(&self) {}
}

/// Percentage of the batch done once file `index` is processed, one decimal.
#[must_use]
pub fn batch_percent(index: usize, total: usize) -> f64 {
    if total == 0 {
        return 100.0;
    }
    (1000.0 * index as f64 / total as f64).round() / 10.0
}
