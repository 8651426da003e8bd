//! Rushes sheet production.
//!
//! `extraction` computes the timing of a single clip, `batch` drives it over a
//! whole directory and writes the sheet.

/// Per-clip probing and timing computation
pub mod extraction;

/// Directory-wide batch driver
pub mod batch;

pub use batch::{BatchSummary, FileOutcome, run_extraction};
pub use extraction::{ClipTiming, Extraction, compute_timing, extract_clip};
