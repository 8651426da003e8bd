//! Core library for rushes logging: ffprobe metadata extraction into a CSV
//! rushes sheet, and paginated PDF rendering of that sheet.
//!
//! The two pipelines only share the sheet file. `run_extraction` scans a
//! directory of clips and writes the sheet; `render_sheet` reads it back and
//! lays it out as a document.
//!
//! ## Usage Example
//!
//! ```rust,no_run
//! use derush_core::{ExtractConfig, FfprobeCli, RenderConfig, SilentReporter};
//! use derush_core::{render_sheet, run_extraction};
//! use std::path::PathBuf;
//!
//! let config = ExtractConfig {
//!     video_dir: PathBuf::from("/rushes/day01"),
//!     sheet_path: PathBuf::from("/rushes/day01.csv"),
//!     ..ExtractConfig::default()
//! };
//! let probe = FfprobeCli::new(config.probe_program.clone());
//! let summary = run_extraction(&config, &probe, &SilentReporter).unwrap();
//! println!("{} clip(s) logged", summary.total());
//!
//! let render = RenderConfig {
//!     sheet_path: config.sheet_path.clone(),
//!     document_path: PathBuf::from("/rushes/day01.pdf"),
//!     ..RenderConfig::default()
//! };
//! render_sheet(&render).unwrap();
//! ```

pub mod config;
pub mod discovery;
pub mod error;
pub mod external;
pub mod processing;
pub mod progress_reporting;
pub mod render;
pub mod sheet;
pub mod timecode;

// Re-exports for public API
pub use config::{ExtractConfig, RenderConfig};
pub use discovery::find_media_files;
pub use error::{CoreError, CoreResult};
pub use external::{FfprobeCli, MediaProbe};
pub use processing::{BatchSummary, ClipTiming, Extraction, FileOutcome, run_extraction};
pub use progress_reporting::{ProgressReporter, SilentReporter};
pub use render::{RenderSummary, render_sheet};
pub use sheet::{MediaRecord, SHEET_HEADER, SheetWriter, read_sheet};
pub use timecode::{FrameRate, frames_to_tc, tc_to_frames};
