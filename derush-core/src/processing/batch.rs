// ============================================================================
// derush-core/src/processing/batch.rs
// ============================================================================
//
// BATCH DRIVER: Directory Scan to Rushes Sheet
//
// WORKFLOW:
// 1. Validate the configuration
// 2. Check that the probe tool can be invoked (fatal otherwise)
// 3. Check that the source directory exists (fatal otherwise)
// 4. Create the sheet and write its header
// 5. For each clip, in file name order:
//    a. Report progress
//    b. Probe and compute the timing (degraded on probe failure)
//    c. Append the record and flush
//
// Processing is sequential in the calling thread; each row is on disk
// before the next clip is probed.

// ---- Internal crate imports ----
use crate::config::ExtractConfig;
use crate::discovery::find_media_files;
use crate::error::{CoreError, CoreResult};
use crate::external::MediaProbe;
use crate::processing::extraction::{Extraction, extract_clip};
use crate::progress_reporting::ProgressReporter;
use crate::sheet::{MediaRecord, SheetWriter};

// ---- External crate imports ----
use log::info;

// ---- Standard library imports ----
use std::path::PathBuf;

// ============================================================================
// RESULT TYPES
// ============================================================================

/// Outcome for one clip of a batch.
#[derive(Debug, Clone, PartialEq)]
pub struct FileOutcome {
    pub filename: String,
    pub extraction: Extraction,
}

/// Summary of a finished extraction batch.
#[derive(Debug, Clone, PartialEq)]
pub struct BatchSummary {
    /// The sheet that was written.
    pub sheet_path: PathBuf,
    /// Per-clip outcomes in sheet order.
    pub files: Vec<FileOutcome>,
}

impl BatchSummary {
    #[must_use]
    pub fn total(&self) -> usize {
        self.files.len()
    }

    #[must_use]
    pub fn complete(&self) -> usize {
        self.files
            .iter()
            .filter(|f| f.extraction.is_complete())
            .count()
    }

    #[must_use]
    pub fn missing_timecode(&self) -> usize {
        self.files
            .iter()
            .filter(|f| matches!(f.extraction, Extraction::MissingTimecode(_)))
            .count()
    }

    #[must_use]
    pub fn failed(&self) -> usize {
        self.files
            .iter()
            .filter(|f| matches!(f.extraction, Extraction::ProbeFailed { .. }))
            .count()
    }
}

// ============================================================================
// MAIN PROCESSING FUNCTION
// ============================================================================

/// Scans `config.video_dir` and writes one sheet row per clip.
///
/// # Errors
///
/// * `CoreError::Config` - If the configuration is invalid
/// * `CoreError::DependencyNotFound` - If the probe tool cannot be invoked
/// * `CoreError::SourceDirNotFound` - If the source directory is missing
/// * `CoreError::TimecodeFormat` - If a clip carries a malformed timecode tag
/// * `CoreError::Io` / `CoreError::Csv` - If the sheet cannot be written
///
/// Probe failures on individual clips are not errors; see [`Extraction`].
pub fn run_extraction<P, R>(config: &ExtractConfig, probe: &P, reporter: &R) -> CoreResult<BatchSummary>
where
    P: MediaProbe,
    R: ProgressReporter + ?Sized,
{
    config.validate()?;
    probe.ensure_available()?;

    if !config.video_dir.is_dir() {
        return Err(CoreError::SourceDirNotFound(config.video_dir.clone()));
    }

    info!("Searching for clips in: {}", config.video_dir.display());
    info!("Output sheet: {}", config.sheet_path.display());

    let files = find_media_files(&config.video_dir, &config.extension)?;
    let mut writer = SheetWriter::create(&config.sheet_path)?;

    let total = files.len();
    info!("Found {total} .{} file(s)", config.extension.trim_start_matches('.'));
    reporter.start(total);

    let mut outcomes = Vec::with_capacity(total);
    for (index, path) in files.iter().enumerate() {
        let filename = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        reporter.advance(index + 1, total, &filename);

        let extraction = extract_clip(probe, path, config.frame_rate)?;
        if let Some(reason) = extraction.degradation() {
            reporter.degraded(&filename, &reason);
        }

        writer.append(&MediaRecord::new(filename.clone(), extraction.timing().clone()))?;
        outcomes.push(FileOutcome {
            filename,
            extraction,
        });
    }

    reporter.finish();

    Ok(BatchSummary {
        sheet_path: config.sheet_path.clone(),
        files: outcomes,
    })
}
