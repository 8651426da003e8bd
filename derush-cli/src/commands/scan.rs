//! Implementation of the 'scan' subcommand.
//!
//! Builds the extraction configuration from the command-line arguments and
//! hands it to `derush_core::run_extraction` with the ffprobe executable and
//! a terminal progress bar.

use crate::cli::ScanArgs;
use crate::error::CliResult;
use crate::progress::TerminalProgress;
use crate::terminal::{print_status, print_success};

use derush_core::config::ExtractConfig;
use derush_core::timecode::FrameRate;
use derush_core::{BatchSummary, FfprobeCli, run_extraction};

use indicatif::MultiProgress;
use log::info;

/// Creates the extraction configuration from CLI arguments.
pub fn create_extract_config(args: &ScanArgs) -> CliResult<ExtractConfig> {
    let config = ExtractConfig {
        video_dir: args.video_dir.clone(),
        sheet_path: args.sheet_path.clone(),
        frame_rate: FrameRate::new(args.fps)?,
        extension: args.extension.clone(),
        probe_program: args.ffprobe.clone(),
    };
    config.validate()?;
    Ok(config)
}

/// Runs the scan and prints its summary.
///
/// Degraded clips are reported as they happen, above the bar drawn in `progress`.
pub fn run_scan(args: &ScanArgs, progress: &MultiProgress) -> CliResult<BatchSummary> {
    let config = create_extract_config(args)?;
    let probe = FfprobeCli::new(config.probe_program.clone());

    print_status("Clips", &config.video_dir.display().to_string());
    print_status("Sheet", &config.sheet_path.display().to_string());
    print_status("Frame rate", &config.frame_rate.to_string());

    let reporter = TerminalProgress::new(progress);
    let summary = run_extraction(&config, &probe, &reporter)?;

    info!(
        "Scan finished: {} clip(s), {} complete, {} without timecode, {} failed",
        summary.total(),
        summary.complete(),
        summary.missing_timecode(),
        summary.failed()
    );

    print_success(&format!(
        "The rushes sheet {} was created with {} clip(s).",
        summary.sheet_path.display(),
        summary.total()
    ));
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use derush_core::CoreError;
    use std::path::PathBuf;

    fn args() -> ScanArgs {
        ScanArgs {
            video_dir: PathBuf::from("VIDEO"),
            sheet_path: PathBuf::from("sheet.csv"),
            fps: 24,
            extension: "MOV".to_string(),
            ffprobe: "ffprobe".to_string(),
        }
    }

    #[test]
    fn test_create_extract_config() {
        let config = create_extract_config(&args()).unwrap();
        assert_eq!(config.frame_rate.fps(), 24);
        assert_eq!(config.extension, "MOV");
        assert_eq!(config.sheet_path, PathBuf::from("sheet.csv"));
    }

    #[test]
    fn test_create_extract_config_rejects_empty_extension() {
        let mut bad = args();
        bad.extension = String::new();
        assert!(matches!(create_extract_config(&bad), Err(CoreError::Config(_))));
    }
}
