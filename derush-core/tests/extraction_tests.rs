// derush-core/tests/extraction_tests.rs
//
// Batch extraction against a scripted probe: no ffprobe needed.

use derush_core::config::ExtractConfig;
use derush_core::error::{CoreError, CoreResult};
use derush_core::external::MediaProbe;
use derush_core::processing::{Extraction, run_extraction};
use derush_core::progress_reporting::{ProgressReporter, SilentReporter};
use derush_core::sheet::{SHEET_HEADER, read_sheet};
use derush_core::timecode::FrameRate;

use std::cell::RefCell;
use std::collections::HashMap;
use std::fs::File;
use std::path::Path;
use tempfile::tempdir;

// --- Scripted probe ---

#[derive(Clone)]
enum Answer {
    Values(Option<&'static str>, f64),
    Fails,
}

#[derive(Default)]
struct ScriptedProbe {
    unavailable: bool,
    answers: HashMap<String, Answer>,
    probed: RefCell<Vec<String>>,
}

impl ScriptedProbe {
    fn with(mut self, filename: &str, answer: Answer) -> Self {
        self.answers.insert(filename.to_string(), answer);
        self
    }

    fn answer(&self, path: &Path) -> Answer {
        let name = path.file_name().unwrap().to_string_lossy().into_owned();
        self.probed.borrow_mut().push(name.clone());
        self.answers.get(&name).cloned().unwrap_or(Answer::Fails)
    }
}

impl MediaProbe for ScriptedProbe {
    fn ensure_available(&self) -> CoreResult<()> {
        if self.unavailable {
            Err(CoreError::DependencyNotFound("ffprobe".to_string()))
        } else {
            Ok(())
        }
    }

    fn probe_timecode(&self, path: &Path) -> CoreResult<Option<String>> {
        match self.answer(path) {
            Answer::Values(tc, _) => Ok(tc.map(str::to_string)),
            Answer::Fails => Err(CoreError::ProbeParse("scripted failure".to_string())),
        }
    }

    fn probe_duration(&self, path: &Path) -> CoreResult<f64> {
        match self.answer(path) {
            Answer::Values(_, duration) => Ok(duration),
            Answer::Fails => Err(CoreError::ProbeParse("scripted failure".to_string())),
        }
    }
}

// --- Recording reporter ---

#[derive(Default)]
struct RecordingReporter {
    events: RefCell<Vec<String>>,
}

impl ProgressReporter for RecordingReporter {
    fn start(&self, total: usize) {
        self.events.borrow_mut().push(format!("start {total}"));
    }

    fn advance(&self, index: usize, total: usize, filename: &str) {
        self.events
            .borrow_mut()
            .push(format!("{index}/{total} {filename}"));
    }

    fn degraded(&self, filename: &str, _reason: &str) {
        self.events.borrow_mut().push(format!("degraded {filename}"));
    }

    fn finish(&self) {
        self.events.borrow_mut().push("finish".to_string());
    }
}

fn config_for(dir: &Path) -> ExtractConfig {
    ExtractConfig {
        video_dir: dir.join("VIDEO"),
        sheet_path: dir.join("derush_sheet.csv"),
        frame_rate: FrameRate::PAL,
        ..ExtractConfig::default()
    }
}

// --- Tests ---

#[test]
fn test_single_clip_with_timecode() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let config = config_for(dir.path());
    std::fs::create_dir(&config.video_dir)?;
    File::create(config.video_dir.join("A001C001.MXF"))?;

    let probe = ScriptedProbe::default().with("A001C001.MXF", Answer::Values(Some("01:00:00:00"), 10.0));
    let summary = run_extraction(&config, &probe, &SilentReporter)?;

    assert_eq!(summary.total(), 1);
    assert_eq!(summary.complete(), 1);

    let rows = read_sheet(&config.sheet_path)?;
    assert_eq!(rows[0], SHEET_HEADER);
    assert_eq!(
        rows[1],
        ["A001C001.MXF", "01:00:00:00", "01:00:09:24", "00:00:10", "", "", "", ""]
    );
    Ok(())
}

#[test]
fn test_empty_directory_yields_header_only() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let config = config_for(dir.path());
    std::fs::create_dir(&config.video_dir)?;

    let reporter = RecordingReporter::default();
    let summary = run_extraction(&config, &ScriptedProbe::default(), &reporter)?;

    assert_eq!(summary.total(), 0);
    let rows = read_sheet(&config.sheet_path)?;
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0], SHEET_HEADER);
    assert_eq!(*reporter.events.borrow(), ["start 0", "finish"]);
    Ok(())
}

#[test]
fn test_degraded_clips_do_not_abort_the_batch() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let config = config_for(dir.path());
    std::fs::create_dir(&config.video_dir)?;
    for name in ["A001.MXF", "A002.MXF", "A003.MXF"] {
        File::create(config.video_dir.join(name))?;
    }

    let probe = ScriptedProbe::default()
        .with("A001.MXF", Answer::Values(None, 125.6))
        .with("A002.MXF", Answer::Fails)
        .with("A003.MXF", Answer::Values(Some("10:00:00:00"), 1.0));
    let reporter = RecordingReporter::default();
    let summary = run_extraction(&config, &probe, &reporter)?;

    assert_eq!(summary.total(), 3);
    assert_eq!(summary.missing_timecode(), 1);
    assert_eq!(summary.failed(), 1);
    assert_eq!(summary.complete(), 1);
    match &summary.files[1].extraction {
        Extraction::ProbeFailed { reason, .. } => assert!(reason.contains("scripted failure")),
        other => panic!("Unexpected outcome: {:?}", other),
    }

    let rows = read_sheet(&config.sheet_path)?;
    assert_eq!(rows.len(), 4);
    assert_eq!(rows[1][1..4], ["00:00:00:00", "00:00:00:00", "00:02:06"]);
    assert_eq!(rows[2][1..4], ["00:00:00:00", "00:00:00:00", "00:00:00"]);
    assert_eq!(rows[3][1..4], ["10:00:00:00", "10:00:00:24", "00:00:01"]);

    assert_eq!(
        *reporter.events.borrow(),
        [
            "start 3",
            "1/3 A001.MXF",
            "degraded A001.MXF",
            "2/3 A002.MXF",
            "degraded A002.MXF",
            "3/3 A003.MXF",
            "finish"
        ]
    );
    Ok(())
}

#[test]
fn test_missing_probe_aborts_before_scanning() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let config = config_for(dir.path());
    std::fs::create_dir(&config.video_dir)?;
    File::create(config.video_dir.join("A001.MXF"))?;

    let probe = ScriptedProbe {
        unavailable: true,
        ..ScriptedProbe::default()
    };
    let result = run_extraction(&config, &probe, &SilentReporter);

    assert!(matches!(result, Err(CoreError::DependencyNotFound(_))));
    assert!(probe.probed.borrow().is_empty());
    assert!(!config.sheet_path.exists());
    Ok(())
}

#[test]
fn test_missing_source_directory_is_fatal() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let config = config_for(dir.path());

    let result = run_extraction(&config, &ScriptedProbe::default(), &SilentReporter);

    assert!(matches!(result, Err(CoreError::SourceDirNotFound(_))));
    assert!(!config.sheet_path.exists());
    Ok(())
}

#[test]
fn test_malformed_timecode_is_fatal_but_keeps_earlier_rows() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let config = config_for(dir.path());
    std::fs::create_dir(&config.video_dir)?;
    File::create(config.video_dir.join("A001.MXF"))?;
    File::create(config.video_dir.join("A002.MXF"))?;

    let probe = ScriptedProbe::default()
        .with("A001.MXF", Answer::Values(Some("00:00:10:00"), 2.0))
        .with("A002.MXF", Answer::Values(Some("00:00:10;00"), 2.0));
    let result = run_extraction(&config, &probe, &SilentReporter);

    assert!(matches!(result, Err(CoreError::TimecodeFormat(_))));
    let rows = read_sheet(&config.sheet_path)?;
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[1][0], "A001.MXF");
    Ok(())
}

#[cfg(unix)]
#[test]
fn test_failing_ffprobe_version_aborts_the_batch() -> Result<(), Box<dyn std::error::Error>> {
    use derush_core::external::FfprobeCli;

    let dir = tempdir()?;
    let config = config_for(dir.path());
    std::fs::create_dir(&config.video_dir)?;
    File::create(config.video_dir.join("A001.MXF"))?;

    let result = run_extraction(&config, &FfprobeCli::new("false"), &SilentReporter);

    assert!(matches!(result, Err(CoreError::CommandFailed(..))));
    assert!(!config.sheet_path.exists());
    Ok(())
}
