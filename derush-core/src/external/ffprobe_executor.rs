//! ffprobe command-line integration.
//!
//! Each query runs ffprobe once with `-show_entries` selecting a single value
//! and a `default=noprint_wrappers=1:nokey=1` writer, so stdout carries the
//! bare value and nothing else.
use crate::error::{CoreError, CoreResult, command_failed_error, command_start_error};
use crate::external::{MediaProbe, check_dependency};

use std::path::Path;
use std::process::{Command, Stdio};

/// Entry selector for the starting timecode tag of the container.
const TIMECODE_ENTRIES: &str = "format_tags=timecode";

/// Entry selector for the container duration in seconds.
const DURATION_ENTRIES: &str = "format=duration";

/// Output writer printing bare values, one per line.
const PLAIN_WRITER: &str = "default=noprint_wrappers=1:nokey=1";

/// [`MediaProbe`] backed by the ffprobe executable.
#[derive(Debug, Clone)]
pub struct FfprobeCli {
    program: String,
}

impl FfprobeCli {
    /// Uses `program` (a name looked up on PATH, or a path) as the ffprobe binary.
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    #[must_use]
    pub fn program(&self) -> &str {
        &self.program
    }

    fn build_query(&self, entries: &str, path: &Path) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(["-v", "error", "-show_entries", entries, "-of", PLAIN_WRITER])
            .arg(path)
            .stdin(Stdio::null());
        cmd
    }

    /// Runs one query and returns its trimmed stdout.
    fn run_query(&self, entries: &str, path: &Path) -> CoreResult<String> {
        log::debug!("Running ffprobe ({entries}) on: {}", path.display());
        let output = self
            .build_query(entries, path)
            .output()
            .map_err(|e| command_start_error(format!("{} ({entries})", self.program), e))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).into_owned();
            return Err(command_failed_error(
                format!("{} ({entries})", self.program),
                output.status,
                stderr,
            ));
        }

        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }
}

impl Default for FfprobeCli {
    fn default() -> Self {
        Self::new(crate::config::DEFAULT_PROBE_PROGRAM)
    }
}

impl MediaProbe for FfprobeCli {
    fn ensure_available(&self) -> CoreResult<()> {
        check_dependency(&self.program)
    }

    fn probe_timecode(&self, path: &Path) -> CoreResult<Option<String>> {
        let stdout = self.run_query(TIMECODE_ENTRIES, path)?;
        Ok(parse_timecode_output(&stdout))
    }

    fn probe_duration(&self, path: &Path) -> CoreResult<f64> {
        let stdout = self.run_query(DURATION_ENTRIES, path)?;
        parse_duration_output(&stdout)
    }
}

/// First non-empty line of the timecode query, if any.
fn parse_timecode_output(stdout: &str) -> Option<String> {
    stdout
        .lines()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .map(str::to_string)
}

/// Parses the duration query output into finite, non-negative seconds.
fn parse_duration_output(stdout: &str) -> CoreResult<f64> {
    let value = stdout.trim();
    let seconds = value.parse::<f64>().map_err(|_| {
        CoreError::ProbeParse(format!("duration '{value}' is not a number"))
    })?;
    if !seconds.is_finite() || seconds < 0.0 {
        return Err(CoreError::ProbeParse(format!(
            "duration '{value}' is out of range"
        )));
    }
    Ok(seconds)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_query_arguments() {
        let probe = FfprobeCli::new("/opt/ffmpeg/bin/ffprobe");
        let cmd = probe.build_query(TIMECODE_ENTRIES, Path::new("/rushes/A001.MXF"));
        let args: Vec<String> = cmd
            .get_args()
            .map(|a| a.to_string_lossy().into_owned())
            .collect();
        assert_eq!(cmd.get_program(), "/opt/ffmpeg/bin/ffprobe");
        assert_eq!(
            args,
            [
                "-v",
                "error",
                "-show_entries",
                "format_tags=timecode",
                "-of",
                "default=noprint_wrappers=1:nokey=1",
                "/rushes/A001.MXF",
            ]
        );
    }

    #[test]
    fn test_parse_timecode_output() {
        assert_eq!(parse_timecode_output(""), None);
        assert_eq!(parse_timecode_output("  \n"), None);
        assert_eq!(
            parse_timecode_output("10:00:00:00\n"),
            Some("10:00:00:00".to_string())
        );
    }

    #[test]
    fn test_parse_duration_output() {
        assert_eq!(parse_duration_output("10.000000\n").unwrap(), 10.0);
        assert!(matches!(parse_duration_output("N/A"), Err(CoreError::ProbeParse(_))));
        assert!(matches!(parse_duration_output(""), Err(CoreError::ProbeParse(_))));
        assert!(matches!(parse_duration_output("-1.0"), Err(CoreError::ProbeParse(_))));
        assert!(matches!(parse_duration_output("inf"), Err(CoreError::ProbeParse(_))));
    }

    #[test]
    fn test_missing_program_is_dependency_error() {
        let probe = FfprobeCli::new("derush-no-such-ffprobe");
        assert!(matches!(
            probe.ensure_available(),
            Err(CoreError::DependencyNotFound(_))
        ));
        assert!(matches!(
            probe.probe_duration(Path::new("clip.MXF")),
            Err(CoreError::DependencyNotFound(_))
        ));
    }
}
