//! Per-clip metadata extraction.
//!
//! Turns the two probe answers for one clip (starting timecode tag and
//! container duration) into the three computed sheet fields. Probe failures
//! never abort the batch: they degrade the clip to zero values and the cause
//! is kept in the returned [`Extraction`].

use crate::error::CoreResult;
use crate::external::MediaProbe;
use crate::timecode::{
    FrameRate, ZERO_DURATION, ZERO_TIMECODE, format_duration_hms, frames_to_tc, out_point,
    tc_to_frames,
};

use log::{debug, warn};
use std::path::Path;

/// Computed timing fields of one clip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClipTiming {
    /// `HH:MM:SS:FF` of the first frame.
    pub timecode_in: String,
    /// `HH:MM:SS:FF` of the last frame.
    pub timecode_out: String,
    /// `HH:MM:SS`, rounded to whole seconds.
    pub duration: String,
}

impl ClipTiming {
    /// All-zero timing used when nothing could be probed.
    #[must_use]
    pub fn zero() -> Self {
        Self {
            timecode_in: ZERO_TIMECODE.to_string(),
            timecode_out: ZERO_TIMECODE.to_string(),
            duration: ZERO_DURATION.to_string(),
        }
    }
}

/// Outcome of extracting one clip.
#[derive(Debug, Clone, PartialEq)]
pub enum Extraction {
    /// Timecode and duration were both probed.
    Complete(ClipTiming),
    /// The clip carries no starting timecode; in and out are zero, the
    /// duration is real.
    MissingTimecode(ClipTiming),
    /// A probe query failed; every field is zero.
    ProbeFailed { timing: ClipTiming, reason: String },
}

impl Extraction {
    /// The timing to write to the sheet, whatever the outcome.
    #[must_use]
    pub fn timing(&self) -> &ClipTiming {
        match self {
            Extraction::Complete(timing)
            | Extraction::MissingTimecode(timing)
            | Extraction::ProbeFailed { timing, .. } => timing,
        }
    }

    #[must_use]
    pub fn into_timing(self) -> ClipTiming {
        match self {
            Extraction::Complete(timing)
            | Extraction::MissingTimecode(timing)
            | Extraction::ProbeFailed { timing, .. } => timing,
        }
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        matches!(self, Extraction::Complete(_))
    }

    /// Human-readable cause of a degraded result, `None` when complete.
    #[must_use]
    pub fn degradation(&self) -> Option<String> {
        match self {
            Extraction::Complete(_) => None,
            Extraction::MissingTimecode(_) => Some("no starting timecode".to_string()),
            Extraction::ProbeFailed { reason, .. } => Some(reason.clone()),
        }
    }
}

/// Computes the timing of a clip from its probed values.
///
/// `tc_in` of `None` (or an empty tag) selects the zero-timecode fallback.
/// A tag that is present but not `HH:MM:SS:FF` is an error.
pub fn compute_timing(
    tc_in: Option<&str>,
    duration_secs: f64,
    rate: FrameRate,
) -> CoreResult<Extraction> {
    let duration = format_duration_hms(duration_secs);

    let Some(tc_in) = tc_in.map(str::trim).filter(|tc| !tc.is_empty()) else {
        return Ok(Extraction::MissingTimecode(ClipTiming {
            timecode_in: ZERO_TIMECODE.to_string(),
            timecode_out: ZERO_TIMECODE.to_string(),
            duration,
        }));
    };

    let in_frames = tc_to_frames(tc_in, rate)?;
    let out_frames = out_point(in_frames, duration_secs, rate);

    Ok(Extraction::Complete(ClipTiming {
        timecode_in: tc_in.to_string(),
        timecode_out: frames_to_tc(out_frames, rate),
        duration,
    }))
}

/// Probes `path` and computes its timing.
///
/// # Errors
///
/// Only a malformed timecode tag is returned as an error. Probe failures are
/// logged and reported as [`Extraction::ProbeFailed`].
pub fn extract_clip<P: MediaProbe>(probe: &P, path: &Path, rate: FrameRate) -> CoreResult<Extraction> {
    let probed = probe
        .probe_timecode(path)
        .and_then(|tc| probe.probe_duration(path).map(|duration| (tc, duration)));

    let (tc_in, duration_secs) = match probed {
        Ok(values) => values,
        Err(e) => {
            warn!("Error while probing {}: {e}", path.display());
            return Ok(Extraction::ProbeFailed {
                timing: ClipTiming::zero(),
                reason: e.to_string(),
            });
        }
    };

    debug!(
        "Probed {}: timecode={:?}, duration={duration_secs}s",
        path.display(),
        tc_in
    );
    compute_timing(tc_in.as_deref(), duration_secs, rate)
}
