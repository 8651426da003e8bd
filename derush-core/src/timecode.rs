//! Fixed-frame-rate timecode arithmetic.
//!
//! Timecodes are `HH:MM:SS:FF` strings; every conversion goes through an
//! absolute frame count at a single project frame rate. Rounding follows
//! round-half-to-even, so `2.5` seconds rounds to `2` and `3.5` to `4`.

use crate::error::{CoreError, CoreResult};

use std::fmt;

/// Timecode used when no starting timecode can be determined.
pub const ZERO_TIMECODE: &str = "00:00:00:00";

/// Duration used when the probe fails entirely.
pub const ZERO_DURATION: &str = "00:00:00";

const SECONDS_PER_DAY: u64 = 86_400;

/// A non-zero, whole number of frames per second.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameRate(u32);

impl FrameRate {
    /// 25 fps, the PAL broadcast rate.
    pub const PAL: FrameRate = FrameRate(25);

    pub fn new(fps: u32) -> CoreResult<Self> {
        if fps == 0 {
            return Err(CoreError::Config(
                "frame rate must be at least 1 fps".to_string(),
            ));
        }
        Ok(Self(fps))
    }

    #[must_use]
    pub fn fps(self) -> u32 {
        self.0
    }

    fn as_u64(self) -> u64 {
        u64::from(self.0)
    }
}

impl fmt::Display for FrameRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} fps", self.0)
    }
}

/// Converts `HH:MM:SS:FF` into an absolute frame count.
///
/// The string must split into exactly four non-negative integer fields.
/// Whitespace around a field is ignored.
pub fn tc_to_frames(tc: &str, rate: FrameRate) -> CoreResult<u64> {
    let format_error = || CoreError::TimecodeFormat(tc.to_string());

    let fields = tc
        .split(':')
        .map(|field| field.trim().parse::<u64>().map_err(|_| format_error()))
        .collect::<CoreResult<Vec<u64>>>()?;

    let [hh, mm, ss, ff] = fields[..] else {
        return Err(format_error());
    };

    hh.checked_mul(3600)
        .and_then(|h| mm.checked_mul(60).and_then(|m| h.checked_add(m)))
        .and_then(|hm| hm.checked_add(ss))
        .and_then(|secs| secs.checked_mul(rate.as_u64()))
        .and_then(|frames| frames.checked_add(ff))
        .ok_or_else(format_error)
}

/// Converts an absolute frame count back into `HH:MM:SS:FF`.
///
/// Hours are not wrapped at 24.
#[must_use]
pub fn frames_to_tc(total_frames: u64, rate: FrameRate) -> String {
    let fps = rate.as_u64();
    let frames = total_frames % fps;
    let total_seconds = total_frames / fps;
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;
    format!("{hours:02}:{minutes:02}:{seconds:02}:{frames:02}")
}

/// Number of whole frames covered by `duration_secs`, rounded to the nearest frame.
#[must_use]
pub fn duration_to_frames(duration_secs: f64, rate: FrameRate) -> u64 {
    let frames = (duration_secs * f64::from(rate.fps())).round_ties_even();
    if frames.is_finite() && frames > 0.0 {
        frames as u64
    } else {
        0
    }
}

/// Frame count of the last frame of a clip starting at `in_frames`.
///
/// The duration is counted inclusively: a one-frame clip ends on its first
/// frame. A zero-frame clip starting at frame zero stays at frame zero.
#[must_use]
pub fn out_point(in_frames: u64, duration_secs: f64, rate: FrameRate) -> u64 {
    in_frames
        .saturating_add(duration_to_frames(duration_secs, rate))
        .saturating_sub(1)
}

/// Formats a duration in seconds as `HH:MM:SS`, rounded to the nearest second.
///
/// Only the time-of-day part is kept, so a clip of a day or longer wraps.
#[must_use]
pub fn format_duration_hms(duration_secs: f64) -> String {
    let rounded = duration_secs.round_ties_even();
    let total = if rounded.is_finite() && rounded > 0.0 {
        rounded as u64
    } else {
        0
    };
    let of_day = total % SECONDS_PER_DAY;
    let hours = of_day / 3600;
    let minutes = (of_day % 3600) / 60;
    let seconds = of_day % 60;
    format!("{hours:02}:{minutes:02}:{seconds:02}")
}

#[cfg(test)]
mod tests {
    use super::*;

    const FPS25: FrameRate = FrameRate::PAL;

    #[test]
    fn test_tc_to_frames() {
        assert_eq!(tc_to_frames("00:00:00:00", FPS25).unwrap(), 0);
        assert_eq!(tc_to_frames("00:00:01:00", FPS25).unwrap(), 25);
        assert_eq!(tc_to_frames("01:00:00:00", FPS25).unwrap(), 90_000);
        assert_eq!(tc_to_frames("10:20:30:12", FPS25).unwrap(), 930_762);
    }

    #[test]
    fn test_tc_to_frames_ignores_spaces_around_fields() {
        assert_eq!(tc_to_frames("01: 00:00:00", FPS25).unwrap(), 90_000);
        assert_eq!(tc_to_frames(" 00 :00:01 : 05 ", FPS25).unwrap(), 30);
    }

    #[test]
    fn test_tc_to_frames_rejects_malformed() {
        for bad in ["", "01:00:00", "01:00:00:00:00", "01:00:00;00", "aa:00:00:00", "-1:00:00:00", "01: :00:00", "0 1:00:00:00"] {
            assert!(
                matches!(tc_to_frames(bad, FPS25), Err(CoreError::TimecodeFormat(_))),
                "expected format error for {bad:?}"
            );
        }
    }

    #[test]
    fn test_frames_to_tc() {
        assert_eq!(frames_to_tc(0, FPS25), "00:00:00:00");
        assert_eq!(frames_to_tc(24, FPS25), "00:00:00:24");
        assert_eq!(frames_to_tc(25, FPS25), "00:00:01:00");
        assert_eq!(frames_to_tc(90_249, FPS25), "01:00:09:24");
        assert_eq!(frames_to_tc(25 * 3600 * 100, FPS25), "100:00:00:00");
    }

    #[test]
    fn test_round_trip_over_one_day() {
        let rate = FrameRate::new(30).unwrap();
        let day = 24 * 3600 * 30;
        for frames in (0..day).step_by(997).chain([day - 1]) {
            assert_eq!(tc_to_frames(&frames_to_tc(frames, rate), rate).unwrap(), frames);
        }
    }

    #[test]
    fn test_out_point_is_inclusive() {
        // 1 rounded frame ends on the in-point itself
        assert_eq!(out_point(0, 0.04, FPS25), 0);
        assert_eq!(frames_to_tc(out_point(0, 0.04, FPS25), FPS25), ZERO_TIMECODE);

        let tc_in = tc_to_frames("01:00:00:00", FPS25).unwrap();
        assert_eq!(frames_to_tc(out_point(tc_in, 10.0, FPS25), FPS25), "01:00:09:24");
    }

    #[test]
    fn test_out_point_is_monotonic_in_duration() {
        let tc_in = tc_to_frames("00:59:59:10", FPS25).unwrap();
        let mut previous = out_point(tc_in, 0.0, FPS25);
        for step in 1..2000 {
            let current = out_point(tc_in, f64::from(step) * 0.013, FPS25);
            assert!(current >= previous);
            previous = current;
        }
    }

    #[test]
    fn test_rounding_is_half_to_even() {
        let rate = FrameRate::new(2).unwrap();
        assert_eq!(duration_to_frames(0.25, rate), 0);
        assert_eq!(duration_to_frames(0.75, rate), 2);
        assert_eq!(duration_to_frames(1.25, rate), 2);
        assert_eq!(format_duration_hms(2.5), "00:00:02");
        assert_eq!(format_duration_hms(3.5), "00:00:04");
    }

    #[test]
    fn test_format_duration_hms() {
        assert_eq!(format_duration_hms(0.0), "00:00:00");
        assert_eq!(format_duration_hms(10.0), "00:00:10");
        assert_eq!(format_duration_hms(3725.4), "01:02:05");
        assert_eq!(format_duration_hms(86_400.0 + 61.0), "00:01:01");
        assert_eq!(format_duration_hms(f64::NAN), "00:00:00");
    }

    #[test]
    fn test_zero_frame_rate_rejected() {
        assert!(FrameRate::new(0).is_err());
        assert_eq!(FrameRate::new(24).unwrap().fps(), 24);
    }
}
