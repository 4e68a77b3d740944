//! # Probe Module
//!
//! ffprobe invocations and parsing of their output, plus the one-pixel
//! frame grab used to find a video's dominant colour.

use crate::canvas::Dimensions;
use crate::command::CommandSpec;
use crate::error::{Result, ToolError};
use serde::Serialize;
use std::fmt;
use std::path::Path;

// =============================================================================
// STREAM INFO
// =============================================================================

/// First video stream of a file, as reported by ffprobe.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StreamInfo {
    pub width: u32,
    pub height: u32,
    /// Numerator of `r_frame_rate` (e.g. `"30"` from `"30/1"`).
    pub fps: Option<String>,
}

impl StreamInfo {
    #[must_use]
    pub fn dimensions(&self) -> Dimensions {
        Dimensions::new(self.width, self.height)
    }
}

/// `ffprobe` asking for width, height and frame rate as `WxHxRATE`.
#[must_use]
pub fn stream_info_args(input: &Path) -> CommandSpec {
    CommandSpec::new("ffprobe")
        .args([
            "-v",
            "error",
            "-select_streams",
            "v:0",
            "-show_entries",
            "stream=width,height,r_frame_rate",
            "-of",
            "csv=s=x:p=0",
        ])
        .arg(input)
}

/// Parse `1080x1920x30/1` (frame rate optional).
pub fn parse_stream_info(stdout: &str) -> Result<StreamInfo> {
    let line = stdout.trim();
    let mut parts = line.split('x');

    let mut next_number = || -> Result<u32> {
        parts
            .next()
            .and_then(|p| p.trim().parse::<u32>().ok())
            .ok_or_else(|| ToolError::ProbeOutput(line.to_string()))
    };
    let width = next_number()?;
    let height = next_number()?;

    let fps = parts
        .next()
        .and_then(|rate| rate.split('/').next())
        .map(str::trim)
        .filter(|fps| !fps.is_empty())
        .map(String::from);

    Ok(StreamInfo { width, height, fps })
}

// =============================================================================
// DURATION
// =============================================================================

/// `ffprobe` printing the container duration in seconds.
#[must_use]
pub fn duration_args(input: &Path) -> CommandSpec {
    CommandSpec::new("ffprobe")
        .args([
            "-v",
            "error",
            "-show_entries",
            "format=duration",
            "-of",
            "default=noprint_wrappers=1:nokey=1",
        ])
        .arg(input)
}

/// Parse a decimal seconds value (`"12.345678"`) into whole milliseconds.
///
/// Returns `None` for anything that is not a plain non-negative decimal
/// (including ffprobe's `N/A`).
#[must_use]
pub fn parse_duration_millis(stdout: &str) -> Option<u64> {
    let text = stdout.trim();
    let (whole, frac) = match text.split_once('.') {
        Some((whole, frac)) => (whole, frac),
        None => (text, ""),
    };
    if whole.is_empty() && frac.is_empty() {
        return None;
    }
    if !whole.chars().chain(frac.chars()).all(|c| c.is_ascii_digit()) {
        return None;
    }

    let secs: u64 = if whole.is_empty() { 0 } else { whole.parse().ok()? };
    let mut millis = 0u64;
    for (i, digit) in frac.chars().chain("000".chars()).take(3).enumerate() {
        let value = u64::from(digit.to_digit(10)?);
        millis += value * 10u64.pow(2 - i as u32);
    }
    secs.checked_mul(1000)?.checked_add(millis)
}

/// Half of `duration_ms`, rendered as `S.mmm` for `-ss`.
#[must_use]
pub fn midpoint_timestamp(duration_ms: u64) -> String {
    let mid = duration_ms / 2;
    format!("{}.{:03}", mid / 1000, mid % 1000)
}

// =============================================================================
// DOMINANT COLOUR
// =============================================================================

/// An sRGB colour, displayed as uppercase hex without prefix.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RgbColor(pub [u8; 3]);

impl RgbColor {
    /// Black, the fallback when detection fails.
    pub const BLACK: RgbColor = RgbColor([0, 0, 0]);

    /// Take the first pixel of a raw `rgb24` frame.
    #[must_use]
    pub fn from_raw(bytes: &[u8]) -> Option<Self> {
        match bytes {
            [r, g, b, ..] => Some(RgbColor([*r, *g, *b])),
            _ => None,
        }
    }
}

impl fmt::Display for RgbColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [r, g, b] = self.0;
        write!(f, "{:02X}{:02X}{:02X}", r, g, b)
    }
}

/// `ffmpeg` scaling the frame at `at` down to one raw rgb24 pixel in `out`.
#[must_use]
pub fn pixel_extract_args(input: &Path, at: &str, out: &Path) -> CommandSpec {
    CommandSpec::new("ffmpeg")
        .args(["-ss", at, "-i"])
        .arg(input)
        .args([
            "-vf",
            "scale=1:1",
            "-frames:v",
            "1",
            "-f",
            "rawvideo",
            "-pix_fmt",
            "rgb24",
            "-y",
        ])
        .arg(out)
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn parses_dimensions_and_rate() {
        let info = parse_stream_info("1080x1920x30/1\n").unwrap();
        assert_eq!(info.dimensions(), Dimensions::new(1080, 1920));
        assert_eq!(info.fps.as_deref(), Some("30"));

        let info = parse_stream_info("1920x1080x30000/1001").unwrap();
        assert_eq!(info.fps.as_deref(), Some("30000"));
    }

    #[test]
    fn rate_is_optional() {
        let info = parse_stream_info("640x480").unwrap();
        assert_eq!(info.width, 640);
        assert_eq!(info.height, 480);
        assert!(info.fps.is_none());
    }

    #[test]
    fn garbage_output_is_an_error() {
        assert!(matches!(
            parse_stream_info(""),
            Err(ToolError::ProbeOutput(_))
        ));
        assert!(parse_stream_info("N/AxN/A").is_err());
        assert!(parse_stream_info("1080").is_err());
    }

    #[test]
    fn duration_parses_to_millis() {
        assert_eq!(parse_duration_millis("12.345678\n"), Some(12_345));
        assert_eq!(parse_duration_millis("7"), Some(7_000));
        assert_eq!(parse_duration_millis("0.5"), Some(500));
        assert_eq!(parse_duration_millis("N/A"), None);
        assert_eq!(parse_duration_millis(""), None);
        assert_eq!(parse_duration_millis("-3.0"), None);
    }

    #[test]
    fn midpoint_formats_seconds_and_millis() {
        assert_eq!(midpoint_timestamp(12_345), "6.172");
        assert_eq!(midpoint_timestamp(10_000), "5.000");
        assert_eq!(midpoint_timestamp(0), "0.000");
    }

    #[test]
    fn colour_from_raw_frame() {
        let color = RgbColor::from_raw(&[0x0a, 0xff, 0x80]).unwrap();
        assert_eq!(color.to_string(), "0AFF80");
        assert!(RgbColor::from_raw(&[1, 2]).is_none());
        assert_eq!(RgbColor::default(), RgbColor::BLACK);
    }

    #[test]
    fn probe_command_shape() {
        let cmd = stream_info_args(Path::new("in.mp4"));
        assert_eq!(cmd.program, "ffprobe");
        assert_eq!(cmd.value_of("-of").as_deref(), Some("csv=s=x:p=0"));
        assert_eq!(cmd.args_lossy().last().map(String::as_str), Some("in.mp4"));

        let cmd = pixel_extract_args(Path::new("in.mp4"), "1.500", Path::new("px.rgb"));
        assert_eq!(cmd.value_of("-ss").as_deref(), Some("1.500"));
        assert_eq!(cmd.value_of("-pix_fmt").as_deref(), Some("rgb24"));
    }
}
