//! # Encode Module
//!
//! ffmpeg command lines for producing a wallpaper variant.

use crate::command::CommandSpec;
use std::path::Path;

/// Fixed x264 settings for wallpaper output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodeSettings {
    pub video_codec: &'static str,
    pub preset: &'static str,
    pub crf: u8,
    pub pixel_format: &'static str,
    pub movflags: &'static str,
}

impl Default for EncodeSettings {
    fn default() -> Self {
        Self {
            video_codec: "libx264",
            preset: "slow",
            crf: 18,
            pixel_format: "yuv420p",
            movflags: "+faststart",
        }
    }
}

impl EncodeSettings {
    /// Full ffmpeg command: scale/pad/crop with `vf`, overwrite `output`.
    ///
    /// Audio is stream-copied when `keep_audio`, dropped otherwise.
    #[must_use]
    pub fn command(&self, input: &Path, output: &Path, vf: &str, keep_audio: bool) -> CommandSpec {
        let cmd = CommandSpec::new("ffmpeg")
            .arg("-i")
            .arg(input)
            .args(["-vf", vf])
            .args(["-c:v", self.video_codec])
            .args(["-preset", self.preset])
            .arg("-crf")
            .arg(self.crf.to_string())
            .args(["-pix_fmt", self.pixel_format])
            .args(["-movflags", self.movflags])
            .arg("-y");

        let cmd = if keep_audio {
            cmd.args(["-c:a", "copy"])
        } else {
            cmd.arg("-an")
        };
        cmd.arg(output)
    }
}

/// `ffmpeg -version`, used to check the tool is installed.
#[must_use]
pub fn version_check() -> CommandSpec {
    CommandSpec::new("ffmpeg").arg("-version")
}

/// `{base}_{variant}.mp4`
#[must_use]
pub fn output_file_name(base_name: &str, variant: &str) -> String {
    format!("{base_name}_{variant}.mp4")
}

// =============================================================================
// TESTS
// =============================================================================
