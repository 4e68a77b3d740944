//! `videos`: render a source clip onto each wallpaper canvas.
//!
//! The source is probed once. Every variant in [`VARIANTS`] is then fitted
//! with [`plan_fit`], turned into a filter graph and encoded. A failing
//! variant is reported and the rest still run.

use crate::console::{Console, RULE};
use crate::error::{AppError, Result};
use crate::fsutil::ensure_dir;
use crate::runner::ProcessRunner;
use clap::Args;
use n3rd_tools_core::encode::{output_file_name, version_check};
use n3rd_tools_core::probe::{
    duration_args, midpoint_timestamp, parse_duration_millis, parse_stream_info,
    pixel_extract_args, stream_info_args,
};
use n3rd_tools_core::size::format_megabytes;
use n3rd_tools_core::{
    EncodeSettings, FitPlan, PaddingMode, RgbColor, StreamInfo, VARIANTS, Variant, filter_graph,
    plan_fit,
};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

const FFMPEG_HINT: &str =
    "Install with: brew install ffmpeg (macOS) or apt-get install ffmpeg (Linux)";

#[derive(Debug, Clone, Args)]
pub struct VideosOptions {
    /// Input video file
    pub input: PathBuf,

    /// Output folder
    pub output_folder: PathBuf,

    /// Padding mode for extended canvases (blur, solid, mirror, black)
    #[arg(long, default_value = "blur")]
    pub padding_mode: PaddingMode,

    /// Preserve the audio track instead of stripping it
    #[arg(long)]
    pub keep_audio: bool,

    /// Base name for output files [default: input file stem]
    #[arg(long)]
    pub base_name: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct VariantResult {
    pub variant: &'static str,
    pub output: PathBuf,
    pub plan: Option<FitPlan>,
    /// Hex fill colour, only for solid padding.
    pub fill_color: Option<String>,
    pub size_bytes: Option<u64>,
    pub error: Option<String>,
}

impl VariantResult {
    fn new(variant: &Variant, output: PathBuf) -> Self {
        Self {
            variant: variant.name,
            output,
            plan: None,
            fill_color: None,
            size_bytes: None,
            error: None,
        }
    }

    #[must_use]
    pub fn succeeded(&self) -> bool {
        self.error.is_none()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct VideosReport {
    pub input: PathBuf,
    pub base_name: String,
    pub padding_mode: PaddingMode,
    pub keep_audio: bool,
    pub source: Option<StreamInfo>,
    pub variants: Vec<VariantResult>,
    pub success: bool,
}

// =============================================================================
// COMMAND
// =============================================================================

/// Generate every wallpaper variant of `opts.input`.
///
/// Fails only when ffmpeg is unavailable or the input is missing; per-variant
/// failures are recorded in the report with `success = false`.
pub fn cmd_videos(
    opts: &VideosOptions,
    runner: &dyn ProcessRunner,
    console: &Console,
) -> Result<VideosReport> {
    let ffmpeg_ok = runner
        .run(&version_check())
        .map(|out| out.success)
        .unwrap_or(false);
    if !ffmpeg_ok {
        return Err(AppError::MissingTool {
            tool: "FFmpeg",
            hint: FFMPEG_HINT,
        });
    }

    if !opts.input.exists() {
        return Err(AppError::InputMissing(opts.input.clone()));
    }

    ensure_dir(&opts.output_folder)?;

    let base_name = opts.base_name.clone().unwrap_or_else(|| {
        opts.input
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_else(|| String::from("video"))
    });

    console.line(RULE);
    console.line(format_args!("Processing: {}", opts.input.display()));
    console.line(format_args!("Base name: {base_name}"));
    console.line(format_args!("Padding mode: {}", opts.padding_mode));
    console.line(format_args!(
        "Audio: {}",
        if opts.keep_audio { "Preserved" } else { "Stripped" }
    ));
    console.line(RULE);
    console.blank();

    let source = probe_source(runner, &opts.input);
    let mut fill: Option<RgbColor> = None;
    let settings = EncodeSettings::default();

    let mut variants = Vec::with_capacity(VARIANTS.len());
    for variant in &VARIANTS {
        let output = opts
            .output_folder
            .join(output_file_name(&base_name, variant.name));
        console.line(format_args!(
            "Generating {} version ({})...",
            variant.name, variant.target
        ));

        let mut result = VariantResult::new(variant, output);
        match &source {
            Some(info) => {
                render_variant(
                    opts, runner, console, &settings, info, variant, &mut fill, &mut result,
                );
            }
            None => {
                console.line("  ✗ Failed to get video info");
                result.error = Some(String::from("failed to get video info"));
            }
        }
        variants.push(result);
        console.blank();
    }

    let success = variants.iter().all(VariantResult::succeeded);
    console.line(RULE);
    if success {
        console.line("✓ Processing complete!");
        console.line(format_args!(
            "All versions saved to: {}",
            opts.output_folder.display()
        ));
    } else {
        console.line("⚠ Some versions may have failed. Check errors above.");
    }
    console.line(RULE);

    Ok(VideosReport {
        input: opts.input.clone(),
        base_name,
        padding_mode: opts.padding_mode,
        keep_audio: opts.keep_audio,
        source,
        variants,
        success,
    })
}

fn render_variant(
    opts: &VideosOptions,
    runner: &dyn ProcessRunner,
    console: &Console,
    settings: &EncodeSettings,
    info: &StreamInfo,
    variant: &Variant,
    fill: &mut Option<RgbColor>,
    result: &mut VariantResult,
) {
    let target = variant.target;
    let plan = match plan_fit(info.dimensions(), target) {
        Ok(plan) => plan,
        Err(e) => {
            console.line(format_args!("  ✗ Failed: {e}"));
            result.error = Some(e.to_string());
            return;
        }
    };
    result.plan = Some(plan);

    console.line(format_args!("  Original: {}", info.dimensions()));
    console.line(format_args!(
        "  Scaled: {}x{}",
        target.width,
        plan.scaled_height(target)
    ));
    console.line(format_args!("  Target: {target}"));

    match plan {
        FitPlan::Pad { .. } => {
            console.line(format_args!(
                "  → Extending canvas (adding {}px padding, mode: {})",
                plan.padding(),
                opts.padding_mode
            ));
            if opts.padding_mode == PaddingMode::Mirror && plan.padding_exceeds_frame() {
                tracing::warn!(
                    variant = variant.name,
                    ?plan,
                    "padding taller than the frame, mirrored edges are topped up with black"
                );
                console.line("  → Mirrored edges shorter than padding, remainder filled black");
            }
            if opts.padding_mode.needs_fill_color() {
                let color = *fill.get_or_insert_with(|| detect_dominant_color(runner, &opts.input));
                console.line(format_args!("  → Using dominant color: #{color}"));
                result.fill_color = Some(color.to_string());
            }
        }
        FitPlan::Crop { scaled_height, .. } => {
            console.line(format_args!(
                "  → Cropping (removing {}px from center)",
                scaled_height - target.height
            ));
        }
        FitPlan::Exact => console.line("  → Perfect fit - resizing only"),
    }

    let vf = filter_graph(plan, target, opts.padding_mode, *fill);
    let command = settings.command(&opts.input, &result.output, &vf, opts.keep_audio);

    let failure = match runner.run(&command) {
        Ok(out) if out.success => None,
        Ok(out) => Some(match out.code {
            Some(code) => format!("ffmpeg exited with status {code}"),
            None => String::from("ffmpeg terminated by signal"),
        }),
        Err(e) => Some(e.to_string()),
    };

    match failure {
        None => {
            let size = fs::metadata(&result.output).map(|m| m.len()).unwrap_or(0);
            console.line(format_args!(
                "  ✓ Created: {} ({} MB)",
                result.output.display(),
                format_megabytes(size)
            ));
            result.size_bytes = Some(size);
        }
        Some(error) => {
            tracing::warn!(variant = variant.name, %error, "encode failed");
            console.line(format_args!("  ✗ Failed: {error}"));
            result.error = Some(error);
        }
    }
}

fn probe_source(runner: &dyn ProcessRunner, input: &Path) -> Option<StreamInfo> {
    let output = match runner.run(&stream_info_args(input)) {
        Ok(out) if out.success => out,
        Ok(out) => {
            tracing::warn!(stderr = %out.stderr.trim(), "ffprobe failed");
            return None;
        }
        Err(e) => {
            tracing::warn!(error = %e, "could not run ffprobe");
            return None;
        }
    };
    match parse_stream_info(&output.stdout) {
        Ok(info) => {
            tracing::debug!(?info, "probed source");
            Some(info)
        }
        Err(e) => {
            tracing::warn!(error = %e, "unreadable ffprobe output");
            None
        }
    }
}

// =============================================================================
// DOMINANT COLOUR
// =============================================================================

/// Colour of the source's middle frame averaged down to one pixel.
///
/// Any failure along the way yields [`RgbColor::BLACK`].
pub fn detect_dominant_color(runner: &dyn ProcessRunner, input: &Path) -> RgbColor {
    let duration_ms = runner
        .run(&duration_args(input))
        .ok()
        .filter(|out| out.success)
        .and_then(|out| parse_duration_millis(&out.stdout));
    let Some(duration_ms) = duration_ms else {
        tracing::debug!("no duration, falling back to black");
        return RgbColor::BLACK;
    };

    let pixel = match tempfile::Builder::new().suffix(".rgb").tempfile() {
        Ok(file) => file,
        Err(e) => {
            tracing::debug!(error = %e, "cannot create pixel file");
            return RgbColor::BLACK;
        }
    };

    let at = midpoint_timestamp(duration_ms);
    let extracted = runner
        .run(&pixel_extract_args(input, &at, pixel.path()))
        .map(|out| out.success)
        .unwrap_or(false);
    if !extracted {
        return RgbColor::BLACK;
    }

    fs::read(pixel.path())
        .ok()
        .and_then(|bytes| RgbColor::from_raw(&bytes))
        .unwrap_or(RgbColor::BLACK)
}
