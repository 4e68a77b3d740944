//! # Canvas Module
//!
//! Canvas-fit policy for portrait video wallpapers.
//!
//! A source frame is scaled to the target width. The scaled height then
//! decides the branch:
//! - shorter than the target: pad (centred) with the chosen [`PaddingMode`]
//! - taller than the target: centre-crop
//! - equal: plain resize
//!
//! All geometry is integer arithmetic (floor), matching ffmpeg's own
//! truncation of scale targets.

use crate::error::{Result, ToolError};
use crate::probe::RgbColor;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// =============================================================================
// DIMENSIONS & VARIANTS
// =============================================================================

/// Width and height of a video frame in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

impl Dimensions {
    #[must_use]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    fn validate(self) -> Result<Self> {
        if self.width == 0 || self.height == 0 {
            return Err(ToolError::InvalidDimensions {
                width: self.width,
                height: self.height,
            });
        }
        Ok(self)
    }
}

impl fmt::Display for Dimensions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// A named output canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Variant {
    pub name: &'static str,
    pub target: Dimensions,
}

/// The three responsive canvases, generated in this order.
pub const VARIANTS: [Variant; 3] = [
    Variant {
        name: "standard",
        target: Dimensions::new(1080, 1920),
    },
    Variant {
        name: "tall",
        target: Dimensions::new(1080, 2340),
    },
    Variant {
        name: "extra_tall",
        target: Dimensions::new(1080, 2400),
    },
];

// =============================================================================
// PADDING MODE
// =============================================================================

/// Fill strategy for the area a scaled frame does not cover.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaddingMode {
    /// Blurred, stretched copy of the frame behind it.
    #[default]
    Blur,
    /// Solid fill with the frame's dominant colour.
    Solid,
    /// Top and bottom edges mirrored outward.
    Mirror,
    /// Black bars.
    Black,
}

impl PaddingMode {
    /// All modes, in CLI order.
    pub const ALL: [PaddingMode; 4] = [
        PaddingMode::Blur,
        PaddingMode::Solid,
        PaddingMode::Mirror,
        PaddingMode::Black,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            PaddingMode::Blur => "blur",
            PaddingMode::Solid => "solid",
            PaddingMode::Mirror => "mirror",
            PaddingMode::Black => "black",
        }
    }

    /// Whether this mode needs the dominant colour of the source.
    #[must_use]
    pub fn needs_fill_color(self) -> bool {
        matches!(self, PaddingMode::Solid)
    }
}

impl fmt::Display for PaddingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PaddingMode {
    type Err = ToolError;

    fn from_str(s: &str) -> Result<Self> {
        PaddingMode::ALL
            .into_iter()
            .find(|mode| mode.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ToolError::UnknownPaddingMode(s.to_string()))
    }
}

// =============================================================================
// FIT PLAN
// =============================================================================

/// Outcome of fitting a scaled frame onto a target canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum FitPlan {
    /// Scaled frame is short; extend the canvas by `top + bottom` rows.
    Pad {
        scaled_height: u32,
        top: u32,
        bottom: u32,
    },
    /// Scaled frame is tall; keep the centre `target.height` rows.
    Crop { scaled_height: u32, offset_y: u32 },
    /// Scaled frame already matches.
    Exact,
}

impl FitPlan {
    /// Height of the frame after scaling to the target width.
    #[must_use]
    pub fn scaled_height(&self, target: Dimensions) -> u32 {
        match *self {
            FitPlan::Pad { scaled_height, .. } | FitPlan::Crop { scaled_height, .. } => {
                scaled_height
            }
            FitPlan::Exact => target.height,
        }
    }

    /// Whether a padding band is taller than the scaled frame, so a mirrored
    /// edge cannot fill it on its own.
    #[must_use]
    pub fn padding_exceeds_frame(&self) -> bool {
        match *self {
            FitPlan::Pad {
                scaled_height,
                top,
                bottom,
            } => top > scaled_height || bottom > scaled_height,
            _ => false,
        }
    }

    /// Total padding rows added (zero unless padding).
    #[must_use]
    pub fn padding(&self) -> u32 {
        match *self {
            FitPlan::Pad { top, bottom, .. } => top + bottom,
            _ => 0,
        }
    }
}

/// Decide how `source` fits onto `target`.
///
/// `scaled_height = floor(source.height * target.width / source.width)`.
pub fn plan_fit(source: Dimensions, target: Dimensions) -> Result<FitPlan> {
    let source = source.validate()?;
    let target = target.validate()?;

    let scaled = u64::from(source.height) * u64::from(target.width) / u64::from(source.width);
    let scaled_height = u32::try_from(scaled).unwrap_or(u32::MAX);

    let plan = match scaled_height.cmp(&target.height) {
        std::cmp::Ordering::Less => {
            let padding = target.height - scaled_height;
            let top = padding / 2;
            FitPlan::Pad {
                scaled_height,
                top,
                bottom: padding - top,
            }
        }
        std::cmp::Ordering::Greater => FitPlan::Crop {
            scaled_height,
            offset_y: (scaled_height - target.height) / 2,
        },
        std::cmp::Ordering::Equal => FitPlan::Exact,
    };
    Ok(plan)
}

// =============================================================================
// FILTER GRAPH
// =============================================================================

/// Build the ffmpeg `-vf` filter graph for a plan.
///
/// `fill` is only consulted for [`PaddingMode::Solid`]; black is used when
/// it is absent.
#[must_use]
pub fn filter_graph(
    plan: FitPlan,
    target: Dimensions,
    mode: PaddingMode,
    fill: Option<RgbColor>,
) -> String {
    let w = target.width;
    let h = target.height;

    match plan {
        FitPlan::Pad {
            scaled_height,
            top,
            bottom,
        } => {
            let scale = format!("scale={w}:{scaled_height}:force_original_aspect_ratio=decrease");
            match mode {
                PaddingMode::Blur => format!(
                    "{scale},split[main][blurred];\
                     [blurred]scale={w}:{h},boxblur=50[bg];\
                     [bg][main]overlay=(W-w)/2:(H-h)/2"
                ),
                PaddingMode::Solid => {
                    let color = fill.unwrap_or_default();
                    format!("{scale},pad={w}:{h}:(ow-iw)/2:(oh-ih)/2:color=0x{color}")
                }
                PaddingMode::Black => {
                    format!("{scale},pad={w}:{h}:(ow-iw)/2:(oh-ih)/2:color=black")
                }
                PaddingMode::Mirror => mirror_graph(&scale, w, h, scaled_height, top, bottom),
            }
        }
        FitPlan::Crop { offset_y, .. } => format!("scale={w}:-1,crop={w}:{h}:0:{offset_y}"),
        FitPlan::Exact => format!("scale={w}:{h}"),
    }
}

fn mirror_graph(
    scale: &str,
    w: u32,
    h: u32,
    scaled_height: u32,
    top: u32,
    bottom: u32,
) -> String {
    // A strip can be at most the frame itself; rows beyond that are padded black.
    let top_strip = top.min(scaled_height);
    let bottom_strip = bottom.min(scaled_height);
    let bottom_y = scaled_height - bottom_strip;
    if bottom_strip == 0 {
        return format!("{scale},pad={w}:{h}:0:{top}:color=black");
    }

    // ffmpeg rejects a zero-height crop, so a single padding row only mirrors the bottom edge.
    let mut graph = if top_strip == 0 {
        format!(
            "{scale},split[main][bottom];\
             [bottom]crop={w}:{bottom_strip}:0:{bottom_y},vflip[bottom_mirror];\
             [main][bottom_mirror]vstack=inputs=2"
        )
    } else {
        format!(
            "{scale},split[main][top][bottom];\
             [top]crop={w}:{top_strip}:0:0,vflip[top_mirror];\
             [bottom]crop={w}:{bottom_strip}:0:{bottom_y},vflip[bottom_mirror];\
             [top_mirror][main][bottom_mirror]vstack=inputs=3"
        )
    };
    if top_strip < top || bottom_strip < bottom {
        let offset = top - top_strip;
        graph.push_str(&format!(",pad={w}:{h}:0:{offset}:color=black"));
    }
    graph
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const STANDARD: Dimensions = Dimensions::new(1080, 1920);

    #[test]
    fn matching_aspect_is_exact() {
        let plan = plan_fit(Dimensions::new(720, 1280), STANDARD).unwrap();
        assert_eq!(plan, FitPlan::Exact);
        assert_eq!(filter_graph(plan, STANDARD, PaddingMode::Blur, None), "scale=1080:1920");
    }

    #[test]
    fn standard_source_pads_taller_variants() {
        let source = Dimensions::new(1080, 1920);
        let plans: Vec<FitPlan> = VARIANTS
            .iter()
            .map(|v| plan_fit(source, v.target).unwrap())
            .collect();

        assert_eq!(plans[0], FitPlan::Exact);
        assert_eq!(
            plans[1],
            FitPlan::Pad {
                scaled_height: 1920,
                top: 210,
                bottom: 210
            }
        );
        assert_eq!(
            plans[2],
            FitPlan::Pad {
                scaled_height: 1920,
                top: 240,
                bottom: 240
            }
        );
    }

    #[test]
    fn tall_source_is_cropped_from_centre() {
        let plan = plan_fit(Dimensions::new(1080, 2400), STANDARD).unwrap();
        assert_eq!(
            plan,
            FitPlan::Crop {
                scaled_height: 2400,
                offset_y: 240
            }
        );
        assert_eq!(
            filter_graph(plan, STANDARD, PaddingMode::Blur, None),
            "scale=1080:-1,crop=1080:1920:0:240"
        );
    }

    #[test]
    fn landscape_source_pads_with_odd_remainder_at_bottom() {
        // 1920x1080 -> 1080x607, padding 1313 -> 656 / 657
        let plan = plan_fit(Dimensions::new(1920, 1080), STANDARD).unwrap();
        assert_eq!(
            plan,
            FitPlan::Pad {
                scaled_height: 607,
                top: 656,
                bottom: 657
            }
        );

        let plan = plan_fit(Dimensions::new(1080, 1919), STANDARD).unwrap();
        assert_eq!(
            plan,
            FitPlan::Pad {
                scaled_height: 1919,
                top: 0,
                bottom: 1
            }
        );
    }

    #[test]
    fn zero_dimensions_are_rejected() {
        assert!(matches!(
            plan_fit(Dimensions::new(0, 1920), STANDARD),
            Err(ToolError::InvalidDimensions { .. })
        ));
        assert!(plan_fit(STANDARD, Dimensions::new(1080, 0)).is_err());
    }

    #[test]
    fn blur_graph_overlays_on_blurred_copy() {
        let plan = plan_fit(Dimensions::new(1920, 1080), STANDARD).unwrap();
        let vf = filter_graph(plan, STANDARD, PaddingMode::Blur, None);
        assert_eq!(
            vf,
            "scale=1080:607:force_original_aspect_ratio=decrease,split[main][blurred];\
             [blurred]scale=1080:1920,boxblur=50[bg];[bg][main]overlay=(W-w)/2:(H-h)/2"
        );
    }

    #[test]
    fn solid_graph_uses_fill_colour_or_black() {
        let plan = plan_fit(Dimensions::new(1920, 1080), STANDARD).unwrap();
        let vf = filter_graph(
            plan,
            STANDARD,
            PaddingMode::Solid,
            Some(RgbColor([0x1A, 0x2B, 0x3C])),
        );
        assert!(vf.ends_with("pad=1080:1920:(ow-iw)/2:(oh-ih)/2:color=0x1A2B3C"));

        let vf = filter_graph(plan, STANDARD, PaddingMode::Solid, None);
        assert!(vf.ends_with("color=0x000000"));

        let vf = filter_graph(plan, STANDARD, PaddingMode::Black, None);
        assert!(vf.ends_with("color=black"));
    }

    #[test]
    fn mirror_graph_crops_both_edges() {
        let tall = VARIANTS[1].target;
        let plan = plan_fit(Dimensions::new(1080, 1920), tall).unwrap();
        let vf = filter_graph(plan, tall, PaddingMode::Mirror, None);
        assert_eq!(
            vf,
            "scale=1080:1920:force_original_aspect_ratio=decrease,split[main][top][bottom];\
             [top]crop=1080:210:0:0,vflip[top_mirror];\
             [bottom]crop=1080:210:0:1710,vflip[bottom_mirror];\
             [top_mirror][main][bottom_mirror]vstack=inputs=3"
        );
    }

    #[test]
    fn mirror_graph_with_single_row_skips_top() {
        let plan = plan_fit(Dimensions::new(1080, 1919), STANDARD).unwrap();
        let vf = filter_graph(plan, STANDARD, PaddingMode::Mirror, None);
        assert!(vf.contains("split[main][bottom]"));
        assert!(vf.contains("crop=1080:1:0:1918"));
        assert!(vf.ends_with("vstack=inputs=2"));
        assert!(!vf.contains("[top]"));
    }

    #[test]
    fn mirror_graph_caps_strips_at_frame_height() {
        let plan = plan_fit(Dimensions::new(1920, 1080), STANDARD).unwrap();
        assert!(plan.padding_exceeds_frame());

        let vf = filter_graph(plan, STANDARD, PaddingMode::Mirror, None);
        assert_eq!(
            vf,
            "scale=1080:607:force_original_aspect_ratio=decrease,split[main][top][bottom];\
             [top]crop=1080:607:0:0,vflip[top_mirror];\
             [bottom]crop=1080:607:0:0,vflip[bottom_mirror];\
             [top_mirror][main][bottom_mirror]vstack=inputs=3,\
             pad=1080:1920:0:49:color=black"
        );
    }

    #[test]
    fn mirror_graph_without_overflow_has_no_pad() {
        let tall = VARIANTS[1].target;
        let plan = plan_fit(Dimensions::new(1080, 1920), tall).unwrap();
        assert!(!plan.padding_exceeds_frame());
        assert!(!filter_graph(plan, tall, PaddingMode::Mirror, None).contains("pad="));
    }

    #[test]
    fn padding_mode_parses_case_insensitively() {
        assert_eq!("blur".parse::<PaddingMode>().unwrap(), PaddingMode::Blur);
        assert_eq!("MIRROR".parse::<PaddingMode>().unwrap(), PaddingMode::Mirror);
        assert!(matches!(
            "sepia".parse::<PaddingMode>(),
            Err(ToolError::UnknownPaddingMode(_))
        ));
        assert_eq!(PaddingMode::default(), PaddingMode::Blur);
        assert!(PaddingMode::Solid.needs_fill_color());
        assert!(!PaddingMode::Mirror.needs_fill_color());
    }

    proptest! {
        #[test]
        fn pad_fills_target_exactly(w in 1u32..8000, h in 1u32..8000, th in 1u32..4000) {
            let target = Dimensions::new(1080, th);
            if let FitPlan::Pad { scaled_height, top, bottom } = plan_fit(Dimensions::new(w, h), target).unwrap() {
                prop_assert_eq!(scaled_height + top + bottom, th);
                prop_assert!(top <= bottom && bottom <= top + 1);
            }
        }

        #[test]
        fn mirror_crops_stay_inside_scaled_frame(w in 1u32..8000, h in 1u32..8000, th in 1u32..4000) {
            let target = Dimensions::new(1080, th);
            let plan = plan_fit(Dimensions::new(w, h), target).unwrap();
            if let FitPlan::Pad { scaled_height, .. } = plan {
                let vf = filter_graph(plan, target, PaddingMode::Mirror, None);
                let crop = regex::Regex::new(r"crop=\d+:(\d+):0:(\d+)").unwrap();
                for caps in crop.captures_iter(&vf) {
                    let rows: u32 = caps[1].parse().unwrap();
                    let y: u32 = caps[2].parse().unwrap();
                    prop_assert!(rows > 0);
                    prop_assert!(y + rows <= scaled_height);
                }
            }
        }

        #[test]
        fn crop_stays_inside_scaled_frame(w in 1u32..8000, h in 1u32..8000, th in 1u32..4000) {
            let target = Dimensions::new(1080, th);
            if let FitPlan::Crop { scaled_height, offset_y } = plan_fit(Dimensions::new(w, h), target).unwrap() {
                prop_assert!(scaled_height > th);
                prop_assert!(offset_y + th <= scaled_height);
            }
        }
    }
}
