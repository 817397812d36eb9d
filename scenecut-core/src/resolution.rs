//! Target resolutions and the aspect-preserving dimension calculation.
//!
//! A run's resolution argument is either `original` (clips keep the size the
//! splitter produced) or `WIDTHxHEIGHT`. For the latter, each clip is scaled so
//! that it fits inside the target box without changing its aspect ratio: the
//! binding side matches the target exactly and the other side is truncated.

use crate::error::{CoreError, CoreResult};

use serde::Serialize;

use std::fmt;
use std::str::FromStr;

/// Literal accepted for "do not resize".
pub const ORIGINAL_RESOLUTION: &str = "original";

/// Width and height of a video stream, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

impl Dimensions {
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Width divided by height.
    #[must_use]
    pub fn aspect_ratio(&self) -> f64 {
        f64::from(self.width) / f64::from(self.height)
    }
}

/// Renders as the `W:H` form used by ffmpeg's `scale` filter.
impl fmt::Display for Dimensions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.width, self.height)
    }
}

/// The box clips are scaled into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TargetResolution {
    pub width: u32,
    pub height: u32,
}

impl TargetResolution {
    #[must_use]
    pub fn aspect_ratio(&self) -> f64 {
        f64::from(self.width) / f64::from(self.height)
    }
}

impl fmt::Display for TargetResolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Requested output resolution for a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// Keep clips at their split size.
    Original,
    /// Scale clips to fit inside the given box.
    Target(TargetResolution),
}

impl Resolution {
    /// The target box, or `None` for `original`.
    #[must_use]
    pub fn target(&self) -> Option<TargetResolution> {
        match self {
            Self::Original => None,
            Self::Target(target) => Some(*target),
        }
    }
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Original => f.write_str(ORIGINAL_RESOLUTION),
            Self::Target(target) => target.fmt(f),
        }
    }
}

impl FromStr for Resolution {
    type Err = CoreError;

    fn from_str(value: &str) -> CoreResult<Self> {
        if value == ORIGINAL_RESOLUTION {
            return Ok(Self::Original);
        }

        let invalid = || CoreError::InvalidResolution(value.to_string());
        let (width, height) = value.split_once('x').ok_or_else(invalid)?;
        let width: u32 = width.parse().map_err(|_| invalid())?;
        let height: u32 = height.parse().map_err(|_| invalid())?;
        if width == 0 || height == 0 {
            return Err(invalid());
        }

        Ok(Self::Target(TargetResolution { width, height }))
    }
}

/// Computes the scaled size of a `current` frame fitted into `target`.
///
/// When the source is wider than the target box, width is the binding side:
/// `new_width = target.width` and `new_height = trunc(new_width / ratio)`.
/// Otherwise (equal ratios included) height binds:
/// `new_height = target.height` and `new_width = trunc(new_height * ratio)`.
///
/// The free side is truncated, never rounded, and may come out odd.
///
/// # Examples
///
/// ```
/// use scenecut_core::resolution::{calculate_new_dimensions, Dimensions, TargetResolution};
///
/// let target = TargetResolution { width: 1280, height: 1280 };
/// let landscape = calculate_new_dimensions(Dimensions::new(1920, 1080), target);
/// assert_eq!(landscape.to_string(), "1280:720");
///
/// let portrait = calculate_new_dimensions(Dimensions::new(1080, 1920), target);
/// assert_eq!(portrait.to_string(), "720:1280");
/// ```
#[must_use]
pub fn calculate_new_dimensions(current: Dimensions, target: TargetResolution) -> Dimensions {
    let current_ratio = current.aspect_ratio();
    let target_ratio = target.aspect_ratio();

    if current_ratio > target_ratio {
        let new_width = target.width;
        let new_height = (f64::from(new_width) / current_ratio) as u32;
        Dimensions::new(new_width, new_height)
    } else {
        let new_height = target.height;
        let new_width = (f64::from(new_height) * current_ratio) as u32;
        Dimensions::new(new_width, new_height)
    }
}
