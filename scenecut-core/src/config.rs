// ============================================================================
// scenecut-core/src/config.rs
// ============================================================================
//
// CONFIGURATION: Core Configuration Structures and Constants
//
// This module defines the configuration consumed by the batch orchestrator:
// the folders and resolution given on the command line, the tuning of the
// adaptive scene detector, and the encoder settings used when writing one clip
// per scene.
//
// KEY COMPONENTS:
// - CoreConfig: Main configuration structure for a run
// - DetectorConfig: Adaptive scene detection parameters
// - SplitConfig: Encoder arguments for per-scene clips
// - Default constants: Predefined values for common settings
//
// USAGE:
// Instances of CoreConfig are created by consumers of the library (like
// scenecut-cli), adjusted, validated and passed to `process_batch`.

use crate::error::{CoreError, CoreResult};
use crate::resolution::Resolution;

use std::path::PathBuf;

// ============================================================================
// DEFAULT CONSTANTS
// ============================================================================

/// Ratio a frame's score must reach against its neighbours' mean to be a cut.
pub const DEFAULT_ADAPTIVE_THRESHOLD: f64 = 3.0;

/// Minimum number of frames between two cuts.
pub const DEFAULT_MIN_SCENE_LEN: usize = 15;

/// Frames on each side of the candidate used for the rolling average.
pub const DEFAULT_WINDOW_WIDTH: usize = 2;

/// Minimum raw score (0-100 scale) a frame needs to be a cut at all.
pub const DEFAULT_MIN_CONTENT_VAL: f64 = 15.0;

/// Video encoder used for clips.
pub const DEFAULT_VIDEO_CODEC: &str = "libx264";

/// Encoder preset used for clips.
pub const DEFAULT_PRESET: &str = "veryfast";

/// Constant rate factor used for clips.
pub const DEFAULT_CRF: u8 = 22;

/// Audio encoder used for clips.
pub const DEFAULT_AUDIO_CODEC: &str = "aac";

/// Container extension of the clips the splitter writes.
pub const DEFAULT_CLIP_EXTENSION: &str = "mp4";

// ============================================================================
// DETECTOR CONFIGURATION
// ============================================================================

/// Parameters of the content-adaptive scene detector.
#[derive(Debug, Clone, PartialEq)]
pub struct DetectorConfig {
    pub adaptive_threshold: f64,
    pub min_scene_len: usize,
    pub window_width: usize,
    pub min_content_val: f64,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            adaptive_threshold: DEFAULT_ADAPTIVE_THRESHOLD,
            min_scene_len: DEFAULT_MIN_SCENE_LEN,
            window_width: DEFAULT_WINDOW_WIDTH,
            min_content_val: DEFAULT_MIN_CONTENT_VAL,
        }
    }
}

impl DetectorConfig {
    pub fn validate(&self) -> CoreResult<()> {
        if !self.adaptive_threshold.is_finite() || self.adaptive_threshold <= 0.0 {
            return Err(CoreError::Config(format!(
                "adaptive threshold must be positive, got {}",
                self.adaptive_threshold
            )));
        }
        if self.window_width == 0 {
            return Err(CoreError::Config("window width must be at least 1".into()));
        }
        if !self.min_content_val.is_finite() || self.min_content_val < 0.0 {
            return Err(CoreError::Config(format!(
                "minimum content value must be non-negative, got {}",
                self.min_content_val
            )));
        }
        Ok(())
    }
}

// ============================================================================
// SPLIT CONFIGURATION
// ============================================================================

/// Encoder settings for the clips written by the scene splitter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitConfig {
    pub video_codec: String,
    pub preset: String,
    pub crf: u8,
    pub audio_codec: String,
    pub extension: String,
}

impl Default for SplitConfig {
    fn default() -> Self {
        Self {
            video_codec: DEFAULT_VIDEO_CODEC.to_string(),
            preset: DEFAULT_PRESET.to_string(),
            crf: DEFAULT_CRF,
            audio_codec: DEFAULT_AUDIO_CODEC.to_string(),
            extension: DEFAULT_CLIP_EXTENSION.to_string(),
        }
    }
}

// ============================================================================
// CORE CONFIGURATION
// ============================================================================

/// Main configuration structure for a scenecut run.
///
/// # Examples
///
/// ```rust,no_run
/// use scenecut_core::CoreConfig;
/// use std::path::PathBuf;
///
/// let mut config = CoreConfig::new(
///     PathBuf::from("/videos/in"),
///     PathBuf::from("/videos/out"),
///     "holiday",
///     "1280x720".parse().unwrap(),
/// );
/// config.detector.min_scene_len = 24;
/// config.validate().unwrap();
/// ```
#[derive(Debug, Clone)]
pub struct CoreConfig {
    // ---- Path Configuration ----
    /// Folder scanned for input videos
    pub input_dir: PathBuf,

    /// Folder receiving the per-scene clips
    pub output_dir: PathBuf,

    /// Label for the run; only reported, never used in paths
    pub project_name: String,

    // ---- Processing Settings ----
    /// Resize target applied to every clip after a split
    pub resolution: Resolution,

    pub detector: DetectorConfig,

    pub split: SplitConfig,

    /// Draw a progress bar while splitting
    pub show_progress: bool,
}

impl CoreConfig {
    #[must_use]
    pub fn new(
        input_dir: PathBuf,
        output_dir: PathBuf,
        project_name: impl Into<String>,
        resolution: Resolution,
    ) -> Self {
        Self {
            input_dir,
            output_dir,
            project_name: project_name.into(),
            resolution,
            detector: DetectorConfig::default(),
            split: SplitConfig::default(),
            show_progress: true,
        }
    }

    /// Checks the tuning values. Folder checks happen in the orchestrator.
    pub fn validate(&self) -> CoreResult<()> {
        self.detector.validate()?;
        if self.split.extension.is_empty() || self.split.extension.starts_with('.') {
            return Err(CoreError::Config(format!(
                "clip extension must be a bare extension like 'mp4', got '{}'",
                self.split.extension
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> CoreConfig {
        CoreConfig::new(
            PathBuf::from("in"),
            PathBuf::from("out"),
            "project",
            Resolution::Original,
        )
    }

    #[test]
    fn test_defaults() {
        let config = config();
        assert_eq!(config.detector.adaptive_threshold, 3.0);
        assert_eq!(config.detector.min_scene_len, 15);
        assert_eq!(config.detector.window_width, 2);
        assert_eq!(config.split.video_codec, "libx264");
        assert_eq!(config.split.crf, 22);
        assert!(config.show_progress);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_rejects_bad_detector_values() {
        let mut bad = config();
        bad.detector.adaptive_threshold = 0.0;
        assert!(matches!(bad.validate(), Err(CoreError::Config(_))));

        let mut bad = config();
        bad.detector.window_width = 0;
        assert!(matches!(bad.validate(), Err(CoreError::Config(_))));

        let mut bad = config();
        bad.detector.min_content_val = f64::NAN;
        assert!(matches!(bad.validate(), Err(CoreError::Config(_))));
    }

    #[test]
    fn test_rejects_dotted_extension() {
        let mut bad = config();
        bad.split.extension = ".mkv".into();
        assert!(matches!(bad.validate(), Err(CoreError::Config(_))));
    }
}
