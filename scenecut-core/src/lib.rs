//! Core library for splitting videos into scenes and resizing the clips,
//! using ffmpeg and ffprobe.
//!
//! This crate provides input discovery, content-adaptive scene detection,
//! per-scene splitting, aspect-preserving resizing and the batch orchestration
//! that ties them together.
//!
//! ## Usage Example
//!
//! ```rust,no_run
//! use scenecut_core::{
//!     AdaptiveDetector, BatchLog, CoreConfig, FfmpegResizer, FfmpegSceneSplitter, process_batch,
//! };
//! use std::path::{Path, PathBuf};
//!
//! let mut config = CoreConfig::new(
//!     PathBuf::from("/path/to/input"),
//!     PathBuf::from("/path/to/output"),
//!     "my-project",
//!     "1280x720".parse().unwrap(),
//! );
//! config.detector.min_scene_len = 24;
//! config.validate().unwrap();
//!
//! let log = BatchLog::open(Path::new("scenecut.log"), log::LevelFilter::Info).unwrap();
//! let detector = AdaptiveDetector::new(config.detector.clone());
//! let splitter = FfmpegSceneSplitter::new(config.split.clone(), config.show_progress);
//! let resizer = FfmpegResizer::new();
//!
//! let report = process_batch(&detector, &splitter, &resizer, &config, &log).unwrap();
//! for file in report.failed_files() {
//!     eprintln!("failed: {}", file.input.display());
//! }
//! ```

pub mod config;
pub mod detection;
pub mod discovery;
pub mod error;
pub mod external;
pub mod logging;
pub mod processing;
pub mod progress;
pub mod resolution;
pub mod utils;

// Re-exports for public API
pub use config::{CoreConfig, DetectorConfig, SplitConfig};
pub use detection::{AdaptiveDetector, Scene, SceneDetector};
pub use discovery::{SUPPORTED_EXTENSIONS, find_processable_files};
pub use error::{CoreError, CoreResult};
pub use external::{
    FfmpegResizer, FfmpegSceneSplitter, FfprobeProber, SceneSplitter, VideoProber, VideoResizer,
    check_dependency,
};
pub use logging::BatchLog;
pub use processing::{BatchReport, FileOutcome, FileReport, ResizeOutcome, ResizeReport, process_batch};
pub use resolution::{Dimensions, Resolution, TargetResolution, calculate_new_dimensions};
pub use utils::{format_duration, parse_ffmpeg_time};
