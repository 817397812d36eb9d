//! Batch processing of a folder of videos.
//!
//! The orchestration lives in [`batch`]; it only talks to the outside world
//! through the `SceneDetector`, `SceneSplitter` and `VideoResizer` traits.

/// Validation, per-file iteration and the resize pass
pub mod batch;

pub use batch::{
    BatchReport, FileOutcome, FileReport, ResizeOutcome, ResizeReport, process_batch,
    resize_in_place, validate_inputs,
};
