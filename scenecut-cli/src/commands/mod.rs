//! Command implementations for the CLI.

/// A full scenecut run: detect, split and resize every input video.
pub mod run;
