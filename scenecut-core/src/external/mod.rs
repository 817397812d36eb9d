// ============================================================================
// scenecut-core/src/external/mod.rs
// ============================================================================
//
// EXTERNAL TOOLS: Interactions with ffmpeg and ffprobe
//
// This module encapsulates every call to an external command-line tool. Each
// capability sits behind a trait so the batch orchestrator can be exercised
// without ffmpeg installed.
//
// KEY COMPONENTS:
// - VideoProber / FfprobeProber: stream dimensions via the ffprobe crate
// - FfmpegSpawner / SidecarSpawner: ffmpeg processes via ffmpeg-sidecar
// - SceneSplitter / FfmpegSceneSplitter: one clip per scene
// - VideoResizer / FfmpegResizer: aspect-preserving rescale
// - check_dependency: availability check for ffmpeg/ffprobe

use crate::error::{CoreError, CoreResult};
use crate::logging::BatchLog;

use std::io;
use std::process::{Command, Stdio};

// ============================================================================
// SUBMODULES
// ============================================================================

/// Splitting and resizing with ffmpeg
pub mod ffmpeg;

/// Traits and implementations for executing ffmpeg commands
pub mod ffmpeg_executor;

/// Traits and implementations for executing ffprobe commands
pub mod ffprobe_executor;

#[cfg(test)]
pub(crate) mod mocks;

// ============================================================================
// RE-EXPORTS
// ============================================================================

pub use ffmpeg::{FfmpegResizer, FfmpegSceneSplitter, SceneSplitter, VideoResizer};
pub use ffmpeg_executor::{FfmpegProcess, FfmpegSpawner, SidecarProcess, SidecarSpawner};
pub use ffprobe_executor::{FfprobeProber, VideoProber};

// ============================================================================
// DEPENDENCY CHECKING
// ============================================================================

/// Checks that an external command can be started.
///
/// Runs `<cmd_name> -version` with output discarded. Only whether the process
/// starts matters, not its exit status.
///
/// # Errors
///
/// * `CoreError::DependencyNotFound` - the command is not on the PATH
/// * `CoreError::CommandStart` - the command exists but could not be started
pub fn check_dependency(cmd_name: &str, log: &BatchLog) -> CoreResult<()> {
    let result = Command::new(cmd_name)
        .arg("-version")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status();

    match result {
        Ok(_) => {
            log.debug(format_args!("Found dependency: {cmd_name}"));
            Ok(())
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            Err(CoreError::DependencyNotFound(cmd_name.to_string()))
        }
        Err(e) => Err(CoreError::CommandStart(cmd_name.to_string(), e)),
    }
}
