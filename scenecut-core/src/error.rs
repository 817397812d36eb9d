// ============================================================================
// scenecut-core/src/error.rs
// ============================================================================
//
// ERROR HANDLING: Error Types for scenecut-core
//
// Every failure the batch orchestrator can observe is a `CoreError` variant.
// The variants are grouped by how the orchestrator reacts to them:
//
// - Validation errors (`InputDirMissing`, `NoFilesFound`, `InvalidResolution`,
//   `Config`) abort the run before any file is processed.
// - Per-file errors (`Probe`, `Resize`, `SceneDetection`, `Split`, command and
//   IO failures) are caught at the file boundary, logged, and the batch moves
//   on to the next file.
//
// An empty scene list is not an error; it is reported as
// `processing::FileOutcome::NoScenes`.

use std::io;
use std::path::PathBuf;
use std::process::ExitStatus;

use thiserror::Error;

/// Errors produced by scenecut-core.
#[derive(Error, Debug)]
pub enum CoreError {
    // ---- Validation phase ----
    #[error("Input folder does not exist: {0}")]
    InputDirMissing(PathBuf),

    #[error("No supported video files found in the input folder.")]
    NoFilesFound,

    #[error("Invalid resolution '{0}': expected 'original' or WIDTHxHEIGHT (e.g. 1280x720)")]
    InvalidResolution(String),

    #[error("Invalid configuration: {0}")]
    Config(String),

    // ---- Per-file phase ----
    #[error("FFprobe command failed for {path}: {message}")]
    Probe { path: PathBuf, message: String },

    #[error("FFmpeg command failed: {stderr}")]
    Resize { path: PathBuf, stderr: String },

    #[error("Scene detection failed for {path}: {message}")]
    SceneDetection { path: PathBuf, message: String },

    #[error("Splitting scene {scene} of {path} failed: {stderr}")]
    Split {
        path: PathBuf,
        scene: usize,
        stderr: String,
    },

    // ---- External commands ----
    #[error("Required external command '{0}' was not found")]
    DependencyNotFound(String),

    #[error("Failed to start {0}: {1}")]
    CommandStart(String, #[source] io::Error),

    #[error("Failed waiting for {0}: {1}")]
    CommandWait(String, #[source] io::Error),

    #[error("{cmd} exited with {status}: {stderr}")]
    CommandFailed {
        cmd: String,
        status: ExitStatus,
        stderr: String,
    },

    #[error("Path error: {0}")]
    PathError(String),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// Result type for scenecut-core operations.
pub type CoreResult<T> = Result<T, CoreError>;

/// Builds a `CoreError::CommandStart` for a process that could not be spawned.
pub fn command_start_error(cmd: impl Into<String>, err: io::Error) -> CoreError {
    CoreError::CommandStart(cmd.into(), err)
}

/// Builds a `CoreError::CommandWait` for a process whose exit could not be collected.
pub fn command_wait_error(cmd: impl Into<String>, err: io::Error) -> CoreError {
    CoreError::CommandWait(cmd.into(), err)
}

/// Builds a `CoreError::CommandFailed` carrying the captured stderr.
pub fn command_failed_error(
    cmd: impl Into<String>,
    status: ExitStatus,
    stderr: impl Into<String>,
) -> CoreError {
    CoreError::CommandFailed {
        cmd: cmd.into(),
        status,
        stderr: stderr.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_carry_stderr() {
        let err = CoreError::Resize {
            path: PathBuf::from("clip.mp4"),
            stderr: "height not divisible by 2".into(),
        };
        assert_eq!(
            err.to_string(),
            "FFmpeg command failed: height not divisible by 2"
        );

        let err = CoreError::Probe {
            path: PathBuf::from("a.mkv"),
            message: "No video stream found".into(),
        };
        assert!(err.to_string().contains("a.mkv"));
        assert!(err.to_string().contains("No video stream found"));
    }
}
