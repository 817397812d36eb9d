// ============================================================================
// scenecut-core/src/external/ffmpeg_executor.rs
// ============================================================================
//
// FFMPEG EXECUTOR: FFmpeg Process Management and Abstraction
//
// This module provides abstractions for spawning and interacting with FFmpeg
// processes. The splitter and the resizer build an `FfmpegCommand`, hand it to
// an `FfmpegSpawner`, then drain the process events and wait for the exit
// status.
//
// KEY COMPONENTS:
// - FfmpegProcess: Trait representing an active FFmpeg process
// - FfmpegSpawner: Trait for creating new FFmpeg processes
// - SidecarSpawner: Concrete implementation using ffmpeg-sidecar
// - ErrorCollector: Gathers the error lines ffmpeg reports while running

use crate::error::{CoreResult, command_failed_error, command_start_error, command_wait_error};

use ffmpeg_sidecar::child::FfmpegChild as SidecarChild;
use ffmpeg_sidecar::command::FfmpegCommand;
use ffmpeg_sidecar::event::{FfmpegEvent, LogLevel};

use std::process::ExitStatus;

// --- FFmpeg Execution Abstraction ---

/// Trait representing an active ffmpeg process instance.
pub trait FfmpegProcess {
    /// Processes events from the running command using a provided handler closure.
    fn handle_events<F>(&mut self, handler: F) -> CoreResult<()>
    where
        F: FnMut(FfmpegEvent) -> CoreResult<()>;

    /// Waits for the command to complete and returns its exit status.
    fn wait(&mut self) -> CoreResult<ExitStatus>;
}

/// Trait representing something that can spawn an FfmpegProcess.
pub trait FfmpegSpawner {
    type Process: FfmpegProcess;
    /// Spawns the ffmpeg command, consuming the command object.
    fn spawn(&self, cmd: FfmpegCommand) -> CoreResult<Self::Process>;
}

// --- Concrete Implementation using ffmpeg-sidecar ---

/// Wrapper around `ffmpeg_sidecar::child::FfmpegChild` implementing `FfmpegProcess`.
pub struct SidecarProcess(SidecarChild);

impl FfmpegProcess for SidecarProcess {
    fn handle_events<F>(&mut self, mut handler: F) -> CoreResult<()>
    where
        F: FnMut(FfmpegEvent) -> CoreResult<()>,
    {
        let iterator = self.0.iter().map_err(|e| {
            command_failed_error(
                "ffmpeg (sidecar - get iter)",
                ExitStatus::default(),
                e.to_string(),
            )
        })?;
        for event in iterator {
            handler(event)?;
        }
        Ok(())
    }

    fn wait(&mut self) -> CoreResult<ExitStatus> {
        self.0
            .wait()
            .map_err(|e| command_wait_error("ffmpeg (sidecar)", e))
    }
}

/// Concrete implementation of `FfmpegSpawner` using `ffmpeg-sidecar`.
#[derive(Debug, Clone, Default)]
pub struct SidecarSpawner;

impl FfmpegSpawner for SidecarSpawner {
    type Process = SidecarProcess;

    fn spawn(&self, mut cmd: FfmpegCommand) -> CoreResult<Self::Process> {
        cmd.spawn()
            .map(SidecarProcess)
            .map_err(|e| command_start_error("ffmpeg (sidecar)", e))
    }
}

// --- Helpers ---

/// Renders the arguments of `cmd` as a single line for debug logging.
#[must_use]
pub fn command_line(cmd: &FfmpegCommand) -> String {
    let args: Vec<String> = cmd
        .get_args()
        .map(|arg| arg.to_string_lossy().into_owned())
        .collect();
    format!("ffmpeg {}", args.join(" "))
}

/// Accumulates the error output of a running ffmpeg process.
///
/// ffmpeg-sidecar parses stderr into events, so the text that would have been
/// "captured stderr" arrives as `Error` events and error-level `Log` events.
#[derive(Debug, Default)]
pub struct ErrorCollector {
    lines: Vec<String>,
}

impl ErrorCollector {
    /// Records the event if it carries error output.
    pub fn observe(&mut self, event: &FfmpegEvent) {
        match event {
            FfmpegEvent::Error(message) => self.lines.push(message.clone()),
            FfmpegEvent::Log(LogLevel::Error | LogLevel::Fatal, message) => {
                self.lines.push(message.clone());
            }
            _ => {}
        }
    }

    /// The collected lines joined with newlines, or a status fallback when empty.
    #[must_use]
    pub fn into_stderr(self, status: ExitStatus) -> String {
        if self.lines.is_empty() {
            format!("ffmpeg exited with {status}")
        } else {
            self.lines.join("\n")
        }
    }
}
