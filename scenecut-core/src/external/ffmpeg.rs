//! FFmpeg command building and execution for splitting and resizing.
//!
//! Two operations run through an [`FfmpegSpawner`]:
//!
//! * splitting: one re-encode per scene, `-ss <start> -i <input> -t <duration>`,
//!   written as `<output_dir>/<input stem>-Scene-<NNN>.<ext>`
//! * resizing: `-i <input> -vf scale=W:H -c:a copy <output>` with the
//!   dimensions computed from the probed size and the target box

use super::ffmpeg_executor::{
    ErrorCollector, FfmpegProcess, FfmpegSpawner, SidecarSpawner, command_line,
};
use super::ffprobe_executor::{FfprobeProber, VideoProber};
use crate::config::SplitConfig;
use crate::detection::Scene;
use crate::error::{CoreError, CoreResult, command_failed_error};
use crate::logging::BatchLog;
use crate::progress::SplitProgress;
use crate::resolution::{Dimensions, TargetResolution, calculate_new_dimensions};
use crate::utils::{format_timecode, get_filename_safe, parse_ffmpeg_time};

use ffmpeg_sidecar::command::FfmpegCommand;
use ffmpeg_sidecar::event::FfmpegEvent;

use std::path::{Path, PathBuf};

// ============================================================================
// TRAITS
// ============================================================================

/// Writes one clip per scene.
pub trait SceneSplitter {
    /// Splits `input_path` into `scenes`, writing the clips into `output_dir`.
    ///
    /// Returns the clip paths in scene order. Any failed scene fails the whole
    /// call with `CoreError::Split`.
    fn split(
        &self,
        input_path: &Path,
        scenes: &[Scene],
        output_dir: &Path,
        log: &BatchLog,
    ) -> CoreResult<Vec<PathBuf>>;
}

/// Rescales a single video.
pub trait VideoResizer {
    /// Writes `input_path` scaled into `target` to `output_path`.
    ///
    /// Returns the dimensions written. Fails with `CoreError::Probe` when the
    /// input cannot be probed and `CoreError::Resize` when ffmpeg fails.
    fn resize(
        &self,
        input_path: &Path,
        output_path: &Path,
        target: TargetResolution,
        log: &BatchLog,
    ) -> CoreResult<Dimensions>;
}

// ============================================================================
// COMMAND BUILDING
// ============================================================================

/// Path of the clip for scene `index` (1-based) of `input_path`.
#[must_use]
pub fn clip_path(output_dir: &Path, input_path: &Path, index: usize, extension: &str) -> PathBuf {
    let stem = input_path
        .file_stem()
        .map_or_else(|| "video".into(), |s| s.to_string_lossy());
    output_dir.join(format!("{stem}-Scene-{index:03}.{extension}"))
}

/// Builds the re-encode of one scene.
#[must_use]
pub fn build_split_command(
    input_path: &Path,
    scene: &Scene,
    output_path: &Path,
    config: &SplitConfig,
) -> FfmpegCommand {
    let mut cmd = FfmpegCommand::new();
    cmd.arg("-nostdin")
        .arg("-y")
        .arg("-ss")
        .arg(format_timecode(scene.start_secs))
        .input(input_path.to_string_lossy().as_ref())
        .arg("-t")
        .arg(format_timecode(scene.duration_secs()))
        .arg("-map")
        .arg("0:v:0")
        .arg("-map")
        .arg("0:a?")
        .arg("-c:v")
        .arg(&config.video_codec)
        .arg("-preset")
        .arg(&config.preset)
        .arg("-crf")
        .arg(config.crf.to_string())
        .arg("-c:a")
        .arg(&config.audio_codec)
        .arg("-sn")
        .output(output_path.to_string_lossy().as_ref());
    cmd
}

/// Builds the rescale of one file; audio is copied untouched.
#[must_use]
pub fn build_resize_command(input_path: &Path, output_path: &Path, dimensions: Dimensions) -> FfmpegCommand {
    let mut cmd = FfmpegCommand::new();
    cmd.arg("-y")
        .input(input_path.to_string_lossy().as_ref())
        .arg("-vf")
        .arg(format!("scale={dimensions}"))
        .arg("-c:a")
        .arg("copy")
        .output(output_path.to_string_lossy().as_ref());
    cmd
}

// ============================================================================
// EXECUTION
// ============================================================================

/// Runs `cmd` to completion, feeding progress times (seconds) to `on_progress`.
///
/// A non-zero exit becomes `CoreError::CommandFailed` carrying the error lines
/// ffmpeg printed.
fn run_ffmpeg<S: FfmpegSpawner>(
    spawner: &S,
    cmd: FfmpegCommand,
    label: &str,
    mut on_progress: impl FnMut(f64),
) -> CoreResult<()> {
    let mut process = spawner.spawn(cmd)?;
    let mut errors = ErrorCollector::default();

    process.handle_events(|event| {
        errors.observe(&event);
        if let FfmpegEvent::Progress(progress) = &event {
            if let Some(secs) = parse_ffmpeg_time(&progress.time) {
                on_progress(secs);
            }
        }
        Ok(())
    })?;

    let status = process.wait()?;
    if status.success() {
        Ok(())
    } else {
        Err(command_failed_error(label, status, errors.into_stderr(status)))
    }
}

/// The text to report for a failed ffmpeg run.
fn failure_output(err: CoreError) -> String {
    match err {
        CoreError::CommandFailed { stderr, .. } => stderr,
        other => other.to_string(),
    }
}

// ============================================================================
// SPLITTER
// ============================================================================

/// `SceneSplitter` running one ffmpeg re-encode per scene.
#[derive(Debug, Clone)]
pub struct FfmpegSceneSplitter<S: FfmpegSpawner = SidecarSpawner> {
    spawner: S,
    config: SplitConfig,
    show_progress: bool,
}

impl FfmpegSceneSplitter<SidecarSpawner> {
    #[must_use]
    pub fn new(config: SplitConfig, show_progress: bool) -> Self {
        Self::with_spawner(SidecarSpawner, config, show_progress)
    }
}

impl<S: FfmpegSpawner> FfmpegSceneSplitter<S> {
    #[must_use]
    pub fn with_spawner(spawner: S, config: SplitConfig, show_progress: bool) -> Self {
        Self {
            spawner,
            config,
            show_progress,
        }
    }
}

impl<S: FfmpegSpawner> SceneSplitter for FfmpegSceneSplitter<S> {
    fn split(
        &self,
        input_path: &Path,
        scenes: &[Scene],
        output_dir: &Path,
        log: &BatchLog,
    ) -> CoreResult<Vec<PathBuf>> {
        let file_name = get_filename_safe(input_path)?;
        let total_secs: f64 = scenes.iter().map(Scene::duration_secs).sum();
        let mut progress = SplitProgress::start(&file_name, total_secs, self.show_progress);

        let mut clips = Vec::with_capacity(scenes.len());
        let mut offset_secs = 0.0;

        for scene in scenes {
            let output_path = clip_path(output_dir, input_path, scene.index, &self.config.extension);
            let cmd = build_split_command(input_path, scene, &output_path, &self.config);
            log.debug(format_args!(
                "Scene {} ({} - {}): {}",
                scene.index,
                format_timecode(scene.start_secs),
                format_timecode(scene.end_secs),
                command_line(&cmd)
            ));

            progress.begin_scene(scene.index, scenes.len(), offset_secs);
            let result = run_ffmpeg(&self.spawner, cmd, "ffmpeg (split)", |secs| {
                progress.update(secs);
            });

            if let Err(err) = result {
                progress.finish();
                return Err(CoreError::Split {
                    path: input_path.to_path_buf(),
                    scene: scene.index,
                    stderr: failure_output(err),
                });
            }

            offset_secs += scene.duration_secs();
            clips.push(output_path);
        }

        progress.finish();
        log.debug(format_args!("Wrote {} clips for {file_name}", clips.len()));
        Ok(clips)
    }
}

// ============================================================================
// RESIZER
// ============================================================================

/// `VideoResizer` probing with a `VideoProber` and scaling with ffmpeg.
#[derive(Debug, Clone)]
pub struct FfmpegResizer<P: VideoProber = FfprobeProber, S: FfmpegSpawner = SidecarSpawner> {
    prober: P,
    spawner: S,
}

impl FfmpegResizer<FfprobeProber, SidecarSpawner> {
    #[must_use]
    pub fn new() -> Self {
        Self::with_parts(FfprobeProber, SidecarSpawner)
    }
}

impl Default for FfmpegResizer<FfprobeProber, SidecarSpawner> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: VideoProber, S: FfmpegSpawner> FfmpegResizer<P, S> {
    #[must_use]
    pub fn with_parts(prober: P, spawner: S) -> Self {
        Self { prober, spawner }
    }
}

impl<P: VideoProber, S: FfmpegSpawner> VideoResizer for FfmpegResizer<P, S> {
    fn resize(
        &self,
        input_path: &Path,
        output_path: &Path,
        target: TargetResolution,
        log: &BatchLog,
    ) -> CoreResult<Dimensions> {
        let current = self.prober.probe_dimensions(input_path, log)?;
        let dimensions = calculate_new_dimensions(current, target);

        let cmd = build_resize_command(input_path, output_path, dimensions);
        log.debug(format_args!(
            "Resizing {} from {}x{}: {}",
            input_path.display(),
            current.width,
            current.height,
            command_line(&cmd)
        ));

        run_ffmpeg(&self.spawner, cmd, "ffmpeg (resize)", |_| {}).map_err(|err| {
            CoreError::Resize {
                path: input_path.to_path_buf(),
                stderr: failure_output(err),
            }
        })?;

        Ok(dimensions)
    }
}
