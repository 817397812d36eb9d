// ============================================================================
// scenecut-core/src/processing/batch.rs
// ============================================================================
//
// BATCH ORCHESTRATION: Detect, Split and Resize Every Input Video
//
// `process_batch` drives a whole run:
//
//   ValidatingInputs -> IteratingFiles -> { SplittingScene, ResizingOutputs } -> Done
//
// Validation failures end the run with an error. Everything that goes wrong
// for a single input file (or a single output clip during resizing) is logged,
// recorded in the report, and the run moves on.
//
// KEY COMPONENTS:
// - process_batch: The run itself
// - validate_inputs: Folder checks and input discovery
// - resize_in_place: Replace one clip with its rescaled version
// - BatchReport / FileReport / ResizeReport: What happened, per file

use crate::config::CoreConfig;
use crate::detection::SceneDetector;
use crate::discovery::{find_processable_files, list_entry_names, list_supported_files};
use crate::error::{CoreError, CoreResult};
use crate::external::{SceneSplitter, VideoResizer};
use crate::logging::BatchLog;
use crate::resolution::{Dimensions, TargetResolution};
use crate::utils::{format_duration, get_filename_safe};

use serde::Serialize;

use std::fs;
use std::path::{Path, PathBuf};

/// Prefix of the temporary sibling written while a clip is resized.
pub const RESIZED_PREFIX: &str = "resized_";

// ============================================================================
// REPORT TYPES
// ============================================================================

/// What happened to one input file.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum FileOutcome {
    /// Scenes were found and every clip was written.
    Split { scenes: usize, clips: Vec<PathBuf> },
    /// The detector found no cut; nothing was written.
    NoScenes,
    /// Detection or splitting failed.
    Failed { error: String },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FileReport {
    pub input: PathBuf,
    #[serde(flatten)]
    pub outcome: FileOutcome,
}

/// What happened to one output clip during a resize pass.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ResizeOutcome {
    Resized { dimensions: Dimensions },
    Failed { error: String },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResizeReport {
    pub path: PathBuf,
    #[serde(flatten)]
    pub outcome: ResizeOutcome,
}

/// Summary of a run that reached the end.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BatchReport {
    pub project_name: String,
    pub resolution: String,
    pub files: Vec<FileReport>,
    pub resizes: Vec<ResizeReport>,
    /// Entry names of the output folder after the run, sorted.
    pub output_files: Vec<String>,
}

impl BatchReport {
    /// Input files whose detection or split failed.
    pub fn failed_files(&self) -> impl Iterator<Item = &FileReport> {
        self.files
            .iter()
            .filter(|f| matches!(f.outcome, FileOutcome::Failed { .. }))
    }

    /// Number of input files that produced clips.
    #[must_use]
    pub fn split_count(&self) -> usize {
        self.files
            .iter()
            .filter(|f| matches!(f.outcome, FileOutcome::Split { .. }))
            .count()
    }

    /// Number of resize attempts that failed.
    #[must_use]
    pub fn resize_failure_count(&self) -> usize {
        self.resizes
            .iter()
            .filter(|r| matches!(r.outcome, ResizeOutcome::Failed { .. }))
            .count()
    }

    /// True when any input file or resize failed.
    #[must_use]
    pub fn has_failures(&self) -> bool {
        self.failed_files().next().is_some() || self.resize_failure_count() > 0
    }
}

// ============================================================================
// VALIDATION
// ============================================================================

/// Checks the folders of `config` and returns the input files, sorted.
///
/// The input folder is checked before anything is created, so a missing input
/// folder leaves the file system untouched. The output folder is created when
/// absent.
pub fn validate_inputs(config: &CoreConfig, log: &BatchLog) -> CoreResult<Vec<PathBuf>> {
    if !config.input_dir.exists() {
        return Err(CoreError::InputDirMissing(config.input_dir.clone()));
    }

    if !config.output_dir.exists() {
        fs::create_dir_all(&config.output_dir)?;
        log.info(format_args!(
            "Created output folder: {}",
            config.output_dir.display()
        ));
    }

    find_processable_files(&config.input_dir)
}

// ============================================================================
// BATCH PROCESSING
// ============================================================================

/// Runs scene detection, splitting and (optionally) resizing over every
/// supported file in `config.input_dir`.
///
/// # Errors
///
/// Only validation failures are returned: `CoreError::Config`,
/// `CoreError::InputDirMissing`, `CoreError::NoFilesFound`, or an IO error
/// while creating or listing the folders during validation. Per-file failures
/// and a failed final listing of the output folder are logged and reported.
///
/// # Examples
///
/// ```rust,no_run
/// use scenecut_core::{AdaptiveDetector, BatchLog, CoreConfig, FfmpegResizer, FfmpegSceneSplitter, process_batch};
/// use std::path::{Path, PathBuf};
///
/// let config = CoreConfig::new(
///     PathBuf::from("in"),
///     PathBuf::from("out"),
///     "demo",
///     "1280x720".parse().unwrap(),
/// );
/// let log = BatchLog::open(Path::new("scenecut.log"), log::LevelFilter::Info).unwrap();
/// let detector = AdaptiveDetector::new(config.detector.clone());
/// let splitter = FfmpegSceneSplitter::new(config.split.clone(), config.show_progress);
/// let resizer = FfmpegResizer::new();
///
/// let report = process_batch(&detector, &splitter, &resizer, &config, &log).unwrap();
/// println!("{} files split", report.split_count());
/// ```
pub fn process_batch<D, S, R>(
    detector: &D,
    splitter: &S,
    resizer: &R,
    config: &CoreConfig,
    log: &BatchLog,
) -> CoreResult<BatchReport>
where
    D: SceneDetector,
    S: SceneSplitter,
    R: VideoResizer,
{
    // ========================================================================
    // STEP 1: VALIDATE INPUTS
    // ========================================================================

    log.info(format_args!("Input folder: {}", config.input_dir.display()));
    log.info(format_args!("Output folder: {}", config.output_dir.display()));
    log.info(format_args!("Project name: {}", config.project_name));
    log.info(format_args!("Resolution: {}", config.resolution));

    let files = config
        .validate()
        .and_then(|()| validate_inputs(config, log))
        .inspect_err(|e| {
            log.error(e);
            log.console(format_args!("Error: {e}"));
        })?;

    // ========================================================================
    // STEP 2: PROCESS EACH INPUT FILE
    // ========================================================================

    let mut reports = Vec::with_capacity(files.len());
    let mut resizes = Vec::new();

    for input_path in &files {
        log.info(format_args!("Processing file: {}", input_path.display()));

        let outcome = match split_file(detector, splitter, input_path, &config.output_dir, log) {
            Ok(outcome) => outcome,
            Err(e) => {
                let file_name = get_filename_safe(input_path)
                    .unwrap_or_else(|_| input_path.display().to_string());
                let message = format!("An error occurred while processing {file_name}: {e}");
                log.error(&message);
                log.console(format_args!("Error: {message}"));
                FileOutcome::Failed {
                    error: e.to_string(),
                }
            }
        };

        // ====================================================================
        // STEP 2.1: RESIZE OUTPUTS
        // ====================================================================

        if let (FileOutcome::Split { .. }, Some(target)) = (&outcome, config.resolution.target()) {
            match resize_outputs(resizer, &config.output_dir, target, log) {
                Ok(done) => resizes.extend(done),
                Err(e) => {
                    log.error(format_args!(
                        "Could not list output folder {}: {e}",
                        config.output_dir.display()
                    ));
                }
            }
            log.info(format_args!(
                "All videos processed for resolution: {}",
                config.resolution
            ));
        }

        reports.push(FileReport {
            input: input_path.clone(),
            outcome,
        });
    }

    // ========================================================================
    // STEP 3: DONE
    // ========================================================================

    let output_files = match list_entry_names(&config.output_dir) {
        Ok(names) => {
            log.info(format_args!("Files in output folder: {}", names.join(", ")));
            names
        }
        Err(e) => {
            let message = format!(
                "Could not list output folder {}: {e}",
                config.output_dir.display()
            );
            log.error(&message);
            log.console(format_args!("Error: {message}"));
            Vec::new()
        }
    };
    log.flush();

    Ok(BatchReport {
        project_name: config.project_name.clone(),
        resolution: config.resolution.to_string(),
        files: reports,
        resizes,
        output_files,
    })
}

/// Detects the scenes of one file and splits it when there are any.
fn split_file<D: SceneDetector, S: SceneSplitter>(
    detector: &D,
    splitter: &S,
    input_path: &Path,
    output_dir: &Path,
    log: &BatchLog,
) -> CoreResult<FileOutcome> {
    let scenes = detector.detect_scenes(input_path, log)?;
    log.info(format_args!("Detected {} scenes", scenes.len()));

    if scenes.is_empty() {
        log.warn("No scenes detected in the video.");
        log.console("Warning: No scenes detected in the video.");
        return Ok(FileOutcome::NoScenes);
    }

    let covered: f64 = scenes.iter().map(|s| s.duration_secs()).sum();
    log.debug(format_args!("Scenes cover {}", format_duration(covered)));

    let clips = splitter.split(input_path, &scenes, output_dir, log)?;
    log.info(format_args!(
        "Video successfully processed and saved in {}",
        output_dir.display()
    ));

    Ok(FileOutcome::Split {
        scenes: scenes.len(),
        clips,
    })
}

/// Resizes every supported file currently in `output_dir`.
///
/// Each file is handled on its own; a failure is logged and recorded and the
/// next file is tried.
fn resize_outputs<R: VideoResizer>(
    resizer: &R,
    output_dir: &Path,
    target: TargetResolution,
    log: &BatchLog,
) -> CoreResult<Vec<ResizeReport>> {
    let clips = list_supported_files(output_dir)?;
    let mut reports = Vec::with_capacity(clips.len());

    for clip in clips {
        let name = get_filename_safe(&clip)?;
        let outcome = match resize_in_place(resizer, &clip, target, log) {
            Ok(dimensions) => {
                log.info(format_args!("Successfully resized and replaced: {name}"));
                ResizeOutcome::Resized { dimensions }
            }
            Err(e) => {
                log.error(format_args!("Error processing {name}: {e}"));
                ResizeOutcome::Failed {
                    error: e.to_string(),
                }
            }
        };
        reports.push(ResizeReport { path: clip, outcome });
    }

    Ok(reports)
}

/// Replaces `path` with a copy scaled into `target`.
///
/// The scaled video is written to `resized_<name>` next to `path`, synced to
/// disk, and renamed over `path`. The rename replaces the original in one step,
/// so `path` always holds either the old or the new video. On failure the
/// temporary file is removed and `path` is left as it was.
pub fn resize_in_place<R: VideoResizer>(
    resizer: &R,
    path: &Path,
    target: TargetResolution,
    log: &BatchLog,
) -> CoreResult<Dimensions> {
    let temp_path = resized_temp_path(path)?;

    let result = resizer
        .resize(path, &temp_path, target, log)
        .and_then(|dimensions| {
            fs::File::open(&temp_path)?.sync_all()?;
            fs::rename(&temp_path, path)?;
            Ok(dimensions)
        });

    if result.is_err() && temp_path.exists() {
        if let Err(e) = fs::remove_file(&temp_path) {
            log.warn(format_args!(
                "Could not remove partial output {}: {e}",
                temp_path.display()
            ));
        }
    }

    result
}

/// `<dir>/resized_<name>` for `<dir>/<name>`.
fn resized_temp_path(path: &Path) -> CoreResult<PathBuf> {
    let name = get_filename_safe(path)?;
    Ok(path.with_file_name(format!("{RESIZED_PREFIX}{name}")))
}
