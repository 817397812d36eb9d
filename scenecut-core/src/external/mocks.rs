// scenecut-core/src/external/mocks.rs

// --- Mocking Infrastructure (for testing) ---

use super::ffmpeg::{SceneSplitter, VideoResizer, clip_path};
use super::ffmpeg_executor::{FfmpegProcess, FfmpegSpawner};
use super::ffprobe_executor::VideoProber;
use crate::detection::{Scene, SceneDetector};
use crate::error::{CoreError, CoreResult};
use crate::logging::BatchLog;
use crate::resolution::{Dimensions, TargetResolution};

use ffmpeg_sidecar::command::FfmpegCommand;
use ffmpeg_sidecar::event::FfmpegEvent;

use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::os::unix::process::ExitStatusExt;
use std::path::{Path, PathBuf};
use std::process::ExitStatus;
use std::rc::Rc;

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

// ---- FFmpeg process ----

/// Mock implementation of FfmpegProcess.
#[derive(Clone)]
pub struct MockFfmpegProcess {
    /// Events to emit when handle_events is called.
    pub events_to_emit: Vec<FfmpegEvent>,
    /// Exit status to return when wait is called.
    pub exit_status: ExitStatus,
}

impl FfmpegProcess for MockFfmpegProcess {
    fn handle_events<F>(&mut self, mut handler: F) -> CoreResult<()>
    where
        F: FnMut(FfmpegEvent) -> CoreResult<()>,
    {
        for event in self.events_to_emit.clone() {
            handler(event)?;
        }
        Ok(())
    }

    fn wait(&mut self) -> CoreResult<ExitStatus> {
        Ok(self.exit_status)
    }
}

/// Represents an expected ffmpeg command call and its mock result.
pub struct MockFfmpegExpectation {
    pub arg_pattern: String,
    pub result: CoreResult<MockFfmpegProcess>,
    pub create_dummy_output: bool,
}

/// Mock implementation of FfmpegSpawner supporting multiple expectations.
///
/// The first expectation whose pattern is contained in any argument is used
/// once and removed. An unmatched command panics.
#[derive(Clone, Default)]
pub struct MockFfmpegSpawner {
    expectations: Rc<RefCell<Vec<MockFfmpegExpectation>>>,
    received_calls: Rc<RefCell<Vec<Vec<String>>>>,
}

impl MockFfmpegSpawner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_expectation(
        &self,
        arg_pattern: &str,
        result: CoreResult<MockFfmpegProcess>,
        create_dummy_output: bool,
    ) {
        self.expectations.borrow_mut().push(MockFfmpegExpectation {
            arg_pattern: arg_pattern.to_string(),
            result,
            create_dummy_output,
        });
    }

    pub fn add_success_expectation(
        &self,
        arg_pattern: &str,
        events: Vec<FfmpegEvent>,
        create_dummy_output: bool,
    ) {
        let process = MockFfmpegProcess {
            events_to_emit: events,
            exit_status: ExitStatus::from_raw(0),
        };
        self.add_expectation(arg_pattern, Ok(process), create_dummy_output);
    }

    pub fn add_exit_error_expectation(&self, arg_pattern: &str, events: Vec<FfmpegEvent>, raw_status: i32) {
        let process = MockFfmpegProcess {
            events_to_emit: events,
            exit_status: ExitStatus::from_raw(raw_status),
        };
        self.add_expectation(arg_pattern, Ok(process), false);
    }

    pub fn get_received_calls(&self) -> Vec<Vec<String>> {
        self.received_calls.borrow().clone()
    }
}

impl FfmpegSpawner for MockFfmpegSpawner {
    type Process = MockFfmpegProcess;

    fn spawn(&self, cmd: FfmpegCommand) -> CoreResult<Self::Process> {
        let args: Vec<String> = cmd
            .get_args()
            .map(|s| s.to_string_lossy().into_owned())
            .collect();
        self.received_calls.borrow_mut().push(args.clone());

        let mut expectations = self.expectations.borrow_mut();
        let Some(index) = expectations
            .iter()
            .position(|exp| args.iter().any(|arg| arg.contains(&exp.arg_pattern)))
        else {
            panic!("MockFfmpegSpawner: No expectation found for command args: {args:?}");
        };

        let expectation = expectations.remove(index);
        let process = expectation.result?;
        if expectation.create_dummy_output {
            if let Some(output_path) = args.last() {
                std::fs::write(output_path, b"mock ffmpeg output")?;
            }
        }
        Ok(process)
    }
}

// ---- Prober ----

/// Prober answering from a fixed table; unknown paths fail with `CoreError::Probe`.
#[derive(Clone, Default)]
pub struct MockProber {
    dimensions: Rc<RefCell<HashMap<PathBuf, Dimensions>>>,
}

impl MockProber {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&self, path: &Path, dimensions: Dimensions) {
        self.dimensions
            .borrow_mut()
            .insert(path.to_path_buf(), dimensions);
    }
}

impl VideoProber for MockProber {
    fn probe_dimensions(&self, input_path: &Path, _log: &BatchLog) -> CoreResult<Dimensions> {
        self.dimensions
            .borrow()
            .get(input_path)
            .copied()
            .ok_or_else(|| CoreError::Probe {
                path: input_path.to_path_buf(),
                message: "No video stream found".to_string(),
            })
    }
}

// ---- Scene detector ----

/// Detector returning a scripted number of scenes per input file name.
///
/// Files without a script get two scenes. Names registered with `fail_on`
/// return `CoreError::SceneDetection`.
#[derive(Clone, Default)]
pub struct MockDetector {
    scene_counts: Rc<RefCell<HashMap<String, usize>>>,
    failures: Rc<RefCell<HashSet<String>>>,
    calls: Rc<RefCell<Vec<String>>>,
}

impl MockDetector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_scenes(self, file_name: &str, count: usize) -> Self {
        self.scene_counts
            .borrow_mut()
            .insert(file_name.to_string(), count);
        self
    }

    pub fn fail_on(self, file_name: &str) -> Self {
        self.failures.borrow_mut().insert(file_name.to_string());
        self
    }

    /// File names passed to `detect_scenes`, in call order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }
}

impl SceneDetector for MockDetector {
    fn detect_scenes(&self, input_path: &Path, _log: &BatchLog) -> CoreResult<Vec<Scene>> {
        let name = file_name(input_path);
        self.calls.borrow_mut().push(name.clone());

        if self.failures.borrow().contains(&name) {
            return Err(CoreError::SceneDetection {
                path: input_path.to_path_buf(),
                message: "Invalid data found when processing input".to_string(),
            });
        }

        let count = self.scene_counts.borrow().get(&name).copied().unwrap_or(2);
        Ok((0..count)
            .map(|i| Scene {
                index: i + 1,
                start_frame: i as u64 * 100,
                end_frame: (i as u64 + 1) * 100,
                start_secs: i as f64 * 4.0,
                end_secs: (i as f64 + 1.0) * 4.0,
            })
            .collect())
    }
}

// ---- Scene splitter ----

/// Splitter writing small placeholder clips named like the real one.
#[derive(Clone, Default)]
pub struct MockSplitter {
    failures: Rc<RefCell<HashSet<String>>>,
    calls: Rc<RefCell<Vec<(String, usize)>>>,
}

impl MockSplitter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail_on(self, file_name: &str) -> Self {
        self.failures.borrow_mut().insert(file_name.to_string());
        self
    }

    /// `(file name, scene count)` per call.
    pub fn calls(&self) -> Vec<(String, usize)> {
        self.calls.borrow().clone()
    }
}

impl SceneSplitter for MockSplitter {
    fn split(
        &self,
        input_path: &Path,
        scenes: &[Scene],
        output_dir: &Path,
        _log: &BatchLog,
    ) -> CoreResult<Vec<PathBuf>> {
        let name = file_name(input_path);
        self.calls.borrow_mut().push((name.clone(), scenes.len()));

        if self.failures.borrow().contains(&name) {
            return Err(CoreError::Split {
                path: input_path.to_path_buf(),
                scene: 1,
                stderr: "Conversion failed!".to_string(),
            });
        }

        scenes
            .iter()
            .map(|scene| {
                let clip = clip_path(output_dir, input_path, scene.index, "mp4");
                std::fs::write(&clip, format!("clip {}", scene.index))?;
                Ok(clip)
            })
            .collect()
    }
}

// ---- Resizer ----

/// Resizer that writes `resized:<original contents>` to the output path.
///
/// Names registered with `fail_on` leave a partial output behind and return
/// `CoreError::Resize`, like an ffmpeg run that dies mid-file.
#[derive(Clone, Default)]
pub struct MockResizer {
    failures: Rc<RefCell<HashSet<String>>>,
    calls: Rc<RefCell<Vec<String>>>,
}

impl MockResizer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail_on(self, file_name: &str) -> Self {
        self.failures.borrow_mut().insert(file_name.to_string());
        self
    }

    /// Input file names, in call order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }
}

impl VideoResizer for MockResizer {
    fn resize(
        &self,
        input_path: &Path,
        output_path: &Path,
        target: TargetResolution,
        _log: &BatchLog,
    ) -> CoreResult<Dimensions> {
        let name = file_name(input_path);
        self.calls.borrow_mut().push(name.clone());

        if self.failures.borrow().contains(&name) {
            std::fs::write(output_path, b"partial")?;
            return Err(CoreError::Resize {
                path: input_path.to_path_buf(),
                stderr: "Error while filtering: Invalid argument".to_string(),
            });
        }

        let original = std::fs::read_to_string(input_path)?;
        std::fs::write(output_path, format!("resized:{original}"))?;
        Ok(Dimensions::new(target.width, target.height))
    }
}
