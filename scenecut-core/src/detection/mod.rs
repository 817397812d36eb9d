// ============================================================================
// scenecut-core/src/detection/mod.rs
// ============================================================================
//
// SCENE DETECTION: Finding Scene Boundaries in a Video
//
// Detection runs in two steps. ffmpeg decodes the video once and reports a
// content-change score for every frame (`scores`); the adaptive cut rule then
// decides which of those frames start a new scene (`adaptive`).
//
// KEY COMPONENTS:
// - Scene: One time range of a video, consumed by the splitter
// - SceneDetector: Trait the batch orchestrator detects through
// - AdaptiveDetector: Scores from a SceneScoreProvider + the adaptive rule
//
// An empty scene list means "no cut found" and is not an error.

pub mod adaptive;
pub mod scores;

pub use adaptive::{find_cuts, scenes_from_cuts};
pub use scores::{FfmpegSceneScores, FrameScore, SceneScoreProvider, parse_scene_scores};

use crate::config::DetectorConfig;
use crate::error::CoreResult;
use crate::logging::BatchLog;

use std::path::Path;

/// A contiguous range of a video, from one cut to the next.
#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    /// 1-based position in the scene list; used for clip names.
    pub index: usize,
    pub start_frame: u64,
    /// Exclusive.
    pub end_frame: u64,
    pub start_secs: f64,
    pub end_secs: f64,
}

impl Scene {
    #[must_use]
    pub fn duration_secs(&self) -> f64 {
        (self.end_secs - self.start_secs).max(0.0)
    }
}

/// Finds the scenes of a video.
pub trait SceneDetector {
    /// Ordered, non-overlapping scenes of `input_path`; empty when no cut was found.
    fn detect_scenes(&self, input_path: &Path, log: &BatchLog) -> CoreResult<Vec<Scene>>;
}

/// Content-adaptive detector over per-frame scores.
#[derive(Debug, Clone)]
pub struct AdaptiveDetector<P: SceneScoreProvider = FfmpegSceneScores> {
    provider: P,
    config: DetectorConfig,
}

impl AdaptiveDetector<FfmpegSceneScores> {
    /// Detector scoring frames with ffmpeg.
    #[must_use]
    pub fn new(config: DetectorConfig) -> Self {
        Self::with_provider(FfmpegSceneScores, config)
    }
}

impl<P: SceneScoreProvider> AdaptiveDetector<P> {
    #[must_use]
    pub fn with_provider(provider: P, config: DetectorConfig) -> Self {
        Self { provider, config }
    }
}

impl<P: SceneScoreProvider> SceneDetector for AdaptiveDetector<P> {
    fn detect_scenes(&self, input_path: &Path, log: &BatchLog) -> CoreResult<Vec<Scene>> {
        let scores = self.provider.frame_scores(input_path, log)?;
        let cuts = find_cuts(&scores, &self.config);
        log.debug(format_args!(
            "{} frames scored, cuts at {:?}",
            scores.len(),
            cuts.iter().map(|&i| scores[i].frame).collect::<Vec<_>>()
        ));
        Ok(scenes_from_cuts(&scores, &cuts))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CoreError;

    struct FixedScores(Vec<f64>);

    impl SceneScoreProvider for FixedScores {
        fn frame_scores(&self, _input_path: &Path, _log: &BatchLog) -> CoreResult<Vec<FrameScore>> {
            Ok(self
                .0
                .iter()
                .enumerate()
                .map(|(i, &score)| FrameScore {
                    frame: i as u64,
                    pts_secs: i as f64 / 25.0,
                    score,
                })
                .collect())
        }
    }

    struct FailingScores;

    impl SceneScoreProvider for FailingScores {
        fn frame_scores(&self, input_path: &Path, _log: &BatchLog) -> CoreResult<Vec<FrameScore>> {
            Err(CoreError::SceneDetection {
                path: input_path.to_path_buf(),
                message: "moov atom not found".into(),
            })
        }
    }

    #[test]
    fn test_detects_two_scenes() {
        let mut values = vec![1.0; 50];
        values[25] = 80.0;
        let detector = AdaptiveDetector::with_provider(FixedScores(values), DetectorConfig::default());

        let scenes = detector
            .detect_scenes(Path::new("a.mp4"), &BatchLog::silent())
            .unwrap();
        assert_eq!(scenes.len(), 2);
        assert_eq!(scenes[0].start_secs, 0.0);
        assert_eq!(scenes[1].start_frame, 25);
        assert!((scenes[0].duration_secs() - 1.0).abs() < 1e-9);
        assert!((scenes[1].duration_secs() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_static_video_has_no_scenes() {
        let detector = AdaptiveDetector::with_provider(FixedScores(vec![0.0; 100]), DetectorConfig::default());
        let scenes = detector
            .detect_scenes(Path::new("still.mp4"), &BatchLog::silent())
            .unwrap();
        assert!(scenes.is_empty());
    }

    #[test]
    fn test_provider_errors_propagate() {
        let detector = AdaptiveDetector::with_provider(FailingScores, DetectorConfig::default());
        let result = detector.detect_scenes(Path::new("broken.mp4"), &BatchLog::silent());
        assert!(matches!(result, Err(CoreError::SceneDetection { .. })));
    }
}
