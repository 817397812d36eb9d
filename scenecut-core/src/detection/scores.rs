//! Per-frame scene-change scores extracted with ffmpeg.
//!
//! ffmpeg's `select` filter computes a `scene` value for every frame (the
//! normalized content difference to the previous frame) and the `metadata`
//! filter prints it to stdout:
//!
//! ```text
//! frame:0    pts:0       pts_time:0
//! lavfi.scene_score=0.000000
//! frame:1    pts:512     pts_time:0.0333333
//! lavfi.scene_score=0.412872
//! ```

use crate::error::{CoreError, CoreResult, command_start_error};
use crate::logging::BatchLog;

use std::path::Path;
use std::process::Command;

/// Filter graph that scores every frame and prints the score to stdout.
const SCORE_FILTER: &str = "select='gte(scene,0)',metadata=print:key=lavfi.scene_score:file=-";

/// ffmpeg reports 0.0-1.0; the cut rule works on a 0-100 scale.
const SCORE_SCALE: f64 = 100.0;

/// Content-change score of one decoded frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameScore {
    /// Frame number as printed by ffmpeg.
    pub frame: u64,
    /// Presentation time in seconds.
    pub pts_secs: f64,
    /// Difference to the previous frame, 0-100.
    pub score: f64,
}

/// Source of per-frame scores for a video.
pub trait SceneScoreProvider {
    fn frame_scores(&self, input_path: &Path, log: &BatchLog) -> CoreResult<Vec<FrameScore>>;
}

/// Runs ffmpeg once over the whole video to collect frame scores.
#[derive(Debug, Clone, Default)]
pub struct FfmpegSceneScores;

impl FfmpegSceneScores {
    /// Arguments of the scoring run, without the program name.
    #[must_use]
    pub fn build_args(input_path: &Path) -> Vec<String> {
        vec![
            "-hide_banner".into(),
            "-nostdin".into(),
            "-nostats".into(),
            "-i".into(),
            input_path.to_string_lossy().into_owned(),
            "-map".into(),
            "0:v:0".into(),
            "-an".into(),
            "-sn".into(),
            "-vf".into(),
            SCORE_FILTER.into(),
            "-f".into(),
            "null".into(),
            "-".into(),
        ]
    }
}

impl SceneScoreProvider for FfmpegSceneScores {
    fn frame_scores(&self, input_path: &Path, log: &BatchLog) -> CoreResult<Vec<FrameScore>> {
        let args = Self::build_args(input_path);
        log.debug(format_args!("Scoring frames: ffmpeg {}", args.join(" ")));

        let output = Command::new("ffmpeg")
            .args(&args)
            .output()
            .map_err(|e| command_start_error("ffmpeg (scene scores)", e))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            return Err(CoreError::SceneDetection {
                path: input_path.to_path_buf(),
                message: if stderr.is_empty() {
                    format!("ffmpeg exited with {}", output.status)
                } else {
                    stderr
                },
            });
        }

        let scores = parse_scene_scores(&String::from_utf8_lossy(&output.stdout));
        log.debug(format_args!(
            "Collected {} frame scores for {}",
            scores.len(),
            input_path.display()
        ));
        Ok(scores)
    }
}

/// Parses the `metadata=print` output into frame scores.
///
/// A score line is paired with the frame header preceding it. Headers without
/// a usable `pts_time` (for example `NOPTS`) and stray score lines are skipped.
#[must_use]
pub fn parse_scene_scores(output: &str) -> Vec<FrameScore> {
    let mut scores = Vec::new();
    let mut pending: Option<(u64, f64)> = None;

    for line in output.lines().map(str::trim) {
        if line.starts_with("frame:") {
            pending = parse_frame_header(line);
        } else if let Some(value) = line.strip_prefix("lavfi.scene_score=") {
            let Some((frame, pts_secs)) = pending.take() else {
                continue;
            };
            if let Ok(raw) = value.trim().parse::<f64>() {
                scores.push(FrameScore {
                    frame,
                    pts_secs,
                    score: raw * SCORE_SCALE,
                });
            }
        }
    }

    scores
}

fn parse_frame_header(line: &str) -> Option<(u64, f64)> {
    let mut frame = None;
    let mut pts_time = None;
    for token in line.split_whitespace() {
        if let Some(value) = token.strip_prefix("frame:") {
            frame = value.parse::<u64>().ok();
        } else if let Some(value) = token.strip_prefix("pts_time:") {
            pts_time = value.parse::<f64>().ok().filter(|t| t.is_finite());
        }
    }
    Some((frame?, pts_time?))
}
