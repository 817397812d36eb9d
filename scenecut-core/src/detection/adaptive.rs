//! Content-adaptive cut rule.
//!
//! A frame's score is compared with the mean score of the `window_width`
//! frames on either side of it. A sudden spike against a calm neighbourhood is
//! a cut; a high score inside a busy neighbourhood (camera motion, flashes)
//! is not.

use super::Scene;
use super::scores::FrameScore;
use crate::config::DetectorConfig;

/// Upper bound of the score/average ratio.
pub const MAX_ADAPTIVE_RATIO: f64 = 255.0;

/// Averages below this are treated as a perfectly still neighbourhood.
const ZERO_AVERAGE_EPSILON: f64 = 1e-5;

/// Ratio of `score` to the mean of its neighbours, capped at [`MAX_ADAPTIVE_RATIO`].
///
/// With a still neighbourhood any frame that clears `min_content_val` gets the
/// maximum ratio and everything else gets zero.
#[must_use]
pub fn adaptive_ratio(score: f64, neighbour_average: f64, min_content_val: f64) -> f64 {
    if neighbour_average.abs() < ZERO_AVERAGE_EPSILON {
        if score >= min_content_val {
            MAX_ADAPTIVE_RATIO
        } else {
            0.0
        }
    } else {
        (score / neighbour_average).min(MAX_ADAPTIVE_RATIO)
    }
}

/// Indices into `scores` where a new scene starts.
///
/// Only frames with a full window on both sides are candidates. A candidate is
/// a cut when its ratio reaches `adaptive_threshold`, its raw score reaches
/// `min_content_val`, and at least `min_scene_len` frames separate it from the
/// previous cut (the first frame counts as the initial cut).
#[must_use]
pub fn find_cuts(scores: &[FrameScore], config: &DetectorConfig) -> Vec<usize> {
    let window = config.window_width;
    if window == 0 || scores.len() < 2 * window + 1 {
        return Vec::new();
    }

    let mut cuts = Vec::new();
    let mut last_cut = 0usize;

    for target in window..scores.len() - window {
        let score = scores[target].score;
        let neighbours: f64 = scores[target - window..target]
            .iter()
            .chain(&scores[target + 1..=target + window])
            .map(|f| f.score)
            .sum();
        let average = neighbours / (2 * window) as f64;

        let ratio = adaptive_ratio(score, average, config.min_content_val);
        let threshold_met = ratio >= config.adaptive_threshold && score >= config.min_content_val;
        let min_length_met = target - last_cut >= config.min_scene_len;

        if threshold_met && min_length_met {
            cuts.push(target);
            last_cut = target;
        }
    }

    cuts
}

/// Turns cut indices into consecutive scenes covering the whole video.
///
/// Returns an empty list when there are no cuts. The end of the last scene is
/// the last frame's timestamp plus the mean frame interval.
#[must_use]
pub fn scenes_from_cuts(scores: &[FrameScore], cuts: &[usize]) -> Vec<Scene> {
    let (Some(first), Some(last)) = (scores.first(), scores.last()) else {
        return Vec::new();
    };
    if cuts.is_empty() {
        return Vec::new();
    }

    let frame_interval = if scores.len() > 1 {
        (last.pts_secs - first.pts_secs) / (scores.len() - 1) as f64
    } else {
        0.0
    };
    let video_end = (last.frame + 1, last.pts_secs + frame_interval);

    let starts: Vec<usize> = std::iter::once(0)
        .chain(cuts.iter().copied().filter(|&c| c > 0 && c < scores.len()))
        .collect();

    starts
        .iter()
        .enumerate()
        .map(|(i, &start)| {
            let (end_frame, end_secs) = starts
                .get(i + 1)
                .map_or(video_end, |&next| (scores[next].frame, scores[next].pts_secs));
            Scene {
                index: i + 1,
                start_frame: scores[start].frame,
                end_frame,
                start_secs: scores[start].pts_secs,
                end_secs,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    /// 25 fps frames with the given scores.
    fn frames(values: &[f64]) -> Vec<FrameScore> {
        values
            .iter()
            .enumerate()
            .map(|(i, &score)| FrameScore {
                frame: i as u64,
                pts_secs: i as f64 * 0.04,
                score,
            })
            .collect()
    }

    fn config(min_scene_len: usize) -> DetectorConfig {
        DetectorConfig {
            min_scene_len,
            ..DetectorConfig::default()
        }
    }

    #[test]
    fn test_ratio() {
        assert_eq!(adaptive_ratio(30.0, 10.0, 15.0), 3.0);
        assert_eq!(adaptive_ratio(3000.0, 1.0, 15.0), MAX_ADAPTIVE_RATIO);
        assert_eq!(adaptive_ratio(20.0, 0.0, 15.0), MAX_ADAPTIVE_RATIO);
        assert_eq!(adaptive_ratio(10.0, 0.0, 15.0), 0.0);
    }

    #[test]
    fn test_single_spike_is_a_cut() {
        let mut values = vec![2.0; 40];
        values[20] = 60.0;
        let scores = frames(&values);
        assert_eq!(find_cuts(&scores, &config(15)), vec![20]);
    }

    #[test]
    fn test_busy_neighbourhood_is_not_a_cut() {
        // High everywhere: ratio stays near 1.
        let values = vec![40.0; 40];
        assert!(find_cuts(&frames(&values), &config(15)).is_empty());
    }

    #[test]
    fn test_low_score_spike_is_not_a_cut() {
        // Large ratio but below min_content_val.
        let mut values = vec![0.5; 40];
        values[20] = 10.0;
        assert!(find_cuts(&frames(&values), &config(15)).is_empty());
    }

    #[test]
    fn test_min_scene_len_suppresses_close_cuts() {
        let mut values = vec![1.0; 60];
        values[20] = 50.0;
        values[26] = 50.0;
        values[45] = 50.0;
        let scores = frames(&values);

        assert_eq!(find_cuts(&scores, &config(15)), vec![20, 45]);
        assert_eq!(find_cuts(&scores, &config(5)), vec![20, 26, 45]);
    }

    #[test]
    fn test_cut_too_close_to_start_is_dropped() {
        let mut values = vec![1.0; 40];
        values[5] = 50.0;
        assert!(find_cuts(&frames(&values), &config(15)).is_empty());
        assert_eq!(find_cuts(&frames(&values), &config(5)), vec![5]);
    }

    #[test]
    fn test_short_input_has_no_cuts() {
        assert!(find_cuts(&frames(&[0.0, 90.0, 0.0, 0.0]), &config(1)).is_empty());
        assert!(find_cuts(&[], &config(1)).is_empty());
    }

    #[test]
    fn test_scenes_cover_the_video() {
        let scores = frames(&[0.0; 50]);
        let scenes = scenes_from_cuts(&scores, &[20, 35]);

        assert_eq!(scenes.len(), 3);
        assert_eq!(scenes[0].index, 1);
        assert_eq!((scenes[0].start_frame, scenes[0].end_frame), (0, 20));
        assert_eq!((scenes[1].start_frame, scenes[1].end_frame), (20, 35));
        assert_eq!((scenes[2].start_frame, scenes[2].end_frame), (35, 50));

        for pair in scenes.windows(2) {
            assert_eq!(pair[0].end_secs, pair[1].start_secs);
        }
        assert!((scenes[2].end_secs - 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_no_cuts_means_no_scenes() {
        let scores = frames(&[0.0; 10]);
        assert!(scenes_from_cuts(&scores, &[]).is_empty());
        assert!(scenes_from_cuts(&[], &[3]).is_empty());
    }
}
