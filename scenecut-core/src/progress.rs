//! Progress bar shown while a video is split into scene clips.
//!
//! The bar spans the total duration of all scenes of one input file, in
//! milliseconds. Each scene's ffmpeg progress events move it forward from that
//! scene's offset. When disabled, or when stderr is not a terminal, the bar is
//! drawn nowhere.

use console::style;
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};

use std::io::IsTerminal;
use std::time::Duration;

const BAR_TEMPLATE: &str =
    "{prefix} {percent:>3}% [{bar:30}] scene {msg} ({elapsed_precise} / {eta_precise})";

/// Progress over all scenes of one input file.
#[derive(Debug)]
pub struct SplitProgress {
    bar: ProgressBar,
    scene_offset_secs: f64,
}

impl SplitProgress {
    /// Starts a bar for `file_name` covering `total_secs` of video.
    #[must_use]
    pub fn start(file_name: &str, total_secs: f64, enabled: bool) -> Self {
        let bar = ProgressBar::new(secs_to_millis(total_secs).max(1));
        if enabled && std::io::stderr().is_terminal() {
            if let Ok(bar_style) = ProgressStyle::with_template(BAR_TEMPLATE) {
                bar.set_style(bar_style.progress_chars("##."));
            }
            bar.set_prefix(style(format!("Splitting {file_name}")).bold().to_string());
            bar.enable_steady_tick(Duration::from_millis(120));
        } else {
            bar.set_draw_target(ProgressDrawTarget::hidden());
        }
        Self {
            bar,
            scene_offset_secs: 0.0,
        }
    }

    /// Marks the beginning of a scene that starts `offset_secs` into the total.
    pub fn begin_scene(&mut self, index: usize, count: usize, offset_secs: f64) {
        self.scene_offset_secs = offset_secs;
        self.bar.set_message(format!("{index}/{count}"));
        self.bar.set_position(secs_to_millis(offset_secs));
    }

    /// Moves the bar to `elapsed_secs` into the current scene.
    pub fn update(&self, elapsed_secs: f64) {
        let position = secs_to_millis(self.scene_offset_secs + elapsed_secs);
        if position > self.bar.position() {
            self.bar.set_position(position.min(self.bar.length().unwrap_or(position)));
        }
    }

    /// Current position, in milliseconds.
    #[must_use]
    pub fn position(&self) -> u64 {
        self.bar.position()
    }

    pub fn finish(self) {
        self.bar.finish_and_clear();
    }
}

fn secs_to_millis(secs: f64) -> u64 {
    if secs.is_finite() && secs > 0.0 {
        (secs * 1000.0) as u64
    } else {
        0
    }
}
