// scenecut-cli/src/cli.rs
//
// Defines the command-line argument structures using clap.

use clap::Parser;
use scenecut_core::{CoreError, Resolution};
use std::path::PathBuf;

// --- CLI Argument Definition ---

#[derive(Parser, Debug)]
#[command(
    name = "scenecut",
    author,
    version, // Reads from Cargo.toml via "cargo" feature in clap
    about = "Scenecut: split videos into scenes and resize the clips",
    long_about = "Detects scene changes in every video of INPUT_FOLDER, writes one clip per \
                  scene to OUTPUT_FOLDER and optionally scales the clips to fit RESOLUTION."
)]
pub struct Cli {
    /// Folder containing the videos to split (.mp4, .avi, .mkv, .mov, .flv)
    #[arg(value_name = "INPUT_FOLDER")]
    pub input_folder: PathBuf,

    /// Folder receiving the per-scene clips (created when missing)
    #[arg(value_name = "OUTPUT_FOLDER")]
    pub output_folder: PathBuf,

    /// Name of the project, reported in the log
    #[arg(value_name = "PROJECT_NAME")]
    pub project_name: String,

    /// 'original' to keep the clip size, or WIDTHxHEIGHT (e.g. 1280x720)
    #[arg(value_name = "RESOLUTION", value_parser = parse_resolution)]
    pub resolution: Resolution,

    /// Optional: Log file to append to (defaults to scenecut.log next to the executable)
    #[arg(long, value_name = "PATH", env = "SCENECUT_LOG_FILE")]
    pub log_file: Option<PathBuf>,

    /// Log debug details, including every ffmpeg command line
    #[arg(short, long)]
    pub verbose: bool,

    /// Do not draw the split progress bar
    #[arg(long, default_value_t = false)]
    pub no_progress: bool,

    // --- Detector Overrides ---
    /// Optional: Score/neighbour ratio needed for a cut (default 3.0)
    #[arg(long, value_name = "RATIO")]
    pub adaptive_threshold: Option<f64>,

    /// Optional: Minimum number of frames between cuts (default 15)
    #[arg(long, value_name = "FRAMES")]
    pub min_scene_len: Option<usize>,

    /// Optional: Minimum content score (0-100) for a cut (default 15)
    #[arg(long, value_name = "SCORE")]
    pub min_content_val: Option<f64>,

    /// Print a JSON summary ({"success", "message", "files"}) when done
    #[arg(long)]
    pub json: bool,
}

fn parse_resolution(value: &str) -> Result<Resolution, String> {
    value.parse().map_err(|e: CoreError| e.to_string())
}
