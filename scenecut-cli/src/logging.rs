// ============================================================================
// scenecut-cli/src/logging.rs
// ============================================================================
//
// LOGGING UTILITIES: Run Logger Setup for the CLI
//
// The CLI builds one `BatchLog` per run and hands it to scenecut-core. Lines
// are appended to a log file and mirrored to stdout.
//
// KEY COMPONENTS:
// - default_log_path: `scenecut.log` next to the executable
// - open_run_log: Logger for the chosen path and verbosity

use anyhow::{Context, Result};
use log::LevelFilter;
use scenecut_core::BatchLog;
use scenecut_core::logging::DEFAULT_LOG_FILE_NAME;

use std::path::{Path, PathBuf};

/// `scenecut.log` in the executable's folder, or in the working directory when
/// the executable's location cannot be determined.
#[must_use]
pub fn default_log_path() -> PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf))
        .unwrap_or_default()
        .join(DEFAULT_LOG_FILE_NAME)
}

/// Level used for the run: DEBUG when verbose, INFO otherwise.
#[must_use]
pub fn level_for(verbose: bool) -> LevelFilter {
    if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    }
}

/// Opens the run logger, appending to `log_file`.
pub fn open_run_log(log_file: &Path, verbose: bool) -> Result<BatchLog> {
    BatchLog::open(log_file, level_for(verbose))
        .with_context(|| format!("Failed to open log file '{}'", log_file.display()))
}
