//! Run logging for scenecut.
//!
//! A [`BatchLog`] is an explicitly constructed logger handed by reference to
//! every component of a run. It is built from a `fern::Dispatch` converted with
//! `into_log`, so nothing is installed as the process-wide `log` backend.
//!
//! Lines look like `2024-05-01 14:03:12,481 - INFO - Processing file: in/a.mp4`.
//! The production setup appends to a log file and mirrors every line to stdout.

use crate::error::CoreResult;

use log::{Level, LevelFilter, Log, Record};

use std::fmt::Display;
use std::path::Path;

/// Target attached to every record emitted by a `BatchLog`.
pub const LOG_TARGET: &str = "scenecut";

/// File name used for the run log when no path is given.
pub const DEFAULT_LOG_FILE_NAME: &str = "scenecut.log";

/// Timestamp layout of a log line (`2024-05-01 14:03:12,481`).
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S,%3f";

/// Level label as written to the log (`WARNING` rather than `WARN`).
#[must_use]
pub fn level_label(level: Level) -> &'static str {
    match level {
        Level::Error => "ERROR",
        Level::Warn => "WARNING",
        Level::Info => "INFO",
        Level::Debug => "DEBUG",
        Level::Trace => "TRACE",
    }
}

/// A dispatch that renders `<timestamp> - <LEVEL> - <message>` at `level`.
///
/// Callers chain outputs onto it before passing it to [`BatchLog::from_dispatch`].
#[must_use]
pub fn line_format_dispatch(level: LevelFilter) -> fern::Dispatch {
    fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "{} - {} - {}",
                chrono::Local::now().format(TIMESTAMP_FORMAT),
                level_label(record.level()),
                message
            ))
        })
        .level(level)
}

/// Explicit logger for one run.
pub struct BatchLog {
    inner: Box<dyn Log>,
    level: LevelFilter,
    console: bool,
}

impl BatchLog {
    /// Appends to `log_file` (creating it and its parent folder) and mirrors to stdout.
    pub fn open(log_file: &Path, level: LevelFilter) -> CoreResult<Self> {
        if let Some(parent) = log_file.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }

        let dispatch = line_format_dispatch(level)
            .chain(fern::log_file(log_file)?)
            .chain(std::io::stdout());

        Ok(Self::from_dispatch(dispatch).with_console(true))
    }

    /// Wraps an already configured dispatch. Console notices are off.
    #[must_use]
    pub fn from_dispatch(dispatch: fern::Dispatch) -> Self {
        let (level, inner) = dispatch.into_log();
        Self {
            inner,
            level,
            console: false,
        }
    }

    /// Discards everything; used where a logger is required but unwanted.
    #[must_use]
    pub fn silent() -> Self {
        Self::from_dispatch(fern::Dispatch::new().level(LevelFilter::Off))
    }

    /// Enables or disables the plain `Error: ...`/`Warning: ...` stdout notices.
    #[must_use]
    pub fn with_console(mut self, console: bool) -> Self {
        self.console = console;
        self
    }

    /// Highest level that reaches the outputs.
    #[must_use]
    pub fn level(&self) -> LevelFilter {
        self.level
    }

    pub fn error(&self, message: impl Display) {
        self.emit(Level::Error, message);
    }

    pub fn warn(&self, message: impl Display) {
        self.emit(Level::Warn, message);
    }

    pub fn info(&self, message: impl Display) {
        self.emit(Level::Info, message);
    }

    pub fn debug(&self, message: impl Display) {
        self.emit(Level::Debug, message);
    }

    /// Prints an unformatted line for whoever is watching stdout.
    ///
    /// Wrappers scan for lines starting with `Error:`, so these are kept
    /// separate from the timestamped log lines.
    pub fn console(&self, message: impl Display) {
        if self.console {
            println!("{message}");
        }
    }

    pub fn flush(&self) {
        self.inner.flush();
    }

    fn emit(&self, level: Level, message: impl Display) {
        if level > self.level {
            return;
        }
        self.inner.log(
            &Record::builder()
                .args(format_args!("{message}"))
                .level(level)
                .target(LOG_TARGET)
                .build(),
        );
    }
}

impl std::fmt::Debug for BatchLog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BatchLog")
            .field("level", &self.level)
            .field("console", &self.console)
            .finish()
    }
}

impl Drop for BatchLog {
    fn drop(&mut self) {
        self.inner.flush();
    }
}

/// Captures formatted lines in memory for assertions.
#[cfg(test)]
pub(crate) fn capture_log(level: LevelFilter) -> (BatchLog, std::sync::Arc<std::sync::Mutex<Vec<String>>>) {
    use std::sync::{Arc, Mutex};

    let lines = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&lines);
    let dispatch = line_format_dispatch(level).chain(fern::Output::call(move |record| {
        sink.lock().unwrap().push(record.args().to_string());
    }));
    (BatchLog::from_dispatch(dispatch), lines)
}
