//! Implementation of a scenecut run.
//!
//! Builds the configuration and logger from the parsed arguments, wires the
//! ffmpeg-backed detector, splitter and resizer, and delegates to the
//! scenecut-core batch orchestrator.

use crate::cli::Cli;
use crate::logging::{default_log_path, open_run_log};

use anyhow::{Context, Result};
use console::style;
use serde::Serialize;

use scenecut_core::{
    AdaptiveDetector, BatchLog, BatchReport, CoreConfig, FfmpegResizer, FfmpegSceneSplitter,
    FileOutcome, ResizeOutcome, check_dependency, process_batch,
};

/// Exit code for a run that reached the end of the batch.
pub const EXIT_OK: u8 = 0;

/// Exit code for usage and validation failures.
pub const EXIT_FAILURE: u8 = 1;

/// Machine-readable outcome printed by `--json`.
#[derive(Debug, Serialize, PartialEq)]
pub struct RunSummary {
    pub success: bool,
    pub message: String,
    pub files: Vec<String>,
}

impl RunSummary {
    /// Summary for a run that reached the end of the batch.
    ///
    /// A run only counts as successful when nothing failed and the output
    /// folder holds at least one file.
    #[must_use]
    pub fn from_report(report: &BatchReport) -> Self {
        let mut errors: Vec<String> = Vec::new();
        for file in &report.files {
            if let FileOutcome::Failed { error } = &file.outcome {
                errors.push(format!("{}: {error}", file.input.display()));
            }
        }
        for resize in &report.resizes {
            if let ResizeOutcome::Failed { error } = &resize.outcome {
                errors.push(format!("{}: {error}", resize.path.display()));
            }
        }

        let (success, message) = if !errors.is_empty() {
            (false, format!("Error: {}", errors.join("; ")))
        } else if report.output_files.is_empty() {
            (false, "No files were generated in the output folder.".to_string())
        } else {
            (
                true,
                format!(
                    "Videos generated successfully. Generated files: {}",
                    report.output_files.join(", ")
                ),
            )
        };

        Self {
            success,
            message,
            files: report.output_files.clone(),
        }
    }

    /// Summary for a run stopped before or during validation.
    #[must_use]
    pub fn from_error(error: &impl std::fmt::Display) -> Self {
        Self {
            success: false,
            message: format!("Error: {error}"),
            files: Vec::new(),
        }
    }
}

/// Builds the core configuration from the parsed arguments.
pub fn build_config(cli: &Cli) -> Result<CoreConfig> {
    let mut config = CoreConfig::new(
        cli.input_folder.clone(),
        cli.output_folder.clone(),
        cli.project_name.clone(),
        cli.resolution,
    );
    if let Some(threshold) = cli.adaptive_threshold {
        config.detector.adaptive_threshold = threshold;
    }
    if let Some(len) = cli.min_scene_len {
        config.detector.min_scene_len = len;
    }
    if let Some(value) = cli.min_content_val {
        config.detector.min_content_val = value;
    }
    config.show_progress = !cli.no_progress;

    config.validate().context("Invalid detector settings")?;
    Ok(config)
}

/// Runs the whole batch and returns the process exit code.
pub fn run(cli: &Cli) -> u8 {
    let log_file = cli.log_file.clone().unwrap_or_else(default_log_path);
    let log = match open_run_log(&log_file, cli.verbose) {
        Ok(log) => log,
        Err(e) => return report_setup_failure(cli, &e),
    };

    let config = match build_config(cli) {
        Ok(config) => config,
        Err(e) => {
            log.error(format_args!("{e:#}"));
            log.flush();
            return report_setup_failure(cli, &e);
        }
    };

    for tool in ["ffmpeg", "ffprobe"] {
        if let Err(e) = check_dependency(tool, &log) {
            log.warn(format_args!("{e}"));
        }
    }

    let detector = AdaptiveDetector::new(config.detector.clone());
    let splitter = FfmpegSceneSplitter::new(config.split.clone(), config.show_progress);
    let resizer = FfmpegResizer::new();

    match process_batch(&detector, &splitter, &resizer, &config, &log) {
        Ok(report) => {
            print_summary(cli, &report, &log);
            EXIT_OK
        }
        Err(e) => {
            // Validation failures are already logged and echoed by the orchestrator.
            log.flush();
            if cli.json {
                print_json(&RunSummary::from_error(&e));
            }
            EXIT_FAILURE
        }
    }
}

fn report_setup_failure(cli: &Cli, error: &anyhow::Error) -> u8 {
    if cli.json {
        print_json(&RunSummary::from_error(&format!("{error:#}")));
    } else {
        eprintln!("{} {error:#}", style("Error:").red().bold());
    }
    EXIT_FAILURE
}

fn print_summary(cli: &Cli, report: &BatchReport, log: &BatchLog) {
    if cli.json {
        print_json(&RunSummary::from_report(report));
        return;
    }

    let failed = report.failed_files().count();
    let resize_failures = report.resize_failure_count();
    let line = format!(
        "{} of {} file(s) split, {} failed, {} resize failure(s)",
        report.split_count(),
        report.files.len(),
        failed,
        resize_failures
    );
    if report.has_failures() {
        println!("{}", style(&line).yellow().bold());
    } else {
        println!("{}", style(&line).green().bold());
    }
    log.debug(format_args!("Run summary: {line}"));
}

fn print_json(summary: &RunSummary) {
    match serde_json::to_string(summary) {
        Ok(json) => println!("{json}"),
        Err(e) => eprintln!("Error: failed to serialize summary: {e}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use scenecut_core::{FileReport, ResizeReport};
    use std::path::PathBuf;

    fn report(files: Vec<FileReport>, resizes: Vec<ResizeReport>, outputs: &[&str]) -> BatchReport {
        BatchReport {
            project_name: "demo".to_string(),
            resolution: "original".to_string(),
            files,
            resizes,
            output_files: outputs.iter().map(|s| (*s).to_string()).collect(),
        }
    }

    #[test]
    fn test_summary_success_lists_files() {
        let files = vec![FileReport {
            input: PathBuf::from("in/a.mp4"),
            outcome: FileOutcome::Split { scenes: 2, clips: Vec::new() },
        }];
        let summary = RunSummary::from_report(&report(files, Vec::new(), &["a-Scene-001.mp4", "a-Scene-002.mp4"]));
        assert!(summary.success);
        assert_eq!(
            summary.message,
            "Videos generated successfully. Generated files: a-Scene-001.mp4, a-Scene-002.mp4"
        );
        assert_eq!(summary.files.len(), 2);
    }

    #[test]
    fn test_summary_empty_output_is_failure() {
        let files = vec![FileReport {
            input: PathBuf::from("in/a.mp4"),
            outcome: FileOutcome::NoScenes,
        }];
        let summary = RunSummary::from_report(&report(files, Vec::new(), &[]));
        assert!(!summary.success);
        assert_eq!(summary.message, "No files were generated in the output folder.");
    }

    #[test]
    fn test_summary_reports_failures() {
        let files = vec![FileReport {
            input: PathBuf::from("in/bad.mp4"),
            outcome: FileOutcome::Failed { error: "boom".to_string() },
        }];
        let summary = RunSummary::from_report(&report(files, Vec::new(), &["x.mp4"]));
        assert!(!summary.success);
        assert!(summary.message.starts_with("Error: "));
        assert!(summary.message.contains("bad.mp4: boom"));
    }

    #[test]
    fn test_build_config_applies_overrides() {
        let cli = Cli::try_parse_from([
            "scenecut",
            "in",
            "out",
            "p",
            "original",
            "--min-content-val",
            "20",
            "--no-progress",
        ])
        .unwrap();
        let config = build_config(&cli).unwrap();
        assert_eq!(config.detector.min_content_val, 20.0);
        assert!(!config.show_progress);
        assert_eq!(config.project_name, "p");
    }

    #[test]
    fn test_build_config_rejects_bad_threshold() {
        let cli = Cli::try_parse_from([
            "scenecut",
            "in",
            "out",
            "p",
            "original",
            "--adaptive-threshold",
            "0",
        ])
        .unwrap();
        assert!(build_config(&cli).is_err());
    }
}
