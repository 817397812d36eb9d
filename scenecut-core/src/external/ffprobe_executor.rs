//! FFprobe integration for reading video stream dimensions.
//!
//! The `ffprobe` crate runs `ffprobe -v quiet -print_format json -show_format
//! -show_streams <file>` and deserializes the result. The first stream tagged
//! `video` supplies the width and height.

use crate::error::{CoreError, CoreResult};
use crate::logging::BatchLog;
use crate::resolution::Dimensions;

use ffprobe::{FfProbe, FfProbeError, ffprobe};

use std::path::Path;
use std::process::Output;

/// Reads the dimensions of a video file.
pub trait VideoProber {
    /// Width and height of the first video stream in `input_path`.
    fn probe_dimensions(&self, input_path: &Path, log: &BatchLog) -> CoreResult<Dimensions>;
}

/// `VideoProber` backed by the `ffprobe` crate.
#[derive(Debug, Clone, Default)]
pub struct FfprobeProber;

impl FfprobeProber {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl VideoProber for FfprobeProber {
    fn probe_dimensions(&self, input_path: &Path, log: &BatchLog) -> CoreResult<Dimensions> {
        log.debug(format_args!("Running ffprobe on: {}", input_path.display()));
        match ffprobe(input_path) {
            Ok(metadata) => dimensions_from_streams(&stream_infos(&metadata), input_path),
            Err(err) => {
                log.debug(format_args!(
                    "ffprobe failed for {}: {err:?}",
                    input_path.display()
                ));
                Err(map_ffprobe_error(err, input_path))
            }
        }
    }
}

/// The parts of an ffprobe stream entry the prober looks at.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StreamInfo {
    pub codec_type: Option<String>,
    pub width: Option<i64>,
    pub height: Option<i64>,
}

/// Extracts the stream entries of a probe result, in ffprobe's order.
#[must_use]
pub fn stream_infos(metadata: &FfProbe) -> Vec<StreamInfo> {
    metadata
        .streams
        .iter()
        .map(|s| StreamInfo {
            codec_type: s.codec_type.clone(),
            width: s.width,
            height: s.height,
        })
        .collect()
}

/// Picks the first video stream and validates its size.
pub fn dimensions_from_streams(streams: &[StreamInfo], input_path: &Path) -> CoreResult<Dimensions> {
    let probe_error = |message: String| CoreError::Probe {
        path: input_path.to_path_buf(),
        message,
    };

    let video_stream = streams
        .iter()
        .find(|s| s.codec_type.as_deref() == Some("video"))
        .ok_or_else(|| probe_error("No video stream found".to_string()))?;

    let width = video_stream
        .width
        .ok_or_else(|| probe_error("Video stream missing width".to_string()))?;
    let height = video_stream
        .height
        .ok_or_else(|| probe_error("Video stream missing height".to_string()))?;

    match (u32::try_from(width), u32::try_from(height)) {
        (Ok(w), Ok(h)) if w > 0 && h > 0 => Ok(Dimensions::new(w, h)),
        _ => Err(probe_error(format!(
            "Invalid dimensions: width={width}, height={height}"
        ))),
    }
}

fn map_ffprobe_error(err: FfProbeError, input_path: &Path) -> CoreError {
    let message = match err {
        FfProbeError::Io(io_err) => format!("failed to start ffprobe: {io_err}"),
        FfProbeError::Status(output) => status_message(&output),
        FfProbeError::Deserialize(err) => format!("could not parse ffprobe output: {err}"),
        other => format!("unknown ffprobe error: {other:?}"),
    };
    CoreError::Probe {
        path: input_path.to_path_buf(),
        message,
    }
}

/// Message for an ffprobe run that exited non-zero: its stderr, or the exit
/// status when stderr is empty.
fn status_message(output: &Output) -> String {
    let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
    if stderr.is_empty() {
        format!("ffprobe exited with {}", output.status)
    } else {
        stderr
    }
}
