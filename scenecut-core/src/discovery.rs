//! File discovery for input and output folders.
//!
//! Only the top level of a folder is scanned. A file qualifies when its name
//! ends with one of [`SUPPORTED_EXTENSIONS`]; the match is a case-sensitive
//! suffix match, so `clip.MP4` is ignored.

use crate::error::{CoreError, CoreResult};

use std::path::{Path, PathBuf};

/// Container suffixes scenecut reads and resizes.
pub const SUPPORTED_EXTENSIONS: [&str; 5] = [".mp4", ".avi", ".mkv", ".mov", ".flv"];

/// Checks whether a file name ends with a supported container suffix.
#[must_use]
pub fn has_supported_extension(path: &Path) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .is_some_and(|name| SUPPORTED_EXTENSIONS.iter().any(|ext| name.ends_with(ext)))
}

/// Lists the supported video files directly inside `dir`, sorted by name.
///
/// Subdirectories are skipped. An empty result is not an error here; see
/// [`find_processable_files`] for the input-folder variant.
pub fn list_supported_files(dir: &Path) -> CoreResult<Vec<PathBuf>> {
    let mut files: Vec<PathBuf> = std::fs::read_dir(dir)?
        .filter_map(|entry| {
            let path = entry.ok()?.path();
            (path.is_file() && has_supported_extension(&path)).then_some(path)
        })
        .collect();
    files.sort();
    Ok(files)
}

/// Finds the input videos to process.
///
/// # Errors
///
/// * `CoreError::InputDirMissing` - `input_dir` does not exist
/// * `CoreError::NoFilesFound` - no file in `input_dir` has a supported suffix
/// * `CoreError::Io` - the folder could not be read
///
/// # Examples
///
/// ```rust,no_run
/// use scenecut_core::find_processable_files;
/// use std::path::Path;
///
/// match find_processable_files(Path::new("/path/to/videos")) {
///     Ok(files) => println!("Found {} video files", files.len()),
///     Err(e) => eprintln!("Error: {e}"),
/// }
/// ```
pub fn find_processable_files(input_dir: &Path) -> CoreResult<Vec<PathBuf>> {
    if !input_dir.exists() {
        return Err(CoreError::InputDirMissing(input_dir.to_path_buf()));
    }

    let files = list_supported_files(input_dir)?;
    if files.is_empty() {
        Err(CoreError::NoFilesFound)
    } else {
        Ok(files)
    }
}

/// Names of every entry in `dir`, sorted, for the end-of-run listing.
pub fn list_entry_names(dir: &Path) -> CoreResult<Vec<String>> {
    let mut names: Vec<String> = std::fs::read_dir(dir)?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    Ok(names)
}
