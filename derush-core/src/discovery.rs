//! File discovery module for finding clips to log.
//!
//! Only the top level of the source directory is searched, and only regular
//! files whose name ends with `.<extension>` are returned. The match is
//! case-sensitive: camera cards write `.MXF`, and `.mxf` files are left alone.

use crate::error::{CoreError, CoreResult};

use std::path::{Path, PathBuf};

/// Finds the clips of `input_dir` carrying the given container extension.
///
/// The result is sorted by file name so that repeated runs over the same
/// directory produce the same sheet. An empty directory yields an empty list.
///
/// # Errors
///
/// * `CoreError::SourceDirNotFound` - If `input_dir` is not an existing directory
/// * `CoreError::Io` - If the directory listing fails
///
/// # Examples
///
/// ```rust,no_run
/// use derush_core::find_media_files;
/// use std::path::Path;
///
/// let clips = find_media_files(Path::new("/rushes/day01"), "MXF").unwrap();
/// for clip in clips {
///     println!("{}", clip.display());
/// }
/// ```
pub fn find_media_files(input_dir: &Path, extension: &str) -> CoreResult<Vec<PathBuf>> {
    if !input_dir.is_dir() {
        return Err(CoreError::SourceDirNotFound(input_dir.to_path_buf()));
    }

    let suffix = format!(".{}", extension.trim_start_matches('.'));

    let mut files = Vec::new();
    for entry in std::fs::read_dir(input_dir)? {
        let path = entry?.path();
        if !path.is_file() {
            continue;
        }
        let matches = path
            .file_name()
            .and_then(|name| name.to_str())
            .is_some_and(|name| name.ends_with(&suffix));
        if matches {
            files.push(path);
        }
    }

    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    log::debug!(
        "Found {} *{} file(s) in {}",
        files.len(),
        suffix,
        input_dir.display()
    );
    Ok(files)
}
