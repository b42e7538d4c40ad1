use std::path::Path;

use anyhow::{Context, Result};
use tracing::{debug, info};

use crate::io::list_files;
use crate::text::strip_timestamps;

/// Result of cleaning a directory of subtitle files
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CleanResult {
    pub files_visited: usize,
    pub files_changed: usize,
    pub lines_removed: usize,
}

/// Remove timestamp lines from one file in place
///
/// The file is only rewritten when something was removed. Returns the number
/// of removed lines.
pub fn clean_file(path: &Path) -> Result<usize> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read file: {:?}", path))?;

    let (cleaned, removed) = strip_timestamps(&content);
    if removed > 0 {
        std::fs::write(path, cleaned)
            .with_context(|| format!("Failed to write file: {:?}", path))?;
    }

    Ok(removed)
}

/// Remove timestamp lines from every file directly inside `dir`
pub fn clean_directory(dir: &Path) -> Result<CleanResult> {
    let mut result = CleanResult::default();

    for path in list_files(dir)? {
        let removed = clean_file(&path)?;
        debug!("{:?}: {} timestamp lines removed", path, removed);

        result.files_visited += 1;
        result.lines_removed += removed;
        if removed > 0 {
            result.files_changed += 1;
        }
    }

    info!(
        "Cleaned {} files ({} changed, {} lines removed)",
        result.files_visited, result.files_changed, result.lines_removed
    );

    Ok(result)
}
