use std::path::{Path, PathBuf};

use tracing::{debug, instrument, warn};
use walkdir::WalkDir;

use crate::errors::RewriteResult;
use crate::util::path::{ensure_dir_exists, PathExt};

/// Collects all `.html` files under `root`, recursively.
///
/// Visitation order is lexicographic per directory so that logs and
/// summaries are reproducible across runs. Entries that cannot be read
/// (e.g. permission denied entering a subdirectory) are logged and skipped.
#[instrument(level = "debug")]
pub fn html_files(root: &Path) -> RewriteResult<Vec<PathBuf>> {
    ensure_dir_exists(root)?;

    let mut files = Vec::new();
    for entry in WalkDir::new(root).sort_by_file_name() {
        match entry {
            Ok(entry) => {
                if entry.file_type().is_file() && entry.path().is_html_file() {
                    files.push(entry.into_path());
                }
            }
            Err(e) => warn!("Skipping unreadable entry: {}", e),
        }
    }
    debug!("Found {} html files under {:?}", files.len(), root);
    Ok(files)
}
