//! Best-effort removal of the transient files

use std::fs;
use std::path::Path;

use tracing::debug;

/// Delete every path, swallowing errors
///
/// Returns how many files were actually removed.
pub fn remove_files(paths: &[&Path]) -> usize {
    let mut removed = 0;
    for path in paths {
        match fs::remove_file(path) {
            Ok(()) => {
                debug!(path = %path.display(), "Removed temp file");
                removed += 1;
            }
            Err(e) => {
                debug!(path = %path.display(), error = %e, "Temp file not removed");
            }
        }
    }
    removed
}
