// components/track_downloader/src/cleanup.rs
use std::path::Path;

use crate::utils::is_temp_artifact;

/// Delete stale `<stem>.temp.<ext>` artifacts left behind by interrupted
/// runs, so the resolver cannot mistake one for the current download.
///
/// Best effort: each deletion is attempted independently and failures are
/// logged, never escalated. Returns how many files were removed.
pub async fn remove_temp_artifacts(dir: &Path) -> usize {
    remove_temp_artifacts_with(dir, |path| std::fs::remove_file(path)).await
}

/// Deletion goes through the `remove` function so the failure path is
/// testable without real filesystem faults.
async fn remove_temp_artifacts_with<F>(dir: &Path, mut remove: F) -> usize
where
    F: FnMut(&Path) -> std::io::Result<()>,
{
    let mut entries = match tokio::fs::read_dir(dir).await {
        Ok(entries) => entries,
        Err(error) => {
            tracing::warn!(dir = %dir.display(), %error, "could not scan for temp artifacts");
            return 0;
        }
    };

    let mut removed = 0;
    while let Ok(Some(entry)) = entries.next_entry().await {
        let path = entry.path();
        if !path.is_file() || !is_temp_artifact(&path) {
            continue;
        }

        match remove(&path) {
            Ok(()) => {
                tracing::debug!(file = %path.display(), "removed temp artifact");
                removed += 1;
            }
            Err(error) => {
                tracing::warn!(file = %path.display(), %error, "could not remove temp artifact");
            }
        }
    }

    removed
}
