// components/track_downloader/src/resolver.rs
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::utils::{created_time, is_audio_file, is_temp_artifact, sanitize_title};

const RENAME_ATTEMPTS: u32 = 3;
const RENAME_DELAY: Duration = Duration::from_millis(500);

/// Locate the file a just-finished download produced.
///
/// yt-dlp's final filename is not reliably predictable from the requested
/// stem (template substitution, codec negotiation), so resolution is an
/// ordered chain of heuristics; the first strategy yielding a path wins:
///
/// 1. audio file whose stem contains the sanitized title
/// 2. newest temp artifact, rescued by renaming it to `.m4a`
/// 3. newest audio file of any name
///
/// `None` means the download may have succeeded while the file could not be
/// located; that is a distinct outcome, not an error.
pub async fn resolve(dir: &Path, title: &str) -> Option<PathBuf> {
    let stem = sanitize_title(title);

    if let Some(path) = match_by_stem(dir, &stem) {
        return Some(path);
    }
    if let Some(path) = rescue_temp_artifact(dir).await {
        return Some(path);
    }
    newest_audio_file(dir)
}

/// First audio file whose stem contains the sanitized title,
/// case-insensitively. Returned in directory-enumeration order; with several
/// candidates the pick is non-deterministic, which is acceptable since
/// collisions are rare in practice.
fn match_by_stem(dir: &Path, stem: &str) -> Option<PathBuf> {
    let stem_lower = stem.to_lowercase();

    for entry in dir.read_dir().ok()?.flatten() {
        let path = entry.path();
        if !path.is_file() || !is_audio_file(&path) {
            continue;
        }
        let Some(file_stem) = path.file_stem().and_then(|s| s.to_str()) else {
            continue;
        };
        if file_stem.to_lowercase().contains(&stem_lower) {
            return Some(path);
        }
    }

    None
}

/// Rescue the newest temp artifact by renaming its extension to `.m4a`.
///
/// If the target already exists a previous rescue produced it; the temp file
/// is a duplicate and gets deleted. A rename that keeps failing after the
/// retry loop leaves the temp file in place and returns it as-is.
async fn rescue_temp_artifact(dir: &Path) -> Option<PathBuf> {
    let newest = dir
        .read_dir()
        .ok()?
        .flatten()
        .map(|entry| entry.path())
        .filter(|path| path.is_file() && is_temp_artifact(path))
        .max_by_key(|path| created_time(path))?;

    let target = newest.with_extension("m4a");
    if target.exists() {
        if let Err(error) = std::fs::remove_file(&newest) {
            tracing::warn!(file = %newest.display(), %error, "could not remove duplicate temp artifact");
        } else {
            tracing::debug!(file = %newest.display(), "removed duplicate temp artifact");
        }
        return Some(target);
    }

    Some(
        rename_with_retry(&newest, &target, RENAME_ATTEMPTS, RENAME_DELAY, |from, to| {
            std::fs::rename(from, to)
        })
        .await,
    )
}

/// Rename with a fixed-delay retry loop, for files still locked by the
/// extractor. On exhaustion the original path is returned so the caller
/// still gets a usable file.
async fn rename_with_retry<F>(
    from: &Path,
    to: &Path,
    attempts: u32,
    delay: Duration,
    mut rename: F,
) -> PathBuf
where
    F: FnMut(&Path, &Path) -> std::io::Result<()>,
{
    for attempt in 1..=attempts {
        match rename(from, to) {
            Ok(()) => {
                tracing::debug!(file = %to.display(), "renamed temp artifact");
                return to.to_path_buf();
            }
            Err(error) if attempt < attempts => {
                tracing::warn!(attempt, %error, "rename failed, retrying");
                tokio::time::sleep(delay).await;
            }
            Err(error) => {
                tracing::warn!(attempt, %error, "rename attempts exhausted, keeping temp artifact as-is");
            }
        }
    }

    from.to_path_buf()
}

/// Most recently created audio file, whatever its name.
fn newest_audio_file(dir: &Path) -> Option<PathBuf> {
    dir.read_dir()
        .ok()?
        .flatten()
        .map(|entry| entry.path())
        .filter(|path| path.is_file() && is_audio_file(path))
        .max_by_key(|path| created_time(path))
}
