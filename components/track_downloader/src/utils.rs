// components/track_downloader/src/utils.rs
use std::path::Path;
use std::time::SystemTime;

/// Extensions the resolver treats as finished audio output.
pub const AUDIO_EXTENSIONS: &[&str] = &["mp3", "m4a", "webm", "ogg", "wav"];

/// Placeholder stem used when a title sanitizes down to nothing.
pub const FALLBACK_STEM: &str = "Downloaded_Track";

/// Derive a filename-safe stem from a track title.
///
/// Keeps alphanumerics, spaces, hyphens and underscores and trims surrounding
/// whitespace. The same derivation runs when the output template is built and
/// again when the resolver looks the file up, so the two always agree.
pub fn sanitize_title(title: &str) -> String {
    let cleaned: String = title
        .chars()
        .filter(|c| c.is_alphanumeric() || matches!(c, ' ' | '-' | '_'))
        .collect();
    let cleaned = cleaned.trim();

    if cleaned.is_empty() {
        FALLBACK_STEM.to_string()
    } else {
        cleaned.to_string()
    }
}

/// Check for the `<stem>.temp.<ext>` double-extension convention used for
/// partially written downloads.
pub fn is_temp_artifact(path: &Path) -> bool {
    let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
        return false;
    };

    match name.find(".temp.") {
        Some(index) => index > 0 && index + ".temp.".len() < name.len(),
        None => false,
    }
}

/// Check whether a path carries one of the recognized audio extensions.
pub fn is_audio_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            let ext = ext.to_lowercase();
            AUDIO_EXTENSIONS.iter().any(|known| *known == ext)
        })
        .unwrap_or(false)
}

/// Creation time of a file, falling back to the modification time on
/// filesystems that do not record creation.
pub fn created_time(path: &Path) -> Option<SystemTime> {
    let metadata = std::fs::metadata(path).ok()?;
    metadata.created().or_else(|_| metadata.modified()).ok()
}
