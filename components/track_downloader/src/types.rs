// components/track_downloader/src/types.rs
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DownloadError {
    #[error("required dependency not found: {0}")]
    DependencyNotFound(&'static str),

    #[error("unsupported URL: {0}")]
    InvalidUrl(String),

    #[error("metadata probe failed: {0}")]
    ProbeFailed(String),

    #[error("yt-dlp failed: {0}")]
    DownloadFailed(String),

    #[error("download completed but file not found")]
    FileNotFound,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Track metadata probed from the source before downloading.
///
/// Missing fields are substituted with presence defaults rather than
/// validated; the title additionally drives the output filename.
#[derive(Debug, Clone)]
pub struct TrackMetadata {
    pub title: String,
    pub artist: String,
    pub album: String,
    /// Duration in seconds
    pub duration: f64,
}
