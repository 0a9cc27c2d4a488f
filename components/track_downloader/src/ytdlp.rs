// components/track_downloader/src/ytdlp.rs
use async_trait::async_trait;
use serde::Deserialize;
use tokio::process::Command;

use crate::options::DownloadOptions;
use crate::types::{DownloadError, TrackMetadata};

/// Seam between the orchestration logic and the external extraction service.
#[async_trait]
pub trait Downloader {
    /// Check that the external tool is installed.
    async fn check_available(&self) -> Result<(), DownloadError>;

    /// Fetch track metadata without downloading anything.
    async fn probe(&self, url: &str) -> Result<TrackMetadata, DownloadError>;

    /// Run one download described by the option bundle.
    async fn download(&self, url: &str, options: &DownloadOptions) -> Result<(), DownloadError>;
}

/// The real thing: shells out to `yt-dlp`.
pub struct YtDlp;

#[async_trait]
impl Downloader for YtDlp {
    async fn check_available(&self) -> Result<(), DownloadError> {
        which::which("yt-dlp")
            .map(|_| ())
            .map_err(|_| DownloadError::DependencyNotFound("yt-dlp"))
    }

    async fn probe(&self, url: &str) -> Result<TrackMetadata, DownloadError> {
        let output = Command::new("yt-dlp")
            .arg("--dump-json")
            .arg("--no-download")
            .arg("--no-playlist")
            .arg(url)
            .output()
            .await?;

        if !output.status.success() {
            return Err(DownloadError::ProbeFailed(
                String::from_utf8_lossy(&output.stderr).into_owned(),
            ));
        }

        let probe: ProbeOutput = serde_json::from_slice(&output.stdout)
            .map_err(|e| DownloadError::ProbeFailed(e.to_string()))?;

        Ok(probe.into())
    }

    async fn download(&self, url: &str, options: &DownloadOptions) -> Result<(), DownloadError> {
        tracing::debug!(%url, ?options, "invoking yt-dlp");

        let output = Command::new("yt-dlp")
            .args(options.to_args())
            .arg(url)
            .output()
            .await?;

        if !output.status.success() {
            return Err(DownloadError::DownloadFailed(
                String::from_utf8_lossy(&output.stderr).into_owned(),
            ));
        }

        Ok(())
    }
}

/// Fields we keep from the yt-dlp info dict.
#[derive(Debug, Deserialize)]
struct ProbeOutput {
    title: Option<String>,
    uploader: Option<String>,
    album: Option<String>,
    duration: Option<f64>,
}

impl From<ProbeOutput> for TrackMetadata {
    fn from(probe: ProbeOutput) -> Self {
        Self {
            title: probe.title.unwrap_or_else(|| "Unknown".to_string()),
            artist: probe.uploader.unwrap_or_else(|| "Unknown Artist".to_string()),
            album: probe.album.unwrap_or_else(|| "Unknown Album".to_string()),
            duration: probe.duration.unwrap_or(0.0),
        }
    }
}
