// components/track_downloader/src/lib.rs
mod cleanup;
mod options;
mod resolver;
mod types;
mod utils;
mod validation;
mod ytdlp;

use std::path::{Path, PathBuf};
use std::sync::Arc;

pub use options::DownloadOptions;
pub use types::{DownloadError, TrackMetadata};
pub use validation::is_supported_url;
pub use ytdlp::{Downloader, YtDlp};

use utils::sanitize_title;

/// A finished download: where the file ended up plus the probed metadata.
#[derive(Debug, Clone)]
pub struct DownloadedTrack {
    pub path: PathBuf,
    pub metadata: TrackMetadata,
}

pub struct TrackDownloader {
    download_dir: PathBuf,
    downloader: Arc<dyn Downloader + Send + Sync>,
}

impl TrackDownloader {
    /// Create a new TrackDownloader that will store files in the given
    /// directory, creating it (and its parents) if needed.
    pub async fn new(download_dir: impl AsRef<Path>) -> Result<Self, DownloadError> {
        Self::new_with_downloader(download_dir, Arc::new(YtDlp)).await
    }

    /// Create a new TrackDownloader with a specific downloader implementation.
    pub async fn new_with_downloader(
        download_dir: impl AsRef<Path>,
        downloader: Arc<dyn Downloader + Send + Sync>,
    ) -> Result<Self, DownloadError> {
        downloader.check_available().await?;

        let download_dir = download_dir.as_ref().to_owned();
        tokio::fs::create_dir_all(&download_dir).await?;

        Ok(Self {
            download_dir,
            downloader,
        })
    }

    /// Download one track, returning its resolved path and metadata.
    ///
    /// The transcoding bundle is tried first; any failure there is recovered
    /// by retrying exactly once with the direct best-audio bundle. A failure
    /// of the fallback propagates. After the pipeline finishes the resolver
    /// locates the file on disk, since the extractor's final filename is not
    /// predictable from the requested stem alone.
    pub async fn download(&self, url: &str) -> Result<DownloadedTrack, DownloadError> {
        if !is_supported_url(url) {
            return Err(DownloadError::InvalidUrl(url.to_string()));
        }

        // Stale artifacts from a crashed run would confuse the resolver.
        cleanup::remove_temp_artifacts(&self.download_dir).await;

        let metadata = self.downloader.probe(url).await?;
        let stem = sanitize_title(&metadata.title);

        let transcode = DownloadOptions::transcode(&self.download_dir, &stem);
        if let Err(error) = self.downloader.download(url, &transcode).await {
            tracing::warn!(%error, "transcode failed, retrying with direct audio download");
            let direct = DownloadOptions::direct_audio(&self.download_dir, &stem);
            self.downloader.download(url, &direct).await?;
        }

        let path = resolver::resolve(&self.download_dir, &metadata.title)
            .await
            .ok_or(DownloadError::FileNotFound)?;

        Ok(DownloadedTrack { path, metadata })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use tempfile::TempDir;
    use ytdlp::stub::DownloaderStub;

    const URL: &str = "https://soundcloud.com/artist/track";

    #[tokio::test]
    async fn creates_download_directory_with_parents() {
        let dir = TempDir::new().unwrap();
        let nested = dir.path().join("a").join("b");

        let downloader =
            TrackDownloader::new_with_downloader(&nested, Arc::new(DownloaderStub::new("x"))).await;

        assert!(downloader.is_ok());
        assert!(nested.is_dir());
    }

    #[tokio::test]
    async fn downloads_and_resolves_sanitized_filename() {
        let dir = TempDir::new().unwrap();
        let stub = DownloaderStub::new("My Song!").producing(dir.path().join("My Song.m4a"));
        let downloader = TrackDownloader::new_with_downloader(dir.path(), Arc::new(stub))
            .await
            .unwrap();

        let track = downloader.download(URL).await.unwrap();

        assert_eq!(track.path, dir.path().join("My Song.m4a"));
        assert_eq!(track.metadata.title, "My Song!");
        assert_eq!(track.metadata.artist, "Stub Artist");
    }

    #[tokio::test]
    async fn rejects_unsupported_url_before_probing() {
        let dir = TempDir::new().unwrap();
        let stub = Arc::new(DownloaderStub::new("x"));
        let downloader = TrackDownloader::new_with_downloader(dir.path(), stub.clone())
            .await
            .unwrap();

        let result = downloader.download("https://example.com/track").await;

        assert_matches!(result, Err(DownloadError::InvalidUrl(_)));
        assert!(stub.calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn transcode_failure_falls_back_to_direct_audio_once() {
        let dir = TempDir::new().unwrap();
        let stub = Arc::new(
            DownloaderStub::new("My Song")
                .producing(dir.path().join("My Song.m4a"))
                .failing_transcode(),
        );
        let downloader = TrackDownloader::new_with_downloader(dir.path(), stub.clone())
            .await
            .unwrap();

        let track = downloader.download(URL).await.unwrap();
        assert_eq!(track.path, dir.path().join("My Song.m4a"));

        let calls = stub.calls.lock().unwrap();
        assert_eq!(calls.len(), 2);
        assert_matches!(calls[0], DownloadOptions::Transcode { .. });
        assert_matches!(calls[1], DownloadOptions::DirectAudio { .. });
    }

    #[tokio::test]
    async fn fallback_failure_propagates() {
        let dir = TempDir::new().unwrap();
        let stub = Arc::new(DownloaderStub::new("My Song").failing_everything());
        let downloader = TrackDownloader::new_with_downloader(dir.path(), stub.clone())
            .await
            .unwrap();

        let result = downloader.download(URL).await;

        assert_matches!(result, Err(DownloadError::DownloadFailed(_)));
        assert_eq!(stub.calls.lock().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn successful_download_without_a_file_is_file_not_found() {
        let dir = TempDir::new().unwrap();
        let stub = DownloaderStub::new("My Song");
        let downloader = TrackDownloader::new_with_downloader(dir.path(), Arc::new(stub))
            .await
            .unwrap();

        let result = downloader.download(URL).await;

        assert_matches!(result, Err(DownloadError::FileNotFound));
    }

    #[tokio::test]
    async fn stale_temp_artifacts_are_cleaned_before_download() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("stale.temp.part"), b"x").unwrap();

        let stub = DownloaderStub::new("My Song").producing(dir.path().join("My Song.m4a"));
        let downloader = TrackDownloader::new_with_downloader(dir.path(), Arc::new(stub))
            .await
            .unwrap();

        let track = downloader.download(URL).await.unwrap();

        assert_eq!(track.path, dir.path().join("My Song.m4a"));
        assert!(!dir.path().join("stale.temp.part").exists());
    }
}
