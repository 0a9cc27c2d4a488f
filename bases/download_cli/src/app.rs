// bases/download_cli/src/app.rs
use track_downloader::{is_supported_url, DownloadError, TrackDownloader};

use crate::args::Args;
use crate::report::DownloadReport;

pub struct App {
    args: Args,
}

impl App {
    pub fn new(args: Args) -> Self {
        Self { args }
    }

    /// Run one download and emit exactly one JSON report.
    ///
    /// Returns the process exit code. Code 1 is reserved for input errors
    /// (missing or unsupported URL); a failed download is a normal,
    /// reportable outcome and exits 0 with the failure JSON.
    pub async fn run(&self) -> i32 {
        let Some(url) = self.args.url.as_deref() else {
            DownloadReport::failure("No URL provided").emit();
            return 1;
        };

        if !is_supported_url(url) {
            DownloadReport::failure("Invalid URL").emit();
            return 1;
        }

        self.report_for(url).await.emit();
        0
    }

    async fn report_for(&self, url: &str) -> DownloadReport {
        match self.download(url).await {
            Ok(report) => report,
            Err(error) => failure_report(&error),
        }
    }

    async fn download(&self, url: &str) -> Result<DownloadReport, DownloadError> {
        let downloader = TrackDownloader::new(self.args.download_dir()).await?;
        let track = downloader.download(url).await?;
        Ok(DownloadReport::success(&track, url))
    }
}

/// Map a download error onto its reportable failure message. The
/// file-not-found case is kept distinct from a failed download.
fn failure_report(error: &DownloadError) -> DownloadReport {
    match error {
        DownloadError::FileNotFound => {
            DownloadReport::failure("Download completed but file not found")
        }
        error => DownloadReport::failure(format!("Download failed: {error}")),
    }
}
