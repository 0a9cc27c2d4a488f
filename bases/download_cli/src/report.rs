// bases/download_cli/src/report.rs
use serde::Serialize;
use track_downloader::DownloadedTrack;

/// The single JSON object this tool prints to stdout.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum DownloadReport {
    Success {
        success: bool,
        file_path: String,
        filename: String,
        title: String,
        artist: String,
        album: String,
        duration: f64,
        url: String,
    },
    Failure {
        success: bool,
        error: String,
    },
}

impl DownloadReport {
    pub fn success(track: &DownloadedTrack, url: &str) -> Self {
        let filename = track
            .path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();

        Self::Success {
            success: true,
            file_path: track.path.to_string_lossy().into_owned(),
            filename,
            title: track.metadata.title.clone(),
            artist: track.metadata.artist.clone(),
            album: track.metadata.album.clone(),
            duration: track.metadata.duration,
            url: url.to_string(),
        }
    }

    pub fn failure(error: impl Into<String>) -> Self {
        Self::Failure {
            success: false,
            error: error.into(),
        }
    }

    /// Print the report to stdout.
    ///
    /// Diagnostics go to stderr via tracing, so stdout carries exactly this
    /// one object per invocation.
    pub fn emit(&self) {
        match serde_json::to_string(self) {
            Ok(json) => println!("{json}"),
            Err(error) => {
                tracing::error!(%error, "could not serialize report");
                println!(r#"{{"success": false, "error": "could not serialize result"}}"#);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use track_downloader::TrackMetadata;

    fn sample_track() -> DownloadedTrack {
        DownloadedTrack {
            path: PathBuf::from("/music/My Song.m4a"),
            metadata: TrackMetadata {
                title: "My Song!".to_string(),
                artist: "An Artist".to_string(),
                album: "An Album".to_string(),
                duration: 215.0,
            },
        }
    }

    #[test]
    fn success_report_has_the_full_field_set() {
        let report =
            DownloadReport::success(&sample_track(), "https://soundcloud.com/an-artist/my-song");
        let value: serde_json::Value = serde_json::to_value(&report).unwrap();

        assert_eq!(value["success"], true);
        assert_eq!(value["file_path"], "/music/My Song.m4a");
        assert_eq!(value["filename"], "My Song.m4a");
        assert_eq!(value["title"], "My Song!");
        assert_eq!(value["artist"], "An Artist");
        assert_eq!(value["album"], "An Album");
        assert_eq!(value["duration"], 215.0);
        assert_eq!(value["url"], "https://soundcloud.com/an-artist/my-song");
        assert_eq!(value.as_object().unwrap().len(), 8);
    }

    #[test]
    fn failure_report_is_success_false_plus_error() {
        let report = DownloadReport::failure("No URL provided");
        let json = serde_json::to_string(&report).unwrap();

        assert_eq!(json, r#"{"success":false,"error":"No URL provided"}"#);
    }
}
