// components/track_downloader/src/options.rs
use std::path::Path;

/// Format selector for the transcoding bundle.
pub const TRANSCODE_FORMAT: &str = "bestaudio[ext=m4a]/bestaudio/best";

/// Format selector for the direct fallback: best audio stream as-is.
pub const DIRECT_FORMAT: &str = "bestaudio[ext=m4a]/bestaudio";

const RETRIES: u32 = 3;

/// One yt-dlp invocation, fully described.
///
/// Two explicit variants instead of one mutated option table: `Transcode`
/// extracts the audio and re-encodes it to mp3, `DirectAudio` carries no
/// extraction or post-processing flags at all and serves as the fallback
/// when transcoding fails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DownloadOptions {
    Transcode { output_template: String },
    DirectAudio { output_template: String },
}

impl DownloadOptions {
    pub fn transcode(dir: &Path, stem: &str) -> Self {
        Self::Transcode {
            output_template: output_template(dir, stem),
        }
    }

    pub fn direct_audio(dir: &Path, stem: &str) -> Self {
        Self::DirectAudio {
            output_template: output_template(dir, stem),
        }
    }

    /// Render the yt-dlp argument vector for this bundle.
    pub fn to_args(&self) -> Vec<String> {
        let mut args: Vec<String> = Vec::new();

        match self {
            Self::Transcode { output_template } => {
                args.extend(
                    [
                        "-x",
                        "--audio-format",
                        "mp3",
                        "--audio-quality",
                        "192K",
                        "--format",
                        TRANSCODE_FORMAT,
                        "-o",
                        output_template.as_str(),
                    ]
                    .map(String::from),
                );
            }
            Self::DirectAudio { output_template } => {
                args.extend(
                    ["--format", DIRECT_FORMAT, "-o", output_template.as_str()].map(String::from),
                );
            }
        }

        args.extend(["--no-playlist".to_string(), "--retries".to_string()]);
        args.push(RETRIES.to_string());
        args.extend(["--quiet".to_string(), "--no-warnings".to_string()]);

        args
    }
}

/// `<dir>/<stem>.%(ext)s` — yt-dlp substitutes the negotiated extension.
fn output_template(dir: &Path, stem: &str) -> String {
    dir.join(format!("{stem}.%(ext)s"))
        .to_string_lossy()
        .into_owned()
}
