// bases/download_cli/src/args.rs
use clap::Parser;
use std::path::PathBuf;

/// Download a single audio track and report the result as JSON
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// URL to download from
    ///
    /// Optional at the clap level so that a missing argument can be reported
    /// as a JSON failure object instead of clap usage text.
    pub url: Option<String>,

    /// Directory to store downloaded files
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,
}

impl Args {
    /// Effective output directory: the override or the per-user default.
    pub fn download_dir(&self) -> PathBuf {
        self.output_dir.clone().unwrap_or_else(default_download_dir)
    }
}

/// `<documents>/TrackDownloader/Music`, falling back to the current
/// directory when no documents folder is known.
fn default_download_dir() -> PathBuf {
    dirs::document_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("TrackDownloader")
        .join("Music")
}
