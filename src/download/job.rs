//! The unit of work of a batch.
//!
//! A [`DownloadJob`] is created from each URL handed to the downloader. Its
//! file name is the last segment of the URL path, and its content length is
//! filled in once the server has been probed.
//!
//! # Examples
//!
//! ```rust
//! use chunkfetch::download::DownloadJob;
//! use std::convert::TryFrom;
//!
//! let job = DownloadJob::try_from("https://example.com/releases/file-0.1.2.zip")?;
//! assert_eq!(job.filename, "file-0.1.2.zip");
//! assert_eq!(job.content_length, 0);
//!
//! let job = job.with_content_length(1024);
//! assert_eq!(job.content_length, 1024);
//! # Ok::<(), chunkfetch::Error>(())
//! ```

use crate::error::Error;

use reqwest::Url;
use std::convert::TryFrom;
use std::path::{Path, PathBuf};

/// Represents a file to be downloaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadJob {
    /// URL of the file to download.
    pub url: Url,
    /// File name used to save the file on disk.
    pub filename: String,
    /// Size reported by the server, `0` if it did not report one.
    pub content_length: u64,
}

impl DownloadJob {
    /// Creates a new [`DownloadJob`] with an explicit file name.
    ///
    /// When using [`DownloadJob::try_from`], the file name is extracted from
    /// the URL instead.
    pub fn new(url: &Url, filename: &str) -> Self {
        Self {
            url: url.clone(),
            filename: String::from(filename),
            content_length: 0,
        }
    }

    /// Records the probed content length.
    pub fn with_content_length(self, content_length: u64) -> Self {
        Self {
            content_length,
            ..self
        }
    }

    /// Where the job's output lands inside `directory`.
    pub fn output_path(&self, directory: &Path) -> PathBuf {
        directory.join(&self.filename)
    }
}

impl TryFrom<&Url> for DownloadJob {
    type Error = crate::error::Error;

    fn try_from(value: &Url) -> Result<Self, Self::Error> {
        let segment = value
            .path_segments()
            .ok_or_else(|| {
                Error::InvalidUrl(format!(
                    "The url \"{}\" does not contain a valid path",
                    value
                ))
            })?
            .next_back()
            .filter(|segment| !segment.is_empty())
            .ok_or_else(|| {
                Error::InvalidUrl(format!("The url \"{}\" does not contain a filename", value))
            })?;

        let filename: String = form_urlencoded::parse(segment.as_bytes())
            .map(|(key, val)| [key, val].concat())
            .collect();

        // The decoded name must stay a single path component.
        if filename.contains(['/', '\\']) || filename == "." || filename == ".." {
            return Err(Error::InvalidUrl(format!(
                "The url \"{}\" does not contain a usable filename",
                value
            )));
        }

        Ok(DownloadJob::new(value, &filename))
    }
}

impl TryFrom<&str> for DownloadJob {
    type Error = crate::error::Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Url::parse(value)
            .map_err(|e| {
                Error::InvalidUrl(format!("The url \"{}\" cannot be parsed: {}", value, e))
            })
            .and_then(|u| DownloadJob::try_from(&u))
    }
}
