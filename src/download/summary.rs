//! Per-job outcome reporting.
//!
//! Every URL of a batch produces one [`Summary`], whether its download
//! succeeded or not, so callers can tell which URLs failed.
//!
//! # Examples
//!
//! ```rust
//! use chunkfetch::download::{Status, Summary};
//! use std::path::PathBuf;
//!
//! let summary = Summary::new("https://example.com/file.zip", "file.zip")
//!     .succeed(PathBuf::from("downloads/file.zip"), 2048);
//!
//! assert_eq!(summary.status(), &Status::Success);
//! assert_eq!(summary.size(), 2048);
//! ```

use std::path::{Path, PathBuf};

/// Download status enumeration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Status {
    /// Download failed with error message
    Fail(String),
    /// Download not yet started
    NotStarted,
    /// Download completed successfully
    Success,
    /// Download abandoned because another part of the batch failed
    Cancelled,
}

/// Represents the outcome of one URL of a batch.
#[derive(Debug, Clone)]
pub struct Summary {
    /// Requested URL.
    url: String,
    /// File name derived from the URL, empty if it could not be derived.
    filename: String,
    /// Final output path, set on success.
    path: Option<PathBuf>,
    /// Bytes written to the output file.
    size: u64,
    /// Status.
    status: Status,
}

impl Summary {
    /// Create a new [`Summary`] for a job that has not run yet.
    pub fn new(url: impl Into<String>, filename: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            filename: filename.into(),
            path: None,
            size: 0,
            status: Status::NotStarted,
        }
    }

    /// Attach a status to a [`Summary`].
    pub fn with_status(self, status: Status) -> Self {
        Self { status, ..self }
    }

    /// Mark the summary as successful.
    pub fn succeed(self, path: PathBuf, size: u64) -> Self {
        Self {
            path: Some(path),
            size,
            status: Status::Success,
            ..self
        }
    }

    /// Mark the summary as failed with a message.
    pub fn fail(self, msg: impl std::fmt::Display) -> Self {
        Self {
            status: Status::Fail(format!("{}", msg)),
            ..self
        }
    }

    /// Get the requested URL.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Get the file name.
    pub fn filename(&self) -> &str {
        &self.filename
    }

    /// Get the output path, if the download succeeded.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Get the summary's size.
    pub fn size(&self) -> u64 {
        self.size
    }

    /// Get a reference to the summary's status.
    pub fn status(&self) -> &Status {
        &self.status
    }

    /// Returns `true` if the download succeeded.
    pub fn is_success(&self) -> bool {
        self.status == Status::Success
    }
}
