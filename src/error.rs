//! Error handling for the chunkfetch library.
//!
//! This module provides centralized error handling for every stage of a
//! batch: URL parsing, probing, destination checks, range fetching and chunk
//! combination. All errors implement the standard Error trait and keep their
//! underlying cause reachable through [`std::error::Error::source`].

use reqwest::StatusCode;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can happen when using chunkfetch.
#[derive(Error, Debug)]
pub enum Error {
    /// Error from an underlying system.
    ///
    /// Captures failures that don't fit into other categories, such as a
    /// worker task that panicked.
    #[error("Internal error: {0}")]
    Internal(String),

    /// Error from the underlying URL parser or the expected URL format.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// I/O Error.
    #[error("I/O error")]
    IOError {
        #[from]
        source: io::Error,
    },

    /// Error from the Reqwest library.
    #[error("Reqwest Error")]
    Reqwest {
        #[from]
        source: reqwest::Error,
    },

    /// The HEAD request used to size a download failed.
    #[error("Failed to probe \"{url}\"")]
    Probe {
        url: String,
        #[source]
        source: ProbeFailure,
    },

    /// The output file is already present on disk.
    #[error("Destination already exists: {}", .0.display())]
    DestinationExists(PathBuf),

    /// A single part of a download could not be fetched.
    #[error("Failed to fetch part {index} of \"{url}\"")]
    Fetch {
        url: String,
        index: usize,
        #[source]
        source: FetchFailure,
    },

    /// The downloaded parts could not be assembled into the output file.
    #[error("Failed to combine chunks into {}", .path.display())]
    Combine {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The work was abandoned because another part of the batch failed.
    #[error("Download cancelled")]
    Cancelled,
}

impl Error {
    /// Returns `true` if this error only reports a cancellation.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Error::Cancelled)
    }
}

/// Reasons a content-length probe can fail.
#[derive(Error, Debug)]
pub enum ProbeFailure {
    #[error("transport error")]
    Transport(#[source] reqwest_middleware::Error),

    #[error("unexpected status {0}")]
    Status(StatusCode),

    #[error("malformed Content-Length {0:?}")]
    MalformedLength(String),
}

/// Reasons a range fetch can fail.
#[derive(Error, Debug)]
pub enum FetchFailure {
    #[error("transport error")]
    Transport(#[source] reqwest_middleware::Error),

    #[error("unexpected status {0}")]
    Status(StatusCode),

    #[error("error while reading the response body")]
    Body(#[source] reqwest::Error),

    #[error("error while writing the chunk file")]
    Write(#[source] io::Error),

    #[error("expected {expected} bytes, received {received}")]
    Length { expected: u64, received: u64 },
}

/// Result type alias for operations that can fail with a chunkfetch error.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_destination_exists_message() {
        let err = Error::DestinationExists(PathBuf::from("/tmp/file.zip"));
        assert_eq!(err.to_string(), "Destination already exists: /tmp/file.zip");
    }

    #[test]
    fn test_fetch_error_keeps_cause() {
        let err = Error::Fetch {
            url: "http://example.com/file.zip".into(),
            index: 2,
            source: FetchFailure::Status(StatusCode::NOT_FOUND),
        };
        assert_eq!(
            err.to_string(),
            "Failed to fetch part 2 of \"http://example.com/file.zip\""
        );
        let cause = err.source().expect("fetch errors carry a cause");
        assert_eq!(cause.to_string(), "unexpected status 404 Not Found");
    }

    #[test]
    fn test_probe_malformed_length_message() {
        let failure = ProbeFailure::MalformedLength("abc".into());
        assert_eq!(failure.to_string(), "malformed Content-Length \"abc\"");
    }

    #[test]
    fn test_is_cancelled() {
        assert!(Error::Cancelled.is_cancelled());
        assert!(!Error::Internal("boom".into()).is_cancelled());
    }
}
