//! Chunkfetch is a crate aiming at downloading batches of files over
//! HTTP(S), splitting large files into byte ranges fetched concurrently.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use std::path::PathBuf;
//! use chunkfetch::{downloader::DownloaderBuilder, Error};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Error> {
//! let reqwest_rs = "https://github.com/seanmonstar/reqwest/archive/refs/tags/v0.11.9.zip";
//! let downloader = DownloaderBuilder::new()
//!     .directory(PathBuf::from("output"))
//!     .parts(4)
//!     .max_concurrency(8)
//!     .build();
//! let paths = downloader.download(&[reqwest_rs]).await.into_result()?;
//! println!("{:?}", paths);
//! # Ok(())
//! # }
//! ```
//!
//! # Module Organization
//!
//! The chunkfetch crate is organized into several modules:
//!
//! - [`chunk`] - Byte-range planning and the reassembly of temporary parts
//! - [`download`] - The per-URL data model: `DownloadJob`, `Summary` and `Status`
//! - [`downloader`] - The main `Downloader` and `DownloaderBuilder` for orchestrating batches
//! - [`error`] - Centralized error handling with the `Error` enum
//! - [`http`] - HTTP client, size probe and range fetches
//! - [`limiter`] - The batch-wide cap on in-flight fetches
//! - [`progress`] - Progress bar styling and display management
//! - [`utils`] - Shared utility functions

pub mod chunk;
pub mod download;
pub mod downloader;
pub mod error;
pub mod http;
pub mod limiter;
pub mod progress;
pub mod utils;

pub use chunk::{ByteRange, ChunkPlanner, DEFAULT_SPLIT_THRESHOLD};
pub use download::{DownloadJob, Status, Summary};
pub use downloader::{BatchReport, Downloader, DownloaderBuilder, ProbeFailurePolicy};
pub use error::{Error, FetchFailure, ProbeFailure, Result};
pub use http::{create_http_client, HttpClientConfig};
pub use limiter::ConcurrencyLimiter;
pub use progress::{ProgressBarOpts, StyleOptions};
pub use utils::parse_content_length;
