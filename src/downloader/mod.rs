//! Downloader module containing the batch engine, its builder and its
//! configuration.
//!
//! # Overview
//!
//! - `downloader` - [`Downloader`], the batch entry point
//! - `builder` - [`DownloaderBuilder`] for flexible configuration
//! - `config` - [`DownloadConfig`], [`ProbeFailurePolicy`] and callback types
//! - `collector` - [`BatchReport`] and the per-batch result aggregation
//! - `orchestrator` - the per-file download pipeline
//!
//! # Examples
//!
//! ```rust,no_run
//! use chunkfetch::downloader::DownloaderBuilder;
//! use chunkfetch::download::Status;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let downloader = DownloaderBuilder::hidden()
//!     .parts(2)
//!     .max_concurrency(5)
//!     .on_complete(|summary| {
//!         if let Status::Fail(msg) = summary.status() {
//!             eprintln!("{} failed: {}", summary.url(), msg);
//!         }
//!     })
//!     .build();
//!
//! let report = downloader.download(&["https://example.com/file.zip"]).await;
//! println!("{:?}", report.paths());
//! # Ok(())
//! # }
//! ```

pub mod builder;
pub mod collector;
pub mod config;
pub mod downloader;
mod orchestrator;

pub use builder::DownloaderBuilder;
pub use collector::BatchReport;
pub use config::{DownloadCallback, DownloadConfig, ProbeFailurePolicy};
pub use downloader::Downloader;
