//! Batch entry point.
//!
//! # Examples
//!
//! ```rust,no_run
//! use chunkfetch::downloader::DownloaderBuilder;
//! use std::path::PathBuf;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let downloader = DownloaderBuilder::new()
//!     .directory(PathBuf::from("./downloads"))
//!     .parts(4)
//!     .max_concurrency(5)
//!     .build();
//!
//! let report = downloader
//!     .download(&[
//!         "https://example.com/file1.zip",
//!         "https://example.com/file2.pdf",
//!     ])
//!     .await;
//!
//! for summary in report.summaries() {
//!     println!("{} - {:?}", summary.url(), summary.status());
//! }
//! let paths = report.into_result()?;
//! # Ok(())
//! # }
//! ```

use super::collector::{BatchCollector, BatchReport};
use super::config::{DownloadConfig, ProbeFailurePolicy};
use super::orchestrator::{run_and_record, BatchContext};
use crate::http::{create_http_client, HttpClientConfig};
use crate::limiter::ConcurrencyLimiter;
use crate::progress::ProgressDisplay;

use reqwest::header::HeaderMap;
use std::fmt;
use std::fmt::Debug;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

/// Represents the download controller.
///
/// A downloader only holds its configuration, so it can be cloned and used
/// for several batches, concurrently or not. A downloader can be created via
/// its builder:
///
/// ```rust
/// # fn main()  {
/// use chunkfetch::downloader::DownloaderBuilder;
///
/// let d = DownloaderBuilder::new().build();
/// # }
/// ```
#[derive(Clone)]
pub struct Downloader {
    config: DownloadConfig,
}

impl Debug for Downloader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Downloader")
            .field("config", &self.config)
            .finish()
    }
}

impl Downloader {
    /// Creates a new Downloader with the given configuration.
    pub fn new(config: DownloadConfig) -> Self {
        Self { config }
    }

    /// Gets the directory where files will be downloaded.
    pub fn directory(&self) -> &PathBuf {
        &self.config.directory
    }

    /// Gets the number of parts large files are split into.
    pub fn parts(&self) -> usize {
        self.config.parts
    }

    /// Gets the cap on in-flight fetches.
    pub fn max_concurrency(&self) -> usize {
        self.config.max_concurrency
    }

    /// Gets the size at or below which files are not split.
    pub fn split_threshold(&self) -> u64 {
        self.config.split_threshold
    }

    /// Gets the directory holding the temporary part files.
    pub fn temp_dir(&self) -> &PathBuf {
        &self.config.temp_dir
    }

    /// Gets the reaction to a failed size probe.
    pub fn probe_failure(&self) -> ProbeFailurePolicy {
        self.config.probe_failure
    }

    /// Gets the custom headers.
    pub fn headers(&self) -> Option<&HeaderMap> {
        self.config.headers.as_ref()
    }

    /// Downloads every URL into the configured directory.
    ///
    /// All the files are downloaded concurrently; their range fetches share
    /// one concurrency cap. The call returns once every download has ended.
    pub async fn download<S: AsRef<str>>(&self, urls: &[S]) -> BatchReport {
        let collector = BatchCollector::new(urls, self.config.on_complete.clone());

        let client = match create_http_client(HttpClientConfig {
            proxy: self.config.proxy.clone(),
            headers: self.config.headers.clone(),
        }) {
            Ok(client) => client,
            Err(e) => {
                warn!("Failed to build the HTTP client: {}", e);
                collector.abort(e.into());
                return collector.take_report();
            }
        };

        let ctx = Arc::new(BatchContext {
            client,
            config: self.config.clone(),
            limiter: ConcurrencyLimiter::new(self.config.max_concurrency),
            progress: ProgressDisplay::new(self.config.style_options.clone(), urls.len()),
            collector,
            cancel: CancellationToken::new(),
        });

        info!(
            "Starting {} download(s), {} part(s) each, at most {} concurrent fetch(es)",
            urls.len(),
            self.config.parts,
            self.config.max_concurrency
        );
        let mut jobs = JoinSet::new();
        for (index, url) in urls.iter().enumerate() {
            jobs.spawn(run_and_record(ctx.clone(), index, url.as_ref().to_string()));
        }
        while let Some(joined) = jobs.join_next().await {
            if let Err(e) = joined {
                warn!("Download task ended abnormally: {}", e);
            }
        }

        ctx.progress.finish();
        ctx.collector.take_report()
    }
}
