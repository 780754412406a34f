//! Configuration structures and defaults for the downloader.
//!
//! [`DownloadConfig`] is the value consumed by a [`Downloader`]. It is
//! usually assembled through the [`DownloaderBuilder`] and never changes
//! while a batch runs.
//!
//! [`Downloader`]: super::Downloader
//! [`DownloaderBuilder`]: super::DownloaderBuilder
//!
//! # Examples
//!
//! ```rust
//! use chunkfetch::downloader::{DownloadCallback, ProbeFailurePolicy};
//! use chunkfetch::download::{Status, Summary};
//!
//! let callback: DownloadCallback = Box::new(|summary: &Summary| {
//!     match summary.status() {
//!         Status::Success => println!("✓ {}", summary.filename()),
//!         Status::Fail(msg) => println!("✗ {}: {}", summary.url(), msg),
//!         _ => {}
//!     }
//! });
//!
//! assert_eq!(ProbeFailurePolicy::default(), ProbeFailurePolicy::AbortBatch);
//! ```

use crate::chunk::DEFAULT_SPLIT_THRESHOLD;
use crate::download::Summary;
use crate::progress::StyleOptions;

use reqwest::header::HeaderMap;
use std::env::{current_dir, temp_dir};
use std::path::PathBuf;
use std::sync::Arc;

/// Callback type for download completion events
pub type DownloadCallback = Box<dyn Fn(&Summary) + Send + Sync>;

/// What a failed size probe does to the rest of the batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProbeFailurePolicy {
    /// Cancel every job of the batch.
    #[default]
    AbortBatch,
    /// Fail only the job whose probe failed.
    FailJob,
}

/// Configuration structure for the downloader
#[derive(Clone)]
pub struct DownloadConfig {
    /// Directory where to store the downloaded files.
    pub directory: PathBuf,
    /// Number of byte-range parts for files above the split threshold.
    pub parts: usize,
    /// Maximum number of HTTP fetches in flight across the whole batch.
    pub max_concurrency: usize,
    /// Files of this size or smaller are fetched with a single request.
    pub split_threshold: u64,
    /// Directory where the temporary part files are created.
    pub temp_dir: PathBuf,
    /// Reaction to a failed size probe.
    pub probe_failure: ProbeFailurePolicy,
    /// Custom HTTP headers.
    pub headers: Option<HeaderMap>,
    /// Optional proxy for every request.
    pub proxy: Option<reqwest::Proxy>,
    /// Downloader style options.
    pub style_options: StyleOptions,
    /// Callback for when each download completes.
    pub on_complete: Option<Arc<DownloadCallback>>,
}

impl std::fmt::Debug for DownloadConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DownloadConfig")
            .field("directory", &self.directory)
            .field("parts", &self.parts)
            .field("max_concurrency", &self.max_concurrency)
            .field("split_threshold", &self.split_threshold)
            .field("temp_dir", &self.temp_dir)
            .field("probe_failure", &self.probe_failure)
            .field("headers", &self.headers)
            .field("proxy", &self.proxy)
            .field("style_options", &self.style_options)
            .field("on_complete", &self.on_complete.is_some())
            .finish()
    }
}

impl Default for DownloadConfig {
    fn default() -> Self {
        Self {
            directory: current_dir().unwrap_or_default(),
            parts: 4,
            max_concurrency: 8,
            split_threshold: DEFAULT_SPLIT_THRESHOLD,
            temp_dir: temp_dir(),
            probe_failure: ProbeFailurePolicy::default(),
            headers: None,
            proxy: None,
            style_options: StyleOptions::default(),
            on_complete: None,
        }
    }
}
