//! Builder pattern implementation for creating Downloader instances.
//!
//! # Examples
//!
//! ```rust
//! use chunkfetch::downloader::{DownloaderBuilder, ProbeFailurePolicy};
//! use std::path::PathBuf;
//!
//! let downloader = DownloaderBuilder::new()
//!     .directory(PathBuf::from("./downloads"))
//!     .parts(4)
//!     .max_concurrency(5)
//!     .probe_failure(ProbeFailurePolicy::FailJob)
//!     .build();
//!
//! assert_eq!(downloader.parts(), 4);
//! assert_eq!(downloader.max_concurrency(), 5);
//! ```

use super::{
    config::{DownloadConfig, ProbeFailurePolicy},
    downloader::Downloader,
};
use crate::download::Summary;
use crate::StyleOptions;

use reqwest::header::{HeaderMap, HeaderValue, IntoHeaderName};
use std::{path::PathBuf, sync::Arc};

/// A builder used to create a [`Downloader`].
///
/// ```rust
/// # fn main()  {
/// use chunkfetch::downloader::DownloaderBuilder;
///
/// let d = DownloaderBuilder::new().parts(8).directory("downloads".into()).build();
/// # }
/// ```
#[derive(Default)]
pub struct DownloaderBuilder {
    config: DownloadConfig,
}

impl DownloaderBuilder {
    /// Creates a builder with the default options.
    pub fn new() -> Self {
        DownloaderBuilder::default()
    }

    /// Convenience function to hide the progress bars.
    pub fn hidden() -> Self {
        let mut builder = DownloaderBuilder::default();
        builder.config.style_options = StyleOptions::hidden();
        builder
    }

    /// Sets the directory where to store the downloads.
    pub fn directory(mut self, directory: PathBuf) -> Self {
        self.config.directory = directory;
        self
    }

    /// Set the number of parts large files are split into.
    ///
    /// Zero is treated as one.
    pub fn parts(mut self, parts: usize) -> Self {
        self.config.parts = parts.max(1);
        self
    }

    /// Set the maximum number of fetches in flight across the batch.
    ///
    /// Zero is treated as one.
    pub fn max_concurrency(mut self, max_concurrency: usize) -> Self {
        self.config.max_concurrency = max_concurrency.max(1);
        self
    }

    /// Set the size at or below which a file is fetched in one request.
    pub fn split_threshold(mut self, split_threshold: u64) -> Self {
        self.config.split_threshold = split_threshold;
        self
    }

    /// Set the directory where the temporary part files are created.
    pub fn temp_dir(mut self, temp_dir: PathBuf) -> Self {
        self.config.temp_dir = temp_dir;
        self
    }

    /// Set what a failed size probe does to the rest of the batch.
    pub fn probe_failure(mut self, policy: ProbeFailurePolicy) -> Self {
        self.config.probe_failure = policy;
        self
    }

    /// Route every request through `proxy`.
    pub fn proxy(mut self, proxy: reqwest::Proxy) -> Self {
        self.config.proxy = Some(proxy);
        self
    }

    /// Set the downloader style options.
    pub fn style_options(mut self, style_options: StyleOptions) -> Self {
        self.config.style_options = style_options;
        self
    }

    /// Set callback for when each download completes.
    ///
    /// The callback is called as soon as a download finishes, successfully
    /// or not, while other downloads may still be running.
    pub fn on_complete<F>(mut self, callback: F) -> Self
    where
        F: Fn(&Summary) + Send + Sync + 'static,
    {
        self.config.on_complete = Some(Arc::new(Box::new(callback)));
        self
    }

    fn new_header(&self) -> HeaderMap {
        match self.config.headers {
            Some(ref h) => h.to_owned(),
            _ => HeaderMap::new(),
        }
    }

    /// Add the http headers.
    ///
    /// Calling `.headers()` several times merges every map into one.
    ///
    /// # Example
    ///
    /// ```
    /// use reqwest::header::{self, HeaderValue, HeaderMap};
    /// use chunkfetch::downloader::DownloaderBuilder;
    ///
    /// let ua = HeaderValue::from_str("curl/7.87").expect("Invalid UA");
    ///
    /// let downloader = DownloaderBuilder::new()
    ///     .headers(HeaderMap::from_iter([(header::USER_AGENT, ua)]))
    ///     .build();
    /// ```
    pub fn headers(mut self, headers: HeaderMap) -> Self {
        let mut new = self.new_header();
        new.extend(headers);

        self.config.headers = Some(new);
        self
    }

    /// Add the http header
    pub fn header<K: IntoHeaderName>(mut self, name: K, value: HeaderValue) -> Self {
        let mut new = self.new_header();

        new.insert(name, value);

        self.config.headers = Some(new);
        self
    }

    /// Create the [`Downloader`] with the specified options.
    pub fn build(self) -> Downloader {
        Downloader::new(self.config)
    }
}
