//! HTTP module containing every network interaction of the engine.
//!
//! # Overview
//!
//! - [`client`] - HTTP client creation and middleware configuration
//! - [`probe`] - HEAD request returning the remote content length
//! - [`fetch`] - [`RangeFetcher`], one GET per byte range, streamed to disk
//!
//! # Examples
//!
//! ```rust,no_run
//! use chunkfetch::http::{create_http_client, probe_content_length, HttpClientConfig};
//! use reqwest::Url;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = create_http_client(HttpClientConfig::default())?;
//! let url = Url::parse("https://example.com/file.zip")?;
//! let length = probe_content_length(&client, &url).await?;
//! println!("{} is {} bytes long", url, length);
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod fetch;
pub mod probe;

pub use client::{create_http_client, HttpClientConfig};
pub use fetch::RangeFetcher;
pub use probe::probe_content_length;
