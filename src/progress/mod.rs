//! Progress module containing progress bar functionality.
//!
//! - `style` - [`StyleOptions`] and [`ProgressBarOpts`]
//! - `display` - [`ProgressDisplay`], the bars of one batch
//!
//! # Examples
//!
//! ```rust
//! use chunkfetch::downloader::DownloaderBuilder;
//! use chunkfetch::progress::{ProgressBarOpts, StyleOptions};
//!
//! let downloader = DownloaderBuilder::new()
//!     .style_options(StyleOptions::new(
//!         ProgressBarOpts::hidden(),
//!         ProgressBarOpts::with_bytes_style(),
//!     ))
//!     .build();
//! ```

pub(crate) mod display;
pub(crate) mod style;

pub use display::ProgressDisplay;
pub use style::{ProgressBarOpts, StyleOptions};
