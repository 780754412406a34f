//! Download module containing the per-URL data model.
//!
//! # Overview
//!
//! - [`job`] - [`DownloadJob`]: URL parsing, file name extraction and the
//!   probed content length
//! - [`summary`] - [`Summary`] and [`Status`]: the outcome of one URL
//!
//! # Examples
//!
//! ```rust
//! use chunkfetch::download::{DownloadJob, Status, Summary};
//! use std::convert::TryFrom;
//!
//! let job = DownloadJob::try_from("https://example.com/file.zip")?;
//! let summary = Summary::new(job.url.as_str(), &job.filename).fail("404 Not Found");
//!
//! match summary.status() {
//!     Status::Success => println!("Downloaded {}", summary.filename()),
//!     Status::Fail(msg) => println!("{} failed: {}", summary.url(), msg),
//!     _ => {}
//! }
//! # Ok::<(), chunkfetch::Error>(())
//! ```

pub mod job;
pub mod summary;

pub use job::DownloadJob;
pub use summary::{Status, Summary};
