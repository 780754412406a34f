//! Shared utility functions.
//!
//! - [`content_length`] - `Content-Length` header parsing for size probes

pub mod content_length;

pub use content_length::parse_content_length;
