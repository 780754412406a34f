//! Content length extraction utilities.

use crate::error::ProbeFailure;

use reqwest::header::{HeaderMap, CONTENT_LENGTH};

/// Read the `Content-Length` header of a response.
///
/// Returns `Ok(None)` when the header is absent, and an error when it is
/// present but not a non-negative integer.
///
/// # Example
///
/// ```rust
/// use chunkfetch::utils::parse_content_length;
/// use reqwest::header::{HeaderMap, HeaderValue, CONTENT_LENGTH};
///
/// let mut headers = HeaderMap::new();
/// assert_eq!(parse_content_length(&headers).unwrap(), None);
///
/// headers.insert(CONTENT_LENGTH, HeaderValue::from_static("2048"));
/// assert_eq!(parse_content_length(&headers).unwrap(), Some(2048));
/// ```
pub fn parse_content_length(headers: &HeaderMap) -> Result<Option<u64>, ProbeFailure> {
    let Some(value) = headers.get(CONTENT_LENGTH) else {
        return Ok(None);
    };

    let raw = String::from_utf8_lossy(value.as_bytes()).into_owned();
    raw.trim()
        .parse::<u64>()
        .map(Some)
        .map_err(|_| ProbeFailure::MalformedLength(raw))
}
