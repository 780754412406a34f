//! Remote size discovery.

use crate::error::{Error, ProbeFailure, Result};
use crate::utils::parse_content_length;

use reqwest::{StatusCode, Url};
use reqwest_middleware::ClientWithMiddleware;
use tracing::debug;

/// Sends a HEAD request to `url` and returns its `Content-Length`.
///
/// A missing header yields `0`, meaning the server did not report a size.
/// Any status other than `200 OK` is a failure.
pub async fn probe_content_length(client: &ClientWithMiddleware, url: &Url) -> Result<u64> {
    let probe_err = |source: ProbeFailure| Error::Probe {
        url: url.to_string(),
        source,
    };

    debug!("Probing {}", url);
    let res = client
        .head(url.clone())
        .send()
        .await
        .map_err(|e| probe_err(ProbeFailure::Transport(e)))?;

    if res.status() != StatusCode::OK {
        return Err(probe_err(ProbeFailure::Status(res.status())));
    }

    let length = parse_content_length(res.headers())
        .map_err(probe_err)?
        .unwrap_or(0);
    debug!("{} reports {} bytes", url, length);

    Ok(length)
}
