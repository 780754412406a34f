//! Range fetching.
//!
//! A [`RangeFetcher`] is built once per job and cloned into every fetch
//! task. Each call to [`RangeFetcher::fetch`] holds one limiter permit from
//! before the request is sent until the body has been written out.

use crate::chunk::ByteRange;
use crate::error::{Error, FetchFailure, Result};
use crate::limiter::ConcurrencyLimiter;

use futures::StreamExt;
use indicatif::ProgressBar;
use reqwest::{header::RANGE, StatusCode, Url};
use reqwest_middleware::ClientWithMiddleware;
use tokio::{fs::File, io::AsyncWriteExt};
use tokio_util::sync::CancellationToken;
use tracing::debug;

/// Fetches the byte ranges of one URL.
#[derive(Debug, Clone)]
pub struct RangeFetcher {
    client: ClientWithMiddleware,
    url: Url,
    limiter: ConcurrencyLimiter,
    cancel: CancellationToken,
    progress: ProgressBar,
    whole_body: bool,
}

impl RangeFetcher {
    /// Creates a fetcher for `url`.
    ///
    /// Fetches stop early with [`Error::Cancelled`] once `cancel` fires.
    pub fn new(
        client: ClientWithMiddleware,
        url: Url,
        limiter: ConcurrencyLimiter,
        cancel: CancellationToken,
    ) -> Self {
        Self {
            client,
            url,
            limiter,
            cancel,
            progress: ProgressBar::hidden(),
            whole_body: false,
        }
    }

    /// Request the whole body instead of sending a `Range` header.
    pub fn whole_body(mut self, whole_body: bool) -> Self {
        self.whole_body = whole_body;
        self
    }

    /// Report received bytes on `progress`.
    pub fn progress(mut self, progress: ProgressBar) -> Self {
        self.progress = progress;
        self
    }

    /// Downloads `range` into `dest` and returns the number of bytes written.
    ///
    /// Only `200 OK` and `206 Partial Content` are accepted. When the range
    /// length is known, the body must match it exactly.
    pub async fn fetch(&self, range: ByteRange, mut dest: File) -> Result<u64> {
        let fetch_err = |source: FetchFailure| Error::Fetch {
            url: self.url.to_string(),
            index: range.index,
            source,
        };

        // Held until this function returns, whatever the outcome.
        let _permit = tokio::select! {
            biased;
            _ = self.cancel.cancelled() => return Err(Error::Cancelled),
            permit = self.limiter.acquire() => permit?,
        };

        let mut req = self.client.get(self.url.clone());
        let range_header = match self.whole_body {
            true => None,
            false => range.header_value(),
        };
        if let Some(ref value) = range_header {
            req = req.header(RANGE, value);
        }
        debug!(
            "Fetching part {} of {} ({})",
            range.index,
            self.url,
            range_header.as_deref().unwrap_or("whole body")
        );

        let res = tokio::select! {
            biased;
            _ = self.cancel.cancelled() => return Err(Error::Cancelled),
            res = req.send() => res.map_err(|e| fetch_err(FetchFailure::Transport(e)))?,
        };

        let status = res.status();
        if status != StatusCode::OK && status != StatusCode::PARTIAL_CONTENT {
            return Err(fetch_err(FetchFailure::Status(status)));
        }

        let mut received: u64 = 0;
        let mut stream = res.bytes_stream();
        loop {
            let item = tokio::select! {
                biased;
                _ = self.cancel.cancelled() => return Err(Error::Cancelled),
                item = stream.next() => item,
            };
            let Some(item) = item else {
                break;
            };
            let mut bytes = item.map_err(|e| fetch_err(FetchFailure::Body(e)))?;
            let len = bytes.len() as u64;
            dest.write_all_buf(&mut bytes)
                .await
                .map_err(|e| fetch_err(FetchFailure::Write(e)))?;
            received += len;
            self.progress.inc(len);
        }
        dest.flush()
            .await
            .map_err(|e| fetch_err(FetchFailure::Write(e)))?;

        if !range.is_empty() && received != range.len {
            return Err(fetch_err(FetchFailure::Length {
                expected: range.len,
                received,
            }));
        }

        debug!("Part {} of {} done, {} bytes", range.index, self.url, received);
        Ok(received)
    }
}
