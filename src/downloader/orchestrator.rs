//! Runs a single job of a batch.
//!
//! A job goes through the following stages, any of which can fail:
//!
//! 1. check that the output file does not exist yet,
//! 2. probe the remote size with a HEAD request,
//! 3. create the output file and plan the byte ranges,
//! 4. fetch every range concurrently into its own temporary file,
//! 5. append the temporary files to the output file in range order.

use super::collector::BatchCollector;
use super::config::{DownloadConfig, ProbeFailurePolicy};
use crate::chunk::{combine_chunks, Chunk, ChunkPlanner};
use crate::download::{DownloadJob, Summary};
use crate::error::{Error, Result};
use crate::http::{probe_content_length, RangeFetcher};
use crate::limiter::ConcurrencyLimiter;
use crate::progress::ProgressDisplay;

use futures::FutureExt;
use indicatif::ProgressBar;
use reqwest_middleware::ClientWithMiddleware;
use std::convert::TryFrom;
use std::io::ErrorKind;
use std::panic::AssertUnwindSafe;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::fs::{self, File, OpenOptions};
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Everything the jobs of one batch share.
pub(crate) struct BatchContext {
    pub(crate) client: ClientWithMiddleware,
    pub(crate) config: DownloadConfig,
    pub(crate) limiter: ConcurrencyLimiter,
    pub(crate) progress: ProgressDisplay,
    pub(crate) collector: BatchCollector,
    pub(crate) cancel: CancellationToken,
}

/// Runs the job for `urls[index]` and records its outcome.
pub(crate) async fn run_and_record(ctx: Arc<BatchContext>, index: usize, url: String) {
    let job = match DownloadJob::try_from(url.as_str()) {
        Ok(job) => job,
        Err(e) => {
            warn!("Skipping {}: {}", url, e);
            ctx.progress.skip_file();
            ctx.collector.record_failure(index, Summary::new(url, ""), e);
            return;
        }
    };
    let summary = Summary::new(url.as_str(), &job.filename);
    let cancel = ctx.cancel.child_token();

    let outcome = AssertUnwindSafe(run_job(&ctx, job, &cancel))
        .catch_unwind()
        .await
        .unwrap_or_else(|_| Err(Error::Internal(format!("download of {} panicked", url))));

    match outcome {
        Ok((path, size)) => {
            info!("Downloaded {} to {:?} ({} bytes)", url, path, size);
            ctx.collector.record_success(index, summary.succeed(path, size));
        }
        Err(e) => {
            let abort_batch = matches!(e, Error::Probe { .. })
                && ctx.config.probe_failure == ProbeFailurePolicy::AbortBatch;
            if !e.is_cancelled() {
                warn!("Download of {} failed: {}", url, e);
            }
            // Record before cancelling so the probe error wins the batch slot.
            ctx.collector.record_failure(index, summary, e);
            if abort_batch {
                warn!("Probe failure, cancelling the batch");
                ctx.cancel.cancel();
            }
        }
    }
}

/// Downloads one job and returns its output path and size.
async fn run_job(
    ctx: &BatchContext,
    job: DownloadJob,
    cancel: &CancellationToken,
) -> Result<(PathBuf, u64)> {
    let (job, mut output, output_path) = match prepare_job(ctx, job, cancel).await {
        Ok(prepared) => prepared,
        Err(e) => {
            ctx.progress.skip_file();
            return Err(e);
        }
    };

    let config = &ctx.config;
    let ranges = ChunkPlanner::new(config.parts)
        .split_threshold(config.split_threshold)
        .plan(job.content_length);
    info!(
        "Downloading {} ({} bytes) in {} part(s)",
        job.url,
        job.content_length,
        ranges.len()
    );

    let pb = ctx
        .progress
        .create_file_progress(&job.filename, job.content_length);
    let chunks = match ranges
        .into_iter()
        .map(|range| Chunk::create(range, &job.filename, &config.temp_dir))
        .collect::<std::io::Result<Vec<_>>>()
    {
        Ok(chunks) => chunks,
        Err(e) => {
            ctx.progress.finish_file(&pb);
            discard_output(output, &output_path).await;
            return Err(e.into());
        }
    };

    if let Err(e) = fetch_chunks(ctx, &job, &chunks, cancel, pb.clone()).await {
        ctx.progress.finish_file(&pb);
        // Nothing was written to the output file yet.
        discard_output(output, &output_path).await;
        return Err(e);
    }

    let written = combine_chunks(chunks, &mut output, &output_path).await;
    ctx.progress.finish_file(&pb);
    Ok((output_path, written?))
}

/// Checks the destination, probes the size and creates the output file.
async fn prepare_job(
    ctx: &BatchContext,
    job: DownloadJob,
    cancel: &CancellationToken,
) -> Result<(DownloadJob, File, PathBuf)> {
    let config = &ctx.config;
    let output_path = job.output_path(&config.directory);

    debug!("Creating destination directory {:?}", config.directory);
    fs::create_dir_all(&config.directory).await?;
    if fs::try_exists(&output_path).await? {
        return Err(Error::DestinationExists(output_path));
    }

    let content_length = tokio::select! {
        biased;
        _ = cancel.cancelled() => return Err(Error::Cancelled),
        length = probe_content_length(&ctx.client, &job.url) => length?,
    };
    let job = job.with_content_length(content_length);

    let output = create_output_file(&output_path).await?;
    Ok((job, output, output_path))
}

/// Fetches every chunk concurrently and waits for all of them.
///
/// The first failure cancels the remaining fetches of the job and is
/// returned once every fetch task has ended.
async fn fetch_chunks(
    ctx: &BatchContext,
    job: &DownloadJob,
    chunks: &[Chunk],
    cancel: &CancellationToken,
    pb: ProgressBar,
) -> Result<()> {
    let fetcher = RangeFetcher::new(
        ctx.client.clone(),
        job.url.clone(),
        ctx.limiter.clone(),
        cancel.clone(),
    )
    .whole_body(chunks.len() == 1)
    .progress(pb);

    let mut tasks = JoinSet::new();
    for chunk in chunks {
        let dest = chunk.open()?;
        let range = *chunk.range();
        let fetcher = fetcher.clone();
        tasks.spawn(async move { fetcher.fetch(range, dest).await });
    }

    let mut first_error: Option<Error> = None;
    while let Some(joined) = tasks.join_next().await {
        let result = joined
            .map_err(|e| Error::Internal(format!("fetch task failed: {}", e)))
            .and_then(|fetched| fetched);
        if let Err(e) = result {
            if first_error.is_none() {
                debug!("Cancelling the remaining parts of {}", job.url);
                cancel.cancel();
                first_error = Some(e);
            }
        }
    }

    match first_error {
        Some(e) => Err(e),
        None => Ok(()),
    }
}

/// Creates the output file, refusing to replace an existing one.
async fn create_output_file(path: &Path) -> Result<File> {
    debug!("Creating destination file {:?}", path);
    match OpenOptions::new().write(true).create_new(true).open(path).await {
        Ok(file) => Ok(file),
        Err(e) if e.kind() == ErrorKind::AlreadyExists => {
            Err(Error::DestinationExists(path.to_path_buf()))
        }
        Err(e) => Err(e.into()),
    }
}

async fn discard_output(output: File, path: &Path) {
    drop(output);
    if let Err(e) = fs::remove_file(path).await {
        warn!("Failed to remove {:?}: {}", path, e);
    }
}
