//! Per-batch result aggregation.
//!
//! Every job of a batch reports into one [`BatchCollector`]. The collector
//! keeps one [`Summary`] per input URL and the first error observed, then
//! turns into the [`BatchReport`] handed back to the caller.

use super::config::DownloadCallback;
use crate::download::{Status, Summary};
use crate::error::{Error, Result};

use std::error::Error as StdError;
use std::path::PathBuf;
use std::sync::{Arc, Mutex, PoisonError};
use tracing::debug;

/// The outcome of one batch.
#[derive(Debug)]
pub struct BatchReport {
    summaries: Vec<Summary>,
    error: Option<Error>,
}

impl BatchReport {
    /// Output paths of the successful downloads, in input order.
    pub fn paths(&self) -> Vec<PathBuf> {
        self.summaries
            .iter()
            .filter_map(|s| s.path().map(PathBuf::from))
            .collect()
    }

    /// One summary per input URL, in input order.
    pub fn summaries(&self) -> &[Summary] {
        &self.summaries
    }

    /// The first error observed in the batch, if any.
    pub fn error(&self) -> Option<&Error> {
        self.error.as_ref()
    }

    /// Returns `true` if every download succeeded.
    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }

    /// Split the report into the successful paths and the batch error.
    pub fn into_parts(self) -> (Vec<PathBuf>, Option<Error>) {
        let paths = self.paths();
        (paths, self.error)
    }

    /// The successful paths, or the batch error if there was one.
    pub fn into_result(self) -> Result<Vec<PathBuf>> {
        match self.into_parts() {
            (paths, None) => Ok(paths),
            (_, Some(error)) => Err(error),
        }
    }
}

/// Shared by the jobs of a batch while it runs.
pub(crate) struct BatchCollector {
    summaries: Mutex<Vec<Summary>>,
    first_error: Mutex<Option<Error>>,
    on_complete: Option<Arc<DownloadCallback>>,
}

impl BatchCollector {
    pub(crate) fn new<S: AsRef<str>>(urls: &[S], on_complete: Option<Arc<DownloadCallback>>) -> Self {
        let summaries = urls.iter().map(|u| Summary::new(u.as_ref(), "")).collect();
        Self {
            summaries: Mutex::new(summaries),
            first_error: Mutex::new(None),
            on_complete,
        }
    }

    pub(crate) fn record_success(&self, index: usize, summary: Summary) {
        self.record(index, summary);
    }

    /// Stores the job's failure and offers its error to the batch slot.
    pub(crate) fn record_failure(&self, index: usize, summary: Summary, error: Error) {
        let summary = match error.is_cancelled() {
            true => summary.with_status(Status::Cancelled),
            false => summary.fail(error_chain(&error)),
        };
        self.record(index, summary);
        self.offer_error(error);
    }

    /// Keeps `error` only if no error was recorded before.
    pub(crate) fn offer_error(&self, error: Error) {
        let mut slot = self
            .first_error
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        match *slot {
            None => *slot = Some(error),
            Some(_) => debug!("Batch error already set, dropping: {}", error),
        }
    }

    /// Marks every job that has not run as failed with `error`.
    pub(crate) fn abort(&self, error: Error) {
        {
            let mut summaries = self.summaries.lock().unwrap_or_else(PoisonError::into_inner);
            let message = error_chain(&error);
            for summary in summaries.iter_mut() {
                if summary.status() == &Status::NotStarted {
                    *summary = summary.clone().fail(&message);
                }
            }
        }
        self.offer_error(error);
    }

    pub(crate) fn take_report(&self) -> BatchReport {
        let summaries =
            std::mem::take(&mut *self.summaries.lock().unwrap_or_else(PoisonError::into_inner));
        let error = self
            .first_error
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        BatchReport { summaries, error }
    }

    fn record(&self, index: usize, summary: Summary) {
        if let Some(ref callback) = self.on_complete {
            callback(&summary);
        }
        let mut summaries = self.summaries.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(slot) = summaries.get_mut(index) {
            *slot = summary;
        }
    }
}

/// Renders an error followed by its causes: `outer: inner: root`.
pub(crate) fn error_chain(error: &Error) -> String {
    let mut message = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}
