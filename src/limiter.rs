//! Batch-wide cap on in-flight HTTP fetches.
//!
//! A single [`ConcurrencyLimiter`] is shared by every job of a batch, so the
//! ceiling bounds the total number of simultaneous requests rather than the
//! number per file.

use crate::error::{Error, Result};

use std::sync::Arc;
use tokio::sync::{OwnedSemaphorePermit, Semaphore};

/// A counting gate shared by all the fetchers of a batch.
#[derive(Debug, Clone)]
pub struct ConcurrencyLimiter {
    semaphore: Arc<Semaphore>,
    capacity: usize,
}

/// One unit of limiter capacity. Released when dropped.
#[derive(Debug)]
pub struct Permit {
    _permit: OwnedSemaphorePermit,
}

impl ConcurrencyLimiter {
    /// Creates a limiter allowing `capacity` concurrent holders.
    ///
    /// A capacity of zero is treated as one.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.clamp(1, Semaphore::MAX_PERMITS);
        Self {
            semaphore: Arc::new(Semaphore::new(capacity)),
            capacity,
        }
    }

    /// Waits until a permit is free and takes it.
    pub async fn acquire(&self) -> Result<Permit> {
        self.semaphore
            .clone()
            .acquire_owned()
            .await
            .map(|permit| Permit { _permit: permit })
            .map_err(|_| Error::Internal("concurrency limiter closed".into()))
    }

    /// Get the configured ceiling.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Get the number of permits currently free.
    pub fn available(&self) -> usize {
        self.semaphore.available_permits()
    }

    /// Get the number of permits currently held.
    pub fn in_flight(&self) -> usize {
        self.capacity - self.available()
    }
}
