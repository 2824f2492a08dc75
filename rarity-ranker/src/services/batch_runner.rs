//! Bounded-concurrency task runner
//!
//! Runs one task per index in `[0, n)` with at most `width` tasks in flight,
//! under one of two schedules:
//! - [`Schedule::Batched`]: consecutive batches of `width` indices; every task
//!   in a batch completes (join barrier) before the next batch starts
//! - [`Schedule::Pool`]: a work queue over the indices; a new task starts as
//!   soon as any in-flight task finishes
//!
//! Each completion is handed to a single consumer together with its index,
//! so results are placed positionally regardless of completion order and
//! the consumer can own all mutable state without locking.
//!
//! There is no timeout or cancellation here: one stalled task stalls its
//! batch (batched) or holds one slot (pool) until it resolves.

use futures::future::join_all;
use futures::stream::{self, StreamExt};
use std::fmt;
use std::future::Future;
use std::ops::Range;
use std::str::FromStr;
use tracing::{debug, warn};

/// Width substituted for non-positive requests
pub const MIN_WIDTH: usize = 1;

/// Task scheduling strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum Schedule {
    /// Fixed-width batches separated by join barriers
    Batched,
    /// Bounded work queue without batch barriers
    #[default]
    Pool,
}

impl fmt::Display for Schedule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Schedule::Batched => write!(f, "batched"),
            Schedule::Pool => write!(f, "pool"),
        }
    }
}

impl FromStr for Schedule {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "batched" => Ok(Schedule::Batched),
            "pool" => Ok(Schedule::Pool),
            other => Err(format!(
                "unknown schedule '{}' (expected 'batched' or 'pool')",
                other
            )),
        }
    }
}

/// Bounded-concurrency executor over an index domain
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchRunner {
    width: usize,
    schedule: Schedule,
}

impl BatchRunner {
    /// Create runner
    ///
    /// A non-positive `width` is invalid: logs a warning and substitutes
    /// [`MIN_WIDTH`].
    pub fn new(width: i64, schedule: Schedule) -> Self {
        let width = match usize::try_from(width) {
            Ok(w) if w > 0 => w,
            _ => {
                warn!(
                    requested = width,
                    substituted = MIN_WIDTH,
                    "Max concurrent tasks must be positive; using minimum"
                );
                MIN_WIDTH
            }
        };

        Self { width, schedule }
    }

    /// Maximum number of tasks in flight
    pub fn width(&self) -> usize {
        self.width
    }

    pub fn schedule(&self) -> Schedule {
        self.schedule
    }

    /// Partition `[0, n)` into consecutive batches of `width` indices
    ///
    /// The last batch may be shorter.
    pub fn batches(&self, n: usize) -> impl Iterator<Item = Range<usize>> + '_ {
        (0..n)
            .step_by(self.width)
            .map(move |start| start..(start + self.width).min(n))
    }

    /// Run `task(i)` for every `i` in `[0, n)`, delivering each output to `sink(i, output)`
    ///
    /// `sink` runs on the calling task, never concurrently with itself.
    pub async fn run<T, F, Fut, S>(&self, n: usize, mut task: F, mut sink: S)
    where
        F: FnMut(usize) -> Fut,
        Fut: Future<Output = T>,
        S: FnMut(usize, T),
    {
        match self.schedule {
            Schedule::Batched => {
                for (batch_num, batch) in self.batches(n).enumerate() {
                    debug!(
                        batch = batch_num,
                        start = batch.start,
                        len = batch.len(),
                        "Starting batch"
                    );

                    let in_flight = batch.map(|idx| {
                        let fut = task(idx);
                        async move { (idx, fut.await) }
                    });

                    // Join barrier: the whole batch resolves before the next one starts
                    for (idx, output) in join_all(in_flight).await {
                        sink(idx, output);
                    }
                }
            }
            Schedule::Pool => {
                let mut completions = stream::iter(0..n)
                    .map(|idx| {
                        let fut = task(idx);
                        async move { (idx, fut.await) }
                    })
                    .buffer_unordered(self.width);

                while let Some((idx, output)) = completions.next().await {
                    sink(idx, output);
                }
            }
        }
    }
}
