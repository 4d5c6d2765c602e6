//! Fire-and-forget checkpoint delivery.
//!
//! The frame loop hands checkpoints to a [`CheckpointSink`], which must
//! never block. [`CheckpointDispatcher`] drains them on a tokio task and
//! forwards each to a [`CheckpointRecorder`]. Failures are logged and
//! dropped: delivery is at most once and never feeds back into
//! classification.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use futures::future::BoxFuture;
use thiserror::Error;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio::task::JoinHandle;

use crate::session::checkpoint::Checkpoint;

/// Non-blocking destination for checkpoints emitted on the frame path.
pub trait CheckpointSink: Send {
    fn submit(&self, checkpoint: Checkpoint);
}

impl CheckpointSink for crossbeam::channel::Sender<Checkpoint> {
    fn submit(&self, checkpoint: Checkpoint) {
        if self.send(checkpoint).is_err() {
            tracing::warn!("Checkpoint receiver dropped, discarding checkpoint");
        }
    }
}

/// Asynchronous persistence collaborator.
pub trait CheckpointRecorder: Send + Sync + 'static {
    fn record(&self, checkpoint: Checkpoint) -> BoxFuture<'static, Result<(), RecordError>>;
}

/// Errors reported by a recorder.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordError {
    /// Backend could not be reached
    #[error("Recorder unavailable: {0}")]
    Unavailable(String),

    /// Backend refused the checkpoint
    #[error("Checkpoint rejected: {0}")]
    Rejected(String),
}

/// Delivery counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DispatchStats {
    pub delivered: u64,
    pub failed: u64,
}

#[derive(Debug, Default)]
struct Counters {
    delivered: AtomicU64,
    failed: AtomicU64,
}

impl Counters {
    fn snapshot(&self) -> DispatchStats {
        DispatchStats {
            delivered: self.delivered.load(Ordering::SeqCst),
            failed: self.failed.load(Ordering::SeqCst),
        }
    }
}

/// Sink half of a running dispatcher.
#[derive(Debug, Clone)]
pub struct DispatchSink {
    tx: UnboundedSender<Checkpoint>,
}

impl CheckpointSink for DispatchSink {
    fn submit(&self, checkpoint: Checkpoint) {
        if self.tx.send(checkpoint).is_err() {
            tracing::warn!("Checkpoint dispatcher stopped, discarding checkpoint");
        }
    }
}

/// Background task forwarding checkpoints to a recorder.
pub struct CheckpointDispatcher {
    tx: UnboundedSender<Checkpoint>,
    handle: JoinHandle<()>,
    counters: Arc<Counters>,
}

impl CheckpointDispatcher {
    /// Start the dispatcher on the current tokio runtime.
    pub fn spawn<R: CheckpointRecorder>(recorder: Arc<R>) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        let counters = Arc::new(Counters::default());

        let task_counters = Arc::clone(&counters);
        let handle = tokio::spawn(async move {
            Self::run(recorder, rx, task_counters).await;
        });

        tracing::debug!("Checkpoint dispatcher started");
        Self {
            tx,
            handle,
            counters,
        }
    }

    async fn run<R: CheckpointRecorder>(
        recorder: Arc<R>,
        mut rx: UnboundedReceiver<Checkpoint>,
        counters: Arc<Counters>,
    ) {
        while let Some(checkpoint) = rx.recv().await {
            let exercise = checkpoint.exercise_type;
            match recorder.record(checkpoint).await {
                Ok(()) => {
                    counters.delivered.fetch_add(1, Ordering::SeqCst);
                    tracing::debug!(%exercise, "Checkpoint recorded");
                }
                Err(e) => {
                    counters.failed.fetch_add(1, Ordering::SeqCst);
                    tracing::warn!(%exercise, "Failed to record checkpoint: {}", e);
                }
            }
        }
    }

    /// A sink feeding this dispatcher.
    pub fn sink(&self) -> DispatchSink {
        DispatchSink {
            tx: self.tx.clone(),
        }
    }

    /// Counters so far.
    pub fn stats(&self) -> DispatchStats {
        self.counters.snapshot()
    }

    /// Stop accepting checkpoints, drain what is queued and return the totals.
    ///
    /// Sinks still held elsewhere keep the task alive until they are dropped.
    pub async fn shutdown(self) -> DispatchStats {
        drop(self.tx);
        if let Err(e) = self.handle.await {
            tracing::warn!("Checkpoint dispatcher task ended abnormally: {}", e);
        }
        self.counters.snapshot()
    }
}
