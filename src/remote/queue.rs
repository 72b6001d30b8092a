//! Ordered delivery of status pushes.
//!
//! One worker task drains the queue and sends each push only after the
//! previous one has answered, so the remote sees updates in the order the
//! switch produced them.

use std::sync::Arc;

use tokio::sync::{mpsc, oneshot};

use crate::error::SyncError;
use crate::remote::RemoteSyncClient;
use crate::traits::HttpClient;

/// Completion of one queued push. Dropping it does not cancel the push.
pub type PushReceipt = oneshot::Receiver<Result<(), SyncError>>;

enum Job {
    Push {
        secured: bool,
        done: oneshot::Sender<Result<(), SyncError>>,
    },
    Settle(oneshot::Sender<()>),
}

/// Handle to the push worker. The worker exits once every handle is gone
/// and the queue is empty.
#[derive(Debug, Clone)]
pub struct PushQueue {
    tx: mpsc::UnboundedSender<Job>,
}

impl PushQueue {
    /// Start the worker. Must be called inside a tokio runtime.
    pub fn spawn<C>(remote: Arc<RemoteSyncClient<C>>, device_id: String) -> Self
    where
        C: HttpClient + 'static,
    {
        let (tx, mut rx) = mpsc::unbounded_channel::<Job>();
        tokio::spawn(async move {
            while let Some(job) = rx.recv().await {
                match job {
                    Job::Push { secured, done } => {
                        let result = remote.push_status(&device_id, secured).await;
                        match &result {
                            Ok(()) => tracing::debug!(secured, "push delivered"),
                            Err(err) => tracing::warn!(%err, secured, "push failed, discarded"),
                        }
                        // Receipt dropped means nobody is waiting.
                        let _ = done.send(result);
                    }
                    Job::Settle(done) => {
                        let _ = done.send(());
                    }
                }
            }
            tracing::debug!("push queue closed");
        });
        Self { tx }
    }

    /// Queue `secured` behind every push queued before it.
    pub fn push(&self, secured: bool) -> PushReceipt {
        let (done, receipt) = oneshot::channel();
        if self.tx.send(Job::Push { secured, done }).is_err() {
            // The receipt resolves to an error once the job is dropped here.
            tracing::warn!(secured, "push queue is gone, dropping push");
        }
        receipt
    }

    /// Wait until every push queued so far has been answered.
    pub async fn settle(&self) {
        let (done, settled) = oneshot::channel();
        if self.tx.send(Job::Settle(done)).is_ok() {
            let _ = settled.await;
        }
    }
}
