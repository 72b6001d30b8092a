//! Reconciliation between the switch, the local state and the remote record.
//!
//! ```text
//! Uninitialized -> Syncing(Startup) -> Idle -> Syncing(Edge) -> Idle -> ...
//! ```
//!
//! Local state is always updated first and synchronously. Remote calls
//! never decide what the LED shows once the switch has been seen to move.

use std::future::Future;
use std::sync::Arc;

use crate::config::BeltConfig;
use crate::error::{HardwareError, SyncError};
use crate::gpio::EdgeEvent;
use crate::remote::{PushQueue, PushReceipt, RemoteSeatBeltRecord, RemoteSyncClient};
use crate::state::BeltState;
use crate::traits::{HttpClient, UiSink};

/// Edge pushes are queued and not waited for; their failures are dropped.
///
/// When disabled the foreground awaits each push before taking the next
/// edge; failures are still only logged. Either way pushes reach the remote
/// in edge order.
pub const BEST_EFFORT_REMOTE_SYNC: bool = true;

/// Transcript line after a successful startup fetch.
pub const MSG_CONNECTED: &str = "Connected to remote.";
/// Transcript line after a startup sync where either step failed.
pub const MSG_REMOTE_FAILED: &str = "Remote connection failed!";
/// Transcript line when GPIO could not be opened.
pub const MSG_NO_GPIO: &str = "There is no GPIO controller on this device.";

/// What started the current sync.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncTrigger {
    Startup,
    Edge(EdgeEvent),
}

/// Result of both network steps of the startup sync.
#[derive(Debug, Clone)]
pub struct StartupOutcome {
    /// The `secured = false` baseline push
    pub baseline: Result<(), SyncError>,
    /// The fetch of the remote record
    pub fetched: Result<RemoteSeatBeltRecord, SyncError>,
}

impl StartupOutcome {
    pub fn is_ok(&self) -> bool {
        self.baseline.is_ok() && self.fetched.is_ok()
    }

    /// First failure, push before fetch.
    pub fn error(&self) -> Option<&SyncError> {
        self.baseline
            .as_ref()
            .err()
            .or_else(|| self.fetched.as_ref().err())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControllerPhase {
    Uninitialized,
    Syncing(SyncTrigger),
    Idle,
}

/// Owns the secured flag (through [`BeltState`]) and the remote client.
///
/// Lives on the foreground task; every method that touches state takes
/// `&mut self`, so mutations are serialised without locks.
pub struct Controller<C, U> {
    device_id: String,
    phase: ControllerPhase,
    state: BeltState<U>,
    remote: Arc<RemoteSyncClient<C>>,
    /// Started on first use, inside the runtime
    pushes: Option<PushQueue>,
    best_effort: bool,
    echo_requests: bool,
    startup_pending: bool,
    edges_seen: u64,
    edges_at_startup: u64,
}

impl<C, U> Controller<C, U>
where
    C: HttpClient + 'static,
    U: UiSink,
{
    pub fn new(remote: RemoteSyncClient<C>, state: BeltState<U>, config: &BeltConfig) -> Self {
        Self {
            device_id: config.device_id.clone(),
            phase: ControllerPhase::Uninitialized,
            state,
            remote: Arc::new(remote),
            pushes: None,
            best_effort: config.best_effort_remote_sync,
            echo_requests: config.echo_requests,
            startup_pending: false,
            edges_seen: 0,
            edges_at_startup: 0,
        }
    }

    pub fn secured(&self) -> bool {
        self.state.secured()
    }

    pub fn phase(&self) -> ControllerPhase {
        self.phase
    }

    pub fn device_id(&self) -> &str {
        &self.device_id
    }

    pub fn state(&self) -> &BeltState<U> {
        &self.state
    }

    pub fn ui(&self) -> &U {
        self.state.ui()
    }

    pub fn ui_mut(&mut self) -> &mut U {
        self.state.ui_mut()
    }

    /// Report a GPIO failure; the controller carries on without the LED.
    pub fn report_hardware_unavailable(&mut self, err: &HardwareError) {
        tracing::warn!(%err, "GPIO unavailable, running local-only");
        self.state.ui_mut().append_status_line(MSG_NO_GPIO);
    }

    /// Run the whole startup sync in place.
    pub async fn startup(&mut self) -> StartupOutcome {
        let sync = self.begin_startup();
        let outcome = sync.await;
        self.finish_startup(outcome.clone());
        outcome
    }

    /// Enter `Syncing(Startup)` and return the network half of the startup sync.
    ///
    /// The `secured = false` baseline push is queued right away, ahead of
    /// any edge push. The returned future waits for it, then fetches the
    /// remote record. It borrows nothing from the controller, so the
    /// foreground can keep handling edges while it runs. Feed its output to
    /// [`finish_startup`](Self::finish_startup).
    pub fn begin_startup(&mut self) -> impl Future<Output = StartupOutcome> + Send + 'static {
        self.phase = ControllerPhase::Syncing(SyncTrigger::Startup);
        self.startup_pending = true;
        self.edges_at_startup = self.edges_seen;
        // Baseline push and fetch hit the same URL.
        self.echo_request();
        self.echo_request();

        let baseline = self.push_queue().push(false);
        let remote = Arc::clone(&self.remote);
        let device_id = self.device_id.clone();
        async move {
            let baseline = baseline.await.unwrap_or(Err(SyncError::Abandoned));
            let fetched = remote.fetch_status(&device_id).await;
            StartupOutcome { baseline, fetched }
        }
    }

    /// Apply the outcome of the startup sync and go `Idle`.
    ///
    /// A fetched record is applied even if the baseline push failed. If the
    /// switch moved while the sync was in flight, the switch wins and only
    /// the transcript line is added.
    pub fn finish_startup(&mut self, outcome: StartupOutcome) {
        let overtaken = self.edges_seen != self.edges_at_startup;

        if !overtaken {
            match &outcome.fetched {
                Ok(record) => self.state.set_secured(record.secured),
                Err(_) => self.state.set_secured(false),
            }
        }

        match outcome.error() {
            None => {
                tracing::info!(secured = self.state.secured(), overtaken, "startup sync complete");
                self.state.ui_mut().append_status_line(MSG_CONNECTED);
            }
            Some(err) => {
                tracing::warn!(%err, fetched = outcome.fetched.is_ok(), overtaken, "startup sync failed");
                self.state.ui_mut().append_status_line(MSG_REMOTE_FAILED);
            }
        }

        self.startup_pending = false;
        self.phase = ControllerPhase::Idle;
    }

    /// Apply `edge` locally and queue its push behind earlier pushes.
    ///
    /// Must be called inside a tokio runtime. The receipt can be awaited
    /// (tests do) or dropped; dropping it does not cancel the push.
    pub fn handle_edge(&mut self, edge: EdgeEvent) -> PushReceipt {
        self.phase = ControllerPhase::Syncing(SyncTrigger::Edge(edge));
        self.edges_seen += 1;

        let secured = edge.secured();
        self.state.set_secured(secured);
        self.echo_request();

        let push = self.push_queue().push(secured);

        self.phase = if self.startup_pending {
            ControllerPhase::Syncing(SyncTrigger::Startup)
        } else {
            ControllerPhase::Idle
        };
        push
    }

    /// Foreground entry point for an edge, honouring the push policy.
    pub async fn process_edge(&mut self, edge: EdgeEvent) {
        let push = self.handle_edge(edge);
        if self.best_effort {
            drop(push);
            return;
        }
        if push.await.is_err() {
            tracing::warn!("edge push was dropped before completing");
        }
    }

    /// Wait until every push queued so far has been answered.
    pub async fn settle_pushes(&self) {
        if let Some(pushes) = &self.pushes {
            pushes.settle().await;
        }
    }

    fn push_queue(&mut self) -> &PushQueue {
        self.pushes.get_or_insert_with(|| {
            PushQueue::spawn(Arc::clone(&self.remote), self.device_id.clone())
        })
    }

    fn echo_request(&mut self) {
        if self.echo_requests {
            let url = self.remote.url_for(&self.device_id);
            self.state.ui_mut().append_status_line(&url);
        }
    }
}
