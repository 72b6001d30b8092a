//! Foreground application.
//!
//! [`App`] owns the [`Controller`] and is driven by a single task. Edge
//! events come in over a channel fed by the GPIO notification thread;
//! background network results come back as [`AppMessage`]s. Nothing
//! else mutates the belt state.

mod messages;
mod run;

pub use messages::AppMessage;
pub use run::{run_headless, run_tui};

use tokio::sync::mpsc;

use crate::config::BeltConfig;
use crate::controller::Controller;
use crate::error::SyncError;
use crate::gpio::{EdgeEvent, EdgeSource, Hardware};
use crate::remote::RemoteSyncClient;
use crate::state::BeltState;
use crate::traits::{GpioController, HttpClient, UiSink};

pub struct App<C, U> {
    controller: Controller<C, U>,
    edges: Option<mpsc::UnboundedReceiver<EdgeEvent>>,
    /// Keeps the input subscription alive.
    _edge_source: Option<EdgeSource>,
    message_tx: mpsc::UnboundedSender<AppMessage>,
    message_rx: mpsc::UnboundedReceiver<AppMessage>,
    startup_started: bool,
    startup_done: bool,
    edges_closed: bool,
    should_quit: bool,
}

impl<C, U> App<C, U>
where
    C: HttpClient + 'static,
    U: UiSink,
{
    /// Wire up GPIO, the remote client and the controller.
    ///
    /// GPIO failures degrade to local-only mode and are reported on the
    /// transcript. Only an unusable base URL is an error.
    pub fn open(
        config: &BeltConfig,
        http: C,
        gpio: &mut dyn GpioController,
        ui: U,
    ) -> Result<Self, SyncError> {
        let remote = RemoteSyncClient::new(http, &config.base_url)?;

        let hardware = Hardware::open(gpio, config.button_pin, config.led_pin, config.debounce)
            .and_then(|mut hw| {
                let edges = hw.edges.subscribe()?;
                Ok((hw, edges))
            });

        let (output, edge_source, edges, gpio_error) = match hardware {
            Ok((hw, edges)) => (Some(hw.output), Some(hw.edges), Some(edges), None),
            Err(err) => (None, None, None, Some(err)),
        };

        let state = BeltState::new(output, ui);
        let mut controller = Controller::new(remote, state, config);
        if let Some(err) = gpio_error {
            controller.report_hardware_unavailable(&err);
        }

        Ok(Self::from_parts(controller, edges, edge_source))
    }

    /// Build an app around an existing controller and edge channel.
    pub fn from_parts(
        controller: Controller<C, U>,
        edges: Option<mpsc::UnboundedReceiver<EdgeEvent>>,
        edge_source: Option<EdgeSource>,
    ) -> Self {
        let (message_tx, message_rx) = mpsc::unbounded_channel();
        Self {
            controller,
            edges,
            _edge_source: edge_source,
            message_tx,
            message_rx,
            startup_started: false,
            startup_done: false,
            edges_closed: false,
            should_quit: false,
        }
    }

    pub fn controller(&self) -> &Controller<C, U> {
        &self.controller
    }

    pub fn controller_mut(&mut self) -> &mut Controller<C, U> {
        &mut self.controller
    }

    pub fn into_controller(self) -> Controller<C, U> {
        self.controller
    }

    /// True when no input pin is delivering edges.
    pub fn is_local_only(&self) -> bool {
        !self.controller.state().has_output()
    }

    /// Kick off the startup sync in the background. Runs at most once.
    pub fn start(&mut self) {
        if self.startup_started {
            return;
        }
        self.startup_started = true;

        let sync = self.controller.begin_startup();
        let tx = self.message_tx.clone();
        tokio::spawn(async move {
            if tx.send(AppMessage::StartupSynced(sync.await)).is_err() {
                // Loop already exited.
                tracing::debug!("startup sync finished after shutdown, result dropped");
            }
        });
    }

    pub fn handle_message(&mut self, message: AppMessage) {
        match message {
            AppMessage::StartupSynced(outcome) => {
                self.controller.finish_startup(outcome);
                self.startup_done = true;
            }
        }
    }

    /// Handle the next item from the edge channel; `None` means it closed.
    pub async fn handle_edge(&mut self, edge: Option<EdgeEvent>) {
        match edge {
            Some(edge) => self.controller.process_edge(edge).await,
            None => {
                tracing::info!("edge channel closed");
                self.edges = None;
                self.edges_closed = true;
            }
        }
    }

    /// Startup has been applied and no further edges can arrive.
    pub fn is_drained(&self) -> bool {
        self.startup_done && self.edges_closed
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }
}

/// Next edge, or pending forever when there is no edge channel.
async fn next_edge(edges: &mut Option<mpsc::UnboundedReceiver<EdgeEvent>>) -> Option<EdgeEvent> {
    match edges {
        Some(rx) => rx.recv().await,
        None => std::future::pending().await,
    }
}
