use seatbelt::adapters::{NoGpio, ReqwestHttpClient};
use seatbelt::app::{run_headless, run_tui, App};
use seatbelt::cli::{handle_version_command, parse_args, CliCommand, VERSION};
use seatbelt::config::BeltConfig;
use seatbelt::logging::{self, LogTarget};
use seatbelt::terminal::{setup_panic_hook, TerminalManager};
use seatbelt::controller::Controller;
use seatbelt::traits::{GpioController, HttpClient, UiSink};
use seatbelt::ui::Dashboard;

use color_eyre::Result;
use std::time::Duration;

/// How long queued pushes get to reach the remote on exit.
const PUSH_SETTLE_TIMEOUT: Duration = Duration::from_secs(2);

/// Open the platform GPIO controller, or a stand-in that reports why not.
fn open_gpio() -> Box<dyn GpioController> {
    #[cfg(feature = "rppal")]
    {
        match seatbelt::adapters::RppalGpio::new() {
            Ok(gpio) => Box::new(gpio),
            Err(err) => Box::new(NoGpio::new(err.to_string())),
        }
    }
    #[cfg(not(feature = "rppal"))]
    {
        Box::new(NoGpio::new("built without GPIO support"))
    }
}

/// Give pushes still in the queue a bounded chance to go out.
fn settle<C, U>(runtime: &tokio::runtime::Runtime, controller: &Controller<C, U>)
where
    C: HttpClient + 'static,
    U: UiSink,
{
    let settled = runtime.block_on(tokio::time::timeout(
        PUSH_SETTLE_TIMEOUT,
        controller.settle_pushes(),
    ));
    if settled.is_err() {
        tracing::warn!("exiting with pushes still pending");
    }
}

fn main() -> Result<()> {
    // Handle --version before any initialization
    let command = parse_args(std::env::args());
    if command == CliCommand::Version {
        handle_version_command();
    }
    let headless = command == CliCommand::Headless;

    color_eyre::install()?;

    let log_file = logging::init(if headless {
        LogTarget::Stderr
    } else {
        LogTarget::File
    });
    tracing::info!(version = VERSION, headless, log_file = ?log_file, "seatbelt starting");

    let config = BeltConfig::from_env();
    tracing::debug!(?config, "configuration loaded");

    let runtime = tokio::runtime::Runtime::new()?;

    let http = ReqwestHttpClient::with_timeout(config.request_timeout)?;
    let mut gpio = open_gpio();
    let dashboard = Dashboard::new(config.device_id.clone()).with_log_mirror(headless);

    let mut app = App::open(&config, http, gpio.as_mut(), dashboard)?;

    if headless {
        let local_only = app.is_local_only();
        app.controller_mut().ui_mut().set_local_only(local_only);

        let shutdown = async {
            if let Err(err) = tokio::signal::ctrl_c().await {
                tracing::warn!(%err, "cannot listen for ctrl-c");
                std::future::pending::<()>().await;
            }
        };
        let controller = runtime.block_on(run_headless(app, shutdown));
        settle(&runtime, &controller);
        tracing::info!(secured = controller.secured(), "seatbelt stopped");
        return Ok(());
    }

    setup_panic_hook();
    let mut term_manager = TerminalManager::new()?;
    let controller = runtime.block_on(run_tui(term_manager.terminal(), app))?;
    drop(term_manager);
    settle(&runtime, &controller);

    tracing::info!(secured = controller.secured(), "seatbelt stopped");
    Ok(())
}
