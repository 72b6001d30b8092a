//! Common test utilities for integration tests.
//!
//! Builds an [`App`] over the mock adapters so a test can inject switch
//! edges, script the remote service and inspect the LED and the UI.
//!
//! # Example
//!
//! ```ignore
//! let rig = TestRig::new();
//! rig.http.set_method_response("GET", URL, ok(r#"{"secured":true}"#));
//! let app = rig.open(quiet_config());
//! ```

pub mod mocks;

pub use mocks::*;

use seatbelt::adapters::mock::{MockGpio, MockHttpClient, RecordingUi};
use seatbelt::app::App;
use seatbelt::config::BeltConfig;

pub const BUTTON_PIN: u8 = 5;
pub const LED_PIN: u8 = 6;

/// A mock GPIO controller and a mock HTTP client, shared with the app.
#[derive(Clone)]
pub struct TestRig {
    pub gpio: MockGpio,
    pub http: MockHttpClient,
}

impl TestRig {
    pub fn new() -> Self {
        Self {
            gpio: MockGpio::new(),
            http: MockHttpClient::new(),
        }
    }

    /// A rig whose device has no GPIO controller.
    pub fn without_gpio() -> Self {
        Self {
            gpio: MockGpio::unavailable(),
            http: MockHttpClient::new(),
        }
    }

    /// Open an app over this rig. Must run inside a tokio runtime.
    pub fn open(&self, config: BeltConfig) -> App<MockHttpClient, RecordingUi> {
        let mut gpio = self.gpio.clone();
        App::open(&config, self.http.clone(), &mut gpio, RecordingUi::new())
            .expect("default base URL is valid")
    }
}

/// Default configuration without request echoing.
pub fn quiet_config() -> BeltConfig {
    BeltConfig::default().with_echo_requests(false)
}
