//! Mock implementations for testing.
//!
//! Unit and integration tests drive the whole client through these,
//! without a network, GPIO hardware or a terminal.
//!
//! # Available Mocks
//!
//! - [`MockHttpClient`] - HTTP client with configurable responses
//! - [`MockGpio`] - GPIO controller with edge injection
//! - [`RecordingUi`] - UI sink that records every call

pub mod gpio;
pub mod http;
pub mod ui;

pub use gpio::MockGpio;
pub use http::{MockHttpClient, MockResponse, RecordedRequest};
pub use ui::{RecordingUi, UiCall};
