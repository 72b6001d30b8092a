//! Concrete implementations of trait abstractions.
//!
//! # Adapters
//!
//! - [`ReqwestHttpClient`] - HTTP client using reqwest
//! - [`RppalGpio`] - Raspberry Pi GPIO using rppal (feature `rppal`)
//! - [`NoGpio`] - Stand-in controller when there is no GPIO
//!
//! # Mock Implementations
//!
//! The [`mock`] submodule provides test doubles:
//! - [`mock::MockHttpClient`] - Configurable HTTP responses
//! - [`mock::MockGpio`] - Edge injection and output capture
//! - [`mock::RecordingUi`] - Records indicator, label and transcript

pub mod mock;
pub mod no_gpio;
pub mod reqwest_http;
#[cfg(feature = "rppal")]
pub mod rppal_gpio;

pub use mock::{MockGpio, MockHttpClient, RecordingUi};
pub use no_gpio::NoGpio;
pub use reqwest_http::ReqwestHttpClient;
#[cfg(feature = "rppal")]
pub use rppal_gpio::RppalGpio;
