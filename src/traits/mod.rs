//! Trait abstractions for dependency injection and testability.
//!
//! Each external collaborator of the seatbelt client sits behind one of
//! these traits so the reconciliation logic can be driven by mocks.
//!
//! # Traits
//!
//! - [`HttpClient`] - HTTP GET/POST against the remote service
//! - [`GpioController`] - opening input and output pins
//! - [`UiSink`] - indicator, status label and transcript

pub mod gpio;
pub mod http;
pub mod ui;

pub use gpio::{EdgeCallback, GpioController, InputPin, Level, OutputPin, RawEdge};
pub use http::{Headers, HttpClient, HttpError, Response};
pub use ui::{Indicator, UiSink};
