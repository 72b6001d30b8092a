//! Canned responses and edges.

use std::time::Duration;

use bytes::Bytes;
use seatbelt::adapters::mock::MockResponse;
use seatbelt::gpio::EdgeEvent;
use seatbelt::traits::{HttpError, RawEdge, Response};

/// Resource URL for the default base URL and device id.
pub const URL: &str = "http://91.134.196.77:8101/seatbelt?id=5a180c10857aba0001b937f4";

pub fn ok(body: &'static str) -> MockResponse {
    MockResponse::Success(Response::new(200, Bytes::from(body)))
}

pub fn status(code: u16) -> MockResponse {
    MockResponse::Success(Response::new(code, Bytes::new()))
}

/// An empty 200 after `ms` milliseconds.
pub fn delayed(ms: u64) -> MockResponse {
    MockResponse::Delayed(Duration::from_millis(ms), Response::new(200, Bytes::new()))
}

pub fn refused() -> MockResponse {
    MockResponse::Error(HttpError::ConnectionFailed("connection refused".to_string()))
}

/// A raw driver edge `ms` milliseconds after boot.
pub fn raw(edge: EdgeEvent, ms: u64) -> RawEdge {
    RawEdge {
        edge,
        timestamp: Duration::from_millis(ms),
    }
}
