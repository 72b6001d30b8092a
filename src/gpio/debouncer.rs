//! Time-window debouncing of raw edges.

use std::time::Duration;

use crate::gpio::EdgeEvent;
use crate::traits::RawEdge;

/// Collapses edges that arrive within `window` of the last accepted edge.
///
/// Works on driver timestamps rather than wall-clock reads so the outcome
/// only depends on the event sequence.
#[derive(Debug, Clone)]
pub struct Debouncer {
    window: Duration,
    last_accepted: Option<Duration>,
}

impl Debouncer {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            last_accepted: None,
        }
    }

    /// Returns the edge if it survives the window, `None` if it is bounce.
    pub fn accept(&mut self, raw: RawEdge) -> Option<EdgeEvent> {
        if let Some(last) = self.last_accepted {
            // A timestamp older than the last accepted edge saturates to zero
            // and is treated as bounce.
            if raw.timestamp.saturating_sub(last) < self.window {
                return None;
            }
        }
        self.last_accepted = Some(raw.timestamp);
        Some(raw.edge)
    }
}
