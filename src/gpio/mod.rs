//! Debounced edge source over the GPIO seam.
//!
//! [`Hardware::open`] wires up the belt switch input and the indicator
//! LED output. Edges are debounced in software on top of whatever the
//! driver does, then delivered through a callback or a channel.

mod debouncer;
mod edge_source;

pub use debouncer::Debouncer;
pub use edge_source::{EdgeSource, OutputHandle};

use std::time::Duration;

use crate::error::HardwareError;
use crate::traits::GpioController;

/// A debounced transition of the belt switch.
///
/// The switch pulls the input low when the belt is buckled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeEvent {
    /// Low to high: belt released.
    RisingEdge,
    /// High to low: belt engaged.
    FallingEdge,
}

impl EdgeEvent {
    /// The secured flag this edge implies.
    pub fn secured(self) -> bool {
        matches!(self, EdgeEvent::FallingEdge)
    }
}

/// The opened belt switch and indicator LED.
pub struct Hardware {
    pub edges: EdgeSource,
    pub output: OutputHandle,
}

impl Hardware {
    /// Open the LED output first, then the switch input.
    pub fn open(
        gpio: &mut dyn GpioController,
        button_pin: u8,
        led_pin: u8,
        debounce: Duration,
    ) -> Result<Self, HardwareError> {
        let output = OutputHandle::open(gpio, led_pin)?;
        let edges = EdgeSource::open(gpio, button_pin, debounce)?;
        tracing::info!(button_pin, led_pin, ?debounce, "GPIO initialised");
        Ok(Self { edges, output })
    }
}
