//! GPIO hardware trait abstraction.
//!
//! Models the small slice of a GPIO driver the seatbelt client relies on:
//! opening an input with edge notifications and opening an output that
//! can be driven high or low.

use std::time::Duration;

use crate::error::HardwareError;
use crate::gpio::EdgeEvent;

/// Logic level of a digital pin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Low,
    High,
}

impl From<bool> for Level {
    fn from(high: bool) -> Self {
        if high {
            Level::High
        } else {
            Level::Low
        }
    }
}

/// An edge as reported by the driver, before software debouncing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawEdge {
    pub edge: EdgeEvent,
    /// Monotonic time of the transition, from an arbitrary driver epoch.
    pub timestamp: Duration,
}

/// Edge notification callback.
///
/// Invoked on a driver-owned thread, never on the application's
/// foreground task.
pub type EdgeCallback = Box<dyn FnMut(RawEdge) + Send + 'static>;

/// An opened input pin.
pub trait InputPin: Send {
    /// BCM pin number.
    fn pin(&self) -> u8;

    /// Subscribe to rising and falling edges.
    ///
    /// `debounce` is forwarded to the driver when it supports hardware
    /// debouncing; drivers without support ignore it.
    fn on_edge(&mut self, debounce: Duration, callback: EdgeCallback) -> Result<(), HardwareError>;
}

/// An opened output pin.
pub trait OutputPin: Send {
    /// BCM pin number.
    fn pin(&self) -> u8;

    /// Drive the pin. Writes after a successful open are not expected to fail.
    fn write(&mut self, level: Level);
}

/// Entry point to a GPIO driver.
pub trait GpioController {
    /// Open `pin` as an input, with pull-up where the driver supports it.
    fn open_input(&mut self, pin: u8) -> Result<Box<dyn InputPin>, HardwareError>;

    /// Open `pin` as a push-pull output.
    fn open_output(&mut self, pin: u8) -> Result<Box<dyn OutputPin>, HardwareError>;
}
