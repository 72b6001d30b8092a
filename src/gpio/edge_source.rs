//! Debounced edge source and output handle.

use std::time::Duration;

use tokio::sync::mpsc;

use crate::error::HardwareError;
use crate::gpio::{Debouncer, EdgeEvent};
use crate::traits::{GpioController, InputPin, Level, OutputPin};

/// An input pin that reports debounced rising/falling edges.
///
/// The pin stays subscribed for as long as this value lives.
pub struct EdgeSource {
    input: Box<dyn InputPin>,
    debounce: Duration,
}

impl EdgeSource {
    /// Open `pin` as an input with the given debounce window.
    pub fn open(
        gpio: &mut dyn GpioController,
        pin: u8,
        debounce: Duration,
    ) -> Result<Self, HardwareError> {
        let input = gpio.open_input(pin)?;
        Ok(Self { input, debounce })
    }

    /// Register `callback` for every edge that survives the debounce window.
    ///
    /// The callback runs on the driver's notification thread.
    pub fn on_edge<F>(&mut self, mut callback: F) -> Result<(), HardwareError>
    where
        F: FnMut(EdgeEvent) + Send + 'static,
    {
        let pin = self.input.pin();
        let mut debouncer = Debouncer::new(self.debounce);
        self.input.on_edge(
            self.debounce,
            Box::new(move |raw| match debouncer.accept(raw) {
                Some(edge) => {
                    tracing::debug!(pin, ?edge, at = ?raw.timestamp, "edge accepted");
                    callback(edge);
                }
                None => {
                    tracing::debug!(pin, edge = ?raw.edge, at = ?raw.timestamp, "edge discarded as bounce");
                }
            }),
        )
    }

    /// Forward debounced edges onto a channel for the foreground task.
    pub fn subscribe(&mut self) -> Result<mpsc::UnboundedReceiver<EdgeEvent>, HardwareError> {
        let (tx, rx) = mpsc::unbounded_channel();
        self.on_edge(move |edge| {
            // Receiver gone means the app is shutting down.
            let _ = tx.send(edge);
        })?;
        Ok(rx)
    }
}

/// An output pin that remembers the last level written to it.
pub struct OutputHandle {
    pin: Box<dyn OutputPin>,
    level: Option<Level>,
}

impl OutputHandle {
    pub fn new(pin: Box<dyn OutputPin>) -> Self {
        Self { pin, level: None }
    }

    /// Open `pin` as an output.
    pub fn open(gpio: &mut dyn GpioController, pin: u8) -> Result<Self, HardwareError> {
        Ok(Self::new(gpio.open_output(pin)?))
    }

    /// Last level written, `None` before the first write.
    pub fn level(&self) -> Option<Level> {
        self.level
    }

    pub fn write(&mut self, level: Level) {
        self.pin.write(level);
        self.level = Some(level);
    }
}

impl std::fmt::Debug for OutputHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OutputHandle")
            .field("pin", &self.pin.pin())
            .field("level", &self.level)
            .finish()
    }
}
