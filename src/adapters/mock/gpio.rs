//! Mock GPIO controller for testing.
//!
//! Pins share state with the [`MockGpio`] that opened them, so a test can
//! inject edges and inspect output writes after handing the pins off.

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::error::HardwareError;
use crate::traits::{EdgeCallback, GpioController, InputPin, Level, OutputPin, RawEdge};

#[derive(Default)]
struct MockGpioState {
    unavailable: bool,
    failing_pins: HashSet<u8>,
    callbacks: HashMap<u8, EdgeCallback>,
    debounce: HashMap<u8, Duration>,
    outputs: HashMap<u8, Vec<Level>>,
}

/// In-memory GPIO controller.
///
/// # Example
///
/// ```ignore
/// let mut gpio = MockGpio::new();
/// let mut hw = Hardware::open(&mut gpio, 5, 6, Duration::from_millis(50))?;
/// let mut rx = hw.edges.subscribe()?;
/// gpio.trigger(5, RawEdge { edge: EdgeEvent::FallingEdge, timestamp: Duration::ZERO });
/// assert_eq!(rx.recv().await, Some(EdgeEvent::FallingEdge));
/// ```
#[derive(Clone, Default)]
pub struct MockGpio {
    state: Arc<Mutex<MockGpioState>>,
}

impl MockGpio {
    /// A controller where every pin opens.
    pub fn new() -> Self {
        Self::default()
    }

    /// A device without a GPIO controller.
    pub fn unavailable() -> Self {
        let gpio = Self::default();
        gpio.state.lock().unwrap().unavailable = true;
        gpio
    }

    /// Make opening `pin` fail.
    pub fn fail_pin(&self, pin: u8) {
        self.state.lock().unwrap().failing_pins.insert(pin);
    }

    /// Deliver a raw edge to the callback registered on `pin`.
    ///
    /// Returns false if nothing is subscribed. May be called from any thread.
    pub fn trigger(&self, pin: u8, raw: RawEdge) -> bool {
        // Run the callback outside the lock.
        let callback = self.state.lock().unwrap().callbacks.remove(&pin);
        match callback {
            Some(mut callback) => {
                callback(raw);
                self.state
                    .lock()
                    .unwrap()
                    .callbacks
                    .entry(pin)
                    .or_insert(callback);
                true
            }
            None => false,
        }
    }

    /// Drop the callback registered on `pin`, as if the driver went away.
    ///
    /// Returns false if nothing was subscribed.
    pub fn disconnect(&self, pin: u8) -> bool {
        let callback = self.state.lock().unwrap().callbacks.remove(&pin);
        callback.is_some()
    }

    /// Every level written to output `pin`, oldest first.
    pub fn output_levels(&self, pin: u8) -> Vec<Level> {
        self.state
            .lock()
            .unwrap()
            .outputs
            .get(&pin)
            .cloned()
            .unwrap_or_default()
    }

    /// Last level written to output `pin`.
    pub fn output_level(&self, pin: u8) -> Option<Level> {
        self.output_levels(pin).last().copied()
    }

    /// Debounce window requested when subscribing to `pin`.
    pub fn debounce_for(&self, pin: u8) -> Option<Duration> {
        self.state.lock().unwrap().debounce.get(&pin).copied()
    }

    fn check_open(&self, pin: u8) -> Result<(), HardwareError> {
        let state = self.state.lock().unwrap();
        if state.unavailable {
            return Err(HardwareError::Unavailable(
                "mock device has no GPIO controller".to_string(),
            ));
        }
        if state.failing_pins.contains(&pin) {
            return Err(HardwareError::Pin {
                pin,
                message: "mock pin failure".to_string(),
            });
        }
        Ok(())
    }
}

impl GpioController for MockGpio {
    fn open_input(&mut self, pin: u8) -> Result<Box<dyn InputPin>, HardwareError> {
        self.check_open(pin)?;
        Ok(Box::new(MockInputPin {
            pin,
            state: Arc::clone(&self.state),
        }))
    }

    fn open_output(&mut self, pin: u8) -> Result<Box<dyn OutputPin>, HardwareError> {
        self.check_open(pin)?;
        self.state.lock().unwrap().outputs.entry(pin).or_default();
        Ok(Box::new(MockOutputPin {
            pin,
            state: Arc::clone(&self.state),
        }))
    }
}

struct MockInputPin {
    pin: u8,
    state: Arc<Mutex<MockGpioState>>,
}

impl InputPin for MockInputPin {
    fn pin(&self) -> u8 {
        self.pin
    }

    fn on_edge(&mut self, debounce: Duration, callback: EdgeCallback) -> Result<(), HardwareError> {
        let mut state = self.state.lock().unwrap();
        state.debounce.insert(self.pin, debounce);
        state.callbacks.insert(self.pin, callback);
        Ok(())
    }
}

struct MockOutputPin {
    pin: u8,
    state: Arc<Mutex<MockGpioState>>,
}

impl OutputPin for MockOutputPin {
    fn pin(&self) -> u8 {
        self.pin
    }

    fn write(&mut self, level: Level) {
        self.state
            .lock()
            .unwrap()
            .outputs
            .entry(self.pin)
            .or_default()
            .push(level);
    }
}
