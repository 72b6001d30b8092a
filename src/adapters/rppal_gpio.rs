//! Raspberry Pi GPIO adapter on `rppal`.
//!
//! Interrupt callbacks are delivered on rppal's interrupt thread.

use std::time::Duration;

use rppal::gpio::{Event, Gpio, Trigger};

use crate::error::HardwareError;
use crate::gpio::EdgeEvent;
use crate::traits::{EdgeCallback, GpioController, InputPin, Level, OutputPin, RawEdge};

/// GPIO controller backed by `/dev/gpiomem`.
pub struct RppalGpio {
    gpio: Gpio,
}

impl RppalGpio {
    /// Open the default GPIO controller.
    ///
    /// Fails with [`HardwareError::Unavailable`] on machines that are not a
    /// supported Raspberry Pi or lack access to the GPIO device.
    pub fn new() -> Result<Self, HardwareError> {
        let gpio = Gpio::new().map_err(|e| HardwareError::Unavailable(e.to_string()))?;
        Ok(Self { gpio })
    }
}

impl GpioController for RppalGpio {
    fn open_input(&mut self, pin: u8) -> Result<Box<dyn InputPin>, HardwareError> {
        let input = self
            .gpio
            .get(pin)
            .map_err(|e| HardwareError::Pin {
                pin,
                message: e.to_string(),
            })?
            .into_input_pullup();
        Ok(Box::new(RppalInputPin { input }))
    }

    fn open_output(&mut self, pin: u8) -> Result<Box<dyn OutputPin>, HardwareError> {
        let output = self
            .gpio
            .get(pin)
            .map_err(|e| HardwareError::Pin {
                pin,
                message: e.to_string(),
            })?
            .into_output_low();
        Ok(Box::new(RppalOutputPin { output }))
    }
}

struct RppalInputPin {
    input: rppal::gpio::InputPin,
}

impl InputPin for RppalInputPin {
    fn pin(&self) -> u8 {
        self.input.pin()
    }

    fn on_edge(
        &mut self,
        debounce: Duration,
        mut callback: EdgeCallback,
    ) -> Result<(), HardwareError> {
        let pin = self.input.pin();
        self.input
            .set_async_interrupt(Trigger::Both, Some(debounce), move |event: Event| {
                let edge = match event.trigger {
                    Trigger::RisingEdge => EdgeEvent::RisingEdge,
                    Trigger::FallingEdge => EdgeEvent::FallingEdge,
                    _ => return,
                };
                callback(RawEdge {
                    edge,
                    timestamp: event.timestamp,
                });
            })
            .map_err(|e| HardwareError::Interrupt {
                pin,
                message: e.to_string(),
            })
    }
}

struct RppalOutputPin {
    output: rppal::gpio::OutputPin,
}

impl OutputPin for RppalOutputPin {
    fn pin(&self) -> u8 {
        self.output.pin()
    }

    fn write(&mut self, level: Level) {
        self.output.write(match level {
            Level::High => rppal::gpio::Level::High,
            Level::Low => rppal::gpio::Level::Low,
        });
    }
}
