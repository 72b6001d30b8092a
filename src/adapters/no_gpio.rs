//! Controller for machines without GPIO.

use crate::error::HardwareError;
use crate::traits::{GpioController, InputPin, OutputPin};

/// Fails every pin request with [`HardwareError::Unavailable`].
///
/// Used when the `rppal` feature is off or the GPIO device cannot be
/// opened, so the app falls back to local-only mode.
#[derive(Debug, Clone)]
pub struct NoGpio {
    reason: String,
}

impl NoGpio {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

impl GpioController for NoGpio {
    fn open_input(&mut self, _pin: u8) -> Result<Box<dyn InputPin>, HardwareError> {
        Err(HardwareError::Unavailable(self.reason.clone()))
    }

    fn open_output(&mut self, _pin: u8) -> Result<Box<dyn OutputPin>, HardwareError> {
        Err(HardwareError::Unavailable(self.reason.clone()))
    }
}
