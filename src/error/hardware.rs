//! GPIO hardware errors.

use thiserror::Error;

/// The GPIO controller or a pin could not be used.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum HardwareError {
    /// No GPIO controller on this device.
    #[error("GPIO controller unavailable: {0}")]
    Unavailable(String),

    /// A pin could not be opened or configured.
    #[error("GPIO pin {pin} unavailable: {message}")]
    Pin { pin: u8, message: String },

    /// Edge notifications could not be enabled on a pin.
    #[error("GPIO pin {pin} interrupt setup failed: {message}")]
    Interrupt { pin: u8, message: String },
}
