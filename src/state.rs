//! Local belief about the belt, and its visible side effects.
//!
//! [`BeltState::set_secured`] is the only way to change the flag. It
//! drives the LED and the UI in the same call, so no caller can observe
//! the flag, the pin and the label disagreeing.

use crate::gpio::OutputHandle;
use crate::traits::{Indicator, Level, UiSink};

/// Label shown while the belt is buckled.
pub const LABEL_SECURED: &str = "Secured";
/// Label shown while the belt is released or unknown.
pub const LABEL_NOT_SECURED: &str = "Not Secured";

/// Owner of the secured flag, the optional LED and the UI sink.
#[derive(Debug)]
pub struct BeltState<U> {
    secured: bool,
    output: Option<OutputHandle>,
    ui: U,
}

impl<U: UiSink> BeltState<U> {
    /// `output` is `None` in local-only mode.
    pub fn new(output: Option<OutputHandle>, ui: U) -> Self {
        Self {
            secured: false,
            output,
            ui,
        }
    }

    /// Last value passed to [`set_secured`](Self::set_secured), `false` before any.
    pub fn secured(&self) -> bool {
        self.secured
    }

    /// Record `secured` and update the LED, indicator and label, in that order.
    pub fn set_secured(&mut self, secured: bool) {
        self.secured = secured;

        if let Some(output) = self.output.as_mut() {
            output.write(Level::from(secured));
        }

        if secured {
            self.ui.set_indicator(Indicator::Engaged);
            self.ui.set_status_label(LABEL_SECURED);
        } else {
            self.ui.set_indicator(Indicator::Disengaged);
            self.ui.set_status_label(LABEL_NOT_SECURED);
        }
    }

    /// True when an output pin is driven, false in local-only mode.
    pub fn has_output(&self) -> bool {
        self.output.is_some()
    }

    pub fn output(&self) -> Option<&OutputHandle> {
        self.output.as_ref()
    }

    pub fn ui(&self) -> &U {
        &self.ui
    }

    pub fn ui_mut(&mut self) -> &mut U {
        &mut self.ui
    }
}
