//! UI sink trait abstraction.
//!
//! The reconciliation core only pushes into the UI; it never reads back.

/// Visual state of the belt indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Indicator {
    /// Belt buckled.
    Engaged,
    /// Belt released or unknown.
    Disengaged,
}

/// One-directional sink for everything the user sees.
pub trait UiSink {
    /// Recolour the indicator.
    fn set_indicator(&mut self, indicator: Indicator);

    /// Replace the status label text.
    fn set_status_label(&mut self, text: &str);

    /// Append one line to the status transcript.
    fn append_status_line(&mut self, text: &str);
}

impl<T: UiSink + ?Sized> UiSink for Box<T> {
    fn set_indicator(&mut self, indicator: Indicator) {
        (**self).set_indicator(indicator)
    }

    fn set_status_label(&mut self, text: &str) {
        (**self).set_status_label(text)
    }

    fn append_status_line(&mut self, text: &str) {
        (**self).append_status_line(text)
    }
}
