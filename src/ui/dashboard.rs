//! Dashboard view state.
//!
//! [`Dashboard`] is the UI sink the controller writes into; the renderer
//! only reads it.

use chrono::{DateTime, Local};

use crate::state::LABEL_NOT_SECURED;
use crate::traits::{Indicator, UiSink};

/// One line of the status transcript.
#[derive(Debug, Clone, PartialEq)]
pub struct TranscriptEntry {
    pub at: DateTime<Local>,
    pub text: String,
}

#[derive(Debug, Clone)]
pub struct Dashboard {
    indicator: Indicator,
    label: String,
    transcript: Vec<TranscriptEntry>,
    device_id: String,
    local_only: bool,
    /// Also emit transcript lines and label changes through `tracing`
    mirror_to_log: bool,
    /// Whether a redraw is pending
    dirty: bool,
}

impl Dashboard {
    pub fn new(device_id: impl Into<String>) -> Self {
        Self {
            indicator: Indicator::Disengaged,
            label: LABEL_NOT_SECURED.to_string(),
            transcript: Vec::new(),
            device_id: device_id.into(),
            local_only: false,
            mirror_to_log: false,
            dirty: true,
        }
    }

    /// Mirror everything shown to the log (headless mode).
    pub fn with_log_mirror(mut self, enabled: bool) -> Self {
        self.mirror_to_log = enabled;
        self
    }

    pub fn set_local_only(&mut self, local_only: bool) {
        self.local_only = local_only;
        self.dirty = true;
    }

    pub fn indicator(&self) -> Indicator {
        self.indicator
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn transcript(&self) -> &[TranscriptEntry] {
        &self.transcript
    }

    pub fn device_id(&self) -> &str {
        &self.device_id
    }

    pub fn is_local_only(&self) -> bool {
        self.local_only
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub fn mark_clean(&mut self) {
        self.dirty = false;
    }
}

impl UiSink for Dashboard {
    fn set_indicator(&mut self, indicator: Indicator) {
        self.indicator = indicator;
        self.dirty = true;
    }

    fn set_status_label(&mut self, text: &str) {
        if self.mirror_to_log {
            tracing::info!(status = text, "belt status");
        }
        self.label = text.to_string();
        self.dirty = true;
    }

    fn append_status_line(&mut self, text: &str) {
        if self.mirror_to_log {
            tracing::info!("{}", text);
        }
        self.transcript.push(TranscriptEntry {
            at: Local::now(),
            text: text.to_string(),
        });
        self.dirty = true;
    }
}
