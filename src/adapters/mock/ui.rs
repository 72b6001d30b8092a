//! Recording UI sink for testing.

use crate::traits::{Indicator, UiSink};

/// A UI call, in the order it was made.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiCall {
    Indicator(Indicator),
    Label(String),
    Line(String),
}

/// UI sink that keeps everything it is told.
#[derive(Debug, Clone, Default)]
pub struct RecordingUi {
    pub indicator: Option<Indicator>,
    pub label: Option<String>,
    pub transcript: Vec<String>,
    pub calls: Vec<UiCall>,
}

impl RecordingUi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of transcript lines equal to `line`.
    pub fn count_lines(&self, line: &str) -> usize {
        self.transcript.iter().filter(|l| l.as_str() == line).count()
    }

    pub fn has_line(&self, line: &str) -> bool {
        self.count_lines(line) > 0
    }
}

impl UiSink for RecordingUi {
    fn set_indicator(&mut self, indicator: Indicator) {
        self.indicator = Some(indicator);
        self.calls.push(UiCall::Indicator(indicator));
    }

    fn set_status_label(&mut self, text: &str) {
        self.label = Some(text.to_string());
        self.calls.push(UiCall::Label(text.to_string()));
    }

    fn append_status_line(&mut self, text: &str) {
        self.transcript.push(text.to_string());
        self.calls.push(UiCall::Line(text.to_string()));
    }
}
