//! Color theme constants for the seatbelt dashboard.

use ratatui::style::Color;

/// Indicator fill while the belt is secured.
pub const COLOR_ENGAGED: Color = Color::Red;

/// Indicator fill while the belt is not secured.
pub const COLOR_DISENGAGED: Color = Color::Gray;

/// Text drawn on top of the indicator fill.
pub const COLOR_INDICATOR_TEXT: Color = Color::Black;

/// Primary border color
pub const COLOR_BORDER: Color = Color::DarkGray;

/// Header text color
pub const COLOR_HEADER: Color = Color::White;

/// Dim text for timestamps and the footer
pub const COLOR_DIM: Color = Color::DarkGray;

/// Transcript lines reporting a failure
pub const COLOR_ERROR: Color = Color::LightRed;
