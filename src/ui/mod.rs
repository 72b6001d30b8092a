//! Terminal dashboard.
//!
//! Shows the belt indicator, the status label and the status transcript.

mod dashboard;
mod render;
pub mod theme;

pub use dashboard::{Dashboard, TranscriptEntry};
pub use render::render;
