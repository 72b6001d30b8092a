//! Messages delivered to the foreground loop from background tasks.

use crate::controller::StartupOutcome;

#[derive(Debug, Clone)]
pub enum AppMessage {
    /// The startup push/fetch finished.
    StartupSynced(StartupOutcome),
}
