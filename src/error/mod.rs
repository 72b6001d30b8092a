//! Error types for the seatbelt client.
//!
//! Two error families exist and neither crosses into the other:
//!
//! | Error | Raised by | Handling |
//! |-------|-----------|----------|
//! | [`HardwareError`] | GPIO open / interrupt setup | caught once at startup, local-only mode |
//! | [`SyncError`] | remote fetch / push | caught at the call site, never fatal |

mod hardware;
mod sync;

pub use hardware::HardwareError;
pub use sync::SyncError;
