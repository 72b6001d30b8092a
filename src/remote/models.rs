//! Wire records for the `seatbelt` resource.

use serde::{Deserialize, Serialize};

/// The remote view of one device's belt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteSeatBeltRecord {
    pub device_id: String,
    pub secured: bool,
}

/// Body of a GET response. Fields other than `secured` are ignored.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct StatusResponse {
    pub secured: bool,
}

/// Body of a POST request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeatBeltUpdate {
    pub secured: bool,
}
