//! Remote sync client.
//!
//! The remote service is the authoritative record of each device's belt.
//! [`RemoteSyncClient`] talks to it over the [`HttpClient`](crate::traits::HttpClient)
//! seam and folds every failure into [`SyncError`](crate::error::SyncError).

mod client;
mod models;
mod queue;

pub use client::{RemoteSyncClient, JSON_CONTENT_TYPE, RESOURCE_PATH};
pub use models::{RemoteSeatBeltRecord, SeatBeltUpdate, StatusResponse};
pub use queue::{PushQueue, PushReceipt};
