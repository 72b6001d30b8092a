//! Single-attempt GET/POST client for the seatbelt resource.

use reqwest::Url;

use crate::error::SyncError;
use crate::remote::{RemoteSeatBeltRecord, SeatBeltUpdate, StatusResponse};
use crate::traits::{Headers, HttpClient, HttpError};

/// Path of the seatbelt resource, relative to the base URL.
pub const RESOURCE_PATH: &str = "seatbelt";

/// Content type of POST bodies.
pub const JSON_CONTENT_TYPE: &str = "application/json; charset=utf-8";

/// Client for `GET`/`POST <base>seatbelt?id=<device>`.
///
/// Every call is exactly one round trip. Retrying is the caller's business.
#[derive(Debug, Clone)]
pub struct RemoteSyncClient<C> {
    http: C,
    resource: Url,
}

impl<C: HttpClient> RemoteSyncClient<C> {
    /// Fails with [`SyncError::Transport`] if `base_url` is not an absolute URL.
    pub fn new(http: C, base_url: &str) -> Result<Self, SyncError> {
        let invalid = |message: String| SyncError::Transport {
            url: base_url.to_string(),
            source: HttpError::InvalidUrl(message),
        };
        let base = Url::parse(base_url).map_err(|e| invalid(e.to_string()))?;
        if base.cannot_be_a_base() {
            return Err(invalid("not a base URL".to_string()));
        }
        let resource = base.join(RESOURCE_PATH).map_err(|e| invalid(e.to_string()))?;
        Ok(Self { http, resource })
    }

    /// Full request URL for `device_id`.
    pub fn url_for(&self, device_id: &str) -> String {
        let mut url = self.resource.clone();
        url.query_pairs_mut().append_pair("id", device_id);
        url.into()
    }

    /// Fetch the remote record for `device_id`.
    ///
    /// Transport failures, non-2xx statuses and bodies without a boolean
    /// `secured` field are all reported as [`SyncError`].
    pub async fn fetch_status(&self, device_id: &str) -> Result<RemoteSeatBeltRecord, SyncError> {
        let url = self.url_for(device_id);
        let mut headers = Headers::new();
        headers.insert("Accept".to_string(), "application/json".to_string());

        tracing::debug!(%url, "fetching remote seatbelt status");
        let response = self
            .http
            .get(&url, &headers)
            .await
            .map_err(|source| SyncError::Transport {
                url: url.clone(),
                source,
            })?;

        if !response.is_success() {
            return Err(SyncError::Status {
                url,
                status: response.status,
                body: response.text_lossy(),
            });
        }

        let status: StatusResponse = response.json().map_err(|e| SyncError::Decode {
            url: url.clone(),
            message: e.to_string(),
        })?;

        Ok(RemoteSeatBeltRecord {
            device_id: device_id.to_string(),
            secured: status.secured,
        })
    }

    /// Push `secured` for `device_id`.
    ///
    /// Any response that arrives counts as success; its status is only
    /// logged and its body is not read.
    pub async fn push_status(&self, device_id: &str, secured: bool) -> Result<(), SyncError> {
        let url = self.url_for(device_id);
        let body = serde_json::to_string(&SeatBeltUpdate { secured })
            .map_err(|e| SyncError::Encode(e.to_string()))?;
        let mut headers = Headers::new();
        headers.insert("Content-Type".to_string(), JSON_CONTENT_TYPE.to_string());

        tracing::debug!(%url, secured, "pushing seatbelt status");
        let response = self
            .http
            .post(&url, &body, &headers)
            .await
            .map_err(|source| SyncError::Transport {
                url: url.clone(),
                source,
            })?;

        if !response.is_success() {
            tracing::warn!(%url, status = response.status, "remote answered push with non-2xx status");
        }
        Ok(())
    }
}
