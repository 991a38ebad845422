use std::time::Duration;

use reqwest::{Client, Response, Url};
use serde::de::DeserializeOwned;

use earthguard_core::PickupRequest;

use crate::error::PickupApiError;
use crate::types::{CancelAck, ErrorDetail, NewPickup, PickupRecord};

const SCHEDULE_FAILED: &str = "Failed to schedule pickup";
const LIST_FAILED: &str = "Failed to fetch pickups";
const CANCEL_FAILED: &str = "Failed to cancel pickup";

/// HTTP client for the pickup API (`/pickups/`).
///
/// Non-2xx responses become [`PickupApiError::RequestFailed`] carrying the
/// server's `detail` text. Nothing is retried.
pub struct PickupClient {
    client: Client,
    base_url: Url,
    user_id: i64,
}

impl PickupClient {
    /// Creates a client for the API rooted at `base_url`.
    ///
    /// `user_id` is attached to every pickup this client schedules.
    ///
    /// # Errors
    ///
    /// - [`PickupApiError::Http`] if the `reqwest::Client` cannot be built.
    /// - [`PickupApiError::InvalidBaseUrl`] if `base_url` does not parse.
    pub fn new(base_url: &str, timeout_secs: u64, user_id: i64) -> Result<Self, PickupApiError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent("earthguard/0.1 (pickup-client)")
            .build()?;

        // Exactly one trailing slash so `join` appends below the base path.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised).map_err(|e| PickupApiError::InvalidBaseUrl {
            base_url: base_url.to_owned(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            client,
            base_url,
            user_id,
        })
    }

    #[must_use]
    pub fn user_id(&self) -> i64 {
        self.user_id
    }

    /// `POST /pickups/` for a form submission.
    ///
    /// The request is sent as-is; callers validate it first with
    /// [`PickupRequest::validate`].
    ///
    /// # Errors
    ///
    /// - [`PickupApiError::RequestFailed`] on a non-2xx response.
    /// - [`PickupApiError::Http`] on network failure or timeout.
    /// - [`PickupApiError::Deserialize`] if the created record is malformed.
    pub async fn schedule_pickup(
        &self,
        request: &PickupRequest,
    ) -> Result<PickupRecord, PickupApiError> {
        let body = NewPickup::from_request(request, self.user_id);
        let url = self.endpoint("pickups/")?;
        tracing::debug!(%url, date = %body.date, time = %body.time, "scheduling pickup");

        let response = self.client.post(url).json(&body).send().await?;
        let record: PickupRecord = Self::read_json(response, SCHEDULE_FAILED, "created pickup").await?;

        tracing::info!(pickup_id = record.id, "pickup scheduled");
        Ok(record)
    }

    /// `GET /pickups/`.
    ///
    /// # Errors
    ///
    /// Same as [`PickupClient::schedule_pickup`].
    pub async fn list_pickups(&self) -> Result<Vec<PickupRecord>, PickupApiError> {
        let url = self.endpoint("pickups/")?;
        let response = self.client.get(url).send().await?;
        Self::read_json(response, LIST_FAILED, "pickup list").await
    }

    /// `DELETE /pickups/{id}`.
    ///
    /// # Errors
    ///
    /// Same as [`PickupClient::schedule_pickup`]; an unknown id surfaces as
    /// `RequestFailed` with the server's "not found" detail.
    pub async fn cancel_pickup(&self, id: i64) -> Result<CancelAck, PickupApiError> {
        let url = self.endpoint(&format!("pickups/{id}"))?;
        let response = self.client.delete(url).send().await?;
        let ack = Self::read_json(response, CANCEL_FAILED, "cancel acknowledgement").await?;

        tracing::info!(pickup_id = id, "pickup cancelled");
        Ok(ack)
    }

    fn endpoint(&self, path: &str) -> Result<Url, PickupApiError> {
        self.base_url
            .join(path)
            .map_err(|e| PickupApiError::InvalidBaseUrl {
                base_url: self.base_url.to_string(),
                reason: e.to_string(),
            })
    }

    async fn read_json<T: DeserializeOwned>(
        response: Response,
        fallback: &str,
        context: &str,
    ) -> Result<T, PickupApiError> {
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            let detail = failure_detail(&body, fallback);
            tracing::warn!(status = status.as_u16(), %detail, "pickup API request failed");
            return Err(PickupApiError::RequestFailed {
                status: status.as_u16(),
                detail,
            });
        }

        serde_json::from_str(&body).map_err(|source| PickupApiError::Deserialize {
            context: context.to_owned(),
            source,
        })
    }
}

/// The `detail` text of an error body, or `fallback` when there is none.
fn failure_detail(body: &str, fallback: &str) -> String {
    serde_json::from_str::<ErrorDetail>(body)
        .ok()
        .and_then(|d| d.text())
        .unwrap_or_else(|| fallback.to_owned())
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
