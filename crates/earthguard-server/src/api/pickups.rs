//! `/pickups/` routes.
//!
//! These keep the wire contract of the pickup backend the web client was
//! written against: bare JSON records on success and `{"detail": "..."}` on
//! failure, without the `{data, meta}` envelope used under `/api/v1`.

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Json,
};
use chrono::{NaiveDate, NaiveTime, Utc};
use earthguard_core::PickupStatus;
use earthguard_pickups::{CancelAck, PickupRecord};
use serde::Deserialize;

use super::{AppState, DetailError};

const DEFAULT_USER_ID: i64 = 1;

/// In-memory pickup records in creation order.
#[derive(Debug)]
pub struct PickupStore {
    records: Vec<PickupRecord>,
    next_id: i64,
}

impl Default for PickupStore {
    fn default() -> Self {
        Self::new()
    }
}

impl PickupStore {
    pub fn new() -> Self {
        Self {
            records: Vec::new(),
            next_id: 1,
        }
    }

    fn insert(&mut self, pickup: ValidPickup) -> PickupRecord {
        let record = PickupRecord {
            id: self.next_id,
            user_id: Some(pickup.user_id),
            date: pickup.date,
            time: pickup.time.format("%H:%M:%S").to_string(),
            address: pickup.address,
            types: pickup.types,
            special_instructions: Some(pickup.special_instructions),
            status: PickupStatus::Scheduled,
            created_at: Some(Utc::now().naive_utc()),
        };
        self.next_id += 1;
        self.records.push(record.clone());
        record
    }

    /// Mark `id` cancelled. Returns `false` if no such pickup exists.
    fn cancel(&mut self, id: i64) -> bool {
        match self.records.iter_mut().find(|r| r.id == id) {
            Some(record) => {
                record.status = PickupStatus::Cancelled;
                true
            }
            None => false,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(super) struct CreatePickup {
    address: String,
    date: NaiveDate,
    time: String,
    #[serde(default, deserialize_with = "earthguard_pickups::types::deserialize_types")]
    types: Vec<String>,
    #[serde(default)]
    special_instructions: Option<String>,
    #[serde(default)]
    user_id: Option<i64>,
}

#[derive(Debug)]
struct ValidPickup {
    address: String,
    date: NaiveDate,
    time: NaiveTime,
    types: Vec<String>,
    special_instructions: String,
    user_id: i64,
}

impl CreatePickup {
    fn validate(self) -> Result<ValidPickup, DetailError> {
        let address = self.address.trim().to_string();
        if address.is_empty() {
            return Err(DetailError::bad_request("Address is required"));
        }

        let types: Vec<String> = self
            .types
            .into_iter()
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .collect();
        if types.is_empty() {
            return Err(DetailError::bad_request(
                "At least one waste type is required",
            ));
        }

        let time = parse_time(&self.time).ok_or_else(|| {
            DetailError::bad_request(format!("Invalid pickup time '{}'", self.time))
        })?;

        Ok(ValidPickup {
            address,
            date: self.date,
            time,
            types,
            special_instructions: self.special_instructions.unwrap_or_default(),
            user_id: self.user_id.unwrap_or(DEFAULT_USER_ID),
        })
    }
}

/// Accepts `HH:MM` and `HH:MM:SS`.
fn parse_time(raw: &str) -> Option<NaiveTime> {
    let raw = raw.trim();
    NaiveTime::parse_from_str(raw, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(raw, "%H:%M"))
        .ok()
}

pub(super) async fn list_pickups(State(state): State<AppState>) -> Json<Vec<PickupRecord>> {
    let store = state.pickups.lock().await;
    Json(store.records.clone())
}

pub(super) async fn create_pickup(
    State(state): State<AppState>,
    payload: Result<Json<CreatePickup>, JsonRejection>,
) -> Result<Json<PickupRecord>, DetailError> {
    let Json(body) = payload.map_err(|e| DetailError::bad_request(e.body_text()))?;
    let pickup = body.validate()?;

    let record = state.pickups.lock().await.insert(pickup);

    tracing::info!(
        pickup_id = record.id,
        date = %record.date,
        time = %record.time,
        "pickup scheduled"
    );
    Ok(Json(record))
}

pub(super) async fn cancel_pickup(
    State(state): State<AppState>,
    Path(pickup_id): Path<i64>,
) -> Result<Json<CancelAck>, DetailError> {
    if !state.pickups.lock().await.cancel(pickup_id) {
        return Err(DetailError::not_found("Pickup not found"));
    }

    tracing::info!(pickup_id, "pickup cancelled");
    Ok(Json(CancelAck {
        message: "Pickup cancelled successfully".to_string(),
    }))
}
