//! `/waste-records/` routes: a per-user log of collected waste, in the same
//! bare-record wire shape as `/pickups/`.

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Json,
};
use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};

use super::{AppState, DetailError};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WasteRecord {
    pub id: i64,
    pub user_id: i64,
    #[serde(rename = "type")]
    pub waste_type: String,
    pub weight: u32,
    pub collection_date: NaiveDate,
}

/// In-memory waste log in insertion order.
#[derive(Debug)]
pub struct WasteLog {
    records: Vec<WasteRecord>,
    next_id: i64,
}

impl Default for WasteLog {
    fn default() -> Self {
        Self::new()
    }
}

impl WasteLog {
    pub fn new() -> Self {
        Self {
            records: Vec::new(),
            next_id: 1,
        }
    }

    fn insert(&mut self, entry: CreateWasteRecord, today: NaiveDate) -> WasteRecord {
        let record = WasteRecord {
            id: self.next_id,
            user_id: entry.user_id,
            waste_type: entry.waste_type,
            weight: entry.weight,
            collection_date: entry.collection_date.unwrap_or(today),
        };
        self.next_id += 1;
        self.records.push(record.clone());
        record
    }

    fn for_user(&self, user_id: i64) -> Vec<WasteRecord> {
        self.records
            .iter()
            .filter(|r| r.user_id == user_id)
            .cloned()
            .collect()
    }

    /// Entries collected on or after `day`.
    pub(super) fn collected_since(&self, day: NaiveDate) -> usize {
        self.records
            .iter()
            .filter(|r| r.collection_date >= day)
            .count()
    }
}

#[derive(Debug, Deserialize)]
pub(super) struct CreateWasteRecord {
    user_id: i64,
    #[serde(rename = "type")]
    waste_type: String,
    weight: u32,
    /// Defaults to the server's current date.
    #[serde(default)]
    collection_date: Option<NaiveDate>,
}

pub(super) async fn create_waste_record(
    State(state): State<AppState>,
    payload: Result<Json<CreateWasteRecord>, JsonRejection>,
) -> Result<Json<WasteRecord>, DetailError> {
    let Json(mut body) = payload.map_err(|e| DetailError::bad_request(e.body_text()))?;
    body.waste_type = body.waste_type.trim().to_string();
    if body.waste_type.is_empty() {
        return Err(DetailError::bad_request("Waste type is required"));
    }

    let record = state
        .waste
        .lock()
        .await
        .insert(body, Local::now().date_naive());

    tracing::info!(
        record_id = record.id,
        user_id = record.user_id,
        waste_type = %record.waste_type,
        "waste record logged"
    );
    Ok(Json(record))
}

pub(super) async fn list_waste_records(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
) -> Json<Vec<WasteRecord>> {
    Json(state.waste.lock().await.for_user(user_id))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(user_id: i64, collection_date: Option<NaiveDate>) -> CreateWasteRecord {
        CreateWasteRecord {
            user_id,
            waste_type: "plastic".to_string(),
            weight: 3,
            collection_date,
        }
    }

    #[test]
    fn insert_defaults_collection_date_and_filters_by_user() {
        let today = NaiveDate::from_ymd_opt(2025, 7, 1).unwrap();
        let earlier = NaiveDate::from_ymd_opt(2025, 6, 20).unwrap();
        let mut log = WasteLog::new();

        let first = log.insert(entry(1, None), today);
        log.insert(entry(2, None), today);
        log.insert(entry(1, Some(earlier)), today);

        assert_eq!(first.id, 1);
        assert_eq!(first.collection_date, today);
        let ids: Vec<i64> = log.for_user(1).iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![1, 3]);
        assert!(log.for_user(9).is_empty());
        assert_eq!(log.collected_since(today), 2);
        assert_eq!(log.collected_since(earlier), 3);
    }

    #[test]
    fn record_serializes_type_key() {
        let record = WasteRecord {
            id: 1,
            user_id: 1,
            waste_type: "paper".to_string(),
            weight: 2,
            collection_date: NaiveDate::from_ymd_opt(2025, 7, 1).unwrap(),
        };
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["type"], "paper");
        assert_eq!(json["collection_date"], "2025-07-01");
    }
}
