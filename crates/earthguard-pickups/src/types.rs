//! Pickup API wire types for `/pickups/`.
//!
//! ## Observed shape from the pickup backend
//!
//! ### `types`
//! The backend stores waste types as a JSON-encoded string column. Depending
//! on the code path a record comes back with `types` as a real array
//! (`["plastic","paper"]`), as that encoded string (`"[\"plastic\"]"`), or as
//! `null`. All three are normalised to `Vec<String>`; a string that does not
//! decode to an array becomes an empty list rather than a parse failure.
//!
//! ### `time`
//! Sent as `"HH:MM"`, echoed back as `"HH:MM:SS"`. Kept as text.
//!
//! ### `created_at`
//! Naive ISO-8601 timestamp without offset, e.g. `"2025-03-01T10:15:30.123456"`.
//! Absent on records produced by older servers.

use chrono::{NaiveDate, NaiveDateTime};
use earthguard_core::{PickupRequest, PickupStatus};
use serde::{Deserialize, Deserializer, Serialize};

/// Body of `POST /pickups/`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewPickup {
    pub address: String,
    pub date: NaiveDate,
    pub time: String,
    pub types: Vec<String>,
    pub special_instructions: String,
    pub user_id: i64,
}

impl NewPickup {
    /// Build the wire body for a validated form submission.
    #[must_use]
    pub fn from_request(request: &PickupRequest, user_id: i64) -> Self {
        Self {
            address: request.address.trim().to_string(),
            date: request.date,
            time: request.time_slot.format("%H:%M").to_string(),
            types: request
                .categories
                .iter()
                .map(|tag| tag.as_str().to_string())
                .collect(),
            special_instructions: request.instructions().unwrap_or_default().to_string(),
            user_id,
        }
    }
}

/// A pickup as returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct PickupRecord {
    pub id: i64,
    #[serde(default)]
    pub user_id: Option<i64>,
    pub date: NaiveDate,
    pub time: String,
    pub address: String,
    #[serde(default, deserialize_with = "deserialize_types")]
    pub types: Vec<String>,
    #[serde(default)]
    pub special_instructions: Option<String>,
    pub status: PickupStatus,
    #[serde(default)]
    pub created_at: Option<NaiveDateTime>,
}

/// Body of a successful `DELETE /pickups/{id}`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct CancelAck {
    pub message: String,
}

/// Error body used by the API: `{"detail": "..."}`.
#[derive(Debug, Deserialize)]
pub(crate) struct ErrorDetail {
    #[serde(default)]
    pub detail: serde_json::Value,
}

impl ErrorDetail {
    /// The detail as display text. Validation errors carry a list of
    /// objects instead of a string; those are rendered as compact JSON.
    pub(crate) fn text(&self) -> Option<String> {
        match &self.detail {
            serde_json::Value::Null => None,
            serde_json::Value::String(s) if s.trim().is_empty() => None,
            serde_json::Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawTypes {
    List(Vec<String>),
    Encoded(String),
}

/// Accepts `types` as an array, a JSON-encoded array string, or `null`.
///
/// # Errors
///
/// Fails only when the value is neither a string, an array of strings, nor
/// `null`.
pub fn deserialize_types<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<RawTypes>::deserialize(deserializer)?;
    Ok(match raw {
        None => Vec::new(),
        Some(RawTypes::List(types)) => types,
        Some(RawTypes::Encoded(encoded)) => {
            serde_json::from_str::<Vec<String>>(&encoded).unwrap_or_default()
        }
    })
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use chrono::NaiveTime;
    use earthguard_core::CategoryTag;

    use super::*;

    fn record_json(types: serde_json::Value) -> serde_json::Value {
        serde_json::json!({
            "id": 7,
            "user_id": 1,
            "date": "2025-03-02",
            "time": "10:00:00",
            "address": "12 College Road, Nashik",
            "types": types,
            "special_instructions": "",
            "status": "Scheduled",
            "created_at": "2025-03-01T10:15:30.123456"
        })
    }

    #[test]
    fn types_as_array() {
        let record: PickupRecord =
            serde_json::from_value(record_json(serde_json::json!(["plastic", "paper"]))).unwrap();
        assert_eq!(record.types, vec!["plastic", "paper"]);
        assert_eq!(record.status, PickupStatus::Scheduled);
        assert!(record.created_at.is_some());
    }

    #[test]
    fn types_as_encoded_string() {
        let record: PickupRecord =
            serde_json::from_value(record_json(serde_json::json!("[\"electronics\"]"))).unwrap();
        assert_eq!(record.types, vec!["electronics"]);
    }

    #[test]
    fn types_null_or_garbage_is_empty() {
        let record: PickupRecord =
            serde_json::from_value(record_json(serde_json::Value::Null)).unwrap();
        assert!(record.types.is_empty());

        let record: PickupRecord =
            serde_json::from_value(record_json(serde_json::json!("plastic, paper"))).unwrap();
        assert!(record.types.is_empty());
    }

    #[test]
    fn missing_optional_fields_default() {
        let record: PickupRecord = serde_json::from_value(serde_json::json!({
            "id": 1,
            "date": "2025-03-02",
            "time": "09:00",
            "address": "a",
            "status": "Cancelled"
        }))
        .unwrap();
        assert_eq!(record.user_id, None);
        assert!(record.types.is_empty());
        assert_eq!(record.created_at, None);
        assert_eq!(record.status, PickupStatus::Cancelled);
    }

    #[test]
    fn new_pickup_from_request() {
        let request = PickupRequest {
            date: NaiveDate::from_ymd_opt(2025, 3, 2).unwrap(),
            time_slot: NaiveTime::from_hms_opt(14, 0, 0).unwrap(),
            categories: BTreeSet::from([CategoryTag::Electronics, CategoryTag::Recyclables]),
            address: "  12 College Road ".to_string(),
            special_instructions: Some("   ".to_string()),
        };

        let body = serde_json::to_value(NewPickup::from_request(&request, 1)).unwrap();

        assert_eq!(
            body,
            serde_json::json!({
                "address": "12 College Road",
                "date": "2025-03-02",
                "time": "14:00",
                "types": ["recyclables", "electronics"],
                "special_instructions": "",
                "user_id": 1
            })
        );
    }

    #[test]
    fn detail_text_handles_string_and_list() {
        let d: ErrorDetail = serde_json::from_str(r#"{"detail":"Pickup not found"}"#).unwrap();
        assert_eq!(d.text().as_deref(), Some("Pickup not found"));

        let d: ErrorDetail =
            serde_json::from_str(r#"{"detail":[{"loc":["body","date"],"msg":"bad"}]}"#).unwrap();
        assert!(d.text().unwrap().contains("bad"));

        let d: ErrorDetail = serde_json::from_str(r#"{"detail":""}"#).unwrap();
        assert_eq!(d.text(), None);
    }
}
