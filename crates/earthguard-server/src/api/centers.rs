use std::str::FromStr;

use axum::{
    extract::{Path, Query, State},
    Extension, Json,
};
use earthguard_core::{directions_url, Coordinates, DirectoryQuery, FacilityRecord, SortKey};
use serde::{Deserialize, Serialize};

use crate::middleware::RequestId;

use super::{ApiError, ApiResponse, AppState};

#[derive(Debug, Default, Deserialize)]
pub(super) struct CentersQuery {
    pub category: Option<String>,
    pub search: Option<String>,
    pub sort: Option<String>,
    /// Caller position; distances are recomputed only when both are given.
    pub lat: Option<f64>,
    pub lng: Option<f64>,
}

#[derive(Debug, Serialize)]
pub(super) struct CenterItem {
    #[serde(flatten)]
    pub record: FacilityRecord,
    pub directions_url: String,
}

impl From<&FacilityRecord> for CenterItem {
    fn from(record: &FacilityRecord) -> Self {
        Self {
            directions_url: directions_url(record),
            record: record.clone(),
        }
    }
}

pub(super) async fn list_centers(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Query(params): Query<CentersQuery>,
) -> Result<Json<ApiResponse<Vec<CenterItem>>>, ApiError> {
    let sort = match params.sort.as_deref().map(str::trim) {
        None | Some("") => SortKey::default(),
        Some(raw) => SortKey::from_str(raw)
            .map_err(|e| ApiError::new(req_id.0.clone(), "bad_request", e.to_string()))?,
    };
    let query = DirectoryQuery::new(
        params.category.as_deref().unwrap_or_default(),
        params.search.unwrap_or_default(),
        sort,
    );

    let origin = params
        .lat
        .zip(params.lng)
        .map(|(lat, lng)| Coordinates::new(lat, lng))
        .transpose()
        .map_err(|e| ApiError::new(req_id.0.clone(), "bad_request", e.to_string()))?;
    let directory = state.directory.relocated(origin);
    let data: Vec<CenterItem> = directory.query(&query).into_iter().map(CenterItem::from).collect();

    tracing::debug!(
        category = %query.category,
        search = %query.search,
        sort = %query.sort,
        results = data.len(),
        "directory query"
    );

    Ok(Json(ApiResponse::new(data, req_id.0)))
}

pub(super) async fn get_center(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<CenterItem>>, ApiError> {
    let Some(record) = state.directory.get(id) else {
        return Err(ApiError::new(
            req_id.0,
            "not_found",
            format!("recycling center {id} not found"),
        ));
    };
    Ok(Json(ApiResponse::new(CenterItem::from(record), req_id.0)))
}
