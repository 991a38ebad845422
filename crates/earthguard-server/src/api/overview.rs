//! `/overview/*` figures for the dashboard's Overview tab.
//!
//! Only `recycled` is derived from the waste log (entries collected today);
//! the other figures are the fixed sample values the dashboard ships with.

use axum::{extract::State, Json};
use chrono::Local;
use serde::Serialize;

use super::AppState;

#[derive(Debug, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub(super) struct OverviewStats {
    pub recycled: usize,
    pub recycled_change: i64,
    pub composted: i64,
    pub composted_change: i64,
    pub e_waste: i64,
    pub e_waste_change: i64,
    pub ideas: i64,
    pub ideas_change: i64,
}

impl OverviewStats {
    fn with_recycled(recycled: usize) -> Self {
        Self {
            recycled,
            recycled_change: 12,
            composted: 84,
            composted_change: 8,
            e_waste: 23,
            e_waste_change: 15,
            ideas: 56,
            ideas_change: 5,
        }
    }
}

#[derive(Debug, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub(super) struct ImpactMetrics {
    pub tree_saved: i64,
    pub water_saved: i64,
    pub co2_reduced: i64,
}

const IMPACT: ImpactMetrics = ImpactMetrics {
    tree_saved: 47,
    water_saved: 1250,
    co2_reduced: 890,
};

pub(super) async fn stats(State(state): State<AppState>) -> Json<OverviewStats> {
    let today = Local::now().date_naive();
    let recycled = state.waste.lock().await.collected_since(today);
    Json(OverviewStats::with_recycled(recycled))
}

pub(super) async fn impact() -> Json<ImpactMetrics> {
    Json(IMPACT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_keys_are_camel_case() {
        let stats = serde_json::to_value(OverviewStats::with_recycled(3)).unwrap();
        assert_eq!(stats["recycled"], 3);
        assert_eq!(stats["eWaste"], 23);
        assert_eq!(stats["eWasteChange"], 15);

        let impact = serde_json::to_value(IMPACT).unwrap();
        assert_eq!(impact["treeSaved"], 47);
        assert_eq!(impact["co2Reduced"], 890);
    }
}
