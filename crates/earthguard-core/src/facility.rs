use std::collections::{BTreeSet, HashSet};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::category::CategoryTag;
use crate::{ConfigError, CoreError};

const BUNDLED_FACILITIES: &str = include_str!("../../../config/facilities.yaml");

const EARTH_RADIUS_KM: f64 = 6371.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OperatingHours {
    pub weekdays: String,
    pub saturday: String,
    pub sunday: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinates {
    /// Build a position, rejecting non-finite or out-of-range degrees.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidCoordinates` unless latitude is within
    /// `[-90, 90]` and longitude within `[-180, 180]`.
    pub fn new(lat: f64, lng: f64) -> Result<Self, CoreError> {
        let position = Self { lat, lng };
        if position.is_valid() {
            Ok(position)
        } else {
            Err(CoreError::InvalidCoordinates { lat, lng })
        }
    }

    #[must_use]
    pub fn is_valid(&self) -> bool {
        (-90.0..=90.0).contains(&self.lat) && (-180.0..=180.0).contains(&self.lng)
    }

    /// Great-circle (haversine) distance to `other` in kilometres.
    #[must_use]
    pub fn distance_km(&self, other: &Coordinates) -> f64 {
        let (lat1, lat2) = (self.lat.to_radians(), other.lat.to_radians());
        let d_lat = (other.lat - self.lat).to_radians();
        let d_lng = (other.lng - self.lng).to_radians();
        let a = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lng / 2.0).sin().powi(2);
        2.0 * EARTH_RADIUS_KM * a.sqrt().asin()
    }
}

/// A waste drop-off location. Reference data: never mutated after load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FacilityRecord {
    pub id: i64,
    pub name: String,
    pub address: String,
    pub phone: String,
    pub email: String,
    #[serde(default)]
    pub website: Option<String>,
    pub accepted_categories: BTreeSet<CategoryTag>,
    pub hours: OperatingHours,
    /// Average review score in `[0, 5]`.
    pub rating: f64,
    pub review_count: u32,
    pub distance_km: f64,
    pub coordinates: Coordinates,
    #[serde(default)]
    pub features: Vec<String>,
    #[serde(default)]
    pub accepted_materials: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct FacilitiesFile {
    pub facilities: Vec<FacilityRecord>,
}

/// Load and validate a facilities collection from a YAML file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_facilities(path: &Path) -> Result<Vec<FacilityRecord>, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FacilitiesFileIo {
        path: path.display().to_string(),
        source: e,
    })?;
    parse_facilities(&content)
}

/// The sample Nashik facility directory bundled with the crate.
///
/// # Errors
///
/// Returns `ConfigError` if the bundled YAML is malformed or fails validation.
pub fn builtin_facilities() -> Result<Vec<FacilityRecord>, ConfigError> {
    parse_facilities(BUNDLED_FACILITIES)
}

fn parse_facilities(content: &str) -> Result<Vec<FacilityRecord>, ConfigError> {
    let file: FacilitiesFile = serde_yaml::from_str(content)?;
    validate_facilities(&file.facilities)?;
    Ok(file.facilities)
}

fn validate_facilities(facilities: &[FacilityRecord]) -> Result<(), ConfigError> {
    let mut seen_ids = HashSet::new();

    for facility in facilities {
        if facility.name.trim().is_empty() {
            return Err(ConfigError::Validation(format!(
                "facility {} has an empty name",
                facility.id
            )));
        }

        if !seen_ids.insert(facility.id) {
            return Err(ConfigError::Validation(format!(
                "duplicate facility id: {}",
                facility.id
            )));
        }

        if !facility.rating.is_finite() || !(0.0..=5.0).contains(&facility.rating) {
            return Err(ConfigError::Validation(format!(
                "facility '{}' has invalid rating {}; must be within 0..=5",
                facility.name, facility.rating
            )));
        }

        if !facility.distance_km.is_finite() || facility.distance_km < 0.0 {
            return Err(ConfigError::Validation(format!(
                "facility '{}' has invalid distance {}; must be non-negative",
                facility.name, facility.distance_km
            )));
        }

        if !facility.coordinates.is_valid() {
            return Err(ConfigError::Validation(format!(
                "facility '{}' has invalid coordinates ({}, {})",
                facility.name, facility.coordinates.lat, facility.coordinates.lng
            )));
        }

        if facility.accepted_categories.is_empty() {
            return Err(ConfigError::Validation(format!(
                "facility '{}' accepts no waste categories",
                facility.name
            )));
        }
    }

    Ok(())
}
