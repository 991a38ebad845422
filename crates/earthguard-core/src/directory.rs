//! Drop-off facility directory and its filter/sort query pipeline.
//!
//! [`query`] is pure: it borrows the records, never reorders or mutates the
//! input, and returns the matching subset in display order. Both filters are a
//! plain predicate intersection, and every sort is stable so equal keys keep
//! their input order.

use std::cmp::Ordering;
use std::str::FromStr;

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde::{Deserialize, Serialize};

use crate::app_config::AppConfig;
use crate::category::CategoryFilter;
use crate::facility::{builtin_facilities, load_facilities, Coordinates, FacilityRecord};
use crate::{ConfigError, CoreError};

const DIRECTIONS_BASE: &str = "https://www.google.com/maps/dir/?api=1&destination=";

/// Characters left unescaped by JavaScript's `encodeURIComponent`.
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    /// Nearest first.
    #[default]
    Distance,
    /// Best rated first.
    Rating,
    /// Alphabetical.
    Name,
}

impl FromStr for SortKey {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "distance" => Ok(SortKey::Distance),
            "rating" => Ok(SortKey::Rating),
            "name" => Ok(SortKey::Name),
            _ => Err(CoreError::UnknownSortKey(s.to_string())),
        }
    }
}

impl std::fmt::Display for SortKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SortKey::Distance => f.write_str("distance"),
            SortKey::Rating => f.write_str("rating"),
            SortKey::Name => f.write_str("name"),
        }
    }
}

/// The `(category, search, sort)` triple driving a directory query.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DirectoryQuery {
    pub category: CategoryFilter,
    pub search: String,
    pub sort: SortKey,
}

impl DirectoryQuery {
    #[must_use]
    pub fn new(category: impl Into<CategoryFilter>, search: impl Into<String>, sort: SortKey) -> Self {
        Self {
            category: category.into(),
            search: search.into(),
            sort,
        }
    }
}

/// Filter and sort `records` for display.
///
/// A record is kept when it passes the category filter and the
/// case-insensitive search over name, address and accepted materials.
/// An empty result is a normal outcome.
#[must_use]
pub fn query<'a>(records: &'a [FacilityRecord], q: &DirectoryQuery) -> Vec<&'a FacilityRecord> {
    let needle = q.search.to_lowercase();

    let mut matches: Vec<&FacilityRecord> = records
        .iter()
        .filter(|record| q.category.matches(&record.accepted_categories))
        .filter(|record| matches_search(record, &needle))
        .collect();

    // `sort_by` is stable.
    match q.sort {
        SortKey::Distance => matches.sort_by(|a, b| a.distance_km.total_cmp(&b.distance_km)),
        SortKey::Rating => matches.sort_by(|a, b| b.rating.total_cmp(&a.rating)),
        SortKey::Name => matches.sort_by(|a, b| compare_names(&a.name, &b.name)),
    }

    matches
}

fn matches_search(record: &FacilityRecord, needle: &str) -> bool {
    if needle.is_empty() {
        return true;
    }
    record.name.to_lowercase().contains(needle)
        || record.address.to_lowercase().contains(needle)
        || record
            .accepted_materials
            .iter()
            .any(|material| material.to_lowercase().contains(needle))
}

/// Collation approximating a locale-aware compare: case is ignored first and
/// only breaks ties between names that differ solely in case.
fn compare_names(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

/// Google Maps directions link to the facility's address.
#[must_use]
pub fn directions_url(record: &FacilityRecord) -> String {
    format!(
        "{DIRECTIONS_BASE}{}",
        utf8_percent_encode(&record.address, URI_COMPONENT)
    )
}

/// Read-only facility collection shared by the CLI and the service.
#[derive(Debug, Clone)]
pub struct Directory {
    records: Vec<FacilityRecord>,
}

impl Directory {
    #[must_use]
    pub fn new(records: Vec<FacilityRecord>) -> Self {
        Self { records }
    }

    /// Loads `config.facilities_path` when set, otherwise the bundled sample
    /// directory.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the facilities cannot be loaded or validated.
    pub fn from_config(config: &AppConfig) -> Result<Self, ConfigError> {
        let records = match &config.facilities_path {
            Some(path) => load_facilities(path)?,
            None => builtin_facilities()?,
        };
        Ok(Self::new(records))
    }

    #[must_use]
    pub fn records(&self) -> &[FacilityRecord] {
        &self.records
    }

    #[must_use]
    pub fn get(&self, id: i64) -> Option<&FacilityRecord> {
        self.records.iter().find(|r| r.id == id)
    }

    #[must_use]
    pub fn query(&self, q: &DirectoryQuery) -> Vec<&FacilityRecord> {
        query(&self.records, q)
    }

    /// Recompute distances from the user's position.
    ///
    /// Location is best effort: `None` (denied or unavailable) or an invalid
    /// position returns the directory unchanged.
    #[must_use]
    pub fn relocated(&self, origin: Option<Coordinates>) -> Directory {
        let Some(origin) = origin.filter(Coordinates::is_valid) else {
            return self.clone();
        };
        let records = self
            .records
            .iter()
            .map(|record| FacilityRecord {
                distance_km: origin.distance_km(&record.coordinates),
                ..record.clone()
            })
            .collect();
        Directory::new(records)
    }
}

#[cfg(test)]
#[path = "directory_test.rs"]
mod tests;
