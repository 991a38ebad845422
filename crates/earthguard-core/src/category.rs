use std::collections::BTreeSet;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::CoreError;

/// Waste category vocabulary shared by facilities and pickups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CategoryTag {
    Recyclables,
    Organic,
    Electronics,
    Hazardous,
    Furniture,
    Textiles,
}

impl CategoryTag {
    pub const ALL: [CategoryTag; 6] = [
        CategoryTag::Recyclables,
        CategoryTag::Organic,
        CategoryTag::Electronics,
        CategoryTag::Hazardous,
        CategoryTag::Furniture,
        CategoryTag::Textiles,
    ];

    /// Lowercase wire identifier, e.g. `"electronics"`.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            CategoryTag::Recyclables => "recyclables",
            CategoryTag::Organic => "organic",
            CategoryTag::Electronics => "electronics",
            CategoryTag::Hazardous => "hazardous",
            CategoryTag::Furniture => "furniture",
            CategoryTag::Textiles => "textiles",
        }
    }

    #[must_use]
    pub fn display_name(self) -> &'static str {
        match self {
            CategoryTag::Recyclables => "Recyclables",
            CategoryTag::Organic => "Organic Waste",
            CategoryTag::Electronics => "Electronics",
            CategoryTag::Hazardous => "Hazardous",
            CategoryTag::Furniture => "Furniture",
            CategoryTag::Textiles => "Textiles",
        }
    }

    /// Typical items in the category, as shown next to the pickup form toggles.
    #[must_use]
    pub fn description(self) -> &'static str {
        match self {
            CategoryTag::Recyclables => "Paper, plastic, glass, metal",
            CategoryTag::Organic => "Food scraps, garden waste",
            CategoryTag::Electronics => "Phones, computers, appliances",
            CategoryTag::Hazardous => "Batteries, chemicals, paint",
            CategoryTag::Furniture => "Large items, mattresses",
            CategoryTag::Textiles => "Clothes, shoes, fabrics",
        }
    }
}

impl std::fmt::Display for CategoryTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CategoryTag {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_ascii_lowercase();
        CategoryTag::ALL
            .into_iter()
            .find(|tag| tag.as_str() == needle)
            .ok_or_else(|| CoreError::UnknownCategory(s.to_string()))
    }
}

/// Category constraint applied by the directory query.
///
/// Parsing never fails: anything that is neither `"all"` nor a known tag is
/// kept as [`CategoryFilter::Unrecognized`] and matches no facility.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(CategoryTag),
    Unrecognized(String),
}

impl CategoryFilter {
    #[must_use]
    pub fn matches(&self, accepted: &BTreeSet<CategoryTag>) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(tag) => accepted.contains(tag),
            CategoryFilter::Unrecognized(_) => false,
        }
    }
}

impl From<&str> for CategoryFilter {
    fn from(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("all") {
            return CategoryFilter::All;
        }
        trimmed.parse::<CategoryTag>().map_or_else(
            |_| CategoryFilter::Unrecognized(trimmed.to_string()),
            CategoryFilter::Only,
        )
    }
}

impl From<CategoryTag> for CategoryFilter {
    fn from(tag: CategoryTag) -> Self {
        CategoryFilter::Only(tag)
    }
}

impl std::fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CategoryFilter::All => f.write_str("all"),
            CategoryFilter::Only(tag) => write!(f, "{tag}"),
            CategoryFilter::Unrecognized(raw) => f.write_str(raw),
        }
    }
}
