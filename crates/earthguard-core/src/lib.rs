//! Shared data contracts and pure logic for EarthGuard.
//!
//! Holds the category vocabulary, the drop-off facility directory and its
//! query pipeline, pickup request validation with the local pickup ledger,
//! chat transcript types, and environment configuration.

pub mod app_config;
pub mod category;
pub mod chat;
pub mod config;
pub mod directory;
pub mod facility;
pub mod pickup;

use thiserror::Error;

pub use app_config::{AppConfig, Environment};
pub use category::{CategoryFilter, CategoryTag};
pub use chat::{ChatMessage, ChatRole};
pub use config::{load_app_config, load_app_config_from_env};
pub use directory::{directions_url, query, Directory, DirectoryQuery, SortKey};
pub use facility::{
    builtin_facilities, load_facilities, Coordinates, FacilitiesFile, FacilityRecord,
    OperatingHours,
};
pub use pickup::{PickupLedger, PickupRequest, PickupStatus, ScheduledPickup, TIME_SLOTS};

/// Errors raised while loading configuration or reference data.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read facilities file {path}: {source}")]
    FacilitiesFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse facilities file: {0}")]
    FacilitiesFileParse(#[from] serde_yaml::Error),

    #[error("facility validation failed: {0}")]
    Validation(String),
}

/// Errors raised by the in-process domain logic.
#[derive(Debug, Error, PartialEq)]
pub enum CoreError {
    #[error("unknown waste category: {0}")]
    UnknownCategory(String),

    #[error("unknown sort key: {0}")]
    UnknownSortKey(String),

    #[error("invalid position ({lat}, {lng}): latitude must be within -90..=90 and longitude within -180..=180")]
    InvalidCoordinates { lat: f64, lng: f64 },

    #[error("invalid pickup request: {0}")]
    InvalidPickup(String),

    #[error("pickup {0} not found")]
    PickupNotFound(i64),
}
