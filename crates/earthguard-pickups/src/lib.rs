//! Typed client for the EarthGuard pickup API.
//!
//! The API is the collaborator of record for scheduled pickups; see
//! [`PickupClient`] for the three operations it exposes.

pub mod client;
pub mod error;
pub mod types;

pub use client::PickupClient;
pub use error::PickupApiError;
pub use types::{CancelAck, NewPickup, PickupRecord};
