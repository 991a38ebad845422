//! Pickup request validation and the session-local pickup ledger.

use std::collections::BTreeSet;

use chrono::{NaiveDate, NaiveTime, Timelike};
use serde::{Deserialize, Serialize};

use crate::category::CategoryTag;
use crate::CoreError;

/// Hourly slots offered by the pickup form.
pub const TIME_SLOTS: [&str; 9] = [
    "09:00", "10:00", "11:00", "12:00", "13:00", "14:00", "15:00", "16:00", "17:00",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PickupStatus {
    Scheduled,
    Completed,
    Cancelled,
}

impl std::fmt::Display for PickupStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PickupStatus::Scheduled => write!(f, "Scheduled"),
            PickupStatus::Completed => write!(f, "Completed"),
            PickupStatus::Cancelled => write!(f, "Cancelled"),
        }
    }
}

/// A submitted pickup form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PickupRequest {
    pub date: NaiveDate,
    pub time_slot: NaiveTime,
    pub categories: BTreeSet<CategoryTag>,
    pub address: String,
    pub special_instructions: Option<String>,
}

impl PickupRequest {
    /// Check the form rules against the caller's notion of `today`.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidPickup`] when no category is selected, the
    /// address is blank, the date is not after `today`, or the time is not one
    /// of [`TIME_SLOTS`].
    pub fn validate(&self, today: NaiveDate) -> Result<(), CoreError> {
        if self.categories.is_empty() {
            return Err(CoreError::InvalidPickup(
                "select at least one waste category".to_string(),
            ));
        }
        if self.address.trim().is_empty() {
            return Err(CoreError::InvalidPickup(
                "pickup address must be non-empty".to_string(),
            ));
        }
        if self.date <= today {
            return Err(CoreError::InvalidPickup(format!(
                "pickup date {} must be after {today}",
                self.date
            )));
        }
        if !is_time_slot(self.time_slot) {
            return Err(CoreError::InvalidPickup(format!(
                "time {} is not an available slot",
                self.time_slot.format("%H:%M")
            )));
        }
        Ok(())
    }

    /// Instructions with surrounding whitespace removed; blank counts as none.
    #[must_use]
    pub fn instructions(&self) -> Option<&str> {
        self.special_instructions
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }
}

fn is_time_slot(time: NaiveTime) -> bool {
    time.second() == 0
        && time.nanosecond() == 0
        && TIME_SLOTS.contains(&time.format("%H:%M").to_string().as_str())
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScheduledPickup {
    pub id: i64,
    pub date: NaiveDate,
    pub time_slot: NaiveTime,
    pub categories: BTreeSet<CategoryTag>,
    pub address: String,
    pub special_instructions: Option<String>,
    pub status: PickupStatus,
}

/// Ordered, newest-first list of pickups owned by one session.
///
/// This is the library-level local list for embedders that keep pickups in
/// their own process state, such as a long-lived UI session. The bundled
/// binaries do not use it: the CLI is one command per invocation and the
/// service keeps cancelled records in its store, so both talk to the pickup
/// API instead.
///
/// Ids are generated here, strictly increase and are never reused, even after
/// a cancellation removes an entry.
#[derive(Debug, Clone)]
pub struct PickupLedger {
    pickups: Vec<ScheduledPickup>,
    next_id: i64,
}

impl Default for PickupLedger {
    fn default() -> Self {
        Self::new()
    }
}

impl PickupLedger {
    #[must_use]
    pub fn new() -> Self {
        Self {
            pickups: Vec::new(),
            next_id: 1,
        }
    }

    /// Seed the ledger with pickups known from elsewhere, kept in the given order.
    #[must_use]
    pub fn with_pickups(pickups: Vec<ScheduledPickup>) -> Self {
        let next_id = pickups.iter().map(|p| p.id).max().unwrap_or(0) + 1;
        Self { pickups, next_id }
    }

    #[must_use]
    pub fn pickups(&self) -> &[ScheduledPickup] {
        &self.pickups
    }

    pub fn upcoming(&self) -> impl Iterator<Item = &ScheduledPickup> {
        self.pickups
            .iter()
            .filter(|p| p.status == PickupStatus::Scheduled)
    }

    /// Validate `request` and add it to the front of the list as `Scheduled`.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidPickup`] if validation fails; the ledger is
    /// left untouched.
    pub fn schedule(
        &mut self,
        request: PickupRequest,
        today: NaiveDate,
    ) -> Result<&ScheduledPickup, CoreError> {
        request.validate(today)?;

        let special_instructions = request.instructions().map(str::to_string);
        let pickup = ScheduledPickup {
            id: self.next_id,
            date: request.date,
            time_slot: request.time_slot,
            categories: request.categories,
            address: request.address.trim().to_string(),
            special_instructions,
            status: PickupStatus::Scheduled,
        };
        self.next_id += 1;
        self.pickups.insert(0, pickup);
        Ok(&self.pickups[0])
    }

    /// Remove a pickup from the list, returning it marked `Cancelled`.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::PickupNotFound`] if no pickup has this id.
    pub fn cancel(&mut self, id: i64) -> Result<ScheduledPickup, CoreError> {
        let index = self
            .pickups
            .iter()
            .position(|p| p.id == id)
            .ok_or(CoreError::PickupNotFound(id))?;
        let mut pickup = self.pickups.remove(index);
        pickup.status = PickupStatus::Cancelled;
        Ok(pickup)
    }
}
