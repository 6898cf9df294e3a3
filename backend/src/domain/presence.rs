//! Presence check-in aggregate and its optional location fix.
//!
//! A presence record captures "this user was here at this moment": the
//! client-reported device time, the server-assigned insertion time used for
//! ordering, and optionally a geolocation fix. The fix is a compound value:
//! either every reading is present or none is. Modelling it as
//! `Option<LocationFix>` makes a partially-populated fix unrepresentable.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::UserId;

/// A single geolocation reading reported by the client device.
///
/// `recorded_at` is the instant the positioning hardware produced the fix,
/// not the wall-clock time the reading was observed by application code.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationFix {
    latitude: f64,
    longitude: f64,
    accuracy: f64,
    #[serde(rename = "locationTimestamp")]
    recorded_at: DateTime<Utc>,
}

impl LocationFix {
    /// Assemble a fix from its four readings.
    pub const fn new(
        latitude: f64,
        longitude: f64,
        accuracy: f64,
        recorded_at: DateTime<Utc>,
    ) -> Self {
        Self {
            latitude,
            longitude,
            accuracy,
            recorded_at,
        }
    }

    /// Latitude in decimal degrees.
    pub const fn latitude(&self) -> f64 {
        self.latitude
    }

    /// Longitude in decimal degrees.
    pub const fn longitude(&self) -> f64 {
        self.longitude
    }

    /// Estimated accuracy radius in metres.
    pub const fn accuracy(&self) -> f64 {
        self.accuracy
    }

    /// Instant the fix was produced by the positioning hardware.
    pub const fn recorded_at(&self) -> DateTime<Utc> {
        self.recorded_at
    }
}

/// Error raised when persisted location columns are partially populated.
///
/// The store keeps the fix as four nullable columns; a row where only some
/// of them are set violates the joint-presence invariant and is rejected
/// rather than silently patched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartialLocationError {
    missing: Vec<&'static str>,
}

impl PartialLocationError {
    /// Columns that were absent while the rest of the fix was present.
    pub fn missing(&self) -> &[&'static str] {
        &self.missing
    }
}

impl fmt::Display for PartialLocationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "location fix is partially populated; missing: {}",
            self.missing.join(", ")
        )
    }
}

impl std::error::Error for PartialLocationError {}

/// Fold the four nullable store columns back into the optional compound.
///
/// Returns `Ok(None)` when all four are absent, `Ok(Some(_))` when all four
/// are present, and an error naming the missing columns otherwise.
pub fn location_from_columns(
    latitude: Option<f64>,
    longitude: Option<f64>,
    accuracy: Option<f64>,
    recorded_at: Option<DateTime<Utc>>,
) -> Result<Option<LocationFix>, PartialLocationError> {
    match (latitude, longitude, accuracy, recorded_at) {
        (Some(latitude), Some(longitude), Some(accuracy), Some(recorded_at)) => {
            Ok(Some(LocationFix::new(
                latitude,
                longitude,
                accuracy,
                recorded_at,
            )))
        }
        (None, None, None, None) => Ok(None),
        _ => {
            let mut missing = Vec::new();
            if latitude.is_none() {
                missing.push("latitude");
            }
            if longitude.is_none() {
                missing.push("longitude");
            }
            if accuracy.is_none() {
                missing.push("accuracy");
            }
            if recorded_at.is_none() {
                missing.push("location_timestamp");
            }
            Err(PartialLocationError { missing })
        }
    }
}

/// One logged check-in event.
///
/// ## Invariants
/// - Always owned by exactly one user.
/// - `server_timestamp` is assigned by the service at insert time and is the
///   authoritative ordering key; `device_timestamp` is client-supplied.
/// - Records are immutable once created; there is no update or delete path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PresenceRecord {
    id: Uuid,
    user_id: UserId,
    device_timestamp: DateTime<Utc>,
    server_timestamp: DateTime<Utc>,
    location: Option<LocationFix>,
}

/// Field bundle used to build a [`PresenceRecord`].
#[derive(Debug, Clone, PartialEq)]
pub struct PresenceRecordDraft {
    pub id: Uuid,
    pub user_id: UserId,
    pub device_timestamp: DateTime<Utc>,
    pub server_timestamp: DateTime<Utc>,
    pub location: Option<LocationFix>,
}

impl PresenceRecord {
    /// Build a record from its draft.
    pub fn new(draft: PresenceRecordDraft) -> Self {
        let PresenceRecordDraft {
            id,
            user_id,
            device_timestamp,
            server_timestamp,
            location,
        } = draft;
        Self {
            id,
            user_id,
            device_timestamp,
            server_timestamp,
            location,
        }
    }

    /// Unique record identifier, generated at creation.
    pub const fn id(&self) -> Uuid {
        self.id
    }

    /// Identifier of the owning user.
    pub const fn user_id(&self) -> &UserId {
        &self.user_id
    }

    /// Client-reported instant of the check-in.
    pub const fn device_timestamp(&self) -> DateTime<Utc> {
        self.device_timestamp
    }

    /// Server-assigned insertion instant; the authoritative ordering key.
    pub const fn server_timestamp(&self) -> DateTime<Utc> {
        self.server_timestamp
    }

    /// The location fix captured with the check-in, if any.
    pub const fn location(&self) -> Option<&LocationFix> {
        self.location.as_ref()
    }
}

/// Fields for a record about to be inserted; the store generates the id.
#[derive(Debug, Clone, PartialEq)]
pub struct NewPresenceRecord {
    pub user_id: UserId,
    pub device_timestamp: DateTime<Utc>,
    pub server_timestamp: DateTime<Utc>,
    pub location: Option<LocationFix>,
}
