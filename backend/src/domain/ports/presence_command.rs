//! Driving port for presence mutations.
//!
//! This port records one check-in for the authenticated user and returns the
//! stored record, including its generated identifier and the authoritative
//! server timestamp.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{Error, LocationFix, PresenceRecord, UserId};

/// Serializable location fix payload for driving ports.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationFixPayload {
    pub latitude: f64,
    pub longitude: f64,
    pub accuracy: f64,
    pub location_timestamp: DateTime<Utc>,
}

impl From<LocationFixPayload> for LocationFix {
    fn from(value: LocationFixPayload) -> Self {
        LocationFix::new(
            value.latitude,
            value.longitude,
            value.accuracy,
            value.location_timestamp,
        )
    }
}

impl From<LocationFix> for LocationFixPayload {
    fn from(value: LocationFix) -> Self {
        Self {
            latitude: value.latitude(),
            longitude: value.longitude(),
            accuracy: value.accuracy(),
            location_timestamp: value.recorded_at(),
        }
    }
}

/// Serializable presence record payload for driving ports.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PresenceRecordPayload {
    pub id: Uuid,
    pub user_id: UserId,
    pub device_timestamp: DateTime<Utc>,
    pub server_timestamp: DateTime<Utc>,
    pub location: Option<LocationFixPayload>,
}

impl From<PresenceRecord> for PresenceRecordPayload {
    fn from(value: PresenceRecord) -> Self {
        Self {
            id: value.id(),
            user_id: *value.user_id(),
            device_timestamp: value.device_timestamp(),
            server_timestamp: value.server_timestamp(),
            location: value.location().copied().map(Into::into),
        }
    }
}

/// Request to record one presence check-in.
#[derive(Debug, Clone, PartialEq)]
pub struct LogPresenceRequest {
    /// Authenticated user the record will belong to.
    pub user_id: UserId,
    /// Client-reported instant of the check-in.
    pub device_timestamp: DateTime<Utc>,
    /// Optional location fix; `None` means the client had no fix.
    pub location: Option<LocationFixPayload>,
}

/// Response from recording a presence check-in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogPresenceResponse {
    pub record: PresenceRecordPayload,
}

/// Domain use-case port for presence mutations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PresenceCommand: Send + Sync {
    /// Record one check-in and return the stored record.
    async fn log_presence(&self, request: LogPresenceRequest)
    -> Result<LogPresenceResponse, Error>;
}

/// Fixture implementation echoing the request under a fixed identifier.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixturePresenceCommand;

/// Identifier returned by [`FixturePresenceCommand`] for every record.
pub const FIXTURE_PRESENCE_ID: Uuid = Uuid::from_u128(0x0000_0000_0000_0000_0000_0000_0000_0901);

#[async_trait]
impl PresenceCommand for FixturePresenceCommand {
    async fn log_presence(
        &self,
        request: LogPresenceRequest,
    ) -> Result<LogPresenceResponse, Error> {
        Ok(LogPresenceResponse {
            record: PresenceRecordPayload {
                id: FIXTURE_PRESENCE_ID,
                user_id: request.user_id,
                device_timestamp: request.device_timestamp,
                // The fixture has no clock; echo the device instant.
                server_timestamp: request.device_timestamp,
                location: request.location,
            },
        })
    }
}
