//! Diesel row models for the persistence adapters.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use super::schema::{presences, users};

/// Queryable row for user accounts.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: Uuid,
    pub display_name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Insertable row for user accounts; audit timestamps use column defaults.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow<'a> {
    pub id: Uuid,
    pub display_name: &'a str,
}

/// Queryable row for presence check-ins.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = presences)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct PresenceRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub device_timestamp: DateTime<Utc>,
    pub server_timestamp: DateTime<Utc>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub accuracy: Option<f64>,
    pub location_timestamp: Option<DateTime<Utc>>,
}

/// Insertable row for presence check-ins; the id uses the column default.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = presences)]
pub(crate) struct NewPresenceRow {
    pub user_id: Uuid,
    pub device_timestamp: DateTime<Utc>,
    pub server_timestamp: DateTime<Utc>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub accuracy: Option<f64>,
    pub location_timestamp: Option<DateTime<Utc>>,
}
