//! PostgreSQL-backed `PresenceRepository` implementation using Diesel ORM.
//!
//! This adapter inserts presence rows and loads the recent history joined
//! with the owning users in a single query. Rows pass through validated
//! domain constructors on the way out, so a corrupt row (e.g. a partially
//! populated location fix) surfaces as a query error rather than bad data.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{PresenceEntry, PresenceRepository, PresenceRepositoryError};
use crate::domain::{
    DisplayName, NewPresenceRecord, PresenceRecord, PresenceRecordDraft, User, UserId,
    location_from_columns,
};

use super::diesel_basic_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::models::{NewPresenceRow, PresenceRow, UserRow};
use super::pool::{DbPool, PoolError};
use super::schema::{presences, users};

/// Diesel-backed implementation of the presence repository port.
#[derive(Clone)]
pub struct DieselPresenceRepository {
    pool: DbPool,
}

impl DieselPresenceRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

/// Map pool errors to domain repository errors.
fn map_pool_error(error: PoolError) -> PresenceRepositoryError {
    map_basic_pool_error(error, |message| {
        PresenceRepositoryError::connection(message)
    })
}

/// Map Diesel errors to domain repository errors.
fn map_diesel_error(error: diesel::result::Error) -> PresenceRepositoryError {
    map_basic_diesel_error(
        error,
        PresenceRepositoryError::query,
        PresenceRepositoryError::connection,
    )
}

fn record_to_row(record: &NewPresenceRecord) -> NewPresenceRow {
    NewPresenceRow {
        user_id: *record.user_id.as_uuid(),
        device_timestamp: record.device_timestamp,
        server_timestamp: record.server_timestamp,
        latitude: record.location.map(|fix| fix.latitude()),
        longitude: record.location.map(|fix| fix.longitude()),
        accuracy: record.location.map(|fix| fix.accuracy()),
        location_timestamp: record.location.map(|fix| fix.recorded_at()),
    }
}

/// Convert a database row into a validated domain presence record.
fn row_to_record(row: PresenceRow) -> Result<PresenceRecord, PresenceRepositoryError> {
    let PresenceRow {
        id,
        user_id,
        device_timestamp,
        server_timestamp,
        latitude,
        longitude,
        accuracy,
        location_timestamp,
    } = row;

    let location = location_from_columns(latitude, longitude, accuracy, location_timestamp)
        .map_err(|err| PresenceRepositoryError::query(err.to_string()))?;

    Ok(PresenceRecord::new(PresenceRecordDraft {
        id,
        user_id: UserId::from_uuid(user_id),
        device_timestamp,
        server_timestamp,
        location,
    }))
}

/// Convert a database row into a validated domain user.
fn row_to_user(row: UserRow) -> Result<User, PresenceRepositoryError> {
    let display_name = DisplayName::new(row.display_name)
        .map_err(|err| PresenceRepositoryError::query(err.to_string()))?;
    Ok(User::new(UserId::from_uuid(row.id), display_name))
}

#[async_trait]
impl PresenceRepository for DieselPresenceRepository {
    async fn insert(
        &self,
        record: &NewPresenceRecord,
    ) -> Result<PresenceRecord, PresenceRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = diesel::insert_into(presences::table)
            .values(record_to_row(record))
            .returning(PresenceRow::as_returning())
            .get_result::<PresenceRow>(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        row_to_record(row)
    }

    async fn list_recent_with_users(
        &self,
        limit: i64,
    ) -> Result<Vec<PresenceEntry>, PresenceRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        // Ties on server_timestamp keep the store's insertion order.
        let rows: Vec<(PresenceRow, UserRow)> = presences::table
            .inner_join(users::table)
            .order(presences::server_timestamp.desc())
            .limit(limit)
            .select((PresenceRow::as_select(), UserRow::as_select()))
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows.into_iter()
            .map(|(presence_row, user_row)| {
                Ok(PresenceEntry {
                    record: row_to_record(presence_row)?,
                    user: row_to_user(user_row)?,
                })
            })
            .collect()
    }
}
