//! Presence domain service.
//!
//! Implements the presence driving ports over a repository and a clock. The
//! service owns the one piece of authority the client never has: the server
//! timestamp stamped on every record at insert time.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;

use crate::domain::Error;
use crate::domain::ports::{
    ListRecentPresenceResponse, LogPresenceRequest, LogPresenceResponse, PresenceCommand,
    PresenceEntryPayload, PresenceQuery, PresenceRepository, PresenceRepositoryError,
};
use crate::domain::{LocationFix, NewPresenceRecord};

/// Maximum number of entries returned by the recent-history read.
pub const RECENT_PRESENCE_LIMIT: i64 = 50;

fn map_repository_error(error: PresenceRepositoryError) -> Error {
    match error {
        PresenceRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("presence repository unavailable: {message}"))
        }
        PresenceRepositoryError::Query { message } => {
            Error::internal(format!("presence repository error: {message}"))
        }
    }
}

/// Presence service implementing the command and query driving ports.
#[derive(Clone)]
pub struct PresenceService<R> {
    presence_repo: Arc<R>,
    clock: Arc<dyn Clock>,
}

impl<R> PresenceService<R> {
    /// Create a new service over the presence repository and clock.
    pub fn new(presence_repo: Arc<R>, clock: Arc<dyn Clock>) -> Self {
        Self {
            presence_repo,
            clock,
        }
    }
}

#[async_trait]
impl<R> PresenceCommand for PresenceService<R>
where
    R: PresenceRepository,
{
    async fn log_presence(
        &self,
        request: LogPresenceRequest,
    ) -> Result<LogPresenceResponse, Error> {
        let candidate = NewPresenceRecord {
            user_id: request.user_id,
            device_timestamp: request.device_timestamp,
            server_timestamp: self.clock.utc(),
            location: request.location.map(LocationFix::from),
        };

        let stored = self
            .presence_repo
            .insert(&candidate)
            .await
            .map_err(map_repository_error)?;

        Ok(LogPresenceResponse {
            record: stored.into(),
        })
    }
}

#[async_trait]
impl<R> PresenceQuery for PresenceService<R>
where
    R: PresenceRepository,
{
    async fn list_recent(&self) -> Result<ListRecentPresenceResponse, Error> {
        let entries = self
            .presence_repo
            .list_recent_with_users(RECENT_PRESENCE_LIMIT)
            .await
            .map_err(map_repository_error)?;

        Ok(ListRecentPresenceResponse {
            entries: entries
                .into_iter()
                .map(|entry| PresenceEntryPayload {
                    record: entry.record.into(),
                    user: entry.user,
                })
                .collect(),
        })
    }
}

#[cfg(test)]
#[path = "presence_service_tests.rs"]
mod tests;
