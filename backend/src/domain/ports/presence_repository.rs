//! Driven port for presence record persistence.

use async_trait::async_trait;

use crate::domain::{NewPresenceRecord, PresenceRecord, User};

/// Errors raised by presence repository adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PresenceRepositoryError {
    /// Repository connection could not be established.
    #[error("presence repository connection failed: {message}")]
    Connection { message: String },
    /// Query or mutation failed during execution.
    #[error("presence repository query failed: {message}")]
    Query { message: String },
}

impl PresenceRepositoryError {
    /// Create a connection error with the given message.
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Create a query error with the given message.
    pub fn query(message: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
        }
    }
}

/// A presence record joined with its owning user.
#[derive(Debug, Clone, PartialEq)]
pub struct PresenceEntry {
    pub record: PresenceRecord,
    pub user: User,
}

/// Port for inserting presence records and reading the recent history.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PresenceRepository: Send + Sync {
    /// Insert one record and return it with its generated identifier.
    async fn insert(
        &self,
        record: &NewPresenceRecord,
    ) -> Result<PresenceRecord, PresenceRepositoryError>;

    /// Read the most recent records, each joined with its owning user,
    /// ordered by server timestamp descending.
    async fn list_recent_with_users(
        &self,
        limit: i64,
    ) -> Result<Vec<PresenceEntry>, PresenceRepositoryError>;
}

/// Fixture implementation for tests that do not exercise persistence.
///
/// Inserts echo the candidate record back under a fresh identifier; reads
/// return an empty history.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixturePresenceRepository;

#[async_trait]
impl PresenceRepository for FixturePresenceRepository {
    async fn insert(
        &self,
        record: &NewPresenceRecord,
    ) -> Result<PresenceRecord, PresenceRepositoryError> {
        Ok(PresenceRecord::new(crate::domain::PresenceRecordDraft {
            id: uuid::Uuid::new_v4(),
            user_id: record.user_id,
            device_timestamp: record.device_timestamp,
            server_timestamp: record.server_timestamp,
            location: record.location,
        }))
    }

    async fn list_recent_with_users(
        &self,
        _limit: i64,
    ) -> Result<Vec<PresenceEntry>, PresenceRepositoryError> {
        Ok(Vec::new())
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.

    use chrono::Utc;
    use rstest::rstest;

    use super::*;
    use crate::domain::{LocationFix, UserId};

    #[rstest]
    #[tokio::test]
    async fn fixture_insert_echoes_the_candidate_fields() {
        let repo = FixturePresenceRepository;
        let now = Utc::now();
        let candidate = NewPresenceRecord {
            user_id: UserId::random(),
            device_timestamp: now,
            server_timestamp: now,
            location: Some(LocationFix::new(10.0, 20.0, 5.0, now)),
        };

        let stored = repo.insert(&candidate).await.expect("fixture insert succeeds");
        assert_eq!(stored.user_id(), &candidate.user_id);
        assert_eq!(stored.device_timestamp(), now);
        assert_eq!(stored.location(), candidate.location.as_ref());
    }

    #[rstest]
    #[tokio::test]
    async fn fixture_list_returns_empty() {
        let repo = FixturePresenceRepository;
        let listed = repo
            .list_recent_with_users(50)
            .await
            .expect("fixture list succeeds");
        assert!(listed.is_empty());
    }

    #[rstest]
    fn query_error_formats_message() {
        let err = PresenceRepositoryError::query("broken sql");
        assert!(err.to_string().contains("broken sql"));
    }
}
