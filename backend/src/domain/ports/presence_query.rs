//! Driving port for presence history reads.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::{Error, User};

use super::presence_command::PresenceRecordPayload;

/// A presence record paired with its owning user, as returned to clients.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PresenceEntryPayload {
    pub record: PresenceRecordPayload,
    pub user: User,
}

/// Response from listing the recent presence history.
///
/// Entries are ordered most recent first by server timestamp.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListRecentPresenceResponse {
    pub entries: Vec<PresenceEntryPayload>,
}

/// Domain use-case port for presence reads.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PresenceQuery: Send + Sync {
    /// List the most recent check-ins across all users, each joined with
    /// its owning user record.
    async fn list_recent(&self) -> Result<ListRecentPresenceResponse, Error>;
}

/// Fixture implementation returning an empty history.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixturePresenceQuery;

#[async_trait]
impl PresenceQuery for FixturePresenceQuery {
    async fn list_recent(&self) -> Result<ListRecentPresenceResponse, Error> {
        Ok(ListRecentPresenceResponse {
            entries: Vec::new(),
        })
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[tokio::test]
    async fn fixture_returns_empty_history() {
        let response = FixturePresenceQuery
            .list_recent()
            .await
            .expect("fixture list succeeds");
        assert!(response.entries.is_empty());
    }
}
