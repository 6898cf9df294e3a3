//! Tests for the presence service.

use std::sync::Arc;

use chrono::{DateTime, Duration, Local, TimeZone, Utc};
use mockable::Clock;
use mockall::predicate;

use super::*;
use crate::domain::ports::{LocationFixPayload, MockPresenceRepository, PresenceEntry};
use crate::domain::{
    PresenceRecord, PresenceRecordDraft, User, UserId,
};

struct FixtureClock {
    utc_now: DateTime<Utc>,
}

impl Clock for FixtureClock {
    fn local(&self) -> DateTime<Local> {
        self.utc_now.with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        self.utc_now
    }
}

fn fixture_timestamp() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0)
        .single()
        .expect("fixture timestamp")
}

fn fixture_clock() -> Arc<dyn Clock> {
    Arc::new(FixtureClock {
        utc_now: fixture_timestamp(),
    })
}

fn sample_request(user_id: UserId) -> LogPresenceRequest {
    LogPresenceRequest {
        user_id,
        device_timestamp: fixture_timestamp() - Duration::seconds(2),
        location: Some(LocationFixPayload {
            latitude: 10.0,
            longitude: 20.0,
            accuracy: 5.0,
            location_timestamp: fixture_timestamp() - Duration::seconds(3),
        }),
    }
}

fn stored_record(candidate: &NewPresenceRecord) -> PresenceRecord {
    PresenceRecord::new(PresenceRecordDraft {
        id: uuid::Uuid::new_v4(),
        user_id: candidate.user_id,
        device_timestamp: candidate.device_timestamp,
        server_timestamp: candidate.server_timestamp,
        location: candidate.location,
    })
}

#[tokio::test]
async fn log_presence_stamps_the_server_timestamp_from_the_clock() {
    let user_id = UserId::random();
    let request = sample_request(user_id);

    let mut repo = MockPresenceRepository::new();
    repo.expect_insert()
        .withf(move |candidate| {
            candidate.server_timestamp == fixture_timestamp() && candidate.user_id == user_id
        })
        .times(1)
        .returning(|candidate| Ok(stored_record(candidate)));

    let service = PresenceService::new(Arc::new(repo), fixture_clock());
    let response = service
        .log_presence(request.clone())
        .await
        .expect("log presence succeeds");

    assert_eq!(response.record.user_id, user_id);
    assert_eq!(response.record.server_timestamp, fixture_timestamp());
    assert_eq!(response.record.device_timestamp, request.device_timestamp);
    assert_eq!(response.record.location, request.location);
}

#[tokio::test]
async fn log_presence_without_location_stores_no_fix() {
    let mut request = sample_request(UserId::random());
    request.location = None;

    let mut repo = MockPresenceRepository::new();
    repo.expect_insert()
        .withf(|candidate| candidate.location.is_none())
        .times(1)
        .returning(|candidate| Ok(stored_record(candidate)));

    let service = PresenceService::new(Arc::new(repo), fixture_clock());
    let response = service
        .log_presence(request)
        .await
        .expect("log presence succeeds");

    assert!(response.record.location.is_none());
}

#[tokio::test]
async fn log_presence_maps_connection_error_to_service_unavailable() {
    let mut repo = MockPresenceRepository::new();
    repo.expect_insert()
        .times(1)
        .returning(|_| Err(PresenceRepositoryError::connection("pool unavailable")));

    let service = PresenceService::new(Arc::new(repo), fixture_clock());
    let error = service
        .log_presence(sample_request(UserId::random()))
        .await
        .expect_err("service unavailable");

    assert_eq!(error.code(), crate::domain::ErrorCode::ServiceUnavailable);
}

#[tokio::test]
async fn log_presence_maps_query_error_to_internal() {
    let mut repo = MockPresenceRepository::new();
    repo.expect_insert()
        .times(1)
        .returning(|_| Err(PresenceRepositoryError::query("constraint violation")));

    let service = PresenceService::new(Arc::new(repo), fixture_clock());
    let error = service
        .log_presence(sample_request(UserId::random()))
        .await
        .expect_err("internal error");

    assert_eq!(error.code(), crate::domain::ErrorCode::InternalError);
}

#[tokio::test]
async fn list_recent_passes_the_fixed_limit_and_maps_entries() {
    let user = User::try_from_strings("3fa85f64-5717-4562-b3fc-2c963f66afa6", "Ada Lovelace")
        .expect("fixture user");
    let record = PresenceRecord::new(PresenceRecordDraft {
        id: uuid::Uuid::new_v4(),
        user_id: *user.id(),
        device_timestamp: fixture_timestamp(),
        server_timestamp: fixture_timestamp(),
        location: None,
    });
    let entry = PresenceEntry {
        record: record.clone(),
        user: user.clone(),
    };

    let mut repo = MockPresenceRepository::new();
    repo.expect_list_recent_with_users()
        .with(predicate::eq(RECENT_PRESENCE_LIMIT))
        .times(1)
        .return_once(move |_| Ok(vec![entry]));

    let service = PresenceService::new(Arc::new(repo), fixture_clock());
    let response = service.list_recent().await.expect("list succeeds");

    assert_eq!(response.entries.len(), 1);
    let first = response.entries.first().expect("one entry");
    assert_eq!(first.record.id, record.id());
    assert_eq!(first.user, user);
}

#[tokio::test]
async fn list_recent_maps_connection_error_to_service_unavailable() {
    let mut repo = MockPresenceRepository::new();
    repo.expect_list_recent_with_users()
        .times(1)
        .returning(|_| Err(PresenceRepositoryError::connection("pool unavailable")));

    let service = PresenceService::new(Arc::new(repo), fixture_clock());
    let error = service.list_recent().await.expect_err("service unavailable");

    assert_eq!(error.code(), crate::domain::ErrorCode::ServiceUnavailable);
}
