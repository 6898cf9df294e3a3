//! Domain ports and supporting types for the hexagonal boundary.

mod login_service;
mod presence_command;
mod presence_query;
mod presence_repository;
mod user_repository;

pub use login_service::{
    FIXTURE_PASSWORD, FIXTURE_USER_ID, FIXTURE_USERNAME, FixtureLoginService, LoginService,
};
#[cfg(test)]
pub use presence_command::MockPresenceCommand;
pub use presence_command::{
    FIXTURE_PRESENCE_ID, FixturePresenceCommand, LocationFixPayload, LogPresenceRequest,
    LogPresenceResponse, PresenceCommand, PresenceRecordPayload,
};
#[cfg(test)]
pub use presence_query::MockPresenceQuery;
pub use presence_query::{
    FixturePresenceQuery, ListRecentPresenceResponse, PresenceEntryPayload, PresenceQuery,
};
#[cfg(test)]
pub use presence_repository::MockPresenceRepository;
pub use presence_repository::{
    FixturePresenceRepository, PresenceEntry, PresenceRepository, PresenceRepositoryError,
};
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{FixtureUserRepository, UserPersistenceError, UserRepository};
