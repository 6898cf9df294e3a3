//! Diesel-backed `LoginService` adapter built on `DieselUserRepository`.
//!
//! This adapter preserves the development login contract (`admin`/`password`)
//! while ensuring the authenticated user exists in PostgreSQL, so presence
//! inserts satisfy the `user_id` foreign key. A production deployment
//! replaces it with an identity-provider-backed `LoginService`.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::ports::{
    FIXTURE_PASSWORD, FIXTURE_USER_ID, FIXTURE_USERNAME, LoginService, UserPersistenceError,
    UserRepository,
};
use crate::domain::{DisplayName, Error, LoginCredentials, User, UserId};

use super::diesel_user_repository::DieselUserRepository;

const FIXTURE_DISPLAY_NAME: &str = "Ada Lovelace";

/// Diesel-backed `LoginService` that guarantees the user row exists.
#[derive(Clone)]
pub struct DieselLoginService {
    user_repository: Arc<dyn UserRepository>,
}

impl DieselLoginService {
    /// Create a new service backed by a Diesel user repository.
    pub fn new(user_repository: DieselUserRepository) -> Self {
        Self {
            user_repository: Arc::new(user_repository),
        }
    }

    #[cfg(test)]
    fn from_repository(user_repository: Arc<dyn UserRepository>) -> Self {
        Self { user_repository }
    }

    async fn ensure_user_exists(&self, user_id: &UserId) -> Result<(), Error> {
        let existing = self
            .user_repository
            .find_by_id(user_id)
            .await
            .map_err(map_persistence_error)?;

        if existing.is_some() {
            return Ok(());
        }

        let display_name = DisplayName::new(FIXTURE_DISPLAY_NAME)
            .map_err(|err| Error::internal(format!("invalid fixture display name: {err}")))?;
        let user = User::new(*user_id, display_name);

        self.user_repository
            .upsert(&user)
            .await
            .map_err(map_persistence_error)
    }
}

fn map_persistence_error(error: UserPersistenceError) -> Error {
    match error {
        UserPersistenceError::Connection { message } => Error::service_unavailable(message),
        UserPersistenceError::Query { message } => Error::internal(message),
    }
}

fn fixture_user_id() -> Result<UserId, Error> {
    UserId::new(FIXTURE_USER_ID)
        .map_err(|err| Error::internal(format!("invalid fixture user id: {err}")))
}

#[async_trait]
impl LoginService for DieselLoginService {
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<UserId, Error> {
        if credentials.username() != FIXTURE_USERNAME
            || credentials.password() != FIXTURE_PASSWORD
        {
            return Err(Error::unauthorized("invalid credentials"));
        }

        let user_id = fixture_user_id()?;
        self.ensure_user_exists(&user_id).await?;
        Ok(user_id)
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for login parity and persistence mapping.

    use rstest::rstest;

    use super::*;
    use crate::domain::ErrorCode;
    use crate::domain::ports::MockUserRepository;

    fn valid_credentials() -> LoginCredentials {
        LoginCredentials::try_new(FIXTURE_USERNAME, FIXTURE_PASSWORD).expect("credentials shape")
    }

    #[rstest]
    #[tokio::test]
    async fn wrong_credentials_never_touch_the_repository() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_id().times(0);
        repo.expect_upsert().times(0);

        let service = DieselLoginService::from_repository(Arc::new(repo));
        let creds = LoginCredentials::try_new("admin", "wrong").expect("credentials shape");
        let error = service.authenticate(&creds).await.expect_err("unauthorised");

        assert_eq!(error.code(), ErrorCode::Unauthorized);
    }

    #[rstest]
    #[tokio::test]
    async fn missing_user_is_created_on_first_login() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_id().times(1).returning(|_| Ok(None));
        repo.expect_upsert()
            .withf(|user| user.id().to_string() == FIXTURE_USER_ID)
            .times(1)
            .returning(|_| Ok(()));

        let service = DieselLoginService::from_repository(Arc::new(repo));
        let user_id = service
            .authenticate(&valid_credentials())
            .await
            .expect("login succeeds");

        assert_eq!(user_id.to_string(), FIXTURE_USER_ID);
    }

    #[rstest]
    #[tokio::test]
    async fn existing_user_is_not_rewritten() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_id().times(1).returning(|id| {
            let display_name = DisplayName::new("Ada Lovelace").expect("fixture name");
            Ok(Some(User::new(*id, display_name)))
        });
        repo.expect_upsert().times(0);

        let service = DieselLoginService::from_repository(Arc::new(repo));
        let user_id = service
            .authenticate(&valid_credentials())
            .await
            .expect("login succeeds");

        assert_eq!(user_id.to_string(), FIXTURE_USER_ID);
    }

    #[rstest]
    #[tokio::test]
    async fn connection_failures_map_to_service_unavailable() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_id()
            .times(1)
            .returning(|_| Err(UserPersistenceError::connection("pool unavailable")));

        let service = DieselLoginService::from_repository(Arc::new(repo));
        let error = service
            .authenticate(&valid_credentials())
            .await
            .expect_err("service unavailable");

        assert_eq!(error.code(), ErrorCode::ServiceUnavailable);
    }
}
