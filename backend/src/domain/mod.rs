//! Domain primitives, aggregates, services, and ports.
//!
//! Purpose: Define strongly typed domain entities used by the API and
//! persistence layers. Keep types immutable and document invariants and
//! serialisation contracts (serde) in each type's Rustdoc.

pub mod auth;
pub mod error;
pub mod ports;
pub mod presence;
mod presence_service;
pub mod user;

pub use self::auth::{LoginCredentials, LoginValidationError};
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::presence::{
    LocationFix, NewPresenceRecord, PartialLocationError, PresenceRecord, PresenceRecordDraft,
    location_from_columns,
};
pub use self::presence_service::{PresenceService, RECENT_PRESENCE_LIMIT};
pub use self::user::{DisplayName, User, UserId, UserValidationError};

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use backend::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::forbidden("nope"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;
