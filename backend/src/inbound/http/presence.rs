//! Presence HTTP handlers.
//!
//! ```text
//! POST /api/v1/presence
//! GET  /api/v1/presence
//! ```
//!
//! Both operations require an authenticated session. The session check runs
//! before payload validation, so unauthenticated callers receive `401` even
//! for malformed bodies; validation runs before any port is invoked, so
//! rejected payloads never reach the store.

use actix_web::{get, post, web};
use serde::Serialize;
use serde_json::Value;
use utoipa::ToSchema;

use crate::domain::ports::{
    ListRecentPresenceResponse, LocationFixPayload, LogPresenceRequest, PresenceEntryPayload,
    PresenceRecordPayload,
};
use crate::domain::{Error, User, UserId};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    FieldName, body_object, optional_object, required_number, required_timestamp,
};

/// Request payload for logging a presence check-in.
///
/// Documented for OpenAPI only; the handler validates the raw JSON itself so
/// that field-level errors name the offending path.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LogPresenceRequestBody {
    /// Client-reported check-in instant.
    #[schema(format = "date-time")]
    pub device_timestamp: String,
    /// Optional location fix; `null` and absent both mean "no fix".
    pub location: Option<LocationBody>,
}

/// Location fix payload; all four fields are required when present.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LocationBody {
    pub latitude: f64,
    pub longitude: f64,
    pub accuracy: f64,
    #[schema(format = "date-time")]
    pub location_timestamp: String,
}

/// Response payload describing one stored presence record.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PresenceRecordResponseBody {
    #[schema(format = "uuid")]
    pub id: String,
    #[schema(format = "uuid")]
    pub user_id: String,
    #[schema(format = "date-time")]
    pub device_timestamp: String,
    #[schema(format = "date-time")]
    pub server_timestamp: String,
    pub location: Option<LocationBody>,
}

/// Response payload for the recent presence history.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ListPresenceResponseBody {
    pub entries: Vec<PresenceEntryResponseBody>,
}

/// One history entry: a record joined with its owning user.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PresenceEntryResponseBody {
    pub record: PresenceRecordResponseBody,
    pub user: UserResponseBody,
}

/// Owning user as returned in history entries.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserResponseBody {
    #[schema(format = "uuid")]
    pub id: String,
    pub display_name: String,
}

impl From<LocationFixPayload> for LocationBody {
    fn from(value: LocationFixPayload) -> Self {
        Self {
            latitude: value.latitude,
            longitude: value.longitude,
            accuracy: value.accuracy,
            location_timestamp: value.location_timestamp.to_rfc3339(),
        }
    }
}

impl From<PresenceRecordPayload> for PresenceRecordResponseBody {
    fn from(value: PresenceRecordPayload) -> Self {
        Self {
            id: value.id.to_string(),
            user_id: value.user_id.to_string(),
            device_timestamp: value.device_timestamp.to_rfc3339(),
            server_timestamp: value.server_timestamp.to_rfc3339(),
            location: value.location.map(LocationBody::from),
        }
    }
}

impl From<User> for UserResponseBody {
    fn from(value: User) -> Self {
        Self {
            id: value.id().to_string(),
            display_name: value.display_name().to_string(),
        }
    }
}

impl From<PresenceEntryPayload> for PresenceEntryResponseBody {
    fn from(value: PresenceEntryPayload) -> Self {
        Self {
            record: value.record.into(),
            user: value.user.into(),
        }
    }
}

impl From<ListRecentPresenceResponse> for ListPresenceResponseBody {
    fn from(value: ListRecentPresenceResponse) -> Self {
        Self {
            entries: value.entries.into_iter().map(Into::into).collect(),
        }
    }
}

/// Explicit validator for the log operation.
///
/// Checks the payload shape field by field and reports the first offending
/// path; a present location object must carry all four of its fields.
fn parse_log_presence_payload(
    payload: &Value,
    user_id: UserId,
) -> Result<LogPresenceRequest, Error> {
    let body = body_object(payload)?;

    let device_timestamp =
        required_timestamp(body, "deviceTimestamp", &FieldName::new("deviceTimestamp"))?;

    let location = optional_object(body, "location", &FieldName::new("location"))?
        .map(parse_location_body)
        .transpose()?;

    Ok(LogPresenceRequest {
        user_id,
        device_timestamp,
        location,
    })
}

fn parse_location_body(body: &serde_json::Map<String, Value>) -> Result<LocationFixPayload, Error> {
    let latitude = required_number(body, "latitude", &FieldName::nested("location", "latitude"))?;
    let longitude =
        required_number(body, "longitude", &FieldName::nested("location", "longitude"))?;
    let accuracy = required_number(body, "accuracy", &FieldName::nested("location", "accuracy"))?;
    let location_timestamp = required_timestamp(
        body,
        "locationTimestamp",
        &FieldName::nested("location", "locationTimestamp"),
    )?;

    Ok(LocationFixPayload {
        latitude,
        longitude,
        accuracy,
        location_timestamp,
    })
}

/// Record a presence check-in for the authenticated user.
#[utoipa::path(
    post,
    path = "/api/v1/presence",
    request_body = LogPresenceRequestBody,
    responses(
        (status = 200, description = "Presence recorded", body = PresenceRecordResponseBody),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorized", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["presence"],
    operation_id = "logPresence",
    security(("SessionCookie" = []))
)]
#[post("/presence")]
pub async fn log_presence(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<Value>,
) -> ApiResult<web::Json<PresenceRecordResponseBody>> {
    let user_id = session.require_user_id()?;
    let request = parse_log_presence_payload(&payload.into_inner(), user_id)?;

    let response = state.presence.log_presence(request).await?;

    Ok(web::Json(response.record.into()))
}

/// List the most recent presence check-ins with their owning users.
#[utoipa::path(
    get,
    path = "/api/v1/presence",
    responses(
        (status = 200, description = "Recent presence history", body = ListPresenceResponseBody),
        (status = 401, description = "Unauthorized", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["presence"],
    operation_id = "listPresence",
    security(("SessionCookie" = []))
)]
#[get("/presence")]
pub async fn list_presence(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<ListPresenceResponseBody>> {
    session.require_user_id()?;

    let response = state.presence_query.list_recent().await?;

    Ok(web::Json(response.into()))
}

#[cfg(test)]
#[path = "presence_tests.rs"]
mod tests;
