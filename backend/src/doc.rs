//! OpenAPI documentation configuration.
//!
//! Defines the [`ApiDoc`] struct which generates the OpenAPI specification
//! for the REST API. It registers:
//!
//! - **Paths**: All HTTP endpoints from the inbound layer (presence, login,
//!   health)
//! - **Schemas**: Request/response bodies plus domain error wrappers that
//!   provide OpenAPI definitions without coupling domain types to utoipa
//! - **Security**: Session cookie authentication scheme

use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::inbound::http::presence::{
    ListPresenceResponseBody, LocationBody, LogPresenceRequestBody, PresenceEntryResponseBody,
    PresenceRecordResponseBody, UserResponseBody,
};
use crate::inbound::http::schemas::{ErrorCodeSchema, ErrorSchema};
use crate::inbound::http::users::LoginRequest;

/// Enrich the generated document with the session cookie security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                "session",
                "Session cookie issued by POST /api/v1/login.",
            ))),
        );
    }
}

/// OpenAPI document for the REST API.
/// Swagger UI is enabled in debug builds only and used by tooling.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Presence backend API",
        description = "HTTP interface for recording and listing presence check-ins."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("SessionCookie" = [])),
    paths(
        crate::inbound::http::presence::log_presence,
        crate::inbound::http::presence::list_presence,
        crate::inbound::http::users::login,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        LogPresenceRequestBody,
        LocationBody,
        PresenceRecordResponseBody,
        ListPresenceResponseBody,
        PresenceEntryResponseBody,
        UserResponseBody,
        LoginRequest,
        ErrorSchema,
        ErrorCodeSchema,
    )),
    tags(
        (name = "presence", description = "Recording and listing presence check-ins"),
        (name = "users", description = "Session establishment"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    //! Tests verifying the generated document references every endpoint.

    use super::*;

    fn document() -> serde_json::Value {
        serde_json::to_value(ApiDoc::openapi()).expect("document serialises")
    }

    #[test]
    fn document_contains_every_endpoint() {
        let doc = document();
        let paths = doc["paths"].as_object().expect("paths object");

        for path in ["/api/v1/presence", "/api/v1/login", "/health/ready", "/health/live"] {
            assert!(paths.contains_key(path), "missing path: {path}");
        }
    }

    #[test]
    fn presence_path_exposes_both_operations() {
        let doc = document();

        assert!(doc["paths"]["/api/v1/presence"]["post"].is_object());
        assert!(doc["paths"]["/api/v1/presence"]["get"].is_object());
    }

    #[test]
    fn session_cookie_scheme_is_registered() {
        let doc = document();

        assert!(doc["components"]["securitySchemes"]["SessionCookie"].is_object());
    }
}
