//! Server construction and middleware wiring.

mod config;

pub use config::ServerConfig;

use std::sync::Arc;

use actix_session::{
    SessionMiddleware,
    config::{CookieContentSecurity, PersistentSession},
    storage::CookieSessionStore,
};
use actix_web::cookie::{Key, SameSite};
use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};
use mockable::DefaultClock;

use backend::domain::PresenceService;
use backend::domain::ports::{
    FixtureLoginService, FixturePresenceCommand, FixturePresenceQuery,
};
use backend::inbound::http::health::{HealthState, live, ready};
use backend::inbound::http::presence::{list_presence, log_presence};
use backend::inbound::http::state::HttpState;
use backend::inbound::http::users::login;
use backend::outbound::persistence::{
    DieselLoginService, DieselPresenceRepository, DieselUserRepository,
};

#[cfg(debug_assertions)]
use backend::ApiDoc;
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

/// Build the HTTP handler state from the configured adapters.
///
/// Uses the real DB-backed implementations when a pool is available,
/// otherwise falls back to the fixtures for local development and tests.
fn build_http_state(config: &ServerConfig) -> HttpState {
    match &config.db_pool {
        Some(pool) => {
            let presence = Arc::new(PresenceService::new(
                Arc::new(DieselPresenceRepository::new(pool.clone())),
                Arc::new(DefaultClock),
            ));
            HttpState::new(
                Arc::new(DieselLoginService::new(DieselUserRepository::new(
                    pool.clone(),
                ))),
                presence.clone(),
                presence,
            )
        }
        None => HttpState::new(
            Arc::new(FixtureLoginService),
            Arc::new(FixturePresenceCommand),
            Arc::new(FixturePresenceQuery),
        ),
    }
}

#[derive(Clone)]
struct AppDependencies {
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
    key: Key,
    cookie_secure: bool,
    same_site: SameSite,
}

fn build_app(
    deps: AppDependencies,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let AppDependencies {
        health_state,
        http_state,
        key,
        cookie_secure,
        same_site,
    } = deps;

    let session = SessionMiddleware::builder(CookieSessionStore::default(), key)
        .cookie_name("session".into())
        .cookie_path("/".into())
        .cookie_secure(cookie_secure)
        .cookie_http_only(true)
        .cookie_content_security(CookieContentSecurity::Private)
        .cookie_same_site(same_site)
        .session_lifecycle(
            PersistentSession::default().session_ttl(actix_web::cookie::time::Duration::hours(2)),
        )
        .build();

    let api = web::scope("/api/v1")
        .app_data(http_state)
        .wrap(session)
        .service(login)
        .service(log_presence)
        .service(list_presence);

    let app = App::new()
        .app_data(health_state)
        .service(api)
        .service(ready)
        .service(live);

    #[cfg(debug_assertions)]
    let app =
        app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));

    app
}

/// Run the HTTP server until shutdown.
pub async fn run(config: ServerConfig) -> std::io::Result<()> {
    let http_state = web::Data::new(build_http_state(&config));
    let health_state = web::Data::new(HealthState::new());
    // Clone for the server factory so the readiness probe stays accessible.
    let server_health_state = health_state.clone();

    let ServerConfig {
        key,
        cookie_secure,
        same_site,
        bind_addr,
        ..
    } = config;

    let server = HttpServer::new(move || {
        build_app(AppDependencies {
            health_state: server_health_state.clone(),
            http_state: http_state.clone(),
            key: key.clone(),
            cookie_secure,
            same_site,
        })
    })
    .bind(bind_addr)?;

    health_state.mark_ready();
    server.run().await
}
