//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{LoginService, PresenceCommand, PresenceQuery};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub login: Arc<dyn LoginService>,
    pub presence: Arc<dyn PresenceCommand>,
    pub presence_query: Arc<dyn PresenceQuery>,
}

impl HttpState {
    /// Construct state from the port implementations.
    ///
    /// # Examples
    /// ```no_run
    /// use std::sync::Arc;
    ///
    /// use backend::domain::ports::{
    ///     FixtureLoginService, FixturePresenceCommand, FixturePresenceQuery,
    /// };
    /// use backend::inbound::http::state::HttpState;
    ///
    /// let state = HttpState::new(
    ///     Arc::new(FixtureLoginService),
    ///     Arc::new(FixturePresenceCommand),
    ///     Arc::new(FixturePresenceQuery),
    /// );
    /// let _login = state.login.clone();
    /// ```
    pub fn new(
        login: Arc<dyn LoginService>,
        presence: Arc<dyn PresenceCommand>,
        presence_query: Arc<dyn PresenceQuery>,
    ) -> Self {
        Self {
            login,
            presence,
            presence_query,
        }
    }
}
