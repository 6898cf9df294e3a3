//! Presence backend library modules.
//!
//! The crate follows a hexagonal layout: `domain` holds entities, services,
//! and ports; `inbound` adapts HTTP requests onto the driving ports;
//! `outbound` implements the driven ports against PostgreSQL.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod outbound;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
