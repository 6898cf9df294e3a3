//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match the database migrations exactly. They are used
//! by Diesel for compile-time query validation and type-safe SQL generation.
//!
//! # Maintenance
//!
//! When migrations change the schema, this file should be regenerated or
//! manually updated to reflect those changes. The `diesel print-schema`
//! command can generate these definitions from a live database.

diesel::table! {
    /// User accounts table.
    ///
    /// Stores registered users with their display names and audit timestamps.
    /// The `id` column is the primary key (UUID v4).
    users (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// Human-readable display name (max 32 characters).
        display_name -> Varchar,
        /// Record creation timestamp.
        created_at -> Timestamptz,
        /// Last modification timestamp.
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Presence check-in table.
    ///
    /// One row per logged check-in. Rows are inserted once and never
    /// updated or deleted. The four location columns are jointly present
    /// or jointly absent; the adapter enforces the invariant when reading.
    presences (id) {
        /// Primary key: UUID v4 identifier, generated on insert.
        id -> Uuid,
        /// Owning user (FK to `users.id`).
        user_id -> Uuid,
        /// Client-reported check-in instant.
        device_timestamp -> Timestamptz,
        /// Server-assigned insertion instant; the ordering key.
        server_timestamp -> Timestamptz,
        /// Latitude of the optional location fix.
        latitude -> Nullable<Float8>,
        /// Longitude of the optional location fix.
        longitude -> Nullable<Float8>,
        /// Accuracy radius of the optional location fix, in metres.
        accuracy -> Nullable<Float8>,
        /// Instant the optional fix was produced by the device.
        location_timestamp -> Nullable<Timestamptz>,
    }
}

diesel::joinable!(presences -> users (user_id));

diesel::allow_tables_to_appear_in_same_query!(presences, users);
