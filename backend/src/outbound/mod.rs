//! Outbound adapters implementing the driven ports against infrastructure.

pub mod persistence;
