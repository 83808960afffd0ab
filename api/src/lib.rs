//! HTTP API for the attendance backend.
//!
//! Exposed as a library so integration tests can mount the full router
//! without starting a listener.

pub mod auth;
pub mod response;
pub mod routes;
