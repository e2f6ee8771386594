//! HTTP API for the Casevault engine.
//!
//! Exposes session management, case playback, and the declassified-archive
//! browsing endpoints over axum. The router is assembled in [`routes`] so the
//! binary and the integration tests share the exact same wiring.

pub mod error;
pub mod routes;
pub mod state;
