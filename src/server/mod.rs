//! HTTP shell for the ephemeris and chat endpoints.
//!
//! # Endpoints
//!
//! - `GET  /health`    — Liveness probe
//! - `GET  /positions` — Planetary/house positions for a time and place
//! - `POST /chat`      — Keyword-routed advisory reply

pub mod params;
pub mod routes;

pub use routes::{app_router, AppState};
