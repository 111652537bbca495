//! # astrochart
//!
//! A stateless HTTP service that computes planetary and house positions by
//! delegating to an external ephemeris provider, plus a keyword-routed chat
//! endpoint that replies with fixed astrology guidance.
//!
//! The crate's own logic is the normalization layer: decoding the provider's
//! raw output shapes into a canonical chart, mapping ecliptic degrees to
//! zodiac signs, assigning houses against a cusp ring, and composing short
//! text replies. The astronomy itself lives in the provider.

pub mod chart;
pub mod chat;
pub mod ephemeris;
pub mod server;

pub use chart::{Angle, CelestialBody, Chart, ChartAngles, HouseCusps, ZodiacSign};
pub use ephemeris::{build_chart, ChartRequest, EphemerisSource};

/// Service version reported by `GET /health`.
pub const VERSION: &str = "1.2.0";

/// Service name reported by `GET /health`.
pub const SERVICE: &str = "astrochart";
