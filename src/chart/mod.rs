//! Canonical chart model: angles, zodiac signs, house cusps, bodies.
//!
//! Everything here is pure arithmetic over ecliptic longitudes; no provider
//! calls, no I/O. The `ephemeris` module builds these types from raw provider
//! output; the `server` module serializes them.

pub mod angle;
pub mod houses;
pub mod types;

pub use angle::{normalize_degree, Angle, ZodiacSign};
pub use houses::{assign_houses, CuspError, HouseCusps};
pub use types::{CelestialBody, Chart, ChartAngles};
