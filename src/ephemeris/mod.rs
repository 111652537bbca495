//! Ephemeris provider boundary and the normalization layer over it.
//!
//! The provider does the astronomy; this module does everything around it:
//!
//! ```text
//! validated query
//!   → Julian Day (time base shared by every computation)
//!   → one provider call per body + one cusp call
//!   → dialect decode (raw shape → longitude/speed/retrograde)
//!   → canonical Chart (signs, houses, degraded bodies)
//! ```
//!
//! Provider output shapes vary between builds of the native library, so the
//! shape is classified once at startup ([`verify_source`]) into a [`Dialect`]
//! and every per-body decode reuses that classification.

pub mod body;
pub mod builder;
pub mod decode;
pub mod sample;
pub mod source;
pub mod time;

#[cfg(feature = "swisseph")]
pub mod swe;

pub use body::{Body, ALL_BODIES};
pub use builder::{build_chart, ChartRequest};
pub use decode::{extract_longitude, Dialect};
pub use sample::SampleSource;
pub use source::{verify_source, EphemerisConfig, EphemerisSource, ProviderError, RawHouses};
pub use time::{julian_day, local_to_ut};

#[cfg(feature = "swisseph")]
pub use swe::SweSource;
