//! Deterministic canned ephemeris source.
//!
//! Serves documented sample positions: per-body base longitudes at J2000
//! advanced by a fixed mean daily motion. Used by the test suite and as the
//! runtime source when the `swisseph` feature is off. Not an ephemeris: the
//! numbers are plausible, not astronomical.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use serde_json::{json, Value};

use super::body::Body;
use super::source::{EphemerisSource, ProviderError, RawHouses};

const J2000: f64 = 2451545.0;

/// Base longitude at J2000 and mean daily motion, per body.
///
/// Documented sample defaults, not ephemeris output; the negative Saturn
/// motion keeps a retrograde body in every sample chart.
static SAMPLE_MOTION: Lazy<HashMap<Body, (f64, f64)>> = Lazy::new(|| {
    HashMap::from([
        (Body::Sun, (280.37, 0.9856)),
        (Body::Moon, (222.62, 13.1764)),
        (Body::Mercury, (271.90, 1.5531)),
        (Body::Venus, (241.57, 1.2508)),
        (Body::Mars, (327.97, 0.5240)),
        (Body::Jupiter, (25.25, 0.0831)),
        (Body::Saturn, (40.39, -0.0334)),
        (Body::Uranus, (314.79, 0.0117)),
        (Body::Neptune, (303.19, 0.0060)),
        (Body::Pluto, (251.44, 0.0040)),
    ])
});

/// Canned source with named-field payloads.
#[derive(Debug, Default)]
pub struct SampleSource;

impl SampleSource {
    pub fn new() -> SampleSource {
        SampleSource
    }
}

impl EphemerisSource for SampleSource {
    fn name(&self) -> &'static str {
        "sample"
    }

    fn body_position(&self, body: Body, jd_ut: f64) -> Result<Value, ProviderError> {
        let (base, speed) = SAMPLE_MOTION[&body];
        let longitude = base + speed * (jd_ut - J2000);
        Ok(json!({
            "longitude": longitude,
            "speed": speed,
            "retrograde": speed < 0.0,
        }))
    }

    fn house_cusps(
        &self,
        jd_ut: f64,
        _lat: f64,
        lng: f64,
        _house_system: char,
    ) -> Result<RawHouses, ProviderError> {
        // A crude but deterministic ascendant: the chart wheel turns once
        // per day and shifts with geographic longitude.
        let asc = (jd_ut - J2000) * 360.0 + lng;
        let cusps = (0..12).map(|i| asc + i as f64 * 30.0).collect();
        Ok(RawHouses {
            cusps,
            asc,
            mc: asc + 270.0,
        })
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ephemeris::decode::Dialect;
    use crate::ephemeris::source::verify_source;

    #[test]
    fn test_sample_classifies_as_named() {
        let source = SampleSource::new();
        assert_eq!(verify_source(&source).unwrap(), Dialect::Named);
    }

    #[test]
    fn test_sample_is_deterministic() {
        let source = SampleSource::new();
        let a = source.body_position(Body::Mars, 2448874.0).unwrap();
        let b = source.body_position(Body::Mars, 2448874.0).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_sample_carries_one_retrograde_body() {
        let source = SampleSource::new();
        let saturn = source.body_position(Body::Saturn, J2000).unwrap();
        assert_eq!(saturn["retrograde"], true);
        let sun = source.body_position(Body::Sun, J2000).unwrap();
        assert_eq!(sun["retrograde"], false);
    }

    #[test]
    fn test_sample_cusps_are_twelve_and_equal_width() {
        let source = SampleSource::new();
        let houses = source.house_cusps(J2000, 40.0, -74.0, 'P').unwrap();
        assert_eq!(houses.cusps.len(), 12);
        for pair in houses.cusps.windows(2) {
            assert!((pair[1] - pair[0] - 30.0).abs() < 1e-9);
        }
        assert_eq!(houses.asc, houses.cusps[0]);
    }
}
