//! Chart data model.
//!
//! Built fresh per request from provider output, never persisted. The only
//! post-construction mutation is the house-number backfill on planets.

use serde::{Serialize, Serializer};

use super::angle::{normalize_degree, Angle, ZodiacSign};
use super::houses::HouseCusps;

/// One celestial body with its normalized position annotations.
///
/// A body whose position could not be extracted from the provider keeps
/// `degree: None` and serializes with sign `"Unknown"`; it never aborts the
/// chart it belongs to.
#[derive(Debug, Clone, Serialize)]
pub struct CelestialBody {
    pub name: String,
    pub degree: Option<f64>,
    #[serde(serialize_with = "serialize_sign")]
    pub sign: Option<ZodiacSign>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub house: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub retrograde: Option<bool>,
}

impl CelestialBody {
    /// A body with a successfully extracted longitude.
    pub fn known(name: &str, raw_degree: f64, retrograde: Option<bool>) -> CelestialBody {
        let degree = normalize_degree(raw_degree);
        CelestialBody {
            name: name.to_string(),
            degree: Some(degree),
            sign: Some(ZodiacSign::from_degree(degree)),
            house: None,
            retrograde,
        }
    }

    /// The degraded sentinel for a body the provider could not position.
    pub fn unknown(name: &str) -> CelestialBody {
        CelestialBody {
            name: name.to_string(),
            degree: None,
            sign: None,
            house: None,
            retrograde: None,
        }
    }
}

fn serialize_sign<S: Serializer>(sign: &Option<ZodiacSign>, s: S) -> Result<S::Ok, S::Error> {
    match sign {
        Some(z) => s.serialize_str(z.name()),
        None => s.serialize_str("Unknown"),
    }
}

/// Ascendant and midheaven angles, available when house computation ran.
#[derive(Debug, Clone, Serialize)]
pub struct ChartAngles {
    pub asc: Angle,
    pub mc: Angle,
}

/// A fully normalized chart for one point in time and place.
#[derive(Debug, Clone, Serialize)]
pub struct Chart {
    pub jd_ut: f64,
    pub planets: Vec<CelestialBody>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub houses: Option<HouseCusps>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub angles: Option<ChartAngles>,
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_body_serializes_sign_name() {
        let body = CelestialBody::known("Sun", 165.5, Some(false));
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["sign"], "Virgo");
        assert_eq!(json["degree"], 165.5);
        assert_eq!(json["retrograde"], false);
        assert!(json.get("house").is_none());
    }

    #[test]
    fn test_unknown_body_serializes_sentinel() {
        let body = CelestialBody::unknown("Pluto");
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["sign"], "Unknown");
        assert!(json["degree"].is_null());
        assert!(json.get("retrograde").is_none());
    }

    #[test]
    fn test_known_body_normalizes_degree() {
        let body = CelestialBody::known("Mars", -10.0, None);
        assert!((body.degree.unwrap() - 350.0).abs() < 1e-9);
        assert_eq!(body.sign, Some(ZodiacSign::Pisces));
    }
}
