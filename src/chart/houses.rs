//! House cusps and the wrap-aware house assignment.

use serde::Serialize;
use thiserror::Error;

use super::angle::{normalize_degree, Angle};
use super::types::CelestialBody;

/// A cusp ring that does not hold exactly twelve entries.
#[derive(Debug, Error)]
#[error("expected exactly 12 house cusps, got {0}")]
pub struct CuspError(pub usize);

/// The twelve house boundaries in ecliptic order.
///
/// Index 0 is the cusp of house 1. Anything other than exactly twelve values
/// is rejected at construction; callers treat that as "houses absent" rather
/// than working with a partial ring.
#[derive(Debug, Clone, Serialize)]
pub struct HouseCusps(Vec<Angle>);

impl HouseCusps {
    pub fn angles(&self) -> &[Angle] {
        &self.0
    }

    /// House number (1..=12) containing the given longitude.
    ///
    /// House `i` spans the half-open interval `[cusp[i], cusp[i+1])`,
    /// wrapping across 0° Aries when the start cusp exceeds the end cusp.
    /// Houses are scanned in order and the first match wins; a degree that
    /// matches no interval (malformed ring) falls back to house 12.
    pub fn house_of(&self, degree: f64) -> u8 {
        let deg = normalize_degree(degree);
        for i in 0..12 {
            let start = self.0[i].degree;
            let end = self.0[(i + 1) % 12].degree;
            let hit = if start <= end {
                deg >= start && deg < end
            } else {
                // Interval wraps past 360°.
                deg >= start || deg < end
            };
            if hit {
                return (i + 1) as u8;
            }
        }
        12
    }
}

impl TryFrom<Vec<f64>> for HouseCusps {
    type Error = CuspError;

    fn try_from(raw: Vec<f64>) -> Result<Self, Self::Error> {
        if raw.len() != 12 {
            return Err(CuspError(raw.len()));
        }
        Ok(HouseCusps(raw.into_iter().map(Angle::from_degree).collect()))
    }
}

/// Backfill house numbers onto every planet with a known degree.
pub fn assign_houses(planets: &mut [CelestialBody], cusps: &HouseCusps) {
    for planet in planets.iter_mut() {
        if let Some(degree) = planet.degree.filter(|d| d.is_finite()) {
            planet.house = Some(cusps.house_of(degree));
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn equal_cusps() -> HouseCusps {
        let raw: Vec<f64> = (0..12).map(|i| i as f64 * 30.0).collect();
        HouseCusps::try_from(raw).unwrap()
    }

    #[test]
    fn test_rejects_wrong_cusp_count() {
        assert!(HouseCusps::try_from(vec![0.0; 11]).is_err());
        assert!(HouseCusps::try_from(vec![0.0; 13]).is_err());
        assert!(HouseCusps::try_from(vec![0.0; 12]).is_ok());
    }

    #[test]
    fn test_non_wrapping_assignment() {
        let cusps = equal_cusps();
        // [0,30) is house 1, [330,360) is house 12.
        assert_eq!(cusps.house_of(5.0), 1);
        assert_eq!(cusps.house_of(355.0), 12);
    }

    #[test]
    fn test_boundary_is_inclusive_start_exclusive_end() {
        let cusps = equal_cusps();
        assert_eq!(cusps.house_of(30.0), 2);
        assert_eq!(cusps.house_of(29.999), 1);
        assert_eq!(cusps.house_of(0.0), 1);
    }

    #[test]
    fn test_wrapping_interval() {
        // House 12 spans [350, 20): the ring crosses 0° Aries inside it.
        let raw = vec![
            20.0, 50.0, 80.0, 110.0, 140.0, 170.0, 200.0, 230.0, 260.0, 290.0, 320.0, 350.0,
        ];
        let cusps = HouseCusps::try_from(raw).unwrap();
        assert_eq!(cusps.house_of(5.0), 12);
        assert_eq!(cusps.house_of(355.0), 12);
        assert_eq!(cusps.house_of(25.0), 1);
    }

    #[test]
    fn test_assign_houses_skips_unknown_degrees() {
        let cusps = equal_cusps();
        let mut planets = vec![
            CelestialBody::known("Sun", 95.0, None),
            CelestialBody::unknown("Moon"),
        ];
        assign_houses(&mut planets, &cusps);
        assert_eq!(planets[0].house, Some(4));
        assert_eq!(planets[1].house, None);
    }
}
