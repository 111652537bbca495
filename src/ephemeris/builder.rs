//! Chart construction: per-body provider calls, degradation, house backfill.

use chrono::{Datelike, NaiveDate, NaiveTime, Timelike};

use crate::chart::{assign_houses, Angle, CelestialBody, Chart, ChartAngles, HouseCusps};

use super::body::ALL_BODIES;
use super::decode::Dialect;
use super::source::EphemerisSource;
use super::time::{julian_day, local_to_ut};

/// A validated positions query.
#[derive(Debug, Clone)]
pub struct ChartRequest {
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub lat: f64,
    pub lng: f64,
    pub house_system: char,
    pub tz_offset_minutes: i32,
}

impl ChartRequest {
    /// Julian Day (UT) for this request's civil date, time, and offset.
    pub fn jd_ut(&self) -> f64 {
        let local_hours = self.time.hour() as f64
            + self.time.minute() as f64 / 60.0
            + self.time.second() as f64 / 3600.0;
        let ut_hours = local_to_ut(local_hours, self.tz_offset_minutes);
        julian_day(
            self.date.year(),
            self.date.month(),
            self.date.day(),
            ut_hours,
        )
    }
}

/// Build a canonical chart from one provider.
///
/// One call per body in fixed list order, then one cusp call. A body whose
/// call fails or whose payload does not decode is degraded to its "Unknown"
/// sentinel; a failed or unavailable house computation omits `houses` and
/// `angles` while planets still return. This function itself never fails.
pub fn build_chart(source: &dyn EphemerisSource, dialect: Dialect, req: &ChartRequest) -> Chart {
    let jd_ut = req.jd_ut();

    let mut planets = Vec::with_capacity(ALL_BODIES.len());
    for body in ALL_BODIES {
        let planet = match source.body_position(body, jd_ut) {
            Ok(raw) => match dialect.longitude(&raw) {
                Some(lon) => {
                    let retrograde = dialect
                        .retrograde_flag(&raw)
                        .or_else(|| dialect.speed(&raw).map(|s| s < 0.0))
                        .unwrap_or(false);
                    CelestialBody::known(body.name(), lon, Some(retrograde))
                }
                None => {
                    tracing::debug!(body = body.name(), "payload did not decode, degrading");
                    CelestialBody::unknown(body.name())
                }
            },
            Err(err) => {
                tracing::warn!(body = body.name(), error = %err, "position call failed, degrading");
                CelestialBody::unknown(body.name())
            }
        };
        planets.push(planet);
    }

    let (houses, angles) = if source.houses_available() {
        compute_houses(source, jd_ut, req, &mut planets)
    } else {
        tracing::debug!("houses unavailable for this provider, skipping");
        (None, None)
    };

    Chart {
        jd_ut,
        planets,
        houses,
        angles,
    }
}

fn compute_houses(
    source: &dyn EphemerisSource,
    jd_ut: f64,
    req: &ChartRequest,
    planets: &mut [CelestialBody],
) -> (Option<HouseCusps>, Option<ChartAngles>) {
    let raw = match source.house_cusps(jd_ut, req.lat, req.lng, req.house_system) {
        Ok(raw) => raw,
        Err(err) => {
            tracing::warn!(error = %err, "house computation failed, omitting houses");
            return (None, None);
        }
    };
    let angles = ChartAngles {
        asc: Angle::from_degree(raw.asc),
        mc: Angle::from_degree(raw.mc),
    };
    match HouseCusps::try_from(raw.cusps) {
        Ok(cusps) => {
            assign_houses(planets, &cusps);
            (Some(cusps), Some(angles))
        }
        Err(err) => {
            tracing::warn!(error = %err, "malformed cusp ring, omitting houses");
            (None, None)
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ephemeris::body::Body;
    use crate::ephemeris::sample::SampleSource;
    use crate::ephemeris::source::{ProviderError, RawHouses};
    use serde_json::{json, Value};

    fn request() -> ChartRequest {
        ChartRequest {
            date: NaiveDate::from_ymd_opt(1992, 9, 8).unwrap(),
            time: NaiveTime::from_hms_opt(12, 0, 0).unwrap(),
            lat: 40.7,
            lng: -74.0,
            house_system: 'P',
            tz_offset_minutes: 0,
        }
    }

    /// Source that fails one body, omits data for another, and marks one
    /// body retrograde via an explicit flag contradicting its speed.
    struct PatchySource;

    impl EphemerisSource for PatchySource {
        fn name(&self) -> &'static str {
            "patchy"
        }

        fn body_position(&self, body: Body, _jd_ut: f64) -> Result<Value, ProviderError> {
            match body {
                Body::Pluto => Err(ProviderError::Computation {
                    body: "Pluto".to_string(),
                    message: "beyond ephemeris range".to_string(),
                }),
                Body::Neptune => Ok(Value::Null),
                // Explicit flag wins over the positive speed.
                Body::Saturn => Ok(json!({"longitude": 40.0, "speed": 0.03, "retrograde": true})),
                Body::Mars => Ok(json!({"longitude": 100.0, "speed": -0.4})),
                _ => Ok(json!({"longitude": 10.0 * body.provider_id() as f64, "speed": 1.0})),
            }
        }

        fn house_cusps(
            &self,
            _jd_ut: f64,
            _lat: f64,
            _lng: f64,
            _house_system: char,
        ) -> Result<RawHouses, ProviderError> {
            Err(ProviderError::HousesUnavailable("no capability".to_string()))
        }
    }

    #[test]
    fn test_jd_ut_reference() {
        assert_eq!(request().jd_ut(), 2448874.0);
    }

    #[test]
    fn test_jd_ut_applies_timezone_offset() {
        let mut req = request();
        req.tz_offset_minutes = 120;
        assert!((req.jd_ut() - (2448874.0 - 2.0 / 24.0)).abs() < 1e-9);
    }

    #[test]
    fn test_degraded_bodies_do_not_abort_chart() {
        let chart = build_chart(&PatchySource, Dialect::Named, &request());
        assert_eq!(chart.planets.len(), 10);

        let pluto = chart.planets.iter().find(|p| p.name == "Pluto").unwrap();
        assert!(pluto.degree.is_none());
        assert!(pluto.sign.is_none());

        let neptune = chart.planets.iter().find(|p| p.name == "Neptune").unwrap();
        assert!(neptune.degree.is_none());

        let sun = chart.planets.iter().find(|p| p.name == "Sun").unwrap();
        assert_eq!(sun.degree, Some(0.0));
    }

    #[test]
    fn test_retrograde_explicit_flag_beats_speed() {
        let chart = build_chart(&PatchySource, Dialect::Named, &request());
        let saturn = chart.planets.iter().find(|p| p.name == "Saturn").unwrap();
        assert_eq!(saturn.retrograde, Some(true));
    }

    #[test]
    fn test_retrograde_derived_from_negative_speed() {
        let chart = build_chart(&PatchySource, Dialect::Named, &request());
        let mars = chart.planets.iter().find(|p| p.name == "Mars").unwrap();
        assert_eq!(mars.retrograde, Some(true));
        let sun = chart.planets.iter().find(|p| p.name == "Sun").unwrap();
        assert_eq!(sun.retrograde, Some(false));
    }

    #[test]
    fn test_house_failure_omits_houses_keeps_planets() {
        let chart = build_chart(&PatchySource, Dialect::Named, &request());
        assert!(chart.houses.is_none());
        assert!(chart.angles.is_none());
        assert_eq!(chart.planets.len(), 10);
    }

    #[test]
    fn test_sample_source_full_chart() {
        let source = SampleSource::new();
        let dialect = crate::ephemeris::source::verify_source(&source).unwrap();
        let chart = build_chart(&source, dialect, &request());

        assert_eq!(chart.planets.len(), 10);
        assert!(chart.planets.iter().all(|p| p.degree.is_some()));
        assert!(chart.planets.iter().all(|p| p.house.is_some()));
        assert!(chart.houses.is_some());
        let angles = chart.angles.unwrap();
        assert!((0.0..360.0).contains(&angles.asc.degree));
        assert!((0.0..360.0).contains(&angles.mc.degree));
    }

    #[test]
    fn test_body_order_is_fixed() {
        let source = SampleSource::new();
        let chart = build_chart(&source, Dialect::Named, &request());
        let names: Vec<&str> = chart.planets.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(
            names,
            ["Sun", "Moon", "Mercury", "Venus", "Mars", "Jupiter", "Saturn", "Uranus", "Neptune", "Pluto"]
        );
    }
}
