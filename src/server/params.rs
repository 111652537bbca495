//! Query-parameter parsing and validation for the positions endpoint.
//!
//! All parameters arrive as strings; parsing is done by hand so every
//! failure names the offending field. Validation runs before any provider
//! call, so a rejected request never starts a computation.

use chrono::{NaiveDate, NaiveTime};
use serde::Deserialize;
use thiserror::Error;

use crate::ephemeris::ChartRequest;

/// Default house system when neither `house_system` nor `hsys` is given.
const DEFAULT_HOUSE_SYSTEM: char = 'P';

/// Raw query string fields, prior to validation.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawPositionsQuery {
    pub date: Option<String>,
    pub time: Option<String>,
    pub lat: Option<String>,
    pub lng: Option<String>,
    #[serde(alias = "hsys")]
    pub house_system: Option<String>,
    pub tz_offset_minutes: Option<String>,
}

/// A rejected query parameter. Always names the field.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParamError {
    #[error("missing required parameter '{0}'")]
    Missing(&'static str),

    #[error("invalid '{field}': {reason}")]
    Invalid { field: &'static str, reason: String },
}

fn invalid(field: &'static str, reason: impl Into<String>) -> ParamError {
    ParamError::Invalid {
        field,
        reason: reason.into(),
    }
}

impl RawPositionsQuery {
    /// Validate every field and produce a chart request.
    pub fn validate(self) -> Result<ChartRequest, ParamError> {
        let date = self.date.ok_or(ParamError::Missing("date"))?;
        let date = NaiveDate::parse_from_str(&date, "%Y-%m-%d")
            .map_err(|_| invalid("date", "expected YYYY-MM-DD"))?;

        let time = self.time.ok_or(ParamError::Missing("time"))?;
        let time = NaiveTime::parse_from_str(&time, "%H:%M:%S")
            .or_else(|_| NaiveTime::parse_from_str(&time, "%H:%M"))
            .map_err(|_| invalid("time", "expected HH:MM or HH:MM:SS (24h)"))?;

        let lat = parse_range("lat", self.lat, -90.0, 90.0)?;
        let lng = parse_range("lng", self.lng, -180.0, 180.0)?;

        let house_system = match self.house_system {
            None => DEFAULT_HOUSE_SYSTEM,
            Some(s) => {
                let mut chars = s.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) if c.is_ascii_alphabetic() => c.to_ascii_uppercase(),
                    _ => return Err(invalid("house_system", "expected a single letter")),
                }
            }
        };

        let tz_offset_minutes = match self.tz_offset_minutes {
            None => 0,
            Some(s) => {
                let n: i32 = s
                    .parse()
                    .map_err(|_| invalid("tz_offset_minutes", "expected an integer"))?;
                if !(-900..=900).contains(&n) {
                    return Err(invalid("tz_offset_minutes", "must be in [-900, 900]"));
                }
                n
            }
        };

        Ok(ChartRequest {
            date,
            time,
            lat,
            lng,
            house_system,
            tz_offset_minutes,
        })
    }
}

fn parse_range(
    field: &'static str,
    value: Option<String>,
    min: f64,
    max: f64,
) -> Result<f64, ParamError> {
    let raw = value.ok_or(ParamError::Missing(field))?;
    let n: f64 = raw
        .parse()
        .map_err(|_| invalid(field, "expected a number"))?;
    if !n.is_finite() || n < min || n > max {
        return Err(invalid(field, format!("must be in [{}, {}]", min, max)));
    }
    Ok(n)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn full_query() -> RawPositionsQuery {
        RawPositionsQuery {
            date: Some("1992-09-08".to_string()),
            time: Some("12:00".to_string()),
            lat: Some("40.7".to_string()),
            lng: Some("-74.0".to_string()),
            house_system: Some("k".to_string()),
            tz_offset_minutes: Some("-300".to_string()),
        }
    }

    #[test]
    fn test_valid_query_parses() {
        let req = full_query().validate().unwrap();
        assert_eq!(req.date.to_string(), "1992-09-08");
        assert_eq!(req.time.to_string(), "12:00:00");
        assert_eq!(req.lat, 40.7);
        assert_eq!(req.lng, -74.0);
        assert_eq!(req.house_system, 'K');
        assert_eq!(req.tz_offset_minutes, -300);
    }

    #[test]
    fn test_missing_fields_name_the_field() {
        for field in ["date", "time", "lat", "lng"] {
            let mut q = full_query();
            match field {
                "date" => q.date = None,
                "time" => q.time = None,
                "lat" => q.lat = None,
                _ => q.lng = None,
            }
            let err = q.validate().unwrap_err();
            assert_eq!(err, ParamError::Missing(field));
            assert!(err.to_string().contains(field));
        }
    }

    #[test]
    fn test_defaults_for_optional_fields() {
        let mut q = full_query();
        q.house_system = None;
        q.tz_offset_minutes = None;
        let req = q.validate().unwrap();
        assert_eq!(req.house_system, 'P');
        assert_eq!(req.tz_offset_minutes, 0);
    }

    #[test]
    fn test_seconds_are_optional() {
        let mut q = full_query();
        q.time = Some("23:59:59".to_string());
        assert_eq!(q.validate().unwrap().time.to_string(), "23:59:59");
    }

    #[test]
    fn test_out_of_range_rejected() {
        let mut q = full_query();
        q.lat = Some("91".to_string());
        assert!(matches!(
            q.validate().unwrap_err(),
            ParamError::Invalid { field: "lat", .. }
        ));

        let mut q = full_query();
        q.lng = Some("-200".to_string());
        assert!(matches!(
            q.validate().unwrap_err(),
            ParamError::Invalid { field: "lng", .. }
        ));

        let mut q = full_query();
        q.tz_offset_minutes = Some("901".to_string());
        assert!(matches!(
            q.validate().unwrap_err(),
            ParamError::Invalid { field: "tz_offset_minutes", .. }
        ));
    }

    #[test]
    fn test_malformed_values_rejected() {
        let mut q = full_query();
        q.date = Some("08/09/1992".to_string());
        assert!(matches!(
            q.validate().unwrap_err(),
            ParamError::Invalid { field: "date", .. }
        ));

        let mut q = full_query();
        q.time = Some("noon".to_string());
        assert!(matches!(
            q.validate().unwrap_err(),
            ParamError::Invalid { field: "time", .. }
        ));

        let mut q = full_query();
        q.lat = Some("NaN".to_string());
        assert!(matches!(
            q.validate().unwrap_err(),
            ParamError::Invalid { field: "lat", .. }
        ));

        let mut q = full_query();
        q.house_system = Some("PK".to_string());
        assert!(matches!(
            q.validate().unwrap_err(),
            ParamError::Invalid { field: "house_system", .. }
        ));

        let mut q = full_query();
        q.house_system = Some("7".to_string());
        assert!(matches!(
            q.validate().unwrap_err(),
            ParamError::Invalid { field: "house_system", .. }
        ));
    }
}
