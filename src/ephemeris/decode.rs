//! Tagged decoding of the provider's raw payload shapes.
//!
//! Different builds of the native library hand back a body position as a
//! plain number, a coordinate tuple, a `{ data: [...] }` block, or an object
//! with named fields. Instead of re-probing the shape on every call, the
//! shape is classified once into a [`Dialect`] at startup and each decode
//! then runs the one matching extractor.
//!
//! Decoding never errors: a missing or non-numeric slot yields `None`, and
//! the owning body is reported in its degraded "Unknown" state. Non-finite
//! values cannot survive the `serde_json::Value` boundary (they serialize as
//! `null`), so `None` also covers NaN/infinity from the native side.

use serde_json::Value;

/// Index of the longitudinal speed in tuple-shaped payloads.
const TUPLE_SPEED_SLOT: usize = 3;

/// One known provider payload shape.
///
/// `classify` tries the variants in declaration order; that order is the
/// fixed extraction priority for ambiguous payloads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dialect {
    /// A bare number: the longitude itself.
    Scalar,
    /// An array whose first element is the longitude.
    Tuple,
    /// An object with a `data` array whose first element is the longitude.
    DataBlock,
    /// An object with `longitude`/`lon` (and optionally speed / retrograde).
    Named,
}

impl Dialect {
    /// Classify a raw payload, or `None` when no known shape matches.
    pub fn classify(value: &Value) -> Option<Dialect> {
        if finite(value) {
            return Some(Dialect::Scalar);
        }
        if value.as_array().and_then(|a| a.first()).is_some_and(finite) {
            return Some(Dialect::Tuple);
        }
        if value
            .get("data")
            .and_then(|d| d.as_array())
            .and_then(|a| a.first())
            .is_some_and(finite)
        {
            return Some(Dialect::DataBlock);
        }
        if named_longitude(value).is_some() {
            return Some(Dialect::Named);
        }
        None
    }

    /// Ecliptic longitude from a payload of this dialect.
    pub fn longitude(&self, value: &Value) -> Option<f64> {
        match self {
            Dialect::Scalar => as_finite(value),
            Dialect::Tuple => value.as_array().and_then(|a| a.first()).and_then(as_finite),
            Dialect::DataBlock => value
                .get("data")
                .and_then(|d| d.as_array())
                .and_then(|a| a.first())
                .and_then(as_finite),
            Dialect::Named => named_longitude(value),
        }
    }

    /// Longitudinal speed, where the dialect carries one.
    pub fn speed(&self, value: &Value) -> Option<f64> {
        match self {
            Dialect::Scalar => None,
            Dialect::Tuple => value
                .as_array()
                .and_then(|a| a.get(TUPLE_SPEED_SLOT))
                .and_then(as_finite),
            Dialect::DataBlock => value
                .get("data")
                .and_then(|d| d.as_array())
                .and_then(|a| a.get(TUPLE_SPEED_SLOT))
                .and_then(as_finite),
            Dialect::Named => ["speed", "longitudeSpeed", "lonSpeed"]
                .iter()
                .find_map(|k| value.get(k).and_then(as_finite)),
        }
    }

    /// Explicit retrograde flag, for object-shaped payloads that carry one.
    pub fn retrograde_flag(&self, value: &Value) -> Option<bool> {
        match self {
            Dialect::Scalar | Dialect::Tuple => None,
            Dialect::DataBlock | Dialect::Named => ["retrograde", "retro"]
                .iter()
                .find_map(|k| value.get(k).and_then(Value::as_bool)),
        }
    }
}

/// Priority-ordered longitude extraction without a pre-selected dialect.
///
/// Total over any `Value`: absent/undecodable payloads yield `None`, never
/// an error.
pub fn extract_longitude(value: &Value) -> Option<f64> {
    Dialect::classify(value).and_then(|d| d.longitude(value))
}

fn named_longitude(value: &Value) -> Option<f64> {
    ["longitude", "lon"]
        .iter()
        .find_map(|k| value.get(k).and_then(as_finite))
}

fn as_finite(value: &Value) -> Option<f64> {
    value.as_f64().filter(|x| x.is_finite())
}

fn finite(value: &Value) -> bool {
    as_finite(value).is_some()
}

// ============================================================================
// Tests
// ============================================================================
