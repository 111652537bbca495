//! The provider adapter seam: one trait, selected once at startup.

use std::path::{Path, PathBuf};

use serde_json::Value;
use thiserror::Error;

use super::body::Body;
use super::decode::Dialect;

/// Errors crossing the provider boundary.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// The provider failed to compute one body's position. Degrades that
    /// body only; the rest of the chart proceeds.
    #[error("position computation failed for {body}: {message}")]
    Computation { body: String, message: String },

    /// House computation cannot run (missing capability or data files).
    #[error("houses unavailable: {0}")]
    HousesUnavailable(String),

    /// The provider returned a payload no known dialect can decode.
    #[error("undecodable provider payload: {0}")]
    UndecodableShape(String),
}

/// Raw house output, prior to the exactly-twelve-cusps check.
#[derive(Debug, Clone)]
pub struct RawHouses {
    pub cusps: Vec<f64>,
    pub asc: f64,
    pub mc: f64,
}

/// An ephemeris provider build.
///
/// Implementations wrap one concrete build of the external library and hand
/// back its raw per-body payload untouched; decoding happens in one place
/// against the dialect selected by [`verify_source`]. Calls are synchronous
/// (the native API blocks); HTTP handlers wrap them in `spawn_blocking`.
pub trait EphemerisSource: Send + Sync {
    /// Human-readable source name, for logs.
    fn name(&self) -> &'static str;

    /// Raw, shape-varying position payload for one body at the given JD (UT).
    fn body_position(&self, body: Body, jd_ut: f64) -> Result<Value, ProviderError>;

    /// House cusps and chart angles for a time and place.
    ///
    /// `house_system` is the single-letter system code already validated by
    /// the caller.
    fn house_cusps(
        &self,
        jd_ut: f64,
        lat: f64,
        lng: f64,
        house_system: char,
    ) -> Result<RawHouses, ProviderError>;

    /// False when the provider's data files were unreachable at startup.
    /// Positions still compute; house computation is skipped.
    fn houses_available(&self) -> bool {
        true
    }
}

/// Probe the source once and classify its payload dialect.
///
/// Runs at startup. An incompatible provider build fails here, fast, instead
/// of degrading every body at request time.
pub fn verify_source(source: &dyn EphemerisSource) -> Result<Dialect, ProviderError> {
    // J2000 noon, comfortably inside any provider's supported range.
    const PROBE_JD: f64 = 2451545.0;
    let raw = source.body_position(Body::Sun, PROBE_JD)?;
    Dialect::classify(&raw).ok_or_else(|| ProviderError::UndecodableShape(raw.to_string()))
}

/// Provider configuration, resolved once at startup.
#[derive(Debug, Clone, Default)]
pub struct EphemerisConfig {
    /// Directory holding the provider's ephemeris data files.
    pub ephe_path: Option<PathBuf>,
}

impl EphemerisConfig {
    /// Read configuration from the environment (`ASTRO_EPHE_PATH`).
    pub fn from_env() -> EphemerisConfig {
        EphemerisConfig {
            ephe_path: std::env::var_os("ASTRO_EPHE_PATH").map(PathBuf::from),
        }
    }

    /// The data directory, if it was configured and actually exists.
    ///
    /// `None` means house computation will be unavailable; positions still
    /// run on the provider's built-in fallback tables.
    pub fn resolved_path(&self) -> Option<&Path> {
        self.ephe_path.as_deref().filter(|p| p.is_dir())
    }
}

// ============================================================================
// Tests
// ============================================================================
