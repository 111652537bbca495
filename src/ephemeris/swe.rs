//! FFI adapter over the Swiss Ephemeris C library (`libswe`).
//!
//! Compiled only with the `swisseph` cargo feature. The data-file path is
//! resolved once from [`EphemerisConfig`] at construction; an unreadable
//! directory leaves positions running on the library's built-in fallback
//! tables and marks house computation unavailable.

use std::ffi::CString;
use std::os::raw::{c_char, c_double, c_int};

use serde_json::{json, Value};

use super::body::Body;
use super::source::{EphemerisConfig, EphemerisSource, ProviderError, RawHouses};

/// Request speed components alongside positions.
const SEFLG_SPEED: c_int = 256;
/// Error-message buffer size per the provider's calling convention.
const SERR_LEN: usize = 256;

#[link(name = "swe")]
extern "C" {
    fn swe_set_ephe_path(path: *const c_char);
    fn swe_calc_ut(
        tjd_ut: c_double,
        ipl: c_int,
        iflag: c_int,
        xx: *mut c_double,
        serr: *mut c_char,
    ) -> c_int;
    fn swe_houses(
        tjd_ut: c_double,
        geolat: c_double,
        geolon: c_double,
        hsys: c_int,
        cusps: *mut c_double,
        ascmc: *mut c_double,
    ) -> c_int;
}

fn serr_to_string(serr: &[c_char; SERR_LEN]) -> String {
    let bytes: Vec<u8> = serr
        .iter()
        .take_while(|&&c| c != 0)
        .map(|&c| c as u8)
        .collect();
    String::from_utf8_lossy(&bytes).into_owned()
}

/// Swiss Ephemeris build of the provider seam. Payload dialect: named fields.
pub struct SweSource {
    houses_ok: bool,
}

impl SweSource {
    /// Configure the library once. Safe to call before any computation; the
    /// library keeps the path in process-global state.
    pub fn new(config: &EphemerisConfig) -> SweSource {
        match config.resolved_path() {
            Some(path) => {
                let c_path = CString::new(path.to_string_lossy().as_bytes())
                    .unwrap_or_default();
                unsafe { swe_set_ephe_path(c_path.as_ptr()) };
                tracing::info!(path = %path.display(), "ephemeris data path configured");
                SweSource { houses_ok: true }
            }
            None => {
                tracing::warn!(
                    "ephemeris data path missing or unreadable; houses unavailable, \
                     positions fall back to built-in tables"
                );
                SweSource { houses_ok: false }
            }
        }
    }
}

impl EphemerisSource for SweSource {
    fn name(&self) -> &'static str {
        "swisseph"
    }

    fn body_position(&self, body: Body, jd_ut: f64) -> Result<Value, ProviderError> {
        let mut xx = [0.0_f64; 6];
        let mut serr = [0 as c_char; SERR_LEN];
        let rc = unsafe {
            swe_calc_ut(
                jd_ut,
                body.provider_id(),
                SEFLG_SPEED,
                xx.as_mut_ptr(),
                serr.as_mut_ptr(),
            )
        };
        if rc < 0 {
            return Err(ProviderError::Computation {
                body: body.name().to_string(),
                message: serr_to_string(&serr),
            });
        }
        // xx = [lon, lat, dist, lon_speed, lat_speed, dist_speed].
        Ok(json!({
            "longitude": xx[0],
            "speed": xx[3],
        }))
    }

    fn house_cusps(
        &self,
        jd_ut: f64,
        lat: f64,
        lng: f64,
        house_system: char,
    ) -> Result<RawHouses, ProviderError> {
        if !self.houses_ok {
            return Err(ProviderError::HousesUnavailable(
                "ephemeris data path not configured".to_string(),
            ));
        }
        // The library writes cusps 1..=12 into a 1-based 13-slot buffer and
        // ten auxiliary angles (asc at 0, mc at 1).
        let mut cusps = [0.0_f64; 13];
        let mut ascmc = [0.0_f64; 10];
        let rc = unsafe {
            swe_houses(
                jd_ut,
                lat,
                lng,
                house_system as c_int,
                cusps.as_mut_ptr(),
                ascmc.as_mut_ptr(),
            )
        };
        if rc < 0 {
            return Err(ProviderError::HousesUnavailable(format!(
                "house computation failed for system '{}'",
                house_system
            )));
        }
        Ok(RawHouses {
            cusps: cusps[1..=12].to_vec(),
            asc: ascmc[0],
            mc: ascmc[1],
        })
    }

    fn houses_available(&self) -> bool {
        self.houses_ok
    }
}
