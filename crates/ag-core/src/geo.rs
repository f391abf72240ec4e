//! Geographic and local-planar coordinate types.
//!
//! Fixes arrive as WGS-84 latitude/longitude in degrees ([`GeoCoord`]) and
//! are projected once, at decode time, into metres relative to the shared
//! reference origin ([`LocalPoint`]).  Both use `f64`: track coordinates
//! can sit thousands of kilometres from the origin, where `f32` would lose
//! sub-metre resolution.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Equatorial Earth radius in metres (WGS-84 semi-major axis).
pub const EARTH_RADIUS_M: f64 = 6_378_137.0;

/// Degrees per semicircle unit, as used by fitness-file position fields.
const DEG_PER_SEMICIRCLE: f64 = 180.0 / i32::MAX as f64;

/// A WGS-84 geographic coordinate in degrees.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GeoCoord {
    pub lat: f64,
    pub lon: f64,
}

impl GeoCoord {
    #[inline]
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Convert fitness-file semicircle units to degrees.
    pub fn from_semicircles(lat: i32, lon: i32) -> Self {
        Self {
            lat: lat as f64 * DEG_PER_SEMICIRCLE,
            lon: lon as f64 * DEG_PER_SEMICIRCLE,
        }
    }

    /// Haversine great-circle distance in metres.
    pub fn distance_m(self, other: GeoCoord) -> f64 {
        let d_lat = (other.lat - self.lat).to_radians();
        let d_lon = (other.lon - self.lon).to_radians();

        let lat1 = self.lat.to_radians();
        let lat2 = other.lat.to_radians();

        let a = (d_lat * 0.5).sin().powi(2)
            + lat1.cos() * lat2.cos() * (d_lon * 0.5).sin().powi(2);

        let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
        EARTH_RADIUS_M * c
    }

    /// Initial great-circle bearing from `self` to `other`, in radians
    /// (`atan2` range, 0 = north, positive clockwise).
    pub fn bearing_rad(self, other: GeoCoord) -> f64 {
        let d_lon = (other.lon - self.lon).to_radians();
        let lat1 = self.lat.to_radians();
        let lat2 = other.lat.to_radians();

        let y = d_lon.sin() * lat2.cos();
        let x = lat1.cos() * lat2.sin() - lat1.sin() * lat2.cos() * d_lon.cos();
        y.atan2(x)
    }

    #[inline]
    pub fn is_finite(self) -> bool {
        self.lat.is_finite() && self.lon.is_finite()
    }
}

impl fmt::Display for GeoCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.6}, {:.6})", self.lat, self.lon)
    }
}

// ── LocalPoint ────────────────────────────────────────────────────────────────

/// A position in the world's local planar frame, metres from the reference
/// origin.
#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct LocalPoint {
    pub x: f64,
    pub y: f64,
}

impl LocalPoint {
    pub const ZERO: LocalPoint = LocalPoint { x: 0.0, y: 0.0 };

    #[inline]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Planar (2-D) Euclidean distance in metres.
    #[inline]
    pub fn distance_to(self, other: LocalPoint) -> f64 {
        (other.x - self.x).hypot(other.y - self.y)
    }

    /// Heading of the direction vector `self → other`, in degrees
    /// counter-clockwise from +y, normalised to `[0, 360)`.
    pub fn heading_to(self, other: LocalPoint) -> f32 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        (dx.atan2(-dy).to_degrees() + 180.0).rem_euclid(360.0) as f32
    }

    /// Copy of `self` shifted by `(dx, dy)`.
    #[inline]
    pub fn offset(self, dx: f64, dy: f64) -> LocalPoint {
        LocalPoint { x: self.x + dx, y: self.y + dy }
    }
}

impl fmt::Display for LocalPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.2}, {:.2})", self.x, self.y)
    }
}
