//! Geodesic → local-planar projection.
//!
//! A fix is placed at its haversine distance from the reference origin,
//! along the initial fix → origin bearing rotated by +90° and negated.  The
//! rotation and mirror follow the consuming world's axis convention, not a
//! cartographic one: north lands on +y and east on +x.

use std::f64::consts::FRAC_PI_2;

use crate::{GeoCoord, LocalPoint};

/// Project `point` into the planar frame anchored at `origin`.
///
/// Returns [`LocalPoint::ZERO`] when the two coordinates coincide or when
/// any intermediate value is non-finite.
pub fn project(origin: GeoCoord, point: GeoCoord) -> LocalPoint {
    if origin == point {
        return LocalPoint::ZERO;
    }

    let distance = origin.distance_m(point);
    if distance == 0.0 || !distance.is_finite() {
        return LocalPoint::ZERO;
    }

    let bearing = -(point.bearing_rad(origin) + FRAC_PI_2);
    let x = distance * bearing.cos();
    let y = distance * bearing.sin();

    if x.is_finite() && y.is_finite() {
        LocalPoint { x, y }
    } else {
        LocalPoint::ZERO
    }
}

/// A projector bound to one session's reference origin.
///
/// Every decoder in a session shares one projector, so all of its tracks
/// land in the same frame.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Projector {
    origin: GeoCoord,
}

impl Projector {
    pub fn new(origin: GeoCoord) -> Self {
        Self { origin }
    }

    #[inline]
    pub fn origin(&self) -> GeoCoord {
        self.origin
    }

    #[inline]
    pub fn project(&self, point: GeoCoord) -> LocalPoint {
        project(self.origin, point)
    }
}
