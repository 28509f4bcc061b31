//! TSPLIB95 distance functions for coordinate based instances.

use crate::distance::coordinates::Node;
use crate::error::{ParseError, Result};
use crate::types::EdgeWeightType;

/// Value of pi used by the TSPLIB reference code for `GEO`
#[allow(clippy::approx_constant)]
const GEO_PI: f64 = 3.141592;
/// Idealized earth radius in kilometers
const EARTH_RADIUS: f64 = 6378.388;

/// Nearest integer, the way TSPLIB defines it: `(int) (x + 0.5)`
#[inline]
fn nint(x: f64) -> f64 {
    (x + 0.5).floor()
}

/// Distance between two nodes according to `kind`
pub fn distance(kind: EdgeWeightType, a: &Node, b: &Node) -> Result<f64> {
    let dx = a.x - b.x;
    let dy = a.y - b.y;
    let dz = a.z.unwrap_or(0.0) - b.z.unwrap_or(0.0);

    let d = match kind {
        EdgeWeightType::Euc2d => nint((dx * dx + dy * dy).sqrt()),
        EdgeWeightType::Euc3d => nint((dx * dx + dy * dy + dz * dz).sqrt()),
        EdgeWeightType::Max2d => nint(dx.abs()).max(nint(dy.abs())),
        EdgeWeightType::Max3d => nint(dx.abs()).max(nint(dy.abs())).max(nint(dz.abs())),
        EdgeWeightType::Man2d => nint(dx.abs() + dy.abs()),
        EdgeWeightType::Man3d => nint(dx.abs() + dy.abs() + dz.abs()),
        EdgeWeightType::Ceil2d => (dx * dx + dy * dy).sqrt().ceil(),
        EdgeWeightType::Geo => geo(a, b),
        EdgeWeightType::Att => att(dx, dy),
        EdgeWeightType::Explicit
        | EdgeWeightType::Xray1
        | EdgeWeightType::Xray2
        | EdgeWeightType::Special => return Err(ParseError::UnsupportedEdgeWeightType(kind)),
    };

    Ok(d)
}

/// Converts a DDD.MM coordinate into radians
fn geo_radians(value: f64) -> f64 {
    let degrees = value.trunc();
    let minutes = value - degrees;
    GEO_PI * (degrees + 5.0 * minutes / 3.0) / 180.0
}

fn geo(a: &Node, b: &Node) -> f64 {
    let (lat_a, lon_a) = (geo_radians(a.x), geo_radians(a.y));
    let (lat_b, lon_b) = (geo_radians(b.x), geo_radians(b.y));

    let q1 = (lon_a - lon_b).cos();
    let q2 = (lat_a - lat_b).cos();
    let q3 = (lat_a + lat_b).cos();

    // acos argument may drift just above 1 for identical points
    let arg = (0.5 * ((1.0 + q1) * q2 - (1.0 - q1) * q3)).clamp(-1.0, 1.0);
    (EARTH_RADIUS * arg.acos() + 1.0).trunc()
}

fn att(dx: f64, dy: f64) -> f64 {
    let r = ((dx * dx + dy * dy) / 10.0).sqrt();
    let t = nint(r);
    if t < r {
        t + 1.0
    } else {
        t
    }
}
