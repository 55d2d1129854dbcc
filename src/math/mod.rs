pub mod quadrature;

/// 2D point type.
pub type Point2 = nalgebra::Point2<f64>;

/// 3D point type.
pub type Point3 = nalgebra::Point3<f64>;

/// 3D vector type.
pub type Vector3 = nalgebra::Vector3<f64>;

/// Global geometric tolerance for floating-point comparisons.
pub const TOLERANCE: f64 = 1e-10;

/// Step used for forward differences and squared-length degeneracy checks.
pub const EPSILON: f64 = 1e-6;

/// Normalizes `v`, returning the zero vector when `v` has no length.
///
/// Frame construction never fails; a zero vector here propagates as a
/// best-effort (degenerate) frame instead of NaN.
#[must_use]
pub fn normalize_or_zero(v: &Vector3) -> Vector3 {
    v.try_normalize(0.0).unwrap_or_else(Vector3::zeros)
}

/// Builds a unit normal for a lone tangent.
///
/// Crosses the tangent with `+Z`; if that is degenerate (squared length
/// below [`EPSILON`]) falls back to `+Y`.
#[must_use]
pub fn normal_from_tangent(tangent: &Vector3) -> Vector3 {
    let normal = tangent.cross(&Vector3::z());
    if normal.norm_squared() < EPSILON {
        normalize_or_zero(&tangent.cross(&Vector3::y()))
    } else {
        normalize_or_zero(&normal)
    }
}
