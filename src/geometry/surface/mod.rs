mod superellipsoid;
mod supershape;
mod tube;

pub use superellipsoid::Superellipsoid;
pub use supershape::{SuperformulaParams, Supershape};
pub use tube::{Tube, TubeParams};

use crate::math::{Point3, Vector3, EPSILON};

/// Parameter domain for a surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceDomain {
    /// Start of the U parameter range.
    pub u_min: f64,
    /// End of the U parameter range.
    pub u_max: f64,
    /// Start of the V parameter range.
    pub v_min: f64,
    /// End of the V parameter range.
    pub v_max: f64,
}

impl SurfaceDomain {
    /// Creates a new surface domain.
    #[must_use]
    pub fn new(u_min: f64, u_max: f64, v_min: f64, v_max: f64) -> Self {
        Self {
            u_min,
            u_max,
            v_min,
            v_max,
        }
    }

    /// The unit square `[0, 1] x [0, 1]`.
    #[must_use]
    pub fn unit() -> Self {
        Self::new(0.0, 1.0, 0.0, 1.0)
    }
}

/// Trait for parametric surfaces in 3D space.
pub trait Surface {
    /// Evaluates the surface at parameters `(u, v)`, returning the 3D point.
    fn evaluate(&self, u: f64, v: f64) -> Point3;

    /// Returns the parameter domain of the surface.
    fn domain(&self) -> SurfaceDomain;

    /// Unit surface normal at `(u, v)`, or `None` where the surface is
    /// degenerate (poles, zero thickness).
    ///
    /// Defaults to a central-difference estimate.
    fn normal(&self, u: f64, v: f64) -> Option<Vector3> {
        finite_difference_normal(self, u, v)
    }
}

/// Estimates `dP/du x dP/dv` with central differences and normalizes it.
pub fn finite_difference_normal<S: Surface + ?Sized>(surface: &S, u: f64, v: f64) -> Option<Vector3> {
    let d = surface.domain();
    let hu = EPSILON * (d.u_max - d.u_min).abs().max(1.0);
    let hv = EPSILON * (d.v_max - d.v_min).abs().max(1.0);
    let du = surface.evaluate(u + hu, v) - surface.evaluate(u - hu, v);
    let dv = surface.evaluate(u, v + hv) - surface.evaluate(u, v - hv);
    du.cross(&dv).try_normalize(EPSILON * EPSILON * hu * hv)
}

/// Raises `|x|` to `e` and restores the sign of `x`.
pub(crate) fn signed_pow(x: f64, e: f64) -> f64 {
    x.signum() * x.abs().powf(e)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    struct Plane;

    impl Surface for Plane {
        fn evaluate(&self, u: f64, v: f64) -> Point3 {
            Point3::new(u, v, 0.0)
        }

        fn domain(&self) -> SurfaceDomain {
            SurfaceDomain::unit()
        }
    }

    #[test]
    fn default_normal_of_xy_plane_is_z() {
        let n = Plane.normal(0.3, 0.4).unwrap();
        assert_relative_eq!(n, Vector3::z(), epsilon = 1e-9);
    }

    #[test]
    fn signed_pow_keeps_sign() {
        assert_relative_eq!(signed_pow(-8.0, 1.0 / 3.0), -2.0, epsilon = 1e-12);
        assert_relative_eq!(signed_pow(4.0, 0.5), 2.0, epsilon = 1e-12);
        assert_eq!(signed_pow(0.0, 0.5), 0.0);
    }
}
