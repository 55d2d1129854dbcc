use std::f64::consts::{FRAC_PI_2, PI};

use crate::error::{GeometryError, Result};
use crate::math::{Point3, TOLERANCE};

use super::{signed_pow, Surface, SurfaceDomain};

/// A superellipsoid centered at the origin.
///
/// `P(u, v) = (a * c(u)^e1 * c(v)^e2, b * c(u)^e1 * s(v)^e2, c * s(u)^e1)`
/// with signed powers, `u` in `[-pi/2, pi/2]` (latitude) and `v` in
/// `[-pi, pi]` (longitude). Exponents of 1 give an ellipsoid; smaller
/// exponents square the shape off, larger ones pinch it.
#[derive(Debug, Clone)]
pub struct Superellipsoid {
    radii: [f64; 3],
    e1: f64,
    e2: f64,
}

impl Superellipsoid {
    /// Creates a superellipsoid with semi-axes `radii` and exponents `e1`
    /// (latitude) and `e2` (longitude).
    ///
    /// # Errors
    ///
    /// Returns an error if any radius or exponent is not finite and positive.
    pub fn new(radii: [f64; 3], e1: f64, e2: f64) -> Result<Self> {
        if radii.iter().any(|r| !r.is_finite() || *r < TOLERANCE) {
            return Err(GeometryError::Degenerate(
                "superellipsoid radii must be positive".into(),
            )
            .into());
        }
        for (name, e) in [("e1", e1), ("e2", e2)] {
            if !e.is_finite() || e < TOLERANCE {
                return Err(GeometryError::ParameterOutOfRange {
                    parameter: name,
                    value: e,
                    min: TOLERANCE,
                    max: f64::INFINITY,
                }
                .into());
            }
        }
        Ok(Self { radii, e1, e2 })
    }

    /// Superellipsoid with equal radii.
    ///
    /// # Errors
    ///
    /// See [`Superellipsoid::new`].
    pub fn uniform(radius: f64, e1: f64, e2: f64) -> Result<Self> {
        Self::new([radius; 3], e1, e2)
    }
}

impl Surface for Superellipsoid {
    fn evaluate(&self, u: f64, v: f64) -> Point3 {
        let (su, cu) = u.sin_cos();
        let (sv, cv) = v.sin_cos();
        let ring = signed_pow(cu, self.e1);
        Point3::new(
            self.radii[0] * ring * signed_pow(cv, self.e2),
            self.radii[1] * ring * signed_pow(sv, self.e2),
            self.radii[2] * signed_pow(su, self.e1),
        )
    }

    fn domain(&self) -> SurfaceDomain {
        SurfaceDomain::new(-FRAC_PI_2, FRAC_PI_2, -PI, PI)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::FRAC_PI_4;

    #[test]
    fn unit_exponents_give_sphere() {
        let s = Superellipsoid::uniform(2.0, 1.0, 1.0).unwrap();
        for (u, v) in [(0.0, 0.0), (0.3, 1.2), (-1.0, -2.5), (FRAC_PI_2, 0.7)] {
            assert_relative_eq!(s.evaluate(u, v).coords.norm(), 2.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn small_exponents_approach_cube() {
        // At the diagonal the point moves out towards the cube corner.
        let s = Superellipsoid::uniform(1.0, 0.1, 0.1).unwrap();
        let p = s.evaluate(FRAC_PI_4, FRAC_PI_4);
        assert!(p.x > 0.9 && p.y > 0.9 && p.z > 0.9);
    }

    #[test]
    fn poles_and_equator() {
        let s = Superellipsoid::new([1.0, 2.0, 3.0], 0.5, 2.0).unwrap();
        assert_relative_eq!(s.evaluate(FRAC_PI_2, 0.0).z, 3.0, epsilon = 1e-12);
        assert_relative_eq!(s.evaluate(0.0, 0.0), Point3::new(1.0, 0.0, 0.0), epsilon = 1e-12);
    }

    #[test]
    fn default_normal_on_sphere_is_radial() {
        let s = Superellipsoid::uniform(1.0, 1.0, 1.0).unwrap();
        let p = s.evaluate(0.4, 0.9);
        let n = s.normal(0.4, 0.9).unwrap();
        assert_relative_eq!(n.dot(&p.coords).abs(), 1.0, epsilon = 1e-6);
    }

    #[test]
    fn invalid_parameters_rejected() {
        assert!(Superellipsoid::uniform(0.0, 1.0, 1.0).is_err());
        assert!(Superellipsoid::uniform(1.0, 0.0, 1.0).is_err());
        assert!(Superellipsoid::uniform(1.0, 1.0, -2.0).is_err());
        assert!(Superellipsoid::new([1.0, f64::NAN, 1.0], 1.0, 1.0).is_err());
    }
}
