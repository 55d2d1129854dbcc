use std::f64::consts::TAU;

use crate::error::{GeometryError, Result};
use crate::math::{Point3, TOLERANCE};

use super::{Curve, CurveDomain};

/// A `(p, q)` torus knot around the Z axis.
///
/// `r(t) = R + r * cos(q t)`,
/// `P(t) = (r(t) cos(p t), r(t) sin(p t), r * sin(q t))` for `t` in `[0, 2*pi]`.
#[derive(Debug, Clone)]
pub struct TorusKnot {
    p: i32,
    q: i32,
    major_radius: f64,
    minor_radius: f64,
}

impl TorusKnot {
    /// Creates a torus knot winding `p` times around the axis and `q` times
    /// through the hole.
    ///
    /// # Errors
    ///
    /// Returns an error if `p` or `q` is zero or either radius is non-positive.
    pub fn new(p: i32, q: i32, major_radius: f64, minor_radius: f64) -> Result<Self> {
        if p == 0 || q == 0 {
            return Err(GeometryError::Degenerate(format!(
                "torus knot winding numbers must be non-zero, got ({p}, {q})"
            ))
            .into());
        }
        if !major_radius.is_finite() || major_radius < TOLERANCE {
            return Err(
                GeometryError::Degenerate("torus knot major radius must be positive".into())
                    .into(),
            );
        }
        if !minor_radius.is_finite() || minor_radius < TOLERANCE {
            return Err(
                GeometryError::Degenerate("torus knot minor radius must be positive".into())
                    .into(),
            );
        }
        Ok(Self {
            p,
            q,
            major_radius,
            minor_radius,
        })
    }
}

impl Curve for TorusKnot {
    fn evaluate(&self, t: f64) -> Point3 {
        let (sp, cp) = (f64::from(self.p) * t).sin_cos();
        let (sq, cq) = (f64::from(self.q) * t).sin_cos();
        let r = self.major_radius + self.minor_radius * cq;
        Point3::new(r * cp, r * sp, self.minor_radius * sq)
    }

    fn end_points(&self) -> CurveDomain {
        CurveDomain::new(0.0, TAU)
    }
}
