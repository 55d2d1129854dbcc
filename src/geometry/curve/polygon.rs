use std::f64::consts::TAU;

use crate::error::{GeometryError, Result};
use crate::math::{Point3, TOLERANCE};

use super::{Curve, CurveDomain};

/// A regular polygon in the XY plane, traversed once over `[0, 1]`.
///
/// Corner `i` sits at angle `2*pi*i/sides`; the parameter moves along each
/// edge at constant speed. Mostly useful as a tube cross-section.
#[derive(Debug, Clone)]
pub struct RegularPolygon {
    sides: usize,
    radius: f64,
}

impl RegularPolygon {
    /// Creates a polygon with `sides` corners on a circle of `radius`.
    ///
    /// # Errors
    ///
    /// Returns an error if `sides < 3` or the radius is non-positive.
    pub fn new(sides: usize, radius: f64) -> Result<Self> {
        if sides < 3 {
            return Err(GeometryError::Degenerate(format!(
                "polygon needs at least 3 sides, got {sides}"
            ))
            .into());
        }
        if !radius.is_finite() || radius < TOLERANCE {
            return Err(
                GeometryError::Degenerate("polygon radius must be positive".into()).into(),
            );
        }
        Ok(Self { sides, radius })
    }

    /// Returns the number of sides.
    #[must_use]
    pub fn sides(&self) -> usize {
        self.sides
    }

    #[allow(clippy::cast_precision_loss)]
    fn corner(&self, i: usize) -> Point3 {
        let (s, c) = (TAU * (i % self.sides) as f64 / self.sides as f64).sin_cos();
        Point3::new(self.radius * c, self.radius * s, 0.0)
    }
}

impl Curve for RegularPolygon {
    #[allow(
        clippy::cast_precision_loss,
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss
    )]
    fn evaluate(&self, t: f64) -> Point3 {
        let scaled = t.rem_euclid(1.0) * self.sides as f64;
        let edge = (scaled.floor() as usize).min(self.sides - 1);
        let frac = scaled - edge as f64;
        let a = self.corner(edge);
        let b = self.corner(edge + 1);
        a + (b - a) * frac
    }

    fn end_points(&self) -> CurveDomain {
        CurveDomain::unit()
    }
}
