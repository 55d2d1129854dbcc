mod circle;
mod ellipse;
mod fourier;
mod parametric;
mod polygon;
mod torus_knot;

pub use circle::Circle;
pub use ellipse::Ellipse;
pub use fourier::FourierCurve;
pub use parametric::ParametricCurve;
pub use polygon::RegularPolygon;
pub use torus_knot::TorusKnot;

use crate::math::Point3;

/// Parameter domain for a curve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CurveDomain {
    /// Start of the parameter range.
    pub t_min: f64,
    /// End of the parameter range.
    pub t_max: f64,
}

impl CurveDomain {
    /// Creates a new curve domain.
    #[must_use]
    pub fn new(t_min: f64, t_max: f64) -> Self {
        Self { t_min, t_max }
    }

    /// The unit domain `[0, 1]`.
    #[must_use]
    pub fn unit() -> Self {
        Self::new(0.0, 1.0)
    }

    /// Width of the range.
    #[must_use]
    pub fn span(&self) -> f64 {
        self.t_max - self.t_min
    }

    /// Maps a unit parameter `s` onto this domain.
    ///
    /// `s = 0` gives `t_min` and `s = 1` gives `t_max`; values outside
    /// `[0, 1]` extrapolate linearly.
    #[must_use]
    #[allow(clippy::float_cmp)]
    pub fn lerp(&self, s: f64) -> f64 {
        if s == 1.0 {
            self.t_max
        } else {
            self.t_min + s * self.span()
        }
    }
}

/// A parametric curve in 3D space.
///
/// Planar cross-section curves use this trait too and leave `z` at zero.
pub trait Curve {
    /// Evaluates the curve at parameter `t`, returning the 3D point.
    fn evaluate(&self, t: f64) -> Point3;

    /// Returns the parameter range the curve is defined over.
    fn end_points(&self) -> CurveDomain;
}

impl<C: Curve + ?Sized> Curve for &C {
    fn evaluate(&self, t: f64) -> Point3 {
        (**self).evaluate(t)
    }

    fn end_points(&self) -> CurveDomain {
        (**self).end_points()
    }
}

impl<C: Curve + ?Sized> Curve for Box<C> {
    fn evaluate(&self, t: f64) -> Point3 {
        (**self).evaluate(t)
    }

    fn end_points(&self) -> CurveDomain {
        (**self).end_points()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lerp_hits_both_ends_exactly() {
        let d = CurveDomain::new(0.3, std::f64::consts::TAU);
        assert_eq!(d.lerp(0.0), 0.3);
        assert_eq!(d.lerp(1.0), std::f64::consts::TAU);
    }

    #[test]
    fn unit_domain_is_identity() {
        let d = CurveDomain::unit();
        for s in [0.0, 0.25, 0.7, 1.0, 1.5, -0.5] {
            assert_eq!(d.lerp(s), s);
        }
    }
}
