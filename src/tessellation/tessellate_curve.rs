use crate::error::{Result, TessellationError};
use crate::geometry::curve::Curve;

use super::Polyline;

/// Samples a curve uniformly in its parameter into a polyline.
pub struct TessellateCurve {
    segments: usize,
}

impl TessellateCurve {
    /// Creates a new `TessellateCurve` operation producing `segments` segments.
    #[must_use]
    pub fn new(segments: usize) -> Self {
        Self { segments }
    }

    /// Executes the tessellation, returning `segments + 1` points from one
    /// end of the curve's domain to the other.
    ///
    /// # Errors
    ///
    /// Returns an error if `segments` is zero.
    #[allow(clippy::cast_precision_loss)]
    pub fn execute(&self, curve: &dyn Curve) -> Result<Polyline> {
        if self.segments == 0 {
            return Err(TessellationError::InvalidParameters(
                "curve tessellation needs at least one segment".into(),
            )
            .into());
        }
        let domain = curve.end_points();
        let points = (0..=self.segments)
            .map(|i| curve.evaluate(domain.lerp(i as f64 / self.segments as f64)))
            .collect();
        Ok(Polyline { points })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::geometry::curve::{Circle, ParametricCurve};
    use crate::math::Point3;
    use approx::assert_relative_eq;

    #[test]
    fn line_segments() {
        let line = ParametricCurve::new(|t| Point3::new(3.0 * t, 4.0 * t, 0.0));
        let poly = TessellateCurve::new(4).execute(&line).unwrap();
        assert_eq!(poly.points.len(), 5);
        assert_relative_eq!(poly.length(), 5.0, epsilon = 1e-12);
        assert_eq!(poly.points[4], Point3::new(3.0, 4.0, 0.0));
    }

    #[test]
    fn circle_polyline_closes() {
        let circle = Circle::xy(1.0).unwrap();
        let poly = TessellateCurve::new(100).execute(&circle).unwrap();
        assert_relative_eq!(poly.points[0], poly.points[100], epsilon = 1e-12);
        assert_relative_eq!(poly.length(), std::f64::consts::TAU, epsilon = 2e-3);
    }

    #[test]
    fn zero_segments_rejected() {
        let circle = Circle::xy(1.0).unwrap();
        assert!(TessellateCurve::new(0).execute(&circle).is_err());
    }
}
