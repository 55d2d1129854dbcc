use crate::error::{GeometryError, Result};
use crate::math::quadrature::{adaptive_simpson, DEFAULT_MAX_DEPTH};
use crate::math::{Point3, Vector3, TOLERANCE};

use super::{Curve, CurveDomain};

const ARC_LENGTH_TOLERANCE: f64 = 1e-10;

/// An ellipse (or elliptical arc) in 3D space.
///
/// Defined by a center, semi-major and semi-minor axes, a normal,
/// a major axis direction, and angular range.
///
/// `P(t) = center + a * cos(t) * major_dir + b * sin(t) * minor_dir`
/// where `minor_dir = normal x major_dir`.
#[derive(Debug, Clone)]
pub struct Ellipse {
    center: Point3,
    semi_major: f64,
    semi_minor: f64,
    normal: Vector3,
    major_dir: Vector3,
    start_angle: f64,
    end_angle: f64,
}

impl Ellipse {
    /// Creates a new ellipse.
    ///
    /// # Arguments
    ///
    /// * `center` - Center of the ellipse
    /// * `semi_major` - Semi-major axis length (must be positive)
    /// * `semi_minor` - Semi-minor axis length (must be positive)
    /// * `normal` - Normal vector defining the ellipse plane
    /// * `major_dir` - Major axis direction (must be perpendicular to normal)
    /// * `start_angle` - Start angle in radians
    /// * `end_angle` - End angle in radians
    ///
    /// # Errors
    ///
    /// Returns an error if either axis length is non-positive, the normal is
    /// zero-length, or the major direction is not perpendicular to the normal.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        center: Point3,
        semi_major: f64,
        semi_minor: f64,
        normal: Vector3,
        major_dir: Vector3,
        start_angle: f64,
        end_angle: f64,
    ) -> Result<Self> {
        if semi_major.is_nan() || semi_major < TOLERANCE {
            return Err(
                GeometryError::Degenerate("semi-major axis must be positive".into()).into(),
            );
        }
        if semi_minor.is_nan() || semi_minor < TOLERANCE {
            return Err(
                GeometryError::Degenerate("semi-minor axis must be positive".into()).into(),
            );
        }

        let normal_len = normal.norm();
        if normal_len < TOLERANCE {
            return Err(GeometryError::ZeroVector.into());
        }
        let normal = normal / normal_len;

        let major_len = major_dir.norm();
        if major_len < TOLERANCE {
            return Err(GeometryError::ZeroVector.into());
        }
        let major_dir = major_dir / major_len;

        if normal.dot(&major_dir).abs() > TOLERANCE {
            return Err(GeometryError::Degenerate(
                "major direction must be perpendicular to normal".into(),
            )
            .into());
        }

        Ok(Self {
            center,
            semi_major,
            semi_minor,
            normal,
            major_dir,
            start_angle,
            end_angle,
        })
    }

    /// Full ellipse around the origin in the XY plane with the major axis on `+X`.
    ///
    /// # Errors
    ///
    /// Returns an error if either axis length is non-positive.
    pub fn xy(semi_major: f64, semi_minor: f64) -> Result<Self> {
        Self::new(
            Point3::origin(),
            semi_major,
            semi_minor,
            Vector3::z(),
            Vector3::x(),
            0.0,
            std::f64::consts::TAU,
        )
    }

    /// Returns the semi-major axis length.
    #[must_use]
    pub fn semi_major(&self) -> f64 {
        self.semi_major
    }

    /// Returns the semi-minor axis length.
    #[must_use]
    pub fn semi_minor(&self) -> f64 {
        self.semi_minor
    }

    /// Length of the whole arc from `start_angle` to `end_angle`.
    #[must_use]
    pub fn arc_length(&self) -> f64 {
        self.arc_length_between(self.start_angle, self.end_angle)
    }

    /// Length of the arc between two angles. Always non-negative.
    ///
    /// There is no closed form (it is an incomplete elliptic integral of
    /// the second kind), so the speed `|P'(t)|` is integrated numerically.
    #[must_use]
    pub fn arc_length_between(&self, t0: f64, t1: f64) -> f64 {
        let (a, b) = if t0 <= t1 { (t0, t1) } else { (t1, t0) };
        let speed = |t: f64| {
            let (s, c) = t.sin_cos();
            (self.semi_major * s).hypot(self.semi_minor * c)
        };
        adaptive_simpson(speed, a, b, ARC_LENGTH_TOLERANCE, DEFAULT_MAX_DEPTH)
    }

    fn minor_dir(&self) -> Vector3 {
        self.normal.cross(&self.major_dir)
    }
}

impl Curve for Ellipse {
    fn evaluate(&self, t: f64) -> Point3 {
        let minor = self.minor_dir();
        let x = self.semi_major * t.cos();
        let y = self.semi_minor * t.sin();
        self.center + self.major_dir * x + minor * y
    }

    fn end_points(&self) -> CurveDomain {
        CurveDomain::new(self.start_angle, self.end_angle)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::{FRAC_PI_2, PI, TAU};

    #[test]
    fn evaluate_at_pi_over_2() {
        let e = Ellipse::xy(3.0, 2.0).unwrap();
        let p = e.evaluate(FRAC_PI_2);
        assert!((p - Point3::new(0.0, 2.0, 0.0)).norm() < 1e-9);
    }

    #[test]
    fn domain_matches_angles() {
        let e = Ellipse::new(
            Point3::origin(),
            3.0,
            2.0,
            Vector3::z(),
            Vector3::x(),
            0.5,
            2.0,
        )
        .unwrap();
        let d = e.end_points();
        assert!((d.t_min - 0.5).abs() < TOLERANCE);
        assert!((d.t_max - 2.0).abs() < TOLERANCE);
    }

    #[test]
    fn circular_arc_length_is_circumference() {
        let e = Ellipse::xy(2.0, 2.0).unwrap();
        assert_relative_eq!(e.arc_length(), TAU * 2.0, epsilon = 1e-8);
    }

    #[test]
    fn ellipse_perimeter_matches_reference() {
        // a = 2, b = 1: perimeter 9.688448220547675...
        let e = Ellipse::xy(2.0, 1.0).unwrap();
        assert_relative_eq!(e.arc_length(), 9.688_448_220_547_675, epsilon = 1e-7);
    }

    #[test]
    fn arc_length_ignores_direction() {
        let e = Ellipse::xy(3.0, 1.0).unwrap();
        let forward = e.arc_length_between(0.0, PI);
        let backward = e.arc_length_between(PI, 0.0);
        assert_relative_eq!(forward, backward);
        assert_relative_eq!(forward * 2.0, e.arc_length(), epsilon = 1e-8);
    }

    #[test]
    fn invalid_axes() {
        assert!(Ellipse::xy(0.0, 1.0).is_err());
        assert!(Ellipse::xy(1.0, 0.0).is_err());
    }
}
