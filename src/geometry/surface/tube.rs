use std::f64::consts::TAU;
use std::fmt;

use crate::error::{GeometryError, Result};
use crate::frame::{CacheStats, FrameParams, FrenetFrames};
use crate::geometry::curve::Curve;
use crate::math::{Point3, Vector3};

use super::{finite_difference_normal, Surface, SurfaceDomain};

/// Parameters controlling tube extrusion.
#[derive(Debug, Clone, Copy)]
pub struct TubeParams {
    /// Scale applied to the cross-section (the radius for the default circle).
    pub thickness: f64,
    /// Frame sampling along the centerline.
    pub frames: FrameParams,
}

impl Default for TubeParams {
    fn default() -> Self {
        Self {
            thickness: 1.0,
            frames: FrameParams::default(),
        }
    }
}

impl TubeParams {
    /// Sets the tube thickness.
    #[must_use]
    pub fn with_thickness(mut self, thickness: f64) -> Self {
        self.thickness = thickness;
        self
    }

    /// Sets the frame sampling parameters.
    #[must_use]
    pub fn with_frames(mut self, frames: FrameParams) -> Self {
        self.frames = frames;
        self
    }

    /// Checks that every field is usable.
    ///
    /// # Errors
    ///
    /// Returns an error if the thickness is negative or not finite, or the
    /// frame parameters are invalid.
    pub fn validate(&self) -> Result<()> {
        if !self.thickness.is_finite() || self.thickness < 0.0 {
            return Err(GeometryError::ParameterOutOfRange {
                parameter: "thickness",
                value: self.thickness,
                min: 0.0,
                max: f64::INFINITY,
            }
            .into());
        }
        self.frames.validate()
    }
}

/// A cross-section swept along a curve.
///
/// `u` in `[0, 1]` runs along the centerline and `v` in `[0, 1]` runs once
/// around the cross-section. Without a custom cross-section the profile is a
/// circle of radius `thickness`:
///
/// `P(u, v) = C(u) + thickness * (cos(2 pi v) * N(u) + sin(2 pi v) * B(u))`
///
/// A custom cross-section `S(v) = (x, y, z)` places `x` along the normal,
/// `y` along the bitangent and `z` along the tangent, all scaled by
/// `thickness`.
pub struct Tube<C> {
    frames: FrenetFrames<C>,
    cross_section: Option<Box<dyn Curve>>,
    thickness: f64,
}

impl<C: Curve> Tube<C> {
    /// Creates a circular tube of radius `thickness` around `curve`.
    ///
    /// # Errors
    ///
    /// Returns an error if the thickness is negative or not finite.
    pub fn new(curve: C, thickness: f64) -> Result<Self> {
        Self::with_params(curve, TubeParams::default().with_thickness(thickness))
    }

    /// Creates a tube with explicit parameters.
    ///
    /// # Errors
    ///
    /// Returns an error if `params` fails [`TubeParams::validate`].
    pub fn with_params(curve: C, params: TubeParams) -> Result<Self> {
        params.validate()?;
        Ok(Self {
            frames: FrenetFrames::with_params(curve, params.frames)?,
            cross_section: None,
            thickness: params.thickness,
        })
    }

    /// Replaces the circular profile with `section`, evaluated over its
    /// own domain as `v` goes from 0 to 1.
    #[must_use]
    pub fn with_cross_section<S: Curve + 'static>(mut self, section: S) -> Self {
        self.cross_section = Some(Box::new(section));
        self
    }

    /// Frames sampled along the centerline.
    #[must_use]
    pub fn frames(&self) -> &FrenetFrames<C> {
        &self.frames
    }

    /// Cross-section scale.
    #[must_use]
    pub fn thickness(&self) -> f64 {
        self.thickness
    }

    /// Whether a custom cross-section replaces the circle.
    #[must_use]
    pub fn has_cross_section(&self) -> bool {
        self.cross_section.is_some()
    }

    /// Frame cache counters for this tube.
    #[must_use]
    pub fn stats(&self) -> CacheStats {
        self.frames.stats()
    }

    fn profile(&self, v: f64) -> Vector3 {
        match &self.cross_section {
            Some(section) => section.evaluate(section.end_points().lerp(v)).coords,
            None => {
                let (c, s) = circle_profile(v);
                Vector3::new(c, s, 0.0)
            }
        }
    }
}

/// `(cos(2 pi v), sin(2 pi v))` with the sine recovered from the cosine.
///
/// The sine is `+sqrt(1 - cos^2)` on the first half-turn (`v mod 1 <= 0.5`)
/// and negative on the second, so `v = 0.5` and `v = 1.0` both give `+0`.
fn circle_profile(v: f64) -> (f64, f64) {
    let cos = (TAU * v).cos();
    let sin = (1.0 - cos * cos).max(0.0).sqrt();
    if v.rem_euclid(1.0) <= 0.5 {
        (cos, sin)
    } else {
        (cos, -sin)
    }
}

impl<C: Curve> Surface for Tube<C> {
    fn evaluate(&self, u: f64, v: f64) -> Point3 {
        let basis = self.frames.basis_at(u);
        let offset = self.profile(v) * self.thickness;
        basis.local_to_world(offset.x, offset.y, offset.z)
    }

    fn domain(&self) -> SurfaceDomain {
        SurfaceDomain::unit()
    }

    fn normal(&self, u: f64, v: f64) -> Option<Vector3> {
        if self.cross_section.is_some() {
            return finite_difference_normal(self, u, v);
        }
        let basis = self.frames.basis_at(u);
        let (c, s) = circle_profile(v);
        (basis.normal * c + basis.bitangent * s).try_normalize(0.0)
    }
}

impl<C: fmt::Debug> fmt::Debug for Tube<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tube")
            .field("frames", &self.frames)
            .field("cross_section", &self.cross_section.is_some())
            .field("thickness", &self.thickness)
            .finish()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::geometry::curve::{Circle, ParametricCurve, RegularPolygon, TorusKnot};
    use approx::assert_relative_eq;

    fn unit_circle() -> ParametricCurve {
        ParametricCurve::new(|u| {
            let (s, c) = (TAU * u).sin_cos();
            Point3::new(c, s, 0.0)
        })
    }

    #[test]
    fn circle_profile_matches_sin_cos() {
        for i in 0..=64_u32 {
            let v = f64::from(i) / 64.0;
            let (c, s) = circle_profile(v);
            assert_relative_eq!(c, (TAU * v).cos(), epsilon = 1e-12);
            assert_relative_eq!(s, (TAU * v).sin(), epsilon = 1e-7);
        }
    }

    #[test]
    fn circle_profile_branch_boundaries_are_positive_zero() {
        let (c, s) = circle_profile(0.5);
        assert_relative_eq!(c, -1.0);
        assert!(s >= 0.0);
        let (c, s) = circle_profile(1.0);
        assert_relative_eq!(c, 1.0);
        assert!(s >= 0.0);
        let (_, s) = circle_profile(0.75);
        assert_relative_eq!(s, -1.0, epsilon = 1e-12);
    }

    #[test]
    fn ring_is_at_constant_distance() {
        let knot = TorusKnot::new(2, 3, 2.0, 0.6).unwrap();
        let tube = Tube::new(knot, 0.25).unwrap();
        for u in [0.0, 0.13, 0.5, 0.731] {
            let center = tube.frames().basis_at(u).position;
            for i in 0..32_u32 {
                let v = f64::from(i) / 32.0;
                let p = tube.evaluate(u, v);
                assert_relative_eq!((p - center).norm(), 0.25, epsilon = 1e-9);
            }
        }
    }

    #[test]
    fn ring_lies_in_normal_plane() {
        let tube = Tube::new(unit_circle(), 0.1).unwrap();
        let basis = tube.frames().basis_at(0.3);
        for i in 0..16_u32 {
            let p = tube.evaluate(0.3, f64::from(i) / 16.0);
            assert_relative_eq!((p - basis.position).dot(&basis.tangent), 0.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn zero_thickness_reproduces_curve() {
        let tube = Tube::new(unit_circle(), 0.0).unwrap();
        let curve = unit_circle();
        for i in 0..=50_u32 {
            let u = f64::from(i) / 50.0;
            for v in [0.0, 0.25, 0.6] {
                assert_eq!(tube.evaluate(u, v), curve.evaluate(u));
            }
        }
        assert_eq!(tube.evaluate(0.4321, 0.9), curve.evaluate(0.4321));
    }

    #[test]
    fn torus_from_circle_centerline() {
        // A circle of radius 2 swept with radius 0.5 is a torus.
        let tube = Tube::new(Circle::xy(2.0).unwrap(), 0.5).unwrap();
        for u in [0.0, 0.2, 0.55, 0.9] {
            for v in [0.0, 0.1, 0.5, 0.8] {
                let p = tube.evaluate(u, v);
                let ring = (p.x.hypot(p.y) - 2.0).hypot(p.z);
                assert_relative_eq!(ring, 0.5, epsilon = 1e-6);
            }
        }
    }

    #[test]
    fn custom_cross_section_is_scaled_into_frame() {
        let square = RegularPolygon::new(4, 1.0).unwrap();
        let tube = Tube::new(unit_circle(), 0.2)
            .unwrap()
            .with_cross_section(square);
        assert!(tube.has_cross_section());
        let basis = tube.frames().basis_at(0.2);
        // v = 0.25 is the second corner: (0, 1) -> bitangent direction.
        let p = tube.evaluate(0.2, 0.25);
        let expected = basis.position + basis.bitangent * 0.2;
        assert_relative_eq!(p, expected, epsilon = 1e-12);
    }

    #[test]
    fn three_dimensional_cross_section_uses_tangent() {
        let offset = ParametricCurve::new(|_| Point3::new(0.0, 0.0, 1.0));
        let tube = Tube::new(unit_circle(), 0.5)
            .unwrap()
            .with_cross_section(offset);
        let basis = tube.frames().basis_at(0.6);
        let p = tube.evaluate(0.6, 0.3);
        assert_relative_eq!(p, basis.position + basis.tangent * 0.5, epsilon = 1e-12);
    }

    #[test]
    fn circular_normal_points_outwards() {
        let tube = Tube::new(unit_circle(), 0.3).unwrap();
        let basis = tube.frames().basis_at(0.4);
        let n = tube.normal(0.4, 0.0).unwrap();
        assert_relative_eq!(n, basis.normal, epsilon = 1e-12);
    }

    #[test]
    fn repeated_rows_reuse_cached_frames() {
        let tube = Tube::new(unit_circle(), 0.3).unwrap();
        for i in 0..8_u32 {
            tube.evaluate(0.377, f64::from(i) / 8.0);
        }
        let stats = tube.stats();
        assert_eq!(stats.cache_misses, 1);
        assert_eq!(stats.cache_hits, 7);
    }

    #[test]
    fn negative_thickness_rejected() {
        assert!(Tube::new(unit_circle(), -1.0).is_err());
        assert!(Tube::new(unit_circle(), f64::NAN).is_err());
    }
}
