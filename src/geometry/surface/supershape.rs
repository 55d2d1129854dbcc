use std::f64::consts::{FRAC_PI_2, PI};

use crate::error::{GeometryError, Result};
use crate::math::{Point3, TOLERANCE};

use super::{Surface, SurfaceDomain};

/// Parameters of the Gielis superformula.
///
/// `r(phi) = (|cos(m phi / 4) / a|^n2 + |sin(m phi / 4) / b|^n3)^(-1 / n1)`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SuperformulaParams {
    /// Rotational symmetry.
    pub m: f64,
    /// Overall exponent.
    pub n1: f64,
    /// Cosine-term exponent.
    pub n2: f64,
    /// Sine-term exponent.
    pub n3: f64,
    /// Cosine-term scale.
    pub a: f64,
    /// Sine-term scale.
    pub b: f64,
}

impl Default for SuperformulaParams {
    /// The unit circle.
    fn default() -> Self {
        Self {
            m: 0.0,
            n1: 1.0,
            n2: 1.0,
            n3: 1.0,
            a: 1.0,
            b: 1.0,
        }
    }
}

impl SuperformulaParams {
    /// Creates a parameter set.
    #[must_use]
    pub fn new(m: f64, n1: f64, n2: f64, n3: f64) -> Self {
        Self {
            m,
            n1,
            n2,
            n3,
            ..Self::default()
        }
    }

    /// Checks the divisors are non-zero and every value is finite.
    ///
    /// # Errors
    ///
    /// Returns an error if `n1`, `a` or `b` is (near) zero or any value is
    /// not finite.
    pub fn validate(&self) -> Result<()> {
        let all = [self.m, self.n1, self.n2, self.n3, self.a, self.b];
        if all.iter().any(|x| !x.is_finite()) {
            return Err(
                GeometryError::Degenerate("superformula parameters must be finite".into()).into(),
            );
        }
        for (name, value) in [("n1", self.n1), ("a", self.a), ("b", self.b)] {
            if value.abs() < TOLERANCE {
                return Err(GeometryError::Degenerate(format!(
                    "superformula parameter {name} must be non-zero"
                ))
                .into());
            }
        }
        Ok(())
    }

    /// Radius at angle `phi`. Zero where both terms vanish.
    #[must_use]
    pub fn radius(&self, phi: f64) -> f64 {
        let (s, c) = (self.m * phi / 4.0).sin_cos();
        let sum = (c / self.a).abs().powf(self.n2) + (s / self.b).abs().powf(self.n3);
        if sum <= 0.0 {
            0.0
        } else {
            sum.powf(-1.0 / self.n1)
        }
    }
}

/// A 3D supershape: the spherical product of two superformula curves.
///
/// `u` is the longitude in `[-pi, pi]`, `v` the latitude in `[-pi/2, pi/2]`:
///
/// `P(u, v) = (r1(u) cos(u) r2(v) cos(v), r1(u) sin(u) r2(v) cos(v), r2(v) sin(v))`
#[derive(Debug, Clone)]
pub struct Supershape {
    longitude: SuperformulaParams,
    latitude: SuperformulaParams,
    scale: f64,
}

impl Supershape {
    /// Creates a supershape from its longitude and latitude profiles.
    ///
    /// # Errors
    ///
    /// Returns an error if either parameter set fails validation.
    pub fn new(longitude: SuperformulaParams, latitude: SuperformulaParams) -> Result<Self> {
        longitude.validate()?;
        latitude.validate()?;
        Ok(Self {
            longitude,
            latitude,
            scale: 1.0,
        })
    }

    /// Scales the whole shape.
    ///
    /// # Errors
    ///
    /// Returns an error if `scale` is not finite and positive.
    pub fn with_scale(mut self, scale: f64) -> Result<Self> {
        if !scale.is_finite() || scale < TOLERANCE {
            return Err(GeometryError::ParameterOutOfRange {
                parameter: "scale",
                value: scale,
                min: TOLERANCE,
                max: f64::INFINITY,
            }
            .into());
        }
        self.scale = scale;
        Ok(self)
    }
}

impl Surface for Supershape {
    fn evaluate(&self, u: f64, v: f64) -> Point3 {
        let r1 = self.longitude.radius(u);
        let r2 = self.latitude.radius(v);
        let (su, cu) = u.sin_cos();
        let (sv, cv) = v.sin_cos();
        Point3::new(
            self.scale * r1 * cu * r2 * cv,
            self.scale * r1 * su * r2 * cv,
            self.scale * r2 * sv,
        )
    }

    fn domain(&self) -> SurfaceDomain {
        SurfaceDomain::new(-PI, PI, -FRAC_PI_2, FRAC_PI_2)
    }
}
