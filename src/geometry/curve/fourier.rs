use std::f64::consts::TAU;

use crate::error::{GeometryError, Result};
use crate::math::{Point3, Vector3};

use super::{Curve, CurveDomain};

/// A closed curve given by a truncated Fourier series per axis.
///
/// `P(t) = offset + sum_k (cos_k * cos(k t) + sin_k * sin(k t))` for
/// `k = 1..=n`, over `t` in `[0, 2*pi]`.
#[derive(Debug, Clone)]
pub struct FourierCurve {
    offset: Point3,
    cos_coeffs: Vec<Vector3>,
    sin_coeffs: Vec<Vector3>,
}

impl FourierCurve {
    /// Creates a Fourier curve from matching cosine and sine coefficient lists.
    ///
    /// # Errors
    ///
    /// Returns an error if the lists have different lengths or are empty.
    pub fn new(cos_coeffs: Vec<Vector3>, sin_coeffs: Vec<Vector3>) -> Result<Self> {
        if cos_coeffs.len() != sin_coeffs.len() {
            return Err(GeometryError::LengthMismatch {
                what: "fourier coefficients",
                left: cos_coeffs.len(),
                right: sin_coeffs.len(),
            }
            .into());
        }
        if cos_coeffs.is_empty() {
            return Err(
                GeometryError::Degenerate("fourier curve needs at least one term".into()).into(),
            );
        }
        Ok(Self {
            offset: Point3::origin(),
            cos_coeffs,
            sin_coeffs,
        })
    }

    /// Moves the curve so its constant term sits at `offset`.
    #[must_use]
    pub fn with_offset(mut self, offset: Point3) -> Self {
        self.offset = offset;
        self
    }

    /// Number of harmonics.
    #[must_use]
    pub fn terms(&self) -> usize {
        self.cos_coeffs.len()
    }
}

impl Curve for FourierCurve {
    #[allow(clippy::cast_precision_loss)]
    fn evaluate(&self, t: f64) -> Point3 {
        let mut p = self.offset;
        for (k, (c, s)) in self.cos_coeffs.iter().zip(&self.sin_coeffs).enumerate() {
            let (sin_kt, cos_kt) = ((k + 1) as f64 * t).sin_cos();
            p += c * cos_kt + s * sin_kt;
        }
        p
    }

    fn end_points(&self) -> CurveDomain {
        CurveDomain::new(0.0, TAU)
    }
}
