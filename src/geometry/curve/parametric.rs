use std::fmt;

use crate::error::{GeometryError, Result};
use crate::math::Point3;

use super::{Curve, CurveDomain};

type CurveFn = Box<dyn Fn(f64) -> Point3>;

/// A curve defined by an arbitrary closure over a parameter range.
///
/// This is the general-purpose variant: anything that can be written as
/// `t -> (x, y, z)` can be swept into a tube through it.
pub struct ParametricCurve {
    func: CurveFn,
    domain: CurveDomain,
}

impl ParametricCurve {
    /// Wraps `func` as a curve over the unit domain `[0, 1]`.
    pub fn new<F>(func: F) -> Self
    where
        F: Fn(f64) -> Point3 + 'static,
    {
        Self {
            func: Box::new(func),
            domain: CurveDomain::unit(),
        }
    }

    /// Replaces the parameter range.
    ///
    /// # Errors
    ///
    /// Returns an error if either bound is not finite or the range is empty.
    pub fn with_domain(mut self, t_min: f64, t_max: f64) -> Result<Self> {
        if !t_min.is_finite() || !t_max.is_finite() || t_min == t_max {
            return Err(GeometryError::Degenerate(format!(
                "curve domain [{t_min}, {t_max}] is empty or not finite"
            ))
            .into());
        }
        self.domain = CurveDomain::new(t_min, t_max);
        Ok(self)
    }
}

impl fmt::Debug for ParametricCurve {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ParametricCurve")
            .field("domain", &self.domain)
            .finish_non_exhaustive()
    }
}

impl Curve for ParametricCurve {
    fn evaluate(&self, t: f64) -> Point3 {
        (self.func)(t)
    }

    fn end_points(&self) -> CurveDomain {
        self.domain
    }
}
