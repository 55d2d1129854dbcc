//! Moving frames along parametric curves.
//!
//! [`FrenetFrames`] samples a tangent/normal/bitangent basis at a fixed
//! number of points along a curve, propagating each normal from the
//! previous bitangent. Closed curves get their accumulated twist spread
//! along the arc length so the first and last frames coincide exactly.

mod cache;

pub use cache::{CacheStats, FrameCache};

use std::cell::RefCell;

use nalgebra::{Unit, UnitQuaternion};
use tracing::{debug, trace};

use crate::error::{GeometryError, Result};
use crate::geometry::curve::{Curve, CurveDomain};
use crate::math::{normal_from_tangent, normalize_or_zero, Point3, Vector3, EPSILON, TOLERANCE};

/// Parameters controlling frame sampling.
#[derive(Debug, Clone, Copy)]
pub struct FrameParams {
    /// Number of segments; `resolution + 1` samples are taken.
    pub resolution: usize,
    /// Maximum number of off-grid query results kept in the cache.
    pub cache_capacity: usize,
    /// Forward-difference step in the unit parameter.
    pub epsilon: f64,
    /// Squared end-point distance under which the curve counts as closed.
    pub closed_tolerance: f64,
}

impl Default for FrameParams {
    fn default() -> Self {
        Self {
            resolution: 50,
            cache_capacity: 200,
            epsilon: EPSILON,
            closed_tolerance: EPSILON,
        }
    }
}

impl FrameParams {
    /// Sets the number of sampled segments.
    #[must_use]
    pub fn with_resolution(mut self, resolution: usize) -> Self {
        self.resolution = resolution;
        self
    }

    /// Sets the cache capacity (in cached query results).
    #[must_use]
    pub fn with_cache_capacity(mut self, cache_capacity: usize) -> Self {
        self.cache_capacity = cache_capacity;
        self
    }

    /// Checks that every field is usable.
    ///
    /// # Errors
    ///
    /// Returns an error if the resolution or cache capacity is zero, or the
    /// step / tolerance is not a finite positive number.
    pub fn validate(&self) -> Result<()> {
        if self.resolution == 0 {
            return Err(GeometryError::ParameterOutOfRange {
                parameter: "resolution",
                value: 0.0,
                min: 1.0,
                max: f64::INFINITY,
            }
            .into());
        }
        if self.cache_capacity == 0 {
            return Err(GeometryError::ParameterOutOfRange {
                parameter: "cache_capacity",
                value: 0.0,
                min: 1.0,
                max: f64::INFINITY,
            }
            .into());
        }
        if !self.epsilon.is_finite() || self.epsilon <= 0.0 {
            return Err(GeometryError::ParameterOutOfRange {
                parameter: "epsilon",
                value: self.epsilon,
                min: f64::MIN_POSITIVE,
                max: f64::INFINITY,
            }
            .into());
        }
        if !self.closed_tolerance.is_finite() || self.closed_tolerance < 0.0 {
            return Err(GeometryError::ParameterOutOfRange {
                parameter: "closed_tolerance",
                value: self.closed_tolerance,
                min: 0.0,
                max: f64::INFINITY,
            }
            .into());
        }
        Ok(())
    }
}

/// An orthonormal frame attached to a point on a curve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Basis {
    /// Unit normal.
    pub normal: Vector3,
    /// Unit bitangent (`tangent x normal`).
    pub bitangent: Vector3,
    /// Unit tangent, pointing towards increasing parameter.
    pub tangent: Vector3,
    /// Curve position the frame is attached to.
    pub position: Point3,
}

impl Basis {
    /// Packs the frame as normal, bitangent, tangent, position (12 floats).
    #[must_use]
    pub fn to_packed(&self) -> [f64; 12] {
        let (n, b, t, p) = (&self.normal, &self.bitangent, &self.tangent, &self.position);
        [
            n.x, n.y, n.z, b.x, b.y, b.z, t.x, t.y, t.z, p.x, p.y, p.z,
        ]
    }

    /// Inverse of [`Basis::to_packed`].
    #[must_use]
    pub fn from_packed(v: &[f64; 12]) -> Self {
        Self {
            normal: Vector3::new(v[0], v[1], v[2]),
            bitangent: Vector3::new(v[3], v[4], v[5]),
            tangent: Vector3::new(v[6], v[7], v[8]),
            position: Point3::new(v[9], v[10], v[11]),
        }
    }

    /// Maps local coordinates `(x, y, z)` along normal, bitangent and
    /// tangent to a world-space point.
    #[must_use]
    pub fn local_to_world(&self, x: f64, y: f64, z: f64) -> Point3 {
        self.position + self.normal * x + self.bitangent * y + self.tangent * z
    }
}

/// Frames sampled along a curve, with a cache for off-grid queries.
///
/// The curve is addressed through a unit parameter `u`: `u = 0` and `u = 1`
/// map to the two ends of [`Curve::end_points`]. Queries take `&self`; the
/// cache lives behind a `RefCell`, so a sampler is meant for one thread.
#[derive(Debug)]
pub struct FrenetFrames<C> {
    curve: C,
    domain: CurveDomain,
    params: FrameParams,
    closed: bool,
    samples: Vec<Basis>,
    length: f64,
    twist: f64,
    cache: RefCell<FrameCache>,
}

impl<C: Curve> FrenetFrames<C> {
    /// Samples `curve` with the default parameters.
    ///
    /// # Errors
    ///
    /// Never fails with default parameters; kept fallible to match
    /// [`FrenetFrames::with_params`].
    pub fn new(curve: C) -> Result<Self> {
        Self::with_params(curve, FrameParams::default())
    }

    /// Samples `curve` with explicit parameters.
    ///
    /// # Errors
    ///
    /// Returns an error if `params` fails [`FrameParams::validate`].
    #[allow(clippy::cast_precision_loss)]
    pub fn with_params(curve: C, params: FrameParams) -> Result<Self> {
        params.validate()?;
        let domain = curve.end_points();
        let res = params.resolution;
        let eps = params.epsilon;

        let first = point_at(&curve, domain, 0.0);
        let last = point_at(&curve, domain, 1.0);
        let closed = (last - first).norm_squared() < params.closed_tolerance;

        let mut samples: Vec<Basis> = Vec::with_capacity(res + 1);
        let mut lengths = Vec::with_capacity(res + 1);
        let mut length = 0.0;

        for i in 0..=res {
            let u = i as f64 / res as f64;
            let position = point_at(&curve, domain, u);
            // The last sample differences backwards, then flips to stay forward.
            let tangent = if i == res {
                -normalize_or_zero(&(point_at(&curve, domain, u - eps) - position))
            } else {
                normalize_or_zero(&(point_at(&curve, domain, u + eps) - position))
            };
            let normal = match samples.last() {
                Some(prev) => {
                    length += (position - prev.position).norm();
                    normalize_or_zero(&prev.bitangent.cross(&tangent))
                }
                None => normal_from_tangent(&tangent),
            };
            let bitangent = normalize_or_zero(&tangent.cross(&normal));
            lengths.push(length);
            samples.push(Basis {
                normal,
                bitangent,
                tangent,
                position,
            });
        }

        let twist = if closed {
            close_seam(&mut samples, &lengths, length)
        } else {
            0.0
        };

        debug!(
            resolution = res,
            closed,
            twist,
            length,
            "sampled frenet frames"
        );

        Ok(Self {
            curve,
            domain,
            params,
            closed,
            samples,
            length,
            twist,
            cache: RefCell::new(FrameCache::new(params.cache_capacity)),
        })
    }

    /// Returns the sampled curve.
    #[must_use]
    pub fn curve(&self) -> &C {
        &self.curve
    }

    /// Returns the parameters the frames were sampled with.
    #[must_use]
    pub fn params(&self) -> &FrameParams {
        &self.params
    }

    /// Whether the curve's end points coincide.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Number of sampled segments.
    #[must_use]
    pub fn resolution(&self) -> usize {
        self.params.resolution
    }

    /// All precomputed frames, `resolution + 1` of them.
    #[must_use]
    pub fn samples(&self) -> &[Basis] {
        &self.samples
    }

    /// Precomputed frame at sample `index`.
    #[must_use]
    pub fn sample(&self, index: usize) -> Option<&Basis> {
        self.samples.get(index)
    }

    /// Polyline length through the sample positions.
    #[must_use]
    pub fn length(&self) -> f64 {
        self.length
    }

    /// Angle (radians) spread along a closed curve to close the seam.
    /// Zero for open curves.
    #[must_use]
    pub fn twist_angle(&self) -> f64 {
        self.twist
    }

    /// Frame at unit parameter `u`.
    ///
    /// Grid-aligned `u` returns the precomputed sample. Other values are
    /// served from the cache or computed and cached.
    pub fn basis_at(&self, u: f64) -> Basis {
        if let Some(index) = self.grid_index(u) {
            self.cache.borrow_mut().record_grid_hit();
            return self.samples[index];
        }

        let mut cache = self.cache.borrow_mut();
        if let Some(basis) = cache.get(u) {
            return basis;
        }

        let basis = self.compute_basis(u);
        trace!(u, "frame cache miss");
        if let Some((evicted, _)) = cache.insert(u, basis) {
            trace!(evicted, "frame cache eviction");
        }
        basis
    }

    /// Frame at `u` packed as normal, bitangent, tangent, position.
    pub fn sample_and_basis_vectors(&self, u: f64) -> [f64; 12] {
        self.basis_at(u).to_packed()
    }

    /// Current cache counters.
    #[must_use]
    pub fn stats(&self) -> CacheStats {
        self.cache.borrow().stats()
    }

    /// Zeroes the cache counters.
    pub fn reset_stats(&self) {
        self.cache.borrow_mut().reset_stats();
    }

    /// Drops every cached off-grid result. Counters are left as they are.
    pub fn clear_cache(&self) {
        self.cache.borrow_mut().clear();
    }

    /// Number of off-grid results currently cached.
    #[must_use]
    pub fn cached_len(&self) -> usize {
        self.cache.borrow().len()
    }

    #[allow(
        clippy::cast_precision_loss,
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss
    )]
    fn grid_index(&self, u: f64) -> Option<usize> {
        let res = self.params.resolution as f64;
        let scaled = u * res;
        let nearest = scaled.round();
        if (scaled - nearest).abs() < EPSILON && (0.0..=res).contains(&nearest) {
            Some(nearest as usize)
        } else {
            None
        }
    }

    #[allow(
        clippy::cast_precision_loss,
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss
    )]
    fn compute_basis(&self, u: f64) -> Basis {
        let position = point_at(&self.curve, self.domain, u);
        let ahead = point_at(&self.curve, self.domain, u + self.params.epsilon);
        let tangent = normalize_or_zero(&(ahead - position));
        let normal = if (0.0..=1.0).contains(&u) {
            let res = self.params.resolution;
            let below = ((u * res as f64).floor() as usize).min(res);
            normalize_or_zero(&self.samples[below].bitangent.cross(&tangent))
        } else {
            normal_from_tangent(&tangent)
        };
        let bitangent = normalize_or_zero(&tangent.cross(&normal));
        Basis {
            normal,
            bitangent,
            tangent,
            position,
        }
    }
}

fn point_at<C: Curve>(curve: &C, domain: CurveDomain, u: f64) -> Point3 {
    curve.evaluate(domain.lerp(u))
}

/// Copies the first frame onto the last one and rotates every interior
/// frame about its own tangent by its share (by arc length) of the seam
/// angle. Returns that angle.
fn close_seam(samples: &mut [Basis], lengths: &[f64], total: f64) -> f64 {
    let (Some(&first), Some(&last)) = (samples.first(), samples.last()) else {
        return 0.0;
    };
    // Signed angle taking the last normal onto the first, about the seam tangent.
    let sin = last.normal.cross(&first.normal).dot(&last.tangent);
    let cos = last.normal.dot(&first.normal);
    let angle = sin.atan2(cos);

    let end = samples.len() - 1;
    samples[end] = Basis {
        position: last.position,
        ..first
    };

    if total <= 0.0 || angle.abs() < f64::EPSILON {
        return angle;
    }

    for (basis, &s) in samples[1..end].iter_mut().zip(&lengths[1..end]) {
        let Some(axis) = Unit::try_new(basis.tangent, TOLERANCE) else {
            continue;
        };
        let rotation = UnitQuaternion::from_axis_angle(&axis, angle * s / total);
        basis.normal = rotation * basis.normal;
        basis.bitangent = rotation * basis.bitangent;
    }
    angle
}
