mod tessellate_curve;
mod tessellate_surface;

pub use tessellate_curve::TessellateCurve;
pub use tessellate_surface::TessellateSurface;

use crate::error::{Result, TessellationError};
use crate::math::{Point2, Point3, Vector3};

/// Grid resolution for surface tessellation.
#[derive(Debug, Clone, Copy)]
pub struct TessellationParams {
    /// Number of cells along `u`.
    pub u_segments: usize,
    /// Number of cells along `v`.
    pub v_segments: usize,
}

impl Default for TessellationParams {
    fn default() -> Self {
        Self {
            u_segments: 64,
            v_segments: 16,
        }
    }
}

impl TessellationParams {
    /// Creates a grid of `u_segments x v_segments` cells.
    #[must_use]
    pub fn new(u_segments: usize, v_segments: usize) -> Self {
        Self {
            u_segments,
            v_segments,
        }
    }

    /// Checks the grid is non-empty.
    ///
    /// # Errors
    ///
    /// Returns an error if either segment count is zero.
    pub fn validate(&self) -> Result<()> {
        if self.u_segments == 0 || self.v_segments == 0 {
            return Err(TessellationError::InvalidParameters(format!(
                "segment counts must be positive, got {} x {}",
                self.u_segments, self.v_segments
            ))
            .into());
        }
        Ok(())
    }
}

/// A polyline approximation of a curve.
#[derive(Debug, Clone, Default)]
pub struct Polyline {
    /// The ordered vertices of the polyline.
    pub points: Vec<Point3>,
}

impl Polyline {
    /// Sum of segment lengths.
    #[must_use]
    pub fn length(&self) -> f64 {
        self.points.windows(2).map(|w| (w[1] - w[0]).norm()).sum()
    }
}

/// A triangle mesh approximation of a surface.
#[derive(Debug, Clone, Default)]
pub struct TriangleMesh {
    /// Vertex positions.
    pub vertices: Vec<Point3>,
    /// Vertex normals.
    pub normals: Vec<Vector3>,
    /// UV coordinates.
    pub uvs: Vec<Point2>,
    /// Triangle indices (each triple defines a triangle).
    pub indices: Vec<[u32; 3]>,
}

impl TriangleMesh {
    /// Number of triangles.
    #[must_use]
    pub fn triangle_count(&self) -> usize {
        self.indices.len()
    }

    /// Total surface area.
    #[must_use]
    pub fn area(&self) -> f64 {
        self.indices
            .iter()
            .map(|&[a, b, c]| {
                let (a, b, c) = (
                    self.vertices[a as usize],
                    self.vertices[b as usize],
                    self.vertices[c as usize],
                );
                0.5 * (b - a).cross(&(c - a)).norm()
            })
            .sum()
    }
}
