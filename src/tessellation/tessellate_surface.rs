use crate::error::{Result, TessellationError};
use crate::geometry::surface::Surface;
use crate::math::{Point2, Vector3};

use super::{TessellationParams, TriangleMesh};

/// Tessellates a parametric surface on a regular UV grid.
pub struct TessellateSurface {
    params: TessellationParams,
}

impl TessellateSurface {
    /// Creates a new `TessellateSurface` operation.
    #[must_use]
    pub fn new(params: TessellationParams) -> Self {
        Self { params }
    }

    /// Executes the tessellation over the surface's full domain.
    ///
    /// Generates `(u_segments + 1) * (v_segments + 1)` vertices via
    /// `surface.evaluate(u, v)`, then splits each grid cell into two
    /// triangles. Rows run along `u`, so consecutive evaluations share a
    /// `v` and differ in `u`; points where the surface has no normal get `+Z`.
    ///
    /// # Errors
    ///
    /// Returns an error if a segment count is zero or the grid does not fit
    /// `u32` indices.
    #[allow(clippy::cast_precision_loss)]
    pub fn execute(&self, surface: &dyn Surface) -> Result<TriangleMesh> {
        self.params.validate()?;
        let TessellationParams {
            u_segments: n_u,
            v_segments: n_v,
        } = self.params;
        let d = surface.domain();

        let rows = n_v + 1;
        let cols = n_u + 1;
        let index = |iu: usize, iv: usize| -> Result<u32> {
            u32::try_from(iv * cols + iu).map_err(|_| {
                TessellationError::Failed(format!("grid of {cols} x {rows} exceeds u32 indices"))
                    .into()
            })
        };
        index(n_u, n_v)?;

        let mut mesh = TriangleMesh::default();
        mesh.vertices.reserve(rows * cols);
        mesh.normals.reserve(rows * cols);
        mesh.uvs.reserve(rows * cols);
        mesh.indices.reserve(n_u * n_v * 2);

        for iv in 0..rows {
            let v = d.v_min + (d.v_max - d.v_min) * iv as f64 / n_v as f64;
            for iu in 0..cols {
                let u = d.u_min + (d.u_max - d.u_min) * iu as f64 / n_u as f64;
                mesh.vertices.push(surface.evaluate(u, v));
                mesh.normals.push(surface.normal(u, v).unwrap_or(Vector3::z()));
                mesh.uvs.push(Point2::new(u, v));
            }
        }

        for iv in 0..n_v {
            for iu in 0..n_u {
                let i00 = index(iu, iv)?;
                let i10 = index(iu + 1, iv)?;
                let i01 = index(iu, iv + 1)?;
                let i11 = index(iu + 1, iv + 1)?;
                mesh.indices.push([i00, i10, i11]);
                mesh.indices.push([i00, i11, i01]);
            }
        }

        Ok(mesh)
    }
}
