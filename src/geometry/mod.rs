pub mod curve;
pub mod surface;

pub use curve::{Curve, CurveDomain};
pub use surface::{Surface, SurfaceDomain, Tube, TubeParams};
