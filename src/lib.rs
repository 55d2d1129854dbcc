pub mod error;
pub mod frame;
pub mod geometry;
pub mod math;
pub mod tessellation;

pub use error::{Result, TubeframeError};
pub use frame::{Basis, CacheStats, FrameParams, FrenetFrames};
pub use geometry::{Curve, CurveDomain, Surface, SurfaceDomain, Tube, TubeParams};
