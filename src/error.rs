use thiserror::Error;

/// Top-level error type for tubeframe.
#[derive(Debug, Error)]
pub enum TubeframeError {
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error(transparent)]
    Tessellation(#[from] TessellationError),
}

/// Errors raised while constructing curves, surfaces and frame samplers.
#[derive(Debug, Error)]
pub enum GeometryError {
    #[error("parameter {parameter} = {value} is out of range [{min}, {max}]")]
    ParameterOutOfRange {
        parameter: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error("degenerate geometry: {0}")]
    Degenerate(String),

    #[error("zero-length vector")]
    ZeroVector,

    #[error("{what}: lengths differ ({left} != {right})")]
    LengthMismatch {
        what: &'static str,
        left: usize,
        right: usize,
    },
}

/// Errors related to tessellation.
#[derive(Debug, Error)]
pub enum TessellationError {
    #[error("invalid tessellation parameters: {0}")]
    InvalidParameters(String),

    #[error("tessellation failed: {0}")]
    Failed(String),
}

/// Convenience type alias for results using [`TubeframeError`].
pub type Result<T> = std::result::Result<T, TubeframeError>;
