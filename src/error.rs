use thiserror::Error;

/// Top-level error type for the Compass geometric kernel.
#[derive(Debug, Error)]
pub enum CompassError {
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error(transparent)]
    Intersection(#[from] IntersectionError),

    #[error(transparent)]
    Clip(#[from] ClipError),
}

/// Errors raised while constructing or querying primitives and paths.
#[derive(Debug, Error)]
pub enum GeometryError {
    #[error("zero-length vector")]
    ZeroVector,

    #[error("non-finite coordinate")]
    NonFinite,

    #[error("invalid radius {0}: must be finite and positive")]
    InvalidRadius(f64),

    #[error("invalid tolerance {0}: must be finite and positive")]
    InvalidTolerance(f64),

    #[error("degenerate geometry: {0}")]
    Degenerate(String),

    #[error("path is not closed: segment {index} does not end where the next one starts")]
    OpenPath { index: usize },

    #[error("path has no segments")]
    EmptyPath,
}

/// Errors raised by the intersection algebra.
#[derive(Debug, Error)]
pub enum IntersectionError {
    #[error("unsupported degenerate intersection: {0}")]
    Unsupported(String),
}

/// Errors raised by the polygon clipper.
#[derive(Debug, Error)]
pub enum ClipError {
    #[error("chain traversal failed: {0}")]
    TraversalFailed(String),

    #[error("chain vertex not found")]
    VertexNotFound,
}

/// Convenience type alias for results using [`CompassError`].
pub type Result<T> = std::result::Result<T, CompassError>;
