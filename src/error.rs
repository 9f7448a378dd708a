//! Error types for letter-lens

use thiserror::Error;

use crate::grid::GridSize;

/// Errors raised while building, splitting or reducing intensity grids.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GridError {
    /// Source grid does not have the single expected fixed size
    #[error("input image must be {expected} pixels, got {actual}")]
    DimensionMismatch { expected: GridSize, actual: GridSize },

    /// Target would force a zero-size averaging region
    #[error("degenerate target {target} for a {grid} grid")]
    DegenerateTarget { grid: GridSize, target: GridSize },

    /// Sample count does not match height * width
    #[error("shape mismatch: {height}x{width} grid needs {expected} samples, got {actual}")]
    ShapeMismatch {
        height: usize,
        width: usize,
        expected: usize,
        actual: usize,
    },

    /// Grid with a zero dimension
    #[error("grid dimensions must be positive, got {0}")]
    EmptyGrid(GridSize),

    /// NaN or infinite sample
    #[error("non-finite sample at ({row}, {col})")]
    NonFiniteSample { row: usize, col: usize },
}

/// Errors raised while turning an encoded payload into a grid.
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("empty image payload")]
    EmptyPayload,

    #[error("invalid base64: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("cannot decode image: {0}")]
    Image(#[from] image::ImageError),

    #[error(transparent)]
    Grid(#[from] GridError),
}

/// Errors raised by the classifier handle.
#[derive(Debug, Error)]
pub enum ClassifyError {
    #[error("cannot read model: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed model file: {0}")]
    Json(#[from] serde_json::Error),

    #[error("model has no layers")]
    NoLayers,

    /// Model input layer width differs from the grid it is fed
    #[error("model expects {expected} inputs, grid provides {actual}")]
    InputSizeMismatch { expected: usize, actual: usize },

    /// Weights, biases and declared size of one layer disagree
    #[error("layer {index} is malformed")]
    MalformedLayer { index: usize },

    /// Model weights contain NaN or infinity
    #[error("layer {index} has non-finite weights")]
    NonFiniteWeights { index: usize },

    /// Consecutive layers do not chain
    #[error("layer {index} expects {expected} inputs, previous layer yields {actual}")]
    LayerChain {
        index: usize,
        expected: usize,
        actual: usize,
    },

    #[error("model has {outputs} outputs but no output labels")]
    MissingLabels { outputs: usize },

    #[error("model has {outputs} outputs but {labels} labels")]
    LabelCountMismatch { outputs: usize, labels: usize },

    #[error("grid is {actual}, classifier expects {expected}")]
    InputMismatch { expected: GridSize, actual: GridSize },

    #[error("model produced a non-finite output")]
    NonFiniteOutput,
}

/// Crate-level error for the full recognition pipeline.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error(transparent)]
    Grid(#[from] GridError),

    #[error(transparent)]
    Classify(#[from] ClassifyError),
}

impl Error {
    /// Whether the failure is caused by the caller's input rather than by
    /// the service.
    ///
    /// Only a missing or non-base64 payload and a wrong canvas size count.
    /// Bytes that decode as base64 but not as an image are a server-side
    /// failure.
    pub fn is_client_error(&self) -> bool {
        match self {
            Error::Decode(DecodeError::EmptyPayload | DecodeError::Base64(_)) => true,
            Error::Decode(DecodeError::Image(_) | DecodeError::Grid(_)) => false,
            Error::Grid(GridError::DimensionMismatch { .. }) => true,
            Error::Grid(_) | Error::Classify(_) => false,
        }
    }
}

/// Result type for grid operations
pub type GridResult<T> = std::result::Result<T, GridError>;

/// Result type for the recognition pipeline
pub type Result<T> = std::result::Result<T, Error>;
