pub mod error;
pub mod grid;
pub mod reduce;
pub mod decode;
pub mod math;
pub mod activation;
pub mod layers;
pub mod network;
pub mod classify;
pub mod service;

// Convenience re-exports
pub use error::{ClassifyError, DecodeError, Error, GridError, Result};
pub use grid::{GridSize, IntensityGrid, TargetSize, SOURCE_SIZE, TARGET_SIZE};
pub use reduce::{block_average, reduce, Reducer};
pub use decode::{decode_image_bytes, decode_payload};
pub use math::matrix::Matrix;
pub use activation::activation::ActivationFunction;
pub use layers::dense::Layer;
pub use network::{InputType, ModelMetadata, Network};
pub use classify::{Classifier, LabelDecoder, Prediction};
pub use service::{Recognition, Recognizer};
