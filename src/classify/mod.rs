pub mod classifier;
pub mod labels;

pub use classifier::{Classifier, Prediction};
pub use labels::LabelDecoder;
