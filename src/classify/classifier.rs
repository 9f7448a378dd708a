use std::path::Path;

use log::info;
use serde::Serialize;

use crate::classify::labels::LabelDecoder;
use crate::error::ClassifyError;
use crate::grid::{GridSize, IntensityGrid};
use crate::network::{InputType, Network};

/// Outcome of one classification.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Prediction {
    pub label: String,
    pub index: usize,
    /// Output activation at `index` (a probability for a softmax head).
    pub confidence: f64,
}

/// A loaded model plus its label decoder.
///
/// Built once at start-up and read-only afterwards; share it behind an `Arc`.
/// There is no reload: construct a new handle instead.
#[derive(Debug, Clone)]
pub struct Classifier {
    network: Network,
    labels: LabelDecoder,
    input: GridSize,
}

impl Classifier {
    /// Loads a JSON model file for grids of size `input`.
    pub fn load(path: impl AsRef<Path>, input: GridSize) -> Result<Classifier, ClassifyError> {
        let path = path.as_ref();
        let network = Network::load_json(path)?;
        let classifier = Classifier::new(network, input)?;
        info!(
            "loaded model {} ({} layers, {} inputs, {} labels)",
            path.display(),
            classifier.network.layers.len(),
            classifier.network.input_size(),
            classifier.labels.len()
        );
        Ok(classifier)
    }

    /// Wraps an in-memory network after checking that it can classify grids
    /// of size `input`.
    pub fn new(network: Network, input: GridSize) -> Result<Classifier, ClassifyError> {
        if network.layers.is_empty() {
            return Err(ClassifyError::NoLayers);
        }
        for (index, layer) in network.layers.iter().enumerate() {
            if !layer.is_well_formed() {
                return Err(ClassifyError::MalformedLayer { index });
            }
            if !layer.weights.is_finite() || !layer.biases.is_finite() {
                return Err(ClassifyError::NonFiniteWeights { index });
            }
        }
        for (index, pair) in network.layers.windows(2).enumerate() {
            if pair[1].input_size() != pair[0].size {
                return Err(ClassifyError::LayerChain {
                    index: index + 1,
                    expected: pair[1].input_size(),
                    actual: pair[0].size,
                });
            }
        }
        if network.input_size() != input.area() {
            return Err(ClassifyError::InputSizeMismatch {
                expected: network.input_size(),
                actual: input.area(),
            });
        }
        let declared = network.metadata.as_ref().and_then(|m| m.input_type.as_ref());
        if let Some(InputType::ImageGrayscale { width, height }) = declared {
            let declared = GridSize::new(*height as usize, *width as usize);
            if declared != input {
                return Err(ClassifyError::InputMismatch { expected: declared, actual: input });
            }
        }
        let labels = LabelDecoder::for_outputs(network.output_labels(), network.output_size())?;
        Ok(Classifier { network, labels, input })
    }

    pub fn input_size(&self) -> GridSize {
        self.input
    }

    pub fn labels(&self) -> &LabelDecoder {
        &self.labels
    }

    /// Classifies a grid of exactly `input_size()`.
    ///
    /// Samples are truncated to 8 bits and scaled to [0, 1] before the
    /// forward pass. The first maximal output wins ties.
    pub fn predict(&self, grid: &IntensityGrid) -> Result<Prediction, ClassifyError> {
        if grid.size() != self.input {
            return Err(ClassifyError::InputMismatch { expected: self.input, actual: grid.size() });
        }
        let output = self.network.forward(&grid.quantize_u8().normalized());
        if output.iter().any(|v| !v.is_finite()) {
            return Err(ClassifyError::NonFiniteOutput);
        }

        let (index, confidence) = output
            .iter()
            .copied()
            .enumerate()
            .fold((0, f64::NEG_INFINITY), |best, (i, v)| if v > best.1 { (i, v) } else { best });
        let label = self
            .labels
            .decode(index)
            .ok_or(ClassifyError::LabelCountMismatch {
                outputs: output.len(),
                labels: self.labels.len(),
            })?
            .to_owned();

        Ok(Prediction { label, index, confidence })
    }
}
