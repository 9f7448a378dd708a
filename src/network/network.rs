use crate::{error::ClassifyError, layers::dense::Layer, network::metadata::ModelMetadata};
use serde::{Serialize, Deserialize};
use std::{fs::File, io::BufReader, path::Path};

/// A feed-forward stack of dense layers plus optional annotations.
///
/// This is the on-disk model format: a JSON object with a `layers` array and
/// an optional `metadata` object.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Network {
    pub layers: Vec<Layer>,
    #[serde(default)]
    pub metadata: Option<ModelMetadata>,
}

impl Network {
    pub fn new(layers: Vec<Layer>, metadata: Option<ModelMetadata>) -> Network {
        Network { layers, metadata }
    }

    /// Forward pass. Does not touch the network, so one instance can serve
    /// concurrent callers.
    pub fn forward(&self, input: &[f64]) -> Vec<f64> {
        let mut current = input.to_vec();
        for layer in &self.layers {
            current = layer.infer(&current);
        }
        current
    }

    /// Width of the input layer, or 0 for an empty network.
    pub fn input_size(&self) -> usize {
        self.layers.first().map_or(0, Layer::input_size)
    }

    /// Width of the output layer, or 0 for an empty network.
    pub fn output_size(&self) -> usize {
        self.layers.last().map_or(0, |l| l.size)
    }

    /// Output labels declared in the metadata, if any.
    pub fn output_labels(&self) -> Option<&[String]> {
        self.metadata.as_ref().and_then(|m| m.output_labels.as_deref())
    }

    /// Reads a network from a JSON model file.
    pub fn load_json(path: impl AsRef<Path>) -> Result<Network, ClassifyError> {
        let reader = BufReader::new(File::open(path)?);
        Ok(serde_json::from_reader(reader)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{activation::activation::ActivationFunction, math::matrix::Matrix};

    fn two_layer() -> Network {
        Network::new(
            vec![
                Layer::new(
                    Matrix::from_data(vec![vec![1.0, 0.0], vec![0.0, 1.0], vec![1.0, 1.0]]),
                    Matrix::zeros(1, 2),
                    ActivationFunction::ReLU,
                ),
                Layer::new(
                    Matrix::from_data(vec![vec![2.0], vec![-1.0]]),
                    Matrix::from_data(vec![vec![0.5]]),
                    ActivationFunction::Identity,
                ),
            ],
            None,
        )
    }

    #[test]
    fn forward_chains_layers() {
        let net = two_layer();
        assert_eq!(net.input_size(), 3);
        assert_eq!(net.output_size(), 1);
        // layer 1: [1+3, 2+3] = [4, 5]; layer 2: 8 - 5 + 0.5
        assert_eq!(net.forward(&[1.0, 2.0, 3.0]), vec![3.5]);
    }

    #[test]
    fn json_file_roundtrip_keeps_outputs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("net.json");

        let net = two_layer();
        std::fs::write(&path, serde_json::to_string_pretty(&net).unwrap()).unwrap();
        let loaded = Network::load_json(&path).unwrap();
        assert_eq!(loaded.forward(&[0.0, 1.0, 0.5]), net.forward(&[0.0, 1.0, 0.5]));
    }

    #[test]
    fn malformed_json_is_a_model_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.json");
        std::fs::write(&path, "{\"layers\": 3}").unwrap();
        assert!(matches!(Network::load_json(&path), Err(ClassifyError::Json(_))));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            Network::load_json(dir.path().join("absent.json")),
            Err(ClassifyError::Io(_))
        ));
    }
}
