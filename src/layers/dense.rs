use serde::{Serialize, Deserialize};

use crate::{math::matrix::Matrix, activation::activation::{ActivationFunction, softmax}};

/// Fully connected layer: `a = f(x · W + b)`.
///
/// `weights` is `input_size × size`, `biases` is `1 × size`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Layer{
    pub size: usize,
    pub weights: Matrix,
    pub biases: Matrix,
    pub activator: ActivationFunction
}

impl Layer {
    pub fn new(weights: Matrix, biases: Matrix, activation: ActivationFunction) -> Layer {
        Layer {
            size: weights.cols,
            weights,
            biases,
            activator: activation
        }
    }

    pub fn input_size(&self) -> usize {
        self.weights.rows
    }

    /// True when `size`, `weights` and `biases` agree with each other.
    pub fn is_well_formed(&self) -> bool {
        self.weights.is_consistent()
            && self.biases.is_consistent()
            && self.weights.cols == self.size
            && self.biases.rows == 1
            && self.biases.cols == self.size
    }

    /// Pure forward pass for one input vector.
    pub fn infer(&self, input: &[f64]) -> Vec<f64> {
        let x = Matrix::from_data(vec![input.to_vec()]);
        let z = &(&x * &self.weights) + &self.biases;
        let logits = z.data.into_iter().next().unwrap_or_default();
        match self.activator {
            ActivationFunction::Softmax => softmax(&logits),
            ref f => logits.into_iter().map(|v| f.function(v)).collect(),
        }
    }
}
