//! End-to-end recognition: payload → grid → reduced grid → prediction.

use log::{debug, info};
use serde::Serialize;

use crate::classify::Classifier;
use crate::decode::decode_payload;
use crate::error::Result;
use crate::grid::IntensityGrid;
use crate::reduce::Reducer;

/// Response body of a successful recognition.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recognition {
    /// Reduced grid after 8-bit truncation, as nested rows.
    pub matrix: Vec<Vec<f64>>,
    pub prediction: String,
    pub confidence: f64,
}

/// Reducer and classifier bundled for request handling.
#[derive(Debug, Clone)]
pub struct Recognizer {
    reducer: Reducer,
    classifier: Classifier,
}

impl Recognizer {
    pub fn new(reducer: Reducer, classifier: Classifier) -> Recognizer {
        Recognizer { reducer, classifier }
    }

    pub fn reducer(&self) -> &Reducer {
        &self.reducer
    }

    /// Decodes a base64 image payload and recognizes it.
    pub fn recognize(&self, payload: &str) -> Result<Recognition> {
        let grid = decode_payload(payload)?;
        self.recognize_grid(&grid)
    }

    /// Recognizes an already decoded source grid.
    pub fn recognize_grid(&self, grid: &IntensityGrid) -> Result<Recognition> {
        let reduced = self.reducer.reduce_image(grid)?.quantize_u8();
        debug!("reduced grid is {}", reduced.size());
        let prediction = self.classifier.predict(&reduced)?;
        info!("predicted {} with confidence {:.4}", prediction.label, prediction.confidence);
        Ok(Recognition {
            matrix: reduced.rows(),
            prediction: prediction.label,
            confidence: prediction.confidence,
        })
    }
}
