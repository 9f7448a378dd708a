use crate::error::ClassifyError;

/// Maps classifier output indices to label strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelDecoder {
    labels: Vec<String>,
}

impl LabelDecoder {
    pub fn new(labels: Vec<String>) -> LabelDecoder {
        LabelDecoder { labels }
    }

    /// `A` through `Z`, in the order the letter classifier's output layer
    /// is trained with.
    pub fn alphabet() -> LabelDecoder {
        LabelDecoder::new(('A'..='Z').map(String::from).collect())
    }

    /// Picks the decoder for a model with `outputs` output neurons.
    ///
    /// Declared labels must match the output count. Without declared labels,
    /// a 26-wide output falls back to the alphabet.
    pub fn for_outputs(declared: Option<&[String]>, outputs: usize) -> Result<LabelDecoder, ClassifyError> {
        match declared {
            Some(labels) if labels.len() == outputs => Ok(LabelDecoder::new(labels.to_vec())),
            Some(labels) => Err(ClassifyError::LabelCountMismatch { outputs, labels: labels.len() }),
            None if outputs == 26 => Ok(LabelDecoder::alphabet()),
            None => Err(ClassifyError::MissingLabels { outputs }),
        }
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn decode(&self, index: usize) -> Option<&str> {
        self.labels.get(index).map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn alphabet_decodes_letters() {
        let labels = LabelDecoder::alphabet();
        assert_eq!(labels.len(), 26);
        assert_eq!(labels.decode(0), Some("A"));
        assert_eq!(labels.decode(25), Some("Z"));
        assert_eq!(labels.decode(26), None);
    }

    #[test]
    fn declared_labels_win_over_alphabet() {
        let declared: Vec<String> = (0..26).map(|i| format!("class-{}", i)).collect();
        let labels = LabelDecoder::for_outputs(Some(declared.as_slice()), 26).unwrap();
        assert_eq!(labels.decode(3), Some("class-3"));
    }

    #[test]
    fn label_count_must_match_outputs() {
        let declared = vec!["x".to_owned(), "y".to_owned()];
        assert!(matches!(
            LabelDecoder::for_outputs(Some(declared.as_slice()), 3),
            Err(ClassifyError::LabelCountMismatch { outputs: 3, labels: 2 })
        ));
        assert!(matches!(
            LabelDecoder::for_outputs(None, 10),
            Err(ClassifyError::MissingLabels { outputs: 10 })
        ));
    }
}
