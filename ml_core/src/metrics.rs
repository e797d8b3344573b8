use crate::{MlError, Result};

/// Fraction of predictions equal to the ground truth.
///
/// # Errors
/// - `MlError::ShapeMismatch` if both slices differ in length.
/// - `MlError::EmptyDataset` if there is nothing to compare.
pub fn accuracy(truth: &[usize], predicted: &[usize]) -> Result<f32> {
    if truth.len() != predicted.len() {
        return Err(MlError::ShapeMismatch {
            what: "predictions",
            got: predicted.len(),
            expected: truth.len(),
        });
    }

    if truth.is_empty() {
        return Err(MlError::EmptyDataset);
    }

    let hits = truth.iter().zip(predicted).filter(|(t, p)| t == p).count();
    Ok(hits as f32 / truth.len() as f32)
}

/// Per-fold scores produced by cross validation.
///
/// Fields are private so the collection is never empty.
#[derive(Debug, Clone, PartialEq)]
pub struct CvScores {
    scores: Vec<f32>,
}

impl CvScores {
    pub(crate) fn new(scores: Vec<f32>) -> Self {
        Self { scores }
    }

    pub fn scores(&self) -> &[f32] {
        &self.scores
    }

    pub fn mean(&self) -> f32 {
        self.scores.iter().sum::<f32>() / self.scores.len() as f32
    }
}
