use ndarray::{ArrayView1, ArrayView2};

use crate::{accuracy, Dataset, Result};

/// A supervised multi-class classifier over dense `f32` features.
///
/// A `Classifier` owns its fitted decision boundary. It does not:
/// - split or shuffle data,
/// - encode labels,
/// - decide which of several fitted models gets used.
pub trait Classifier: Send + Sync {
    /// Fits the model on `data`, discarding anything learned before.
    ///
    /// # Errors
    /// Returns `MlError` if the dataset is unusable for this model.
    fn fit(&mut self, data: &Dataset) -> Result<()>;

    /// Predicts the class id of a single sample.
    ///
    /// # Errors
    /// - `MlError::NotFitted` if `fit` never succeeded.
    /// - `MlError::ShapeMismatch` if `x` has the wrong number of features.
    fn predict_one(&self, x: ArrayView1<'_, f32>) -> Result<usize>;

    /// Predicts one class id per row of `x`.
    fn predict(&self, x: ArrayView2<'_, f32>) -> Result<Vec<usize>> {
        x.rows().into_iter().map(|row| self.predict_one(row)).collect()
    }

    /// Returns the mean accuracy over `data`.
    fn score(&self, data: &Dataset) -> Result<f32> {
        let predicted = self.predict(data.x())?;
        accuracy(data.y(), &predicted)
    }
}
