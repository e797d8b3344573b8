use ndarray::{Array2, ArrayView1, ArrayView2, Axis};

use crate::{MlError, Result};

/// An in-memory labeled dataset.
///
/// Rows of `x` are samples, columns are features. `y` holds one encoded class id
/// per row. A `Dataset` is never empty.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    x: Array2<f32>,
    y: Vec<usize>,
}

impl Dataset {
    /// Creates a new dataset from owned buffers.
    ///
    /// # Errors
    /// - `MlError::ShapeMismatch` if `y` doesn't have one entry per row of `x`.
    /// - `MlError::EmptyDataset` if there are no rows.
    pub fn new(x: Array2<f32>, y: Vec<usize>) -> Result<Self> {
        if x.nrows() != y.len() {
            return Err(MlError::ShapeMismatch {
                what: "targets",
                got: y.len(),
                expected: x.nrows(),
            });
        }

        if y.is_empty() {
            return Err(MlError::EmptyDataset);
        }

        Ok(Self { x, y })
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.y.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.y.is_empty()
    }

    #[inline]
    pub fn n_features(&self) -> usize {
        self.x.ncols()
    }

    /// Returns the number of classes, assuming ids are dense in `0..n`.
    pub fn n_classes(&self) -> usize {
        self.y.iter().max().map_or(0, |max| max + 1)
    }

    #[inline]
    pub fn x(&self) -> ArrayView2<'_, f32> {
        self.x.view()
    }

    #[inline]
    pub fn y(&self) -> &[usize] {
        &self.y
    }

    /// Returns the features of the sample at `idx` (panics if out of bounds).
    #[inline]
    pub fn row(&self, idx: usize) -> ArrayView1<'_, f32> {
        self.x.row(idx)
    }

    /// Builds a new dataset holding the given rows, in the given order.
    ///
    /// # Errors
    /// - `MlError::EmptyDataset` if `rows` is empty.
    /// - `MlError::InvalidInput` if any index is out of bounds.
    pub fn select(&self, rows: &[usize]) -> Result<Self> {
        if rows.iter().any(|&r| r >= self.len()) {
            return Err(MlError::InvalidInput("row index out of bounds"));
        }

        let x = self.x.select(Axis(0), rows);
        let y = rows.iter().map(|&r| self.y[r]).collect();
        Self::new(x, y)
    }
}
