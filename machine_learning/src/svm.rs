use ml_core::{Classifier, Dataset, MlError, Result};
use ndarray::{Array1, Array2, ArrayView1};
use rand::{SeedableRng, rngs::StdRng, seq::SliceRandom};
use rayon::prelude::*;

/// One-vs-rest linear support vector machine.
///
/// Each class gets its own binary hinge-loss problem, solved with Pegasos
/// (stochastic sub-gradient descent with step `1 / (lambda * t)`). The bias is
/// learned as the weight of a constant input. Binary problems are independent
/// and trained in parallel; each one shuffles with its own seeded `StdRng`, so
/// results don't depend on scheduling.
#[derive(Debug, Clone)]
pub struct LinearSvm {
    lambda: f32,
    epochs: usize,
    seed: u64,
    weights: Array2<f32>,
    bias: Array1<f32>,
}

impl Default for LinearSvm {
    fn default() -> Self {
        Self::new(1e-3, 10, 42)
    }
}

impl LinearSvm {
    /// Creates an unfitted model.
    ///
    /// # Arguments
    /// * `lambda` - L2 regularisation strength, must be positive.
    /// * `epochs` - Passes over the data per binary problem.
    /// * `seed` - Base seed for the per-class shuffles.
    pub fn new(lambda: f32, epochs: usize, seed: u64) -> Self {
        Self {
            lambda,
            epochs,
            seed,
            weights: Array2::zeros((0, 0)),
            bias: Array1::zeros(0),
        }
    }

    #[inline]
    pub fn is_fitted(&self) -> bool {
        !self.bias.is_empty()
    }

    /// Decision score of every class for `x`.
    pub fn decision_function(&self, x: ArrayView1<'_, f32>) -> Result<Array1<f32>> {
        if !self.is_fitted() {
            return Err(MlError::NotFitted("linear svm"));
        }

        if x.len() != self.weights.ncols() {
            return Err(MlError::ShapeMismatch {
                what: "features",
                got: x.len(),
                expected: self.weights.ncols(),
            });
        }

        Ok(self.weights.dot(&x) + &self.bias)
    }

    /// Trains the binary problem `class` vs. the rest.
    fn fit_binary(&self, data: &Dataset, class: usize) -> (Array1<f32>, f32) {
        let mut rng = StdRng::seed_from_u64(self.seed.wrapping_add(class as u64));
        let mut order: Vec<usize> = (0..data.len()).collect();

        let mut w = Array1::<f32>::zeros(data.n_features());
        let mut b = 0.0f32;
        let mut t = 0usize;

        for _ in 0..self.epochs {
            order.shuffle(&mut rng);

            for &row in &order {
                t += 1;
                let eta = 1.0 / (self.lambda * t as f32);
                let x = data.row(row);
                let y = if data.y()[row] == class { 1.0 } else { -1.0 };
                let margin = y * (w.dot(&x) + b);

                let decay = 1.0 - eta * self.lambda;
                w *= decay;
                b *= decay;

                if margin < 1.0 {
                    w.scaled_add(eta * y, &x);
                    b += eta * y;
                }
            }
        }

        (w, b)
    }
}

impl Classifier for LinearSvm {
    fn fit(&mut self, data: &Dataset) -> Result<()> {
        if !(self.lambda > 0.0) {
            return Err(MlError::InvalidInput("lambda must be positive"));
        }

        if self.epochs == 0 {
            return Err(MlError::InvalidInput("epochs must be greater than 0"));
        }

        let n_classes = data.n_classes();
        let planes: Vec<(Array1<f32>, f32)> = (0..n_classes)
            .into_par_iter()
            .map(|class| self.fit_binary(data, class))
            .collect();

        let mut weights = Array2::zeros((n_classes, data.n_features()));
        let mut bias = Array1::zeros(n_classes);
        for (class, (w, b)) in planes.into_iter().enumerate() {
            weights.row_mut(class).assign(&w);
            bias[class] = b;
        }

        self.weights = weights;
        self.bias = bias;
        Ok(())
    }

    fn predict_one(&self, x: ArrayView1<'_, f32>) -> Result<usize> {
        let scores = self.decision_function(x)?;

        let mut best = 0;
        for (class, &score) in scores.iter().enumerate() {
            if score > scores[best] {
                best = class;
            }
        }

        Ok(best)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    /// One indicator feature per class, plus a noise column.
    fn one_hot() -> Dataset {
        Dataset::new(
            array![
                [1., 0., 0., 0.],
                [1., 0., 0., 1.],
                [0., 1., 0., 0.],
                [0., 1., 0., 1.],
                [0., 0., 1., 0.],
                [0., 0., 1., 1.],
            ],
            vec![0, 0, 1, 1, 2, 2],
        )
        .unwrap()
    }

    #[test]
    fn separates_one_hot_classes() {
        let data = one_hot();
        let mut svm = LinearSvm::new(1e-2, 50, 7);
        svm.fit(&data).unwrap();
        assert_eq!(svm.score(&data).unwrap(), 1.0);
    }

    #[test]
    fn same_seed_same_model() {
        let data = one_hot();
        let mut a = LinearSvm::new(1e-2, 5, 3);
        let mut b = LinearSvm::new(1e-2, 5, 3);
        a.fit(&data).unwrap();
        b.fit(&data).unwrap();

        let probe = array![0., 1., 0., 1.];
        assert_eq!(
            a.decision_function(probe.view()).unwrap(),
            b.decision_function(probe.view()).unwrap()
        );
    }

    #[test]
    fn rejects_bad_hyperparameters() {
        let data = one_hot();
        assert!(LinearSvm::new(0.0, 5, 0).fit(&data).is_err());
        assert!(LinearSvm::new(1e-2, 0, 0).fit(&data).is_err());
    }

    #[test]
    fn rejects_unfitted_and_misshaped_queries() {
        let svm = LinearSvm::default();
        assert!(matches!(
            svm.predict_one(array![1.].view()),
            Err(MlError::NotFitted(_))
        ));

        let mut svm = LinearSvm::default();
        svm.fit(&one_hot()).unwrap();
        assert!(matches!(
            svm.predict_one(array![1., 0.].view()),
            Err(MlError::ShapeMismatch { got: 2, expected: 4, .. })
        ));
    }
}
