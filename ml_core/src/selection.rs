use std::collections::BTreeMap;

use rand::{rngs::StdRng, seq::SliceRandom, SeedableRng};

use crate::{Classifier, CvScores, Dataset, MlError, Result};

/// Splits `data` into `(train, test)` partitions.
///
/// The rows are shuffled with a `StdRng` seeded from `seed`; the first
/// `ceil(test_ratio * n)` rows of the permutation become the test partition and
/// the remaining ones the train partition. The same seed always yields the same
/// split.
///
/// # Errors
/// Returns `MlError::InvalidInput` if `test_ratio` is not in `(0, 1)` or if
/// either partition would end up empty.
pub fn train_test_split(data: &Dataset, test_ratio: f64, seed: u64) -> Result<(Dataset, Dataset)> {
    if !(test_ratio > 0.0 && test_ratio < 1.0) {
        return Err(MlError::InvalidInput("test ratio must be in (0, 1)"));
    }

    let n = data.len();
    let n_test = (test_ratio * n as f64).ceil() as usize;
    if n_test == 0 || n_test >= n {
        return Err(MlError::InvalidInput(
            "dataset too small to hold both a train and a test partition",
        ));
    }

    let mut rng = StdRng::seed_from_u64(seed);
    let mut permutation: Vec<usize> = (0..n).collect();
    permutation.shuffle(&mut rng);

    let (test, train) = permutation.split_at(n_test);
    Ok((data.select(train)?, data.select(test)?))
}

/// K-fold partitioning that preserves class proportions.
///
/// Rows are grouped by class and dealt round-robin across the folds, classes in
/// ascending id order and rows in dataset order. No shuffling takes place.
#[derive(Debug, Clone, Copy)]
pub struct StratifiedKFold {
    folds: usize,
}

impl StratifiedKFold {
    /// # Errors
    /// Returns `MlError::InvalidInput` if `folds < 2`.
    pub fn new(folds: usize) -> Result<Self> {
        if folds < 2 {
            return Err(MlError::InvalidInput("at least 2 folds are required"));
        }
        Ok(Self { folds })
    }

    #[inline]
    pub fn folds(&self) -> usize {
        self.folds
    }

    /// Returns the held-out row indices of each fold, sorted ascending.
    ///
    /// # Errors
    /// Returns `MlError::InvalidInput` if there are fewer samples than folds.
    pub fn split(&self, y: &[usize]) -> Result<Vec<Vec<usize>>> {
        if y.len() < self.folds {
            return Err(MlError::InvalidInput("fewer samples than folds"));
        }

        let mut by_class: BTreeMap<usize, Vec<usize>> = BTreeMap::new();
        for (row, &class) in y.iter().enumerate() {
            by_class.entry(class).or_default().push(row);
        }

        let mut folds = vec![Vec::new(); self.folds];
        let rows = by_class.into_values().flatten();
        for (k, row) in rows.enumerate() {
            folds[k % self.folds].push(row);
        }

        for fold in &mut folds {
            fold.sort_unstable();
        }

        Ok(folds)
    }
}

/// Evaluates a classifier by stratified k-fold cross validation.
///
/// For every fold a fresh classifier is created through `factory`, fitted on
/// the remaining folds and scored on the held-out one.
///
/// # Args
/// * `factory` - Creates an unfitted classifier.
/// * `data` - The samples to cross validate over.
/// * `kfold` - The fold layout.
///
/// # Returns
/// The accuracy on every fold, in fold order.
pub fn cross_val_score<C, F>(factory: F, data: &Dataset, kfold: StratifiedKFold) -> Result<CvScores>
where
    C: Classifier,
    F: Fn() -> C,
{
    let folds = kfold.split(data.y())?;
    let mut scores = Vec::with_capacity(folds.len());

    for held_out in &folds {
        let mut is_held_out = vec![false; data.len()];
        for &row in held_out {
            is_held_out[row] = true;
        }

        let train_rows: Vec<usize> = (0..data.len()).filter(|&row| !is_held_out[row]).collect();
        let train = data.select(&train_rows)?;
        let test = data.select(held_out)?;

        let mut clf = factory();
        clf.fit(&train)?;
        scores.push(clf.score(&test)?);
    }

    Ok(CvScores::new(scores))
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{Array2, ArrayView1};

    fn ramp(n: usize) -> Dataset {
        let x = Array2::from_shape_fn((n, 1), |(r, _)| r as f32);
        let y = (0..n).map(|r| r % 3).collect();
        Dataset::new(x, y).unwrap()
    }

    /// Predicts the class of the first training sample, whatever the input.
    struct FirstLabel(Option<usize>);

    impl Classifier for FirstLabel {
        fn fit(&mut self, data: &Dataset) -> Result<()> {
            self.0 = data.y().first().copied();
            Ok(())
        }

        fn predict_one(&self, _x: ArrayView1<'_, f32>) -> Result<usize> {
            self.0.ok_or(MlError::NotFitted("FirstLabel"))
        }
    }

    #[test]
    fn split_sizes_follow_ratio() {
        let data = ramp(100);
        let (train, test) = train_test_split(&data, 0.33, 42).unwrap();
        assert_eq!(test.len(), 33);
        assert_eq!(train.len(), 67);
    }

    #[test]
    fn split_is_reproducible_and_disjoint() {
        let data = ramp(30);
        let (train_a, test_a) = train_test_split(&data, 0.33, 42).unwrap();
        let (train_b, test_b) = train_test_split(&data, 0.33, 42).unwrap();
        assert_eq!(train_a, train_b);
        assert_eq!(test_a, test_b);

        let mut seen: Vec<f32> = train_a.x().iter().chain(test_a.x().iter()).copied().collect();
        seen.sort_by(f32::total_cmp);
        assert_eq!(seen, (0..30).map(|r| r as f32).collect::<Vec<_>>());
    }

    #[test]
    fn split_rejects_degenerate_inputs() {
        let data = ramp(1);
        assert!(train_test_split(&data, 0.33, 42).is_err());
        assert!(train_test_split(&ramp(10), 0.0, 42).is_err());
        assert!(train_test_split(&ramp(10), 1.0, 42).is_err());
    }

    #[test]
    fn stratified_folds_balance_classes() {
        let y = [0, 0, 0, 1, 1, 1, 2, 2, 2];
        let folds = StratifiedKFold::new(3).unwrap().split(&y).unwrap();
        assert_eq!(folds, vec![vec![0, 3, 6], vec![1, 4, 7], vec![2, 5, 8]]);
    }

    #[test]
    fn stratified_folds_cover_every_row_once() {
        let y = [1, 0, 1, 1, 0, 2, 2];
        let folds = StratifiedKFold::new(3).unwrap().split(&y).unwrap();
        let mut rows: Vec<usize> = folds.concat();
        rows.sort_unstable();
        assert_eq!(rows, (0..y.len()).collect::<Vec<_>>());
        assert!(folds.iter().all(|f| !f.is_empty()));
    }

    #[test]
    fn kfold_rejects_bad_fold_counts() {
        assert!(StratifiedKFold::new(1).is_err());
        assert!(StratifiedKFold::new(3).unwrap().split(&[0, 1]).is_err());
    }

    #[test]
    fn split_yields_one_entry_per_fold() {
        let kfold = StratifiedKFold::new(4).unwrap();
        let folds = kfold.split(&[0, 0, 1, 1, 2, 2, 3, 3]).unwrap();
        assert_eq!(kfold.folds(), 4);
        assert_eq!(folds.len(), kfold.folds());
    }

    #[test]
    fn cross_val_scores_every_fold() {
        let data = ramp(9);
        let kfold = StratifiedKFold::new(3).unwrap();
        let scores = cross_val_score(|| FirstLabel(None), &data, kfold).unwrap();
        assert_eq!(scores.scores().len(), 3);
        assert!(scores.mean() >= 0.0 && scores.mean() <= 1.0);
    }
}
