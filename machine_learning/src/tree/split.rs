use ml_core::Dataset;

/// Minimum impurity decrease for a split to be worth taking.
const MIN_GAIN: f64 = 1e-9;

/// A candidate partition of a node's rows: `x[feature] <= threshold` goes left.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(super) struct Split {
    pub feature: usize,
    pub threshold: f32,
    pub gain: f64,
}

/// Gini impurity of a node holding `total` samples distributed as `counts`.
pub(super) fn gini(counts: &[usize], total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }

    let total = total as f64;
    let sum_sq: f64 = counts
        .iter()
        .map(|&c| {
            let p = c as f64 / total;
            p * p
        })
        .sum();

    1.0 - sum_sq
}

/// Per-class sample counts of `rows`.
pub(super) fn class_counts(data: &Dataset, rows: &[usize], n_classes: usize) -> Vec<usize> {
    let mut counts = vec![0; n_classes];
    for &row in rows {
        counts[data.y()[row]] += 1;
    }
    counts
}

/// Finds the split of `rows` with the largest impurity decrease.
///
/// Candidate thresholds are the midpoints between consecutive distinct values
/// of each feature. Ties keep the first candidate found, i.e. the lowest
/// feature index and then the lowest threshold.
///
/// # Returns
/// `None` when no split decreases the impurity.
pub(super) fn best_split(data: &Dataset, rows: &[usize], n_classes: usize) -> Option<Split> {
    let n = rows.len();
    let parent_counts = class_counts(data, rows, n_classes);
    let parent_impurity = gini(&parent_counts, n);

    let mut best: Option<Split> = None;
    let mut column: Vec<(f32, usize)> = Vec::with_capacity(n);

    for feature in 0..data.n_features() {
        column.clear();
        column.extend(rows.iter().map(|&row| (data.x()[[row, feature]], data.y()[row])));
        column.sort_by(|a, b| a.0.total_cmp(&b.0));

        let mut left = vec![0; n_classes];
        let mut right = parent_counts.clone();

        for i in 0..n - 1 {
            let (value, class) = column[i];
            left[class] += 1;
            right[class] -= 1;

            let next = column[i + 1].0;
            if value == next {
                continue;
            }

            let n_left = i + 1;
            let n_right = n - n_left;
            let weighted =
                (n_left as f64 * gini(&left, n_left) + n_right as f64 * gini(&right, n_right))
                    / n as f64;
            let gain = parent_impurity - weighted;

            let improves = match best {
                Some(b) => gain > b.gain + MIN_GAIN,
                None => gain > MIN_GAIN,
            };

            if improves {
                best = Some(Split {
                    feature,
                    threshold: value + (next - value) / 2.0,
                    gain,
                });
            }
        }
    }

    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn gini_of_pure_and_even_nodes() {
        assert_eq!(gini(&[4, 0], 4), 0.0);
        assert!((gini(&[2, 2], 4) - 0.5).abs() < 1e-12);
        assert_eq!(gini(&[], 0), 0.0);
    }

    #[test]
    fn best_split_picks_the_separating_feature() {
        // Feature 0 is noise, feature 1 separates the classes.
        let data = Dataset::new(
            array![[0., 0.], [1., 0.], [0., 1.], [1., 1.]],
            vec![0, 0, 1, 1],
        )
        .unwrap();
        let split = best_split(&data, &[0, 1, 2, 3], 2).unwrap();
        assert_eq!(split.feature, 1);
        assert_eq!(split.threshold, 0.5);
        assert!((split.gain - 0.5).abs() < 1e-12);
    }

    #[test]
    fn ties_resolve_to_the_lowest_feature() {
        let data = Dataset::new(array![[0., 0.], [1., 1.]], vec![0, 1]).unwrap();
        let split = best_split(&data, &[0, 1], 2).unwrap();
        assert_eq!(split.feature, 0);
    }

    #[test]
    fn no_split_for_pure_or_constant_rows() {
        let pure = Dataset::new(array![[0.], [1.]], vec![1, 1]).unwrap();
        assert!(best_split(&pure, &[0, 1], 2).is_none());

        let constant = Dataset::new(array![[1.], [1.]], vec![0, 1]).unwrap();
        assert!(best_split(&constant, &[0, 1], 2).is_none());
    }
}
