mod split;

use ml_core::{Classifier, Dataset, MlError, Result};
use ndarray::ArrayView1;

use split::{best_split, class_counts};

#[derive(Debug, Clone, PartialEq)]
enum Node {
    Leaf {
        class: usize,
    },
    Split {
        feature: usize,
        threshold: f32,
        left: usize,
        right: usize,
    },
}

/// CART decision tree classifier using Gini impurity.
///
/// Nodes are kept in a flat arena, the root being at index 0. Growing stops on
/// pure nodes, when no split decreases the impurity, when a node has fewer
/// than `min_samples_split` samples, or at `max_depth` if one is set. Leaves
/// predict their majority class, ties going to the lowest class id.
///
/// The search is exhaustive and deterministic: fitting the same data twice
/// yields the same tree.
#[derive(Debug, Clone)]
pub struct DecisionTree {
    max_depth: Option<usize>,
    min_samples_split: usize,
    n_features: usize,
    nodes: Vec<Node>,
}

impl Default for DecisionTree {
    fn default() -> Self {
        Self::new()
    }
}

impl DecisionTree {
    /// Creates an unfitted tree with no depth limit.
    pub fn new() -> Self {
        Self {
            max_depth: None,
            min_samples_split: 2,
            n_features: 0,
            nodes: Vec::new(),
        }
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = Some(max_depth);
        self
    }

    /// Nodes with fewer samples than `min_samples_split` become leaves.
    /// Values below 2 are raised to 2.
    pub fn with_min_samples_split(mut self, min_samples_split: usize) -> Self {
        self.min_samples_split = min_samples_split.max(2);
        self
    }

    #[inline]
    pub fn is_fitted(&self) -> bool {
        !self.nodes.is_empty()
    }

    pub fn n_leaves(&self) -> usize {
        self.nodes
            .iter()
            .filter(|node| matches!(node, Node::Leaf { .. }))
            .count()
    }

    /// Length of the longest root-to-leaf path, 0 for a single leaf.
    pub fn depth(&self) -> usize {
        self.depth_from(0)
    }

    fn depth_from(&self, id: usize) -> usize {
        match self.nodes.get(id) {
            Some(Node::Split { left, right, .. }) => {
                1 + self.depth_from(*left).max(self.depth_from(*right))
            }
            _ => 0,
        }
    }

    fn grow(&mut self, data: &Dataset, rows: Vec<usize>, depth: usize, n_classes: usize) -> usize {
        let id = self.nodes.len();
        let counts = class_counts(data, &rows, n_classes);
        let class = majority(&counts);
        self.nodes.push(Node::Leaf { class });

        let is_pure = counts.iter().filter(|&&c| c > 0).count() <= 1;
        let too_deep = self.max_depth.is_some_and(|max| depth >= max);
        if is_pure || too_deep || rows.len() < self.min_samples_split {
            return id;
        }

        let Some(split) = best_split(data, &rows, n_classes) else {
            return id;
        };

        let (left_rows, right_rows): (Vec<usize>, Vec<usize>) = rows
            .into_iter()
            .partition(|&row| data.x()[[row, split.feature]] <= split.threshold);

        let left = self.grow(data, left_rows, depth + 1, n_classes);
        let right = self.grow(data, right_rows, depth + 1, n_classes);
        self.nodes[id] = Node::Split {
            feature: split.feature,
            threshold: split.threshold,
            left,
            right,
        };

        id
    }
}

/// Index of the largest count, the first one on ties.
fn majority(counts: &[usize]) -> usize {
    counts
        .iter()
        .enumerate()
        .fold((0, 0), |best, (class, &count)| {
            if count > best.1 { (class, count) } else { best }
        })
        .0
}

impl Classifier for DecisionTree {
    fn fit(&mut self, data: &Dataset) -> Result<()> {
        self.nodes.clear();
        self.n_features = data.n_features();

        let rows = (0..data.len()).collect();
        self.grow(data, rows, 0, data.n_classes());
        Ok(())
    }

    fn predict_one(&self, x: ArrayView1<'_, f32>) -> Result<usize> {
        if !self.is_fitted() {
            return Err(MlError::NotFitted("decision tree"));
        }

        if x.len() != self.n_features {
            return Err(MlError::ShapeMismatch {
                what: "features",
                got: x.len(),
                expected: self.n_features,
            });
        }

        let mut id = 0;
        loop {
            match &self.nodes[id] {
                Node::Leaf { class } => return Ok(*class),
                Node::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => id = if x[*feature] <= *threshold { *left } else { *right },
            }
        }
    }
}
