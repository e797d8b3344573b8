use std::collections::{BTreeSet, HashMap};

use crate::{MlError, Result};

/// Bidirectional mapping between string labels and dense class ids.
///
/// Classes are the sorted distinct labels seen by `fit`, so id `i` is the
/// `i`-th label in lexicographic order. The class set never changes afterwards.
#[derive(Debug, Clone, Default)]
pub struct LabelEncoder {
    classes: Vec<String>,
    ids: HashMap<String, usize>,
}

impl LabelEncoder {
    /// Fits an encoder over every label in `labels`.
    ///
    /// # Errors
    /// Returns `MlError::EmptyDataset` if there are no labels.
    pub fn fit<I, S>(labels: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let distinct: BTreeSet<String> = labels
            .into_iter()
            .map(|label| label.as_ref().to_owned())
            .collect();

        if distinct.is_empty() {
            return Err(MlError::EmptyDataset);
        }

        let classes: Vec<String> = distinct.into_iter().collect();
        let ids = classes
            .iter()
            .enumerate()
            .map(|(id, label)| (label.clone(), id))
            .collect();

        Ok(Self { classes, ids })
    }

    #[inline]
    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    #[inline]
    pub fn n_classes(&self) -> usize {
        self.classes.len()
    }

    /// Maps a label to its class id.
    pub fn encode(&self, label: &str) -> Result<usize> {
        self.ids
            .get(label)
            .copied()
            .ok_or_else(|| MlError::UnknownLabel(label.to_owned()))
    }

    /// Maps every label to its class id, failing on the first unknown one.
    pub fn transform<I, S>(&self, labels: I) -> Result<Vec<usize>>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        labels
            .into_iter()
            .map(|label| self.encode(label.as_ref()))
            .collect()
    }

    /// Maps a class id back to its label.
    pub fn decode(&self, class: usize) -> Result<&str> {
        self.classes
            .get(class)
            .map(String::as_str)
            .ok_or(MlError::UnknownClass {
                class,
                classes: self.classes.len(),
            })
    }

    /// Maps every class id back to its label.
    pub fn inverse_transform(&self, classes: &[usize]) -> Result<Vec<String>> {
        classes
            .iter()
            .map(|&class| self.decode(class).map(str::to_owned))
            .collect()
    }
}
