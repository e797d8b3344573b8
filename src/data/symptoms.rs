use std::collections::HashMap;

use ndarray::{Array1, ArrayView1};

/// Maps symptom names to their column position in the training table.
///
/// The feature vector length is the number of columns the index was built
/// from. A repeated column name keeps the position of its last occurrence.
#[derive(Debug, Clone)]
pub struct SymptomIndex {
    positions: HashMap<String, usize>,
    width: usize,
}

/// A 0/1 symptom-presence vector aligned with a `SymptomIndex`.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureVector {
    values: Array1<f32>,
    recognized: usize,
}

impl FeatureVector {
    #[inline]
    pub fn view(&self) -> ArrayView1<'_, f32> {
        self.values.view()
    }

    /// How many requested names were found in the index.
    #[inline]
    pub fn recognized(&self) -> usize {
        self.recognized
    }
}

impl SymptomIndex {
    /// Builds the index from the ordered symptom column names.
    pub fn new<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut positions = HashMap::new();
        let mut width = 0;
        for (position, name) in columns.into_iter().enumerate() {
            positions.insert(name.into(), position);
            width = position + 1;
        }

        Self { positions, width }
    }

    /// Length of the feature vectors produced by `encode`.
    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn position(&self, symptom: &str) -> Option<usize> {
        self.positions.get(symptom).copied()
    }

    /// Sets the position of every known symptom to 1, ignoring unknown names.
    pub fn encode<S: AsRef<str>>(&self, symptoms: &[S]) -> FeatureVector {
        let mut values = Array1::zeros(self.width);
        let mut recognized = 0;

        for symptom in symptoms {
            if let Some(position) = self.position(symptom.as_ref()) {
                values[position] = 1.0;
                recognized += 1;
            }
        }

        FeatureVector { values, recognized }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positions_follow_column_order() {
        let index = SymptomIndex::new(["itching", "skin_rash", "cough"]);
        assert_eq!(index.width(), 3);
        assert_eq!(index.position("itching"), Some(0));
        assert_eq!(index.position("cough"), Some(2));
        assert_eq!(index.position("fever"), None);
    }

    #[test]
    fn duplicate_columns_keep_last_position() {
        let index = SymptomIndex::new(["a", "b", "a"]);
        assert_eq!(index.position("a"), Some(2));
        assert_eq!(index.width(), 3);
    }

    #[test]
    fn encode_marks_known_symptoms_only() {
        let index = SymptomIndex::new(["itching", "skin_rash", "cough"]);
        let vector = index.encode(&["cough", "not_a_symptom", "itching"]);
        assert_eq!(vector.view().to_vec(), vec![1., 0., 1.]);
        assert_eq!(vector.recognized(), 2);
    }

    #[test]
    fn encode_nothing_yields_zero_vector() {
        let index = SymptomIndex::new(["itching", "skin_rash"]);
        let none: [&str; 0] = [];
        let vector = index.encode(&none);
        assert_eq!(vector.view().to_vec(), vec![0., 0.]);
        assert_eq!(vector.recognized(), 0);
    }
}
