mod trainer;

use std::fmt;

use log::debug;
use ml_core::{Classifier, LabelEncoder};

use crate::{data::SymptomIndex, Result};

pub use trainer::{Trainer, TrainingReport, CV_FOLDS, SEED, TEST_RATIO};

/// A fitted symptom-set → disease classifier.
///
/// Bundles the symptom index the classifier was trained against, the label
/// encoder mapping class ids back to disease names, and the classifier itself.
/// Immutable once built.
pub struct DiseaseModel {
    index: SymptomIndex,
    encoder: LabelEncoder,
    classifier: Box<dyn Classifier>,
}

impl DiseaseModel {
    pub fn new(index: SymptomIndex, encoder: LabelEncoder, classifier: Box<dyn Classifier>) -> Self {
        Self {
            index,
            encoder,
            classifier,
        }
    }

    /// Predicts the disease for a set of reported symptoms.
    ///
    /// Names missing from the symptom index are ignored; reporting none of the
    /// known symptoms still yields a prediction.
    ///
    /// # Errors
    /// Returns `TriageErr::Ml` if the classifier fails or yields a class the
    /// encoder doesn't know.
    pub fn predict<S: AsRef<str>>(&self, symptoms: &[S]) -> Result<String> {
        let features = self.index.encode(symptoms);
        debug!(
            "recognized {} of {} reported symptom(s)",
            features.recognized(),
            symptoms.len()
        );

        let class = self.classifier.predict_one(features.view())?;
        Ok(self.encoder.decode(class)?.to_owned())
    }

    #[inline]
    pub fn symptoms(&self) -> &SymptomIndex {
        &self.index
    }

    /// Disease names the model can predict, sorted.
    #[inline]
    pub fn diseases(&self) -> &[String] {
        self.encoder.classes()
    }
}

impl fmt::Debug for DiseaseModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DiseaseModel")
            .field("symptoms", &self.index.width())
            .field("diseases", &self.encoder.classes())
            .finish_non_exhaustive()
    }
}
