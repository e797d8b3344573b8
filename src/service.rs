use log::info;
use serde::{Deserialize, Serialize};

use crate::{
    config::Config,
    data::{ReferenceTables, SymptomTable},
    model::{DiseaseModel, Trainer},
    severity::{self, Severity},
    Result,
};

/// Body of a prediction request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionRequest {
    pub symptoms: Vec<String>,
    pub days: i64,
}

/// Answer to a prediction request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    pub predicted_disease: String,
    pub description: String,
    pub precautions: Vec<String>,
    pub severity: Severity,
}

/// Answers prediction requests from a trained model and the reference tables.
///
/// Read-only once built; shared across requests behind an `Arc`.
pub struct PredictionService {
    model: DiseaseModel,
    tables: ReferenceTables,
}

impl PredictionService {
    pub fn new(model: DiseaseModel, tables: ReferenceTables) -> Self {
        Self { model, tables }
    }

    /// Loads every source named in `config`, trains the model and logs the
    /// training report.
    ///
    /// # Errors
    /// Any loading or training failure; none of them is recoverable.
    pub fn from_config(config: &Config) -> Result<Self> {
        let training = SymptomTable::load(&config.training_path)?;
        let testing = SymptomTable::load(&config.testing_path)?;
        info!(
            "loaded {} training rows and {} testing rows",
            training.len(),
            testing.len()
        );

        let (model, report) = Trainer::train(&training, Some(&testing))?;
        info!("model trained: {report}");

        let tables = ReferenceTables::load(
            &config.severity_path,
            &config.description_path,
            &config.precaution_path,
        )?;

        Ok(Self::new(model, tables))
    }

    #[inline]
    pub fn model(&self) -> &DiseaseModel {
        &self.model
    }

    /// Predicts the disease and gathers what is known about it.
    ///
    /// Severity is scored over the symptoms exactly as requested, recognized by
    /// the model or not.
    ///
    /// # Errors
    /// Returns an error if the model fails to predict; nothing partial is
    /// returned.
    pub fn handle(&self, request: &PredictionRequest) -> Result<Prediction> {
        let disease = self.model.predict(&request.symptoms)?;
        let description = self.tables.descriptions.describe(&disease).to_owned();
        let precautions = self.tables.precautions.precautions(&disease);
        let severity = severity::score(&request.symptoms, request.days, &self.tables.severity);

        Ok(Prediction {
            predicted_disease: disease,
            description,
            precautions,
            severity,
        })
    }
}
