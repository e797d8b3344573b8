pub mod config;
pub mod data;
pub mod error;
pub mod http;
pub mod model;
pub mod service;
pub mod severity;

pub use config::Config;
pub use error::{Result, TriageErr};
pub use model::{DiseaseModel, Trainer, TrainingReport};
pub use service::{Prediction, PredictionRequest, PredictionService};
pub use severity::Severity;
