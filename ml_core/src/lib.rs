mod data;
mod encoder;
mod error;
mod metrics;
mod model;
mod selection;

pub use data::Dataset;
pub use encoder::LabelEncoder;
pub use error::{MlError, Result};
pub use metrics::{accuracy, CvScores};
pub use model::Classifier;
pub use selection::{cross_val_score, train_test_split, StratifiedKFold};
