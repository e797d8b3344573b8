use std::fmt;

/// The result type used across the learning primitives.
pub type Result<T> = std::result::Result<T, MlError>;

/// Errors produced by classifiers, encoders and dataset utilities.
#[derive(Debug)]
pub enum MlError {
    /// An input is invalid for semantic or domain reasons.
    InvalidInput(&'static str),

    /// A shape invariant was violated (e.g. mismatched lengths).
    ShapeMismatch {
        /// Human-readable context for the mismatch (e.g. "targets", "features").
        what: &'static str,
        /// Observed value.
        got: usize,
        /// Expected value.
        expected: usize,
    },

    /// There are no samples to learn from or to evaluate.
    EmptyDataset,

    /// A model was queried before being fitted.
    NotFitted(&'static str),

    /// A label was never seen while fitting the encoder.
    UnknownLabel(String),

    /// A class id falls outside the encoder's classes.
    UnknownClass { class: usize, classes: usize },
}

impl fmt::Display for MlError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MlError::InvalidInput(msg) => write!(f, "invalid input: {msg}"),
            MlError::ShapeMismatch { what, got, expected } => {
                write!(f, "shape mismatch for {what}: got {got}, expected {expected}")
            }
            MlError::EmptyDataset => write!(f, "dataset has no samples"),
            MlError::NotFitted(model) => write!(f, "{model} must be fitted before use"),
            MlError::UnknownLabel(label) => write!(f, "unknown label '{label}'"),
            MlError::UnknownClass { class, classes } => {
                write!(f, "class id {class} out of range for {classes} classes")
            }
        }
    }
}

impl std::error::Error for MlError {}
