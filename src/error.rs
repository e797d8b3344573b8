use std::{error::Error, fmt, io, path::PathBuf};

use ml_core::MlError;

/// The crate's result type.
pub type Result<T> = std::result::Result<T, TriageErr>;

/// Failures while configuring, loading, training or serving.
#[derive(Debug)]
pub enum TriageErr {
    /// A source file couldn't be opened or read.
    Io { path: PathBuf, source: io::Error },
    /// The CSV reader rejected a strictly loaded table.
    Csv { path: PathBuf, source: csv::Error },
    /// The training table has no `prognosis` column.
    MissingLabelColumn { path: PathBuf },
    /// A table has a header but no data rows.
    EmptyTable { path: PathBuf },
    /// A row has a different number of fields than the header.
    RowWidth {
        path: PathBuf,
        line: u64,
        got: usize,
        expected: usize,
    },
    /// A feature cell is not a number.
    InvalidCell {
        path: PathBuf,
        line: u64,
        column: String,
        value: String,
    },
    /// Two tables that must share their symptom columns don't.
    ColumnMismatch { path: PathBuf },
    /// A configuration value couldn't be parsed.
    InvalidConfig { key: &'static str, value: String },
    /// Training or inference failed.
    Ml(MlError),
}

impl fmt::Display for TriageErr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TriageErr::Io { path, source } => write!(f, "{}: {source}", path.display()),
            TriageErr::Csv { path, source } => write!(f, "{}: {source}", path.display()),
            TriageErr::MissingLabelColumn { path } => {
                write!(f, "{}: no 'prognosis' column", path.display())
            }
            TriageErr::EmptyTable { path } => write!(f, "{}: no data rows", path.display()),
            TriageErr::RowWidth {
                path,
                line,
                got,
                expected,
            } => write!(
                f,
                "{}:{line}: row has {got} fields, expected {expected}",
                path.display()
            ),
            TriageErr::InvalidCell {
                path,
                line,
                column,
                value,
            } => write!(
                f,
                "{}:{line}: column '{column}' holds '{value}', expected a number",
                path.display()
            ),
            TriageErr::ColumnMismatch { path } => write!(
                f,
                "{}: symptom columns differ from the training table",
                path.display()
            ),
            TriageErr::InvalidConfig { key, value } => write!(f, "invalid {key}: '{value}'"),
            TriageErr::Ml(e) => write!(f, "{e}"),
        }
    }
}

impl Error for TriageErr {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            TriageErr::Io { source, .. } => Some(source),
            TriageErr::Csv { source, .. } => Some(source),
            TriageErr::Ml(e) => Some(e),
            _ => None,
        }
    }
}

impl From<MlError> for TriageErr {
    fn from(value: MlError) -> Self {
        Self::Ml(value)
    }
}
