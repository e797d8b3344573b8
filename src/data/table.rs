use std::{
    fs::File,
    io,
    path::{Path, PathBuf},
};

use log::warn;
use ml_core::MlError;
use ndarray::{Array2, ArrayView2};

use crate::{Result, TriageErr};

/// Header of the column holding each row's disease.
pub const LABEL_COLUMN: &str = "prognosis";

/// A labeled symptom-presence table, as used for training and testing.
///
/// Every column before `prognosis` is a symptom column holding `0`/`1`; columns
/// after it are ignored. Loading is strict: any malformed row fails the whole
/// table.
#[derive(Debug, Clone)]
pub struct SymptomTable {
    origin: PathBuf,
    symptoms: Vec<String>,
    features: Array2<f32>,
    labels: Vec<String>,
}

impl SymptomTable {
    /// Loads a headered CSV file.
    ///
    /// # Errors
    /// See `from_reader`; additionally `TriageErr::Io` if the file can't be opened.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| TriageErr::Io {
            path: path.to_path_buf(),
            source,
        })?;

        Self::from_reader(file, path)
    }

    /// Parses a headered CSV stream. `origin` only labels errors and logs.
    ///
    /// # Errors
    /// - `TriageErr::MissingLabelColumn` if no header is named `prognosis`.
    /// - `TriageErr::RowWidth` if a row's width differs from the header's.
    /// - `TriageErr::InvalidCell` if a symptom cell isn't a number.
    /// - `TriageErr::EmptyTable` if there are no data rows.
    /// - `TriageErr::Csv` if the stream isn't valid CSV.
    pub fn from_reader<R: io::Read>(reader: R, origin: &Path) -> Result<Self> {
        let csv_err = |source: csv::Error| TriageErr::Csv {
            path: origin.to_path_buf(),
            source,
        };

        let mut rdr = csv::ReaderBuilder::new().flexible(true).from_reader(reader);
        let headers = rdr.headers().map_err(csv_err)?.clone();

        let label_col = headers
            .iter()
            .position(|h| h == LABEL_COLUMN)
            .ok_or_else(|| TriageErr::MissingLabelColumn {
                path: origin.to_path_buf(),
            })?;

        let trailing = headers.len() - label_col - 1;
        if trailing > 0 {
            warn!(
                "{}: ignoring {trailing} column(s) after '{LABEL_COLUMN}'",
                origin.display()
            );
        }

        let symptoms: Vec<String> = headers.iter().take(label_col).map(str::to_owned).collect();
        let mut values = Vec::new();
        let mut labels = Vec::new();

        for record in rdr.records() {
            let record = record.map_err(csv_err)?;
            let line = record.position().map_or(0, |p| p.line());

            if record.len() != headers.len() {
                return Err(TriageErr::RowWidth {
                    path: origin.to_path_buf(),
                    line,
                    got: record.len(),
                    expected: headers.len(),
                });
            }

            for (column, cell) in symptoms.iter().zip(record.iter()) {
                let value = cell.trim().parse::<f32>().map_err(|_| TriageErr::InvalidCell {
                    path: origin.to_path_buf(),
                    line,
                    column: column.clone(),
                    value: cell.to_owned(),
                })?;
                values.push(value);
            }

            labels.push(record[label_col].to_owned());
        }

        if labels.is_empty() {
            return Err(TriageErr::EmptyTable {
                path: origin.to_path_buf(),
            });
        }

        let shape = (labels.len(), symptoms.len());
        let got = values.len();
        let features = Array2::from_shape_vec(shape, values).map_err(|_| MlError::ShapeMismatch {
            what: "feature cells",
            got,
            expected: shape.0 * shape.1,
        })?;

        Ok(Self {
            origin: origin.to_path_buf(),
            symptoms,
            features,
            labels,
        })
    }

    /// Where the table was read from.
    #[inline]
    pub fn origin(&self) -> &Path {
        &self.origin
    }

    /// Symptom column names, in column order.
    #[inline]
    pub fn symptoms(&self) -> &[String] {
        &self.symptoms
    }

    #[inline]
    pub fn features(&self) -> ArrayView2<'_, f32> {
        self.features.view()
    }

    #[inline]
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}
