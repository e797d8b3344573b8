use std::{collections::HashMap, fs::File, io, path::Path};

use log::{info, warn};

use crate::{Result, TriageErr};

/// Description returned for diseases missing from the description table.
pub const NO_DESCRIPTION: &str = "No description available";

/// Single precaution returned for diseases missing from the precaution table.
pub const NO_PRECAUTIONS: &str = "No precautions available";

/// Number of precautions kept per disease.
pub const PRECAUTIONS_PER_DISEASE: usize = 4;

/// Outcome of a best-effort table load.
#[derive(Debug, Clone)]
pub struct TableLoad<T> {
    pub table: T,
    /// Rows dropped because they couldn't be read or parsed.
    pub skipped: usize,
}

/// Reads every row of a header-less CSV stream through `parse`.
///
/// Rows the reader rejects, or that `parse` maps to `None`, are counted and
/// skipped. Later rows overwrite earlier ones with the same key.
fn read_rows<R, V, F>(reader: R, parse: F) -> (HashMap<String, V>, usize)
where
    R: io::Read,
    F: Fn(&csv::StringRecord) -> Option<(String, V)>,
{
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);

    let mut entries = HashMap::new();
    let mut skipped = 0;

    for record in rdr.records() {
        match record.ok().as_ref().and_then(&parse) {
            Some((key, value)) => {
                entries.insert(key, value);
            }
            None => skipped += 1,
        }
    }

    (entries, skipped)
}

fn open(path: &Path) -> Result<File> {
    File::open(path).map_err(|source| TriageErr::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn log_load(what: &str, path: &Path, entries: usize, skipped: usize) {
    if skipped > 0 {
        warn!(
            "{what}: loaded {entries} entries from {}, skipped {skipped} row(s)",
            path.display()
        );
    } else {
        info!("{what}: loaded {entries} entries from {}", path.display());
    }
}

/// Symptom → severity weight. Unknown symptoms weigh 0.
#[derive(Debug, Clone, Default)]
pub struct SeverityTable {
    weights: HashMap<String, i64>,
}

impl SeverityTable {
    /// Rows are `symptom,weight`; rows without an integer weight are skipped.
    pub fn from_reader<R: io::Read>(reader: R) -> TableLoad<Self> {
        let (weights, skipped) = read_rows(reader, |row| {
            let name = row.get(0)?;
            let weight = row.get(1)?.trim().parse::<i64>().ok()?;
            Some((name.to_owned(), weight))
        });

        TableLoad {
            table: Self { weights },
            skipped,
        }
    }

    /// # Errors
    /// Returns `TriageErr::Io` if the file can't be opened.
    pub fn load(path: impl AsRef<Path>) -> Result<TableLoad<Self>> {
        let path = path.as_ref();
        let load = Self::from_reader(open(path)?);
        log_load("severity", path, load.table.len(), load.skipped);
        Ok(load)
    }

    pub fn weight(&self, symptom: &str) -> i64 {
        self.weights.get(symptom).copied().unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.weights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }
}

impl<S: Into<String>> FromIterator<(S, i64)> for SeverityTable {
    fn from_iter<I: IntoIterator<Item = (S, i64)>>(iter: I) -> Self {
        Self {
            weights: iter.into_iter().map(|(s, w)| (s.into(), w)).collect(),
        }
    }
}

/// Disease → free-text description.
#[derive(Debug, Clone, Default)]
pub struct DescriptionTable {
    descriptions: HashMap<String, String>,
}

impl DescriptionTable {
    /// Rows are `disease,description`; rows with fewer fields are skipped.
    pub fn from_reader<R: io::Read>(reader: R) -> TableLoad<Self> {
        let (descriptions, skipped) = read_rows(reader, |row| {
            if row.len() < 2 {
                return None;
            }
            Some((row[0].to_owned(), row[1].to_owned()))
        });

        TableLoad {
            table: Self { descriptions },
            skipped,
        }
    }

    /// # Errors
    /// Returns `TriageErr::Io` if the file can't be opened.
    pub fn load(path: impl AsRef<Path>) -> Result<TableLoad<Self>> {
        let path = path.as_ref();
        let load = Self::from_reader(open(path)?);
        log_load("descriptions", path, load.table.len(), load.skipped);
        Ok(load)
    }

    /// The disease's description, or `NO_DESCRIPTION`.
    pub fn describe(&self, disease: &str) -> &str {
        self.descriptions
            .get(disease)
            .map_or(NO_DESCRIPTION, String::as_str)
    }

    pub fn len(&self) -> usize {
        self.descriptions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.descriptions.is_empty()
    }
}

/// Disease → up to four precautions.
#[derive(Debug, Clone, Default)]
pub struct PrecautionTable {
    precautions: HashMap<String, Vec<String>>,
}

impl PrecautionTable {
    /// Rows are `disease,p1,p2,p3,p4`; rows with fewer fields are skipped and
    /// fields past the fourth precaution are ignored.
    pub fn from_reader<R: io::Read>(reader: R) -> TableLoad<Self> {
        let (precautions, skipped) = read_rows(reader, |row| {
            if row.len() < PRECAUTIONS_PER_DISEASE + 1 {
                return None;
            }
            let items: Vec<String> = row
                .iter()
                .skip(1)
                .take(PRECAUTIONS_PER_DISEASE)
                .map(str::to_owned)
                .collect();
            Some((row[0].to_owned(), items))
        });

        TableLoad {
            table: Self { precautions },
            skipped,
        }
    }

    /// # Errors
    /// Returns `TriageErr::Io` if the file can't be opened.
    pub fn load(path: impl AsRef<Path>) -> Result<TableLoad<Self>> {
        let path = path.as_ref();
        let load = Self::from_reader(open(path)?);
        log_load("precautions", path, load.table.len(), load.skipped);
        Ok(load)
    }

    /// The disease's precautions, or a single `NO_PRECAUTIONS` item.
    pub fn precautions(&self, disease: &str) -> Vec<String> {
        match self.precautions.get(disease) {
            Some(items) => items.clone(),
            None => vec![NO_PRECAUTIONS.to_string()],
        }
    }

    pub fn len(&self) -> usize {
        self.precautions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.precautions.is_empty()
    }
}

/// The three lookup tables the prediction service reads from.
#[derive(Debug, Clone, Default)]
pub struct ReferenceTables {
    pub severity: SeverityTable,
    pub descriptions: DescriptionTable,
    pub precautions: PrecautionTable,
}

impl ReferenceTables {
    /// Loads all three tables; only unreadable files fail.
    pub fn load(
        severity: impl AsRef<Path>,
        descriptions: impl AsRef<Path>,
        precautions: impl AsRef<Path>,
    ) -> Result<Self> {
        Ok(Self {
            severity: SeverityTable::load(severity)?.table,
            descriptions: DescriptionTable::load(descriptions)?.table,
            precautions: PrecautionTable::load(precautions)?.table,
        })
    }
}
