use std::fmt;

use serde::{Deserialize, Serialize};

use crate::data::SeverityTable;

/// Load above which a condition counts as severe.
pub const SEVERE_THRESHOLD: i64 = 13;

/// Coarse verdict on how serious the reported condition is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Severe,
    Mild,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Severe => write!(f, "severe"),
            Severity::Mild => write!(f, "mild"),
        }
    }
}

/// Scores the reported symptoms over `days` of duration.
///
/// The load is `sum(weight) * days / (count + 1)` and anything strictly above
/// `SEVERE_THRESHOLD` is severe. Every requested name counts towards `count`,
/// including those missing from `table`, which weigh 0. The comparison is done
/// as `sum * days > threshold * (count + 1)` over integers.
pub fn score<S: AsRef<str>>(symptoms: &[S], days: i64, table: &SeverityTable) -> Severity {
    let sum: i128 = symptoms
        .iter()
        .map(|s| i128::from(table.weight(s.as_ref())))
        .sum();
    let divisor = symptoms.len() as i128 + 1;

    if sum * i128::from(days) > i128::from(SEVERE_THRESHOLD) * divisor {
        Severity::Severe
    } else {
        Severity::Mild
    }
}
