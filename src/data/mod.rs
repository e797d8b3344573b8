mod reference;
mod symptoms;
mod table;

pub use reference::{
    DescriptionTable, PrecautionTable, ReferenceTables, SeverityTable, TableLoad, NO_DESCRIPTION,
    NO_PRECAUTIONS, PRECAUTIONS_PER_DISEASE,
};
pub use symptoms::{FeatureVector, SymptomIndex};
pub use table::{SymptomTable, LABEL_COLUMN};
