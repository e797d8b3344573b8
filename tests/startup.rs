mod common;

use std::{fs, io::Write};

use common::{fixture, fixture_config};
use symptom_triage::{
    data::{SeverityTable, SymptomTable},
    severity, PredictionService, Severity, Trainer, TriageErr,
};
use tempfile::{tempdir, NamedTempFile};

#[test]
fn fixtures_train_a_consistent_model() {
    let training = SymptomTable::load(fixture("Training.csv")).unwrap();
    let testing = SymptomTable::load(fixture("Testing.csv")).unwrap();

    let (model, report) = Trainer::train(&training, Some(&testing)).unwrap();

    assert_eq!(report.symptoms, 12);
    assert_eq!(report.diseases, 4);
    assert_eq!(report.holdout_accuracy, Some(1.0));
    assert_eq!(model.symptoms().width(), 12);
    assert_eq!(
        model.diseases(),
        &["Allergy", "Fungal infection", "GERD", "Migraine"]
    );
}

#[test]
fn missing_reference_file_is_fatal() {
    let dir = tempdir().unwrap();
    let config = symptom_triage::Config {
        severity_path: dir.path().join("absent.csv"),
        ..fixture_config()
    };

    let err = PredictionService::from_config(&config).err().unwrap();
    assert!(matches!(err, TriageErr::Io { ref path, .. } if path.ends_with("absent.csv")));
}

#[test]
fn training_table_without_labels_is_fatal() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "itching,skin_rash,disease").unwrap();
    writeln!(file, "1,1,Fungal infection").unwrap();

    let config = symptom_triage::Config {
        training_path: file.path().to_path_buf(),
        ..fixture_config()
    };

    let err = PredictionService::from_config(&config).err().unwrap();
    assert!(matches!(err, TriageErr::MissingLabelColumn { .. }));
}

#[test]
fn malformed_reference_rows_are_skipped() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("severity.csv");
    fs::write(&path, "itching,1\nskin_rash,three\n,\nchills,3\n").unwrap();

    let load = SeverityTable::load(&path).unwrap();
    assert_eq!(load.skipped, 2);
    assert_eq!(load.table.len(), 2);
    assert_eq!(severity::score(&["chills"], 9, &load.table), Severity::Severe);
    assert_eq!(severity::score(&["skin_rash"], 9, &load.table), Severity::Mild);
}
