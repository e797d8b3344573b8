use std::fmt;

use log::info;
use machine_learning::{DecisionTree, LinearSvm};
use ml_core::{
    cross_val_score, train_test_split, Classifier, Dataset, LabelEncoder, StratifiedKFold,
};

use super::DiseaseModel;
use crate::{
    data::{SymptomIndex, SymptomTable},
    Result, TriageErr,
};

/// Fraction of the training table held out for evaluation.
pub const TEST_RATIO: f64 = 0.33;

/// Seed of the train/test shuffle.
pub const SEED: u64 = 42;

/// Folds used to cross validate the decision tree.
pub const CV_FOLDS: usize = 3;

/// Accuracy figures gathered while training. Informational only.
#[derive(Debug, Clone, PartialEq)]
pub struct TrainingReport {
    /// Mean stratified cross-validation accuracy of the decision tree over the
    /// held-out split.
    pub tree_cv_accuracy: f32,
    /// Accuracy of the linear SVM on the held-out split.
    pub svm_accuracy: f32,
    /// Accuracy of the serving tree on the testing table.
    pub holdout_accuracy: Option<f32>,
    pub symptoms: usize,
    pub diseases: usize,
}

impl fmt::Display for TrainingReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} symptoms, {} diseases, decision tree cv accuracy {:.4}, svm accuracy {:.4}",
            self.symptoms, self.diseases, self.tree_cv_accuracy, self.svm_accuracy
        )?;

        if let Some(holdout) = self.holdout_accuracy {
            write!(f, ", testing table accuracy {holdout:.4}")?;
        }

        Ok(())
    }
}

/// Trains the serving decision tree and the comparison SVM.
pub struct Trainer;

impl Trainer {
    /// Fits a `DiseaseModel` on `training`.
    ///
    /// The labels are encoded over the whole table, then the rows are split
    /// with `TEST_RATIO` and `SEED`. The decision tree that serves predictions
    /// is fitted on the train split; the SVM is fitted on the same split in
    /// parallel and only scored. When `testing` is given, the serving tree is
    /// also scored against it.
    ///
    /// # Errors
    /// - `TriageErr::Ml` if the table is too small to split or cross validate.
    /// - `TriageErr::ColumnMismatch` if `testing` has different symptom columns.
    pub fn train(
        training: &SymptomTable,
        testing: Option<&SymptomTable>,
    ) -> Result<(DiseaseModel, TrainingReport)> {
        let encoder = LabelEncoder::fit(training.labels())?;
        let targets = encoder.transform(training.labels())?;
        let dataset = Dataset::new(training.features().to_owned(), targets)?;

        let (train, test) = train_test_split(&dataset, TEST_RATIO, SEED)?;
        info!(
            "training on {} rows, holding out {} rows",
            train.len(),
            test.len()
        );

        let (tree, svm) = rayon::join(
            || -> ml_core::Result<DecisionTree> {
                let mut tree = DecisionTree::new();
                tree.fit(&train)?;
                Ok(tree)
            },
            || -> ml_core::Result<LinearSvm> {
                let mut svm = LinearSvm::default();
                svm.fit(&train)?;
                Ok(svm)
            },
        );
        let (tree, svm) = (tree?, svm?);

        let kfold = StratifiedKFold::new(CV_FOLDS)?;
        let tree_cv = cross_val_score(DecisionTree::new, &test, kfold)?;
        let svm_accuracy = svm.score(&test)?;

        let index = SymptomIndex::new(training.symptoms().iter().cloned());
        let model = DiseaseModel::new(index, encoder, Box::new(tree));

        let holdout_accuracy = match testing {
            Some(table) => Some(holdout(&model, training, table)?),
            None => None,
        };

        let report = TrainingReport {
            tree_cv_accuracy: tree_cv.mean(),
            svm_accuracy,
            holdout_accuracy,
            symptoms: training.symptoms().len(),
            diseases: model.diseases().len(),
        };

        Ok((model, report))
    }
}

/// Fraction of `testing` rows whose disease the model predicts.
///
/// Rows labeled with diseases absent from training simply count as misses.
fn holdout(
    model: &DiseaseModel,
    training: &SymptomTable,
    testing: &SymptomTable,
) -> Result<f32> {
    if testing.symptoms() != training.symptoms() {
        return Err(TriageErr::ColumnMismatch {
            path: testing.origin().to_path_buf(),
        });
    }

    let mut hits = 0;
    for (row, label) in testing.features().rows().into_iter().zip(testing.labels()) {
        let present: Vec<&str> = training
            .symptoms()
            .iter()
            .zip(row)
            .filter(|(_, value)| **value != 0.0)
            .map(|(name, _)| name.as_str())
            .collect();

        if model.predict(&present)? == *label {
            hits += 1;
        }
    }

    Ok(hits as f32 / testing.len() as f32)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    /// Four diseases, each with two signature symptoms, repeated.
    fn table(repeats: usize) -> SymptomTable {
        let mut csv = String::from("itching,skin_rash,cough,fever,headache,nausea,joint_pain,swelling,prognosis\n");
        for _ in 0..repeats {
            csv.push_str("1,1,0,0,0,0,0,0,Fungal infection\n");
            csv.push_str("1,0,0,0,0,0,0,0,Fungal infection\n");
            csv.push_str("0,0,1,1,0,0,0,0,Common Cold\n");
            csv.push_str("0,0,1,0,0,0,0,0,Common Cold\n");
            csv.push_str("0,0,0,0,1,1,0,0,Migraine\n");
            csv.push_str("0,0,0,0,1,0,0,0,Migraine\n");
            csv.push_str("0,0,0,0,0,0,1,1,Arthritis\n");
            csv.push_str("0,0,0,0,0,0,1,0,Arthritis\n");
        }
        SymptomTable::from_reader(csv.as_bytes(), Path::new("training.csv")).unwrap()
    }

    #[test]
    fn trains_a_serving_model() {
        let training = table(4);
        let (model, report) = Trainer::train(&training, None).unwrap();

        assert_eq!(model.predict(&["cough", "fever"]).unwrap(), "Common Cold");
        assert_eq!(model.predict(&["joint_pain"]).unwrap(), "Arthritis");
        assert_eq!(report.symptoms, 8);
        assert_eq!(report.diseases, 4);
        assert!((0.0..=1.0).contains(&report.tree_cv_accuracy));
        assert!((0.0..=1.0).contains(&report.svm_accuracy));
        assert_eq!(report.holdout_accuracy, None);
    }

    #[test]
    fn training_is_reproducible() {
        let training = table(4);
        let (_, a) = Trainer::train(&training, None).unwrap();
        let (_, b) = Trainer::train(&training, None).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn scores_the_testing_table() {
        let training = table(4);
        let testing = table(1);
        let (_, report) = Trainer::train(&training, Some(&testing)).unwrap();
        assert_eq!(report.holdout_accuracy, Some(1.0));
    }

    #[test]
    fn testing_table_must_share_columns() {
        let training = table(4);
        let testing = SymptomTable::from_reader(
            "itching,prognosis\n1,Fungal infection\n".as_bytes(),
            Path::new("testing.csv"),
        )
        .unwrap();

        let err = Trainer::train(&training, Some(&testing)).unwrap_err();
        assert!(matches!(err, TriageErr::ColumnMismatch { ref path } if path == Path::new("testing.csv")));
    }

    #[test]
    fn too_small_to_split_is_fatal() {
        let training = SymptomTable::from_reader(
            "itching,prognosis\n1,Fungal infection\n".as_bytes(),
            Path::new("training.csv"),
        )
        .unwrap();

        assert!(matches!(
            Trainer::train(&training, None),
            Err(TriageErr::Ml(_))
        ));
    }
}
