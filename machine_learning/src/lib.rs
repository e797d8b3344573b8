pub mod svm;
pub mod tree;

pub use svm::LinearSvm;
pub use tree::DecisionTree;
