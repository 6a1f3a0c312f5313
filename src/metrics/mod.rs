pub mod classification;
pub mod curves;

pub use classification::{binary_accuracy, binary_cross_entropy, label_class, ConfusionMatrix};
pub use curves::{auc, precision_recall_curve, roc_curve, PrecisionRecallCurve, RocCurve};
