//! Threshold-sweep curves for binary scores
//!
//! Scores are sorted once in descending order; every distinct score is a
//! candidate threshold and the cumulative true/false positive counts at
//! each threshold feed both the ROC and the precision-recall curve.

use ndarray::ArrayView1;

use crate::error::{Result, VizError};
use crate::metrics::classification::label_class;

/// Receiver operating characteristic, ordered by increasing false positive rate
#[derive(Debug, Clone, PartialEq)]
pub struct RocCurve {
    pub fpr: Vec<f64>,
    pub tpr: Vec<f64>,
    /// Score threshold per point; the leading point uses `+inf`
    pub thresholds: Vec<f64>,
}

impl RocCurve {
    pub fn auc(&self) -> f64 {
        auc(&self.fpr, &self.tpr)
    }

    pub fn points(&self) -> Vec<(f64, f64)> {
        self.fpr.iter().copied().zip(self.tpr.iter().copied()).collect()
    }
}

/// Precision-recall curve, ordered by increasing threshold (decreasing recall)
///
/// The final point is `(recall 0, precision 1)` and has no threshold.
#[derive(Debug, Clone, PartialEq)]
pub struct PrecisionRecallCurve {
    pub precision: Vec<f64>,
    pub recall: Vec<f64>,
    pub thresholds: Vec<f64>,
}

impl PrecisionRecallCurve {
    /// Step-wise average precision, Σ (Rₙ₋₁ − Rₙ) · Pₙ over the stored order
    pub fn average_precision(&self) -> f64 {
        self.recall
            .windows(2)
            .zip(self.precision.iter())
            .map(|(r, &p)| (r[0] - r[1]) * p)
            .sum()
    }

    /// Points as `(recall, precision)` pairs
    pub fn points(&self) -> Vec<(f64, f64)> {
        self.recall.iter().copied().zip(self.precision.iter().copied()).collect()
    }
}

/// Cumulative counts at each distinct threshold, highest threshold first
struct ThresholdCounts {
    fps: Vec<f64>,
    tps: Vec<f64>,
    thresholds: Vec<f64>,
}

fn threshold_counts(scores: ArrayView1<f32>, labels: ArrayView1<f32>) -> Result<ThresholdCounts> {
    if scores.len() != labels.len() {
        return Err(VizError::dimension_mismatch(
            format!("{} scores", labels.len()),
            format!("{} scores", scores.len()),
        ));
    }
    if labels.is_empty() {
        return Err(VizError::EmptySplit("no samples to build a curve from".to_string()));
    }
    if let Some(bad) = scores.iter().find(|s| !s.is_finite()) {
        return Err(VizError::invalid_parameter(
            "scores".to_string(),
            format!("non-finite score {}", bad),
        ));
    }

    let mut pairs: Vec<(f64, usize)> = scores.iter()
        .zip(labels.iter())
        .map(|(&s, &l)| (s as f64, label_class(l)))
        .collect();
    pairs.sort_by(|a, b| b.0.total_cmp(&a.0));

    let mut counts = ThresholdCounts {
        fps: Vec::new(),
        tps: Vec::new(),
        thresholds: Vec::new(),
    };
    let (mut tp, mut fp) = (0.0, 0.0);

    for (i, &(score, class)) in pairs.iter().enumerate() {
        if class == 1 {
            tp += 1.0;
        } else {
            fp += 1.0;
        }
        // Emit once per distinct score, after its last occurrence
        let last_of_run = pairs.get(i + 1).map_or(true, |next| next.0 != score);
        if last_of_run {
            counts.tps.push(tp);
            counts.fps.push(fp);
            counts.thresholds.push(score);
        }
    }

    let positives = tp;
    let negatives = fp;
    if positives == 0.0 || negatives == 0.0 {
        return Err(VizError::DegenerateLabels(format!(
            "{} positive and {} negative samples, both classes are required",
            positives, negatives
        )));
    }

    Ok(counts)
}

/// ROC curve with collinear intermediate points removed
pub fn roc_curve(scores: ArrayView1<f32>, labels: ArrayView1<f32>) -> Result<RocCurve> {
    let counts = threshold_counts(scores, labels)?;
    let n = counts.tps.len();

    // Keep endpoints and every point where the slope changes
    let keep: Vec<usize> = (0..n)
        .filter(|&i| {
            if i == 0 || i + 1 == n {
                return true;
            }
            let d2_fp = counts.fps[i + 1] - 2.0 * counts.fps[i] + counts.fps[i - 1];
            let d2_tp = counts.tps[i + 1] - 2.0 * counts.tps[i] + counts.tps[i - 1];
            d2_fp != 0.0 || d2_tp != 0.0
        })
        .collect();

    let negatives = counts.fps[n - 1];
    let positives = counts.tps[n - 1];

    let mut fpr = Vec::with_capacity(keep.len() + 1);
    let mut tpr = Vec::with_capacity(keep.len() + 1);
    let mut thresholds = Vec::with_capacity(keep.len() + 1);

    fpr.push(0.0);
    tpr.push(0.0);
    thresholds.push(f64::INFINITY);

    for i in keep {
        fpr.push(counts.fps[i] / negatives);
        tpr.push(counts.tps[i] / positives);
        thresholds.push(counts.thresholds[i]);
    }

    Ok(RocCurve { fpr, tpr, thresholds })
}

/// Precision-recall curve over every distinct score threshold
pub fn precision_recall_curve(scores: ArrayView1<f32>, labels: ArrayView1<f32>) -> Result<PrecisionRecallCurve> {
    let counts = threshold_counts(scores, labels)?;
    let n = counts.tps.len();
    let positives = counts.tps[n - 1];

    let mut precision = Vec::with_capacity(n + 1);
    let mut recall = Vec::with_capacity(n + 1);
    let mut thresholds = Vec::with_capacity(n);

    for i in (0..n).rev() {
        let predicted = counts.tps[i] + counts.fps[i];
        precision.push(if predicted > 0.0 { counts.tps[i] / predicted } else { 0.0 });
        recall.push(counts.tps[i] / positives);
        thresholds.push(counts.thresholds[i]);
    }

    precision.push(1.0);
    recall.push(0.0);

    Ok(PrecisionRecallCurve { precision, recall, thresholds })
}

/// Area under a curve by the trapezoidal rule
///
/// `x` must be monotonic; a decreasing `x` yields the same positive area.
pub fn auc(x: &[f64], y: &[f64]) -> f64 {
    let area: f64 = x.windows(2)
        .zip(y.windows(2))
        .map(|(xs, ys)| (xs[1] - xs[0]) * (ys[0] + ys[1]) / 2.0)
        .sum();
    area.abs()
}
