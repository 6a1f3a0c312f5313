use ndarray::{Array2, ArrayView1};

use crate::error::{Result, VizError};

const PROB_EPSILON: f32 = 1e-7;

/// Class index of a binary label
#[inline]
pub fn label_class(label: f32) -> usize {
    (label > 0.5) as usize
}

fn check_lengths(scores: ArrayView1<f32>, labels: ArrayView1<f32>) -> Result<()> {
    if scores.len() != labels.len() {
        return Err(VizError::dimension_mismatch(
            format!("{} scores", labels.len()),
            format!("{} scores", scores.len()),
        ));
    }
    if labels.is_empty() {
        return Err(VizError::EmptySplit("no samples to score".to_string()));
    }
    Ok(())
}

/// Fraction of samples whose thresholded score matches the label
pub fn binary_accuracy(scores: ArrayView1<f32>, labels: ArrayView1<f32>, threshold: f32) -> Result<f32> {
    check_lengths(scores, labels)?;

    let correct = scores.iter()
        .zip(labels.iter())
        .filter(|(s, l)| ((**s > threshold) as usize) == label_class(**l))
        .count();

    Ok(correct as f32 / labels.len() as f32)
}

/// Mean binary cross-entropy of probability scores
pub fn binary_cross_entropy(scores: ArrayView1<f32>, labels: ArrayView1<f32>) -> Result<f32> {
    check_lengths(scores, labels)?;

    let total: f32 = scores.iter()
        .zip(labels.iter())
        .map(|(&p, &y)| {
            let p = p.clamp(PROB_EPSILON, 1.0 - PROB_EPSILON);
            -(y * p.ln() + (1.0 - y) * (1.0 - p).ln())
        })
        .sum();

    Ok(total / labels.len() as f32)
}

/// 2x2 confusion matrix for binary classification
///
/// Rows are ground truth, columns are predictions; index 0 is the negative
/// class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ConfusionMatrix {
    counts: [[u64; 2]; 2],
}

impl ConfusionMatrix {
    /// Count thresholded scores against labels
    pub fn from_scores(scores: ArrayView1<f32>, labels: ArrayView1<f32>, threshold: f32) -> Result<Self> {
        check_lengths(scores, labels)?;

        let mut matrix = Self::default();
        for (&score, &label) in scores.iter().zip(labels.iter()) {
            matrix.add(label_class(label), (score > threshold) as usize);
        }
        Ok(matrix)
    }

    /// Record one sample
    pub fn add(&mut self, truth: usize, predicted: usize) {
        self.counts[truth.min(1)][predicted.min(1)] += 1;
    }

    pub fn counts(&self) -> [[u64; 2]; 2] {
        self.counts
    }

    pub fn total(&self) -> u64 {
        self.counts.iter().flatten().sum()
    }

    /// Row-normalised matrix: each entry divided by its ground-truth total
    ///
    /// A class with no samples keeps an all-zero row.
    pub fn normalized(&self) -> Array2<f64> {
        Array2::from_shape_fn((2, 2), |(row, col)| {
            let row_total: u64 = self.counts[row].iter().sum();
            if row_total == 0 {
                0.0
            } else {
                self.counts[row][col] as f64 / row_total as f64
            }
        })
    }

    /// Per-class accuracy (recall) in percent, rounded to two decimals
    pub fn class_accuracy_percent(&self) -> [f64; 2] {
        let normalized = self.normalized();
        [0, 1].map(|class| (normalized[[class, class]] * 10_000.0).round() / 100.0)
    }
}
