use ndarray::{Array1, ArrayView1, ArrayView2};
use ndarray_rand::rand_distr::Uniform;
use ndarray_rand::RandomExt;
use serde::{Deserialize, Serialize};

use crate::error::{Result, VizError};
use crate::metrics::binary_cross_entropy;

/// Anything that scores a batch of inputs
///
/// Returns one score per input row; for binary classifiers the score is
/// the probability of the positive class.
pub trait Predictor {
    fn predict(&self, inputs: ArrayView2<f32>) -> Result<Array1<f32>>;
}

/// A predictor that can also take an optimisation step on a batch
pub trait Trainable: Predictor {
    /// Update parameters on one batch and return the batch loss
    fn train_batch(&mut self, inputs: ArrayView2<f32>, labels: ArrayView1<f32>) -> Result<f32>;
}

impl<P: Predictor + ?Sized> Predictor for &P {
    fn predict(&self, inputs: ArrayView2<f32>) -> Result<Array1<f32>> {
        (**self).predict(inputs)
    }
}

impl<P: Predictor + ?Sized> Predictor for &mut P {
    fn predict(&self, inputs: ArrayView2<f32>) -> Result<Array1<f32>> {
        (**self).predict(inputs)
    }
}

/// Logistic regression: one sigmoid unit trained with binary cross-entropy and SGD
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogisticModel {
    pub weights: Array1<f32>,
    pub bias: f32,
    pub learning_rate: f32,
}

impl LogisticModel {
    /// Create a model with weights drawn uniformly from [-0.1, 0.1] and a zero bias
    pub fn new(input_size: usize, learning_rate: f32) -> Self {
        let weights = Array1::random(input_size, Uniform::new(-0.1, 0.1));
        LogisticModel {
            weights,
            bias: 0.0,
            learning_rate,
        }
    }

    pub fn with_weights(mut self, weights: Array1<f32>, bias: f32) -> Self {
        self.weights = weights;
        self.bias = bias;
        self
    }

    pub fn input_size(&self) -> usize {
        self.weights.len()
    }

    fn check_inputs(&self, inputs: ArrayView2<f32>) -> Result<()> {
        if inputs.ncols() != self.weights.len() {
            return Err(VizError::dimension_mismatch(
                format!("{} features", self.weights.len()),
                format!("{} features", inputs.ncols()),
            ));
        }
        Ok(())
    }
}

fn sigmoid(x: f32) -> f32 {
    1.0 / (1.0 + (-x).exp())
}

impl Predictor for LogisticModel {
    fn predict(&self, inputs: ArrayView2<f32>) -> Result<Array1<f32>> {
        self.check_inputs(inputs)?;
        Ok((inputs.dot(&self.weights) + self.bias).mapv(sigmoid))
    }
}

impl Trainable for LogisticModel {
    fn train_batch(&mut self, inputs: ArrayView2<f32>, labels: ArrayView1<f32>) -> Result<f32> {
        let predictions = self.predict(inputs)?;
        let loss = binary_cross_entropy(predictions.view(), labels)?;

        // d(BCE)/d(logit) = p - y
        let error = &predictions - &labels;
        let batch = labels.len() as f32;
        let weight_gradients = inputs.t().dot(&error) / batch;
        let bias_gradient = error.sum() / batch;

        self.weights.scaled_add(-self.learning_rate, &weight_gradients);
        self.bias -= self.learning_rate * bias_gradient;

        Ok(loss)
    }
}
