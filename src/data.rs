use std::fmt;
use std::rc::Rc;
use std::sync::Arc;

use ndarray::{Array1, Array2, ArrayView1, ArrayView2, Axis};

use crate::error::{Result, VizError};

/// One batch of inputs (rows are samples) and their binary labels
pub type BatchView<'a> = (ArrayView2<'a, f32>, ArrayView1<'a, f32>);

/// A finite, restartable sequence of batches
///
/// Every call to [`Dataset::batches`] starts again from the first batch.
pub trait Dataset {
    fn batches(&self) -> Box<dyn Iterator<Item = BatchView<'_>> + '_>;
}

impl<D: Dataset + ?Sized> Dataset for &D {
    fn batches(&self) -> Box<dyn Iterator<Item = BatchView<'_>> + '_> {
        (**self).batches()
    }
}

impl<D: Dataset + ?Sized> Dataset for Rc<D> {
    fn batches(&self) -> Box<dyn Iterator<Item = BatchView<'_>> + '_> {
        (**self).batches()
    }
}

impl<D: Dataset + ?Sized> Dataset for Arc<D> {
    fn batches(&self) -> Box<dyn Iterator<Item = BatchView<'_>> + '_> {
        (**self).batches()
    }
}

/// Named partition of the data evaluated by the exporters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Split {
    Train,
    Val,
}

impl Split {
    pub const ALL: [Split; 2] = [Split::Train, Split::Val];

    pub fn name(&self) -> &'static str {
        match self {
            Split::Train => "Train",
            Split::Val => "Val",
        }
    }
}

impl fmt::Display for Split {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// In-memory split served in fixed-size batches
///
/// The last batch is shorter when the sample count is not a multiple of
/// the batch size.
#[derive(Debug, Clone)]
pub struct ArrayDataset {
    inputs: Array2<f32>,
    labels: Array1<f32>,
    batch_size: usize,
}

impl ArrayDataset {
    pub fn new(inputs: Array2<f32>, labels: Array1<f32>, batch_size: usize) -> Result<Self> {
        if batch_size == 0 {
            return Err(VizError::invalid_parameter("batch_size", "must be at least 1"));
        }

        if inputs.nrows() != labels.len() {
            return Err(VizError::dimension_mismatch(
                format!("{} labels", inputs.nrows()),
                format!("{} labels", labels.len()),
            ));
        }

        Ok(Self {
            inputs,
            labels,
            batch_size,
        })
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn batch_size(&self) -> usize {
        self.batch_size
    }

    pub fn num_features(&self) -> usize {
        self.inputs.ncols()
    }

    pub fn inputs(&self) -> ArrayView2<'_, f32> {
        self.inputs.view()
    }

    pub fn labels(&self) -> ArrayView1<'_, f32> {
        self.labels.view()
    }
}

impl Dataset for ArrayDataset {
    fn batches(&self) -> Box<dyn Iterator<Item = BatchView<'_>> + '_> {
        Box::new(
            self.inputs
                .axis_chunks_iter(Axis(0), self.batch_size)
                .zip(self.labels.axis_chunks_iter(Axis(0), self.batch_size)),
        )
    }
}
