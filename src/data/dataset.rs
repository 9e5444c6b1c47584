use burn::data::dataset::Dataset;
use ndarray::{Array4, ArrayView3, Axis};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::data::sampler::sample_pairs;
use crate::domain::error::{DatasetError, DatasetResult};
use crate::domain::geometry::ImageGeometry;
use crate::domain::labels::Labels;
use crate::domain::pair_batch::PairBatch;

/// One image with its class, flattened in HWC order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageItem {
    pub pixels: Vec<f32>,
    pub label:  usize,
}

/// An image array bundled with its aligned labels.
///
/// The two always have the same number of samples; `new`
/// refuses anything else. Besides the data it only tracks how
/// far through the current epoch `next_batch` has drawn.
#[derive(Debug, Clone)]
pub struct PairDataset {
    images:           Array4<f32>,
    labels:           Labels,
    epochs_completed: usize,
    index_in_epoch:   usize,
}

impl PairDataset {
    pub fn new(images: Array4<f32>, labels: Labels) -> DatasetResult<Self> {
        if images.shape()[0] != labels.len() {
            return Err(DatasetError::LengthMismatch {
                images: images.shape()[0],
                labels: labels.len(),
            });
        }
        Ok(Self {
            images,
            labels,
            epochs_completed: 0,
            index_in_epoch:   0,
        })
    }

    pub fn images(&self) -> &Array4<f32> {
        &self.images
    }

    pub fn labels(&self) -> &Labels {
        &self.labels
    }

    pub fn num_examples(&self) -> usize {
        self.images.shape()[0]
    }

    pub fn epochs_completed(&self) -> usize {
        self.epochs_completed
    }

    pub fn index_in_epoch(&self) -> usize {
        self.index_in_epoch
    }

    pub fn geometry(&self) -> ImageGeometry {
        let s = self.images.shape();
        ImageGeometry::new(s[1], s[2], s[3])
    }

    pub fn image(&self, index: usize) -> ArrayView3<'_, f32> {
        self.images.index_axis(Axis(0), index)
    }

    /// Number of samples per class, indexed by class.
    pub fn class_counts(&self) -> Vec<usize> {
        let mut counts = Vec::new();
        for class in self.labels.classes() {
            if class >= counts.len() {
                counts.resize(class + 1, 0);
            }
            counts[class] += 1;
        }
        counts
    }

    /// Draw the next pair-batch around a random anchor.
    ///
    /// `fraction_same` of the rows (rounded down) pair the anchor
    /// with other members of its class, the rest with samples
    /// of any other class.
    pub fn next_batch<R: Rng + ?Sized>(
        &mut self,
        batch_size:    usize,
        fraction_same: f64,
        rng:           &mut R,
    ) -> DatasetResult<PairBatch> {
        let batch = sample_pairs(self, batch_size, fraction_same, rng)?;
        self.advance(batch_size);
        Ok(batch)
    }

    fn advance(&mut self, drawn: usize) {
        let n = self.num_examples();
        if n == 0 {
            return;
        }
        self.index_in_epoch   += drawn;
        self.epochs_completed += self.index_in_epoch / n;
        self.index_in_epoch   %= n;
    }
}

impl Dataset<ImageItem> for PairDataset {
    fn get(&self, index: usize) -> Option<ImageItem> {
        if index >= self.num_examples() {
            return None;
        }
        Some(ImageItem {
            pixels: self.image(index).iter().copied().collect(),
            label:  self.labels.class_of(index),
        })
    }

    fn len(&self) -> usize {
        self.num_examples()
    }
}
