// ============================================================
// Layer 4 — Image Preprocessor
// ============================================================
// Two transformations run between loading and splitting:
//
//   1. Mean subtraction
//      The per-pixel mean image is computed over the TRAINING
//      samples only and subtracted from train and test alike,
//      so the test split never leaks into the statistics.
//
//   2. One-hot encoding
//      Dense class indices [N] become rows [N, num_classes]
//      with a single 1.0 in the class column.
//
// Reference: Rust Book §13 (Iterators)
//            ndarray documentation (broadcasting arithmetic)

use ndarray::{Array1, Array2, Array3, Array4, Axis};
use std::collections::BTreeSet;

use crate::domain::error::{DatasetError, DatasetResult};
use crate::domain::labels::argmax;

/// Subtract the training mean image from `train` and `test` in place.
/// Returns the mean image [H, W, C].
pub fn subtract_mean(
    train: &mut Array4<f32>,
    test:  &mut Array4<f32>,
) -> DatasetResult<Array3<f32>> {
    let mean = train.mean_axis(Axis(0)).ok_or(DatasetError::EmptyDataset)?;

    // [H, W, C] broadcasts across the leading sample axis
    *train -= &mean;
    *test  -= &mean;

    tracing::debug!("Subtracted mean image of shape {:?}", mean.shape());
    Ok(mean)
}

/// Convert dense class labels to one-hot rows.
pub fn dense_to_one_hot(labels: &Array1<usize>, num_classes: usize) -> DatasetResult<Array2<f32>> {
    let mut one_hot = Array2::<f32>::zeros((labels.len(), num_classes));

    for (i, &label) in labels.iter().enumerate() {
        if label >= num_classes {
            return Err(DatasetError::LabelOutOfRange { label, num_classes });
        }
        one_hot[[i, label]] = 1.0;
    }

    Ok(one_hot)
}

/// Inverse of `dense_to_one_hot`: argmax of every row.
pub fn one_hot_to_dense(one_hot: &Array2<f32>) -> Array1<usize> {
    one_hot.axis_iter(Axis(0)).map(argmax).collect()
}

/// Number of distinct labels present.
pub fn count_classes(labels: &Array1<usize>) -> usize {
    labels.iter().collect::<BTreeSet<_>>().len()
}

/// Mean of `images` over the sample axis — [H, W, C].
/// After `subtract_mean` this should be ~0 for the training split.
pub fn sample_mean(images: &Array4<f32>) -> Option<Array3<f32>> {
    images.mean_axis(Axis(0))
}
