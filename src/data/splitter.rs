// ============================================================
// Layer 4 — Train/Validation Splitter
// ============================================================
// Carves a validation set off the front of the training data:
//
//   train (N samples)
//   ├── [0 .. validation_size)  → validation
//   └── [validation_size .. N)  → train
//
// No shuffling happens here; the shards are stored in random
// class order already.
//
// This is the one bounds check the pipeline performs up front:
// 0 <= validation_size <= N, otherwise InvalidValidationSize.
//
// Reference: Rust Book §8 (Vectors), §9 (Error Handling)

use ndarray::{s, Array4};

use crate::domain::error::{DatasetError, DatasetResult};
use crate::domain::labels::Labels;

/// One split: images and their aligned labels.
pub type Split = (Array4<f32>, Labels);

/// Split `(images, labels)` into `(train, validation)`.
pub fn split_validation(
    images:          &Array4<f32>,
    labels:          &Labels,
    validation_size: usize,
) -> DatasetResult<(Split, Split)> {
    let total = images.shape()[0];
    if validation_size > total {
        return Err(DatasetError::InvalidValidationSize {
            max: total,
            got: validation_size,
        });
    }
    if labels.len() != total {
        return Err(DatasetError::LengthMismatch {
            images: total,
            labels: labels.len(),
        });
    }

    let validation = (
        images.slice(s![..validation_size, .., .., ..]).to_owned(),
        labels.slice(0, validation_size),
    );
    let train = (
        images.slice(s![validation_size.., .., .., ..]).to_owned(),
        labels.slice(validation_size, total),
    );

    tracing::debug!(
        "Dataset split: {} training, {} validation",
        train.1.len(),
        validation.1.len(),
    );

    Ok((train, validation))
}
