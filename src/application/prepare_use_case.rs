// ============================================================
// Layer 2 — PrepareUseCase
// ============================================================
// Turns a CIFAR-10 directory into train / validation / test
// PairDatasets:
//
//   Step 1: Load the six shards             (Layer 4 - loader)
//   Step 2: Subtract the training mean      (Layer 4 - preprocessor)
//   Step 3: Encode labels (one-hot or not)  (Layer 4 - preprocessor)
//   Step 4: Carve off the validation head   (Layer 4 - splitter)
//   Step 5: Wrap each split                 (Layer 4 - dataset)

use anyhow::{Context, Result};
use ndarray::Array3;
use serde::{Deserialize, Serialize};

use crate::data::{
    dataset::PairDataset,
    loader::Cifar10Loader,
    preprocessor::{count_classes, dense_to_one_hot, subtract_mean},
    splitter::split_validation,
};
use crate::domain::{labels::Labels, traits::ImageSource};

/// Default location of the extracted binary distribution.
pub const DEFAULT_DATA_DIR: &str = "cifar10/cifar-10-batches-bin";

// ─── Preparation Configuration ───────────────────────────────────────────────
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PrepareConfig {
    pub data_dir:        String,
    pub one_hot:         bool,
    pub validation_size: usize,
}

impl Default for PrepareConfig {
    fn default() -> Self {
        Self {
            data_dir:        DEFAULT_DATA_DIR.to_string(),
            one_hot:         true,
            validation_size: 0,
        }
    }
}

/// The three prepared splits plus what was learned on the way.
#[derive(Debug, Clone)]
pub struct Splits {
    pub train:       PairDataset,
    pub validation:  PairDataset,
    pub test:        PairDataset,
    /// Mean image subtracted from every split — [H, W, C]
    pub mean_image:  Array3<f32>,
    pub num_classes: usize,
    pub label_names: Vec<String>,
}

pub struct PrepareUseCase {
    config: PrepareConfig,
}

impl PrepareUseCase {
    pub fn new(config: PrepareConfig) -> Self {
        Self { config }
    }

    /// Prepare splits from the configured CIFAR-10 directory.
    pub fn execute(&self) -> Result<Splits> {
        let loader = Cifar10Loader::new(&self.config.data_dir);
        self.execute_with(&loader)
    }

    /// Prepare splits from any image source.
    pub fn execute_with<S: ImageSource>(&self, source: &S) -> Result<Splits> {
        let cfg = &self.config;

        // ── Step 1: raw arrays ───────────────────────────────────────────────
        let raw = source
            .load_raw()
            .with_context(|| format!("Cannot load CIFAR-10 from '{}'", cfg.data_dir))?;
        let label_names = source.label_names();
        tracing::debug!("Image geometry: {:?}", source.geometry());

        // ── Step 2: mean subtraction ─────────────────────────────────────────
        let mut train_images = raw.train_images;
        let mut test_images  = raw.test_images;
        let mean_image = subtract_mean(&mut train_images, &mut test_images)?;

        // ── Step 3: label encoding ───────────────────────────────────────────
        let num_classes = count_classes(&raw.train_labels);
        let (train_labels, test_labels) = if cfg.one_hot {
            (
                Labels::OneHot(dense_to_one_hot(&raw.train_labels, num_classes)?),
                Labels::OneHot(dense_to_one_hot(&raw.test_labels, num_classes)?),
            )
        } else {
            (Labels::Dense(raw.train_labels), Labels::Dense(raw.test_labels))
        };
        tracing::info!(
            "{} classes, labels {}",
            num_classes,
            if cfg.one_hot { "one-hot" } else { "dense" }
        );

        // ── Step 4: validation split ─────────────────────────────────────────
        let ((train_x, train_y), (val_x, val_y)) =
            split_validation(&train_images, &train_labels, cfg.validation_size)?;

        // ── Step 5: wrap ─────────────────────────────────────────────────────
        let splits = Splits {
            train:      PairDataset::new(train_x, train_y)?,
            validation: PairDataset::new(val_x, val_y)?,
            test:       PairDataset::new(test_images, test_labels)?,
            mean_image,
            num_classes,
            label_names,
        };

        tracing::info!(
            "Prepared splits: {} train, {} validation, {} test",
            splits.train.num_examples(),
            splits.validation.num_examples(),
            splits.test.num_examples(),
        );
        Ok(splits)
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::loader::fixtures::write_dataset;
    use crate::data::preprocessor::sample_mean;
    use crate::domain::error::DatasetError;
    use crate::domain::geometry::ImageGeometry;

    const TINY: ImageGeometry = ImageGeometry { height: 2, width: 2, channels: 3 };

    fn prepare(dir: &std::path::Path, one_hot: bool, validation_size: usize) -> Result<Splits> {
        let cfg = PrepareConfig {
            data_dir: dir.display().to_string(),
            one_hot,
            validation_size,
        };
        let loader = Cifar10Loader::new(dir).with_geometry(TINY);
        PrepareUseCase::new(cfg).execute_with(&loader)
    }

    #[test]
    fn test_full_pipeline() {
        let dir = tempfile::tempdir().unwrap();
        write_dataset(dir.path(), TINY, 6, 3);

        let splits = prepare(dir.path(), true, 5).unwrap();
        assert_eq!(splits.train.num_examples(), 25);
        assert_eq!(splits.validation.num_examples(), 5);
        assert_eq!(splits.test.num_examples(), 6);
        assert_eq!(splits.num_classes, 3);
        assert!(splits.train.labels().is_one_hot());
        assert_eq!(splits.label_names.len(), 10);

        // Validation is the head of the concatenated training data
        assert_eq!(splits.validation.labels().class_of(4), 4 % 3);
        assert_eq!(splits.train.labels().class_of(0), 5 % 3);
    }

    #[test]
    fn test_mean_is_removed_before_split() {
        let dir = tempfile::tempdir().unwrap();
        write_dataset(dir.path(), TINY, 6, 3);

        // With no validation split the whole training set is centred
        let splits   = prepare(dir.path(), false, 0).unwrap();
        let residual = sample_mean(splits.train.images()).unwrap();
        assert!(residual.iter().all(|v| v.abs() < 1e-3));
        assert!(!splits.train.labels().is_one_hot());
    }

    #[test]
    fn test_validation_size_bounds() {
        let dir = tempfile::tempdir().unwrap();
        write_dataset(dir.path(), TINY, 2, 2);

        assert!(prepare(dir.path(), true, 10).is_ok());
        let err = prepare(dir.path(), true, 11).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<DatasetError>(),
            Some(DatasetError::InvalidValidationSize { max: 10, got: 11 })
        ));
    }

    #[test]
    fn test_missing_directory_has_context() {
        let dir = tempfile::tempdir().unwrap();
        let err = prepare(&dir.path().join("absent"), true, 0).unwrap_err();
        assert!(err.to_string().starts_with("Cannot load CIFAR-10"));
    }
}
