// ============================================================
// Layer 2 — StatsUseCase
// ============================================================
// Prepares the splits and reports what they contain: sample
// counts, per-class balance, and how close the training mean
// is to zero after centring.

use anyhow::Result;
use serde::Serialize;

use crate::application::prepare_use_case::{PrepareConfig, PrepareUseCase, Splits};
use crate::data::{dataset::PairDataset, preprocessor::sample_mean};
use crate::domain::geometry::ImageGeometry;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SplitStats {
    pub name:         String,
    pub samples:      usize,
    pub class_counts: Vec<usize>,
}

impl SplitStats {
    fn of(name: &str, ds: &PairDataset) -> Self {
        Self {
            name:         name.to_string(),
            samples:      ds.num_examples(),
            class_counts: ds.class_counts(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct DatasetStats {
    pub geometry:    ImageGeometry,
    pub num_classes: usize,
    pub label_names: Vec<String>,
    pub one_hot:     bool,
    pub splits:      Vec<SplitStats>,
    /// Largest |mean| of any pixel over the centred training set
    pub train_mean_residual: f32,
}

pub struct StatsUseCase {
    prepare: PrepareUseCase,
}

impl StatsUseCase {
    pub fn new(config: PrepareConfig) -> Self {
        Self { prepare: PrepareUseCase::new(config) }
    }

    pub fn execute(&self) -> Result<DatasetStats> {
        let splits = self.prepare.execute()?;
        Ok(summarise(&splits))
    }
}

/// Describe already-prepared splits.
pub fn summarise(splits: &Splits) -> DatasetStats {
    let train_mean_residual = sample_mean(splits.train.images())
        .map(|m| m.iter().fold(0.0f32, |acc, v| acc.max(v.abs())))
        .unwrap_or(0.0);

    DatasetStats {
        geometry:    splits.train.geometry(),
        num_classes: splits.num_classes,
        label_names: splits.label_names.clone(),
        one_hot:     splits.train.labels().is_one_hot(),
        splits: vec![
            SplitStats::of("train", &splits.train),
            SplitStats::of("validation", &splits.validation),
            SplitStats::of("test", &splits.test),
        ],
        train_mean_residual,
    }
}
