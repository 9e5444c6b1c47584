// ============================================================
// Layer 2 — SampleUseCase
// ============================================================
// Draws a fixed list of pair batches from one split:
//
//   Step 1: Prepare the splits                (PrepareUseCase)
//   Step 2: Resolve the RNG seed              (config or fresh)
//   Step 3: Sample one pair batch at a time   (Layer 4 - dataset)
//   Step 4: Log its CSV row right away        (Layer 6 - pair_log)
//   Step 5: Stack the first batch as tensors  (Layer 4 - batcher)
//   Step 6: Save the resolved config          (Layer 6 - config_store)

use anyhow::Result;
use burn::backend::{ndarray::NdArrayDevice, NdArray};
use rand::{rngs::StdRng, Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::application::prepare_use_case::{PrepareConfig, PrepareUseCase, Splits};
use crate::data::{
    batcher::{SiameseBatch, SiameseBatcher},
    dataset::PairDataset,
    sampler::{DEFAULT_BATCH_SIZE, DEFAULT_FRACTION_SAME, DEFAULT_NUM_TUPLES},
};
use crate::domain::pair_batch::PairBatch;
use crate::domain::traits::ImageSource;
use crate::infra::{
    config_store::ConfigStore,
    pair_log::{BatchRecord, PairLog},
};

/// Which prepared split to sample from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DatasetSplit {
    Train,
    Validation,
    Test,
}

impl DatasetSplit {
    pub fn select(self, splits: &Splits) -> &PairDataset {
        match self {
            DatasetSplit::Train      => &splits.train,
            DatasetSplit::Validation => &splits.validation,
            DatasetSplit::Test       => &splits.test,
        }
    }

    pub fn select_mut(self, splits: &mut Splits) -> &mut PairDataset {
        match self {
            DatasetSplit::Train      => &mut splits.train,
            DatasetSplit::Validation => &mut splits.validation,
            DatasetSplit::Test       => &mut splits.test,
        }
    }
}

// ─── Sampling Configuration ──────────────────────────────────────────────────
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SampleConfig {
    pub prepare:       PrepareConfig,
    pub split:         DatasetSplit,
    pub num_tuples:    usize,
    pub batch_size:    usize,
    pub fraction_same: f64,
    /// None draws a fresh seed; the saved config records it
    pub seed:          Option<u64>,
    pub out_dir:       String,
}

impl Default for SampleConfig {
    fn default() -> Self {
        Self {
            prepare:       PrepareConfig::default(),
            split:         DatasetSplit::Train,
            num_tuples:    DEFAULT_NUM_TUPLES,
            batch_size:    DEFAULT_BATCH_SIZE,
            fraction_same: DEFAULT_FRACTION_SAME,
            seed:          None,
            out_dir:       "pairs".to_string(),
        }
    }
}

/// What a sampling run produced.
#[derive(Debug, Clone)]
pub struct SampleSummary {
    pub batches:     usize,
    pub positives:   usize,
    pub negatives:   usize,
    /// Full passes over the split that the drawn rows add up to
    pub epochs_completed: usize,
    pub seed:        u64,
    /// Shape of the anchor tensor of the first batch
    pub tensor_dims: Option<[usize; 4]>,
    pub csv_path:    PathBuf,
    pub config_path: PathBuf,
}

pub struct SampleUseCase {
    config: SampleConfig,
}

impl SampleUseCase {
    pub fn new(config: SampleConfig) -> Self {
        Self { config }
    }

    pub fn execute(&self) -> Result<SampleSummary> {
        let splits = PrepareUseCase::new(self.config.prepare.clone()).execute()?;
        self.run(splits)
    }

    pub fn execute_with<S: ImageSource>(&self, source: &S) -> Result<SampleSummary> {
        let splits = PrepareUseCase::new(self.config.prepare.clone()).execute_with(source)?;
        self.run(splits)
    }

    fn run(&self, mut splits: Splits) -> Result<SampleSummary> {
        let cfg         = &self.config;
        let label_names = std::mem::take(&mut splits.label_names);
        let dataset     = cfg.split.select_mut(&mut splits);

        // ── Step 2: seed ─────────────────────────────────────────────────────
        let seed    = cfg.seed.unwrap_or_else(|| rand::thread_rng().gen());
        let mut rng = StdRng::seed_from_u64(seed);
        tracing::info!(
            "Sampling {} batches of {} from {:?} ({} samples), fraction_same={}, seed={}",
            cfg.num_tuples,
            cfg.batch_size,
            cfg.split,
            dataset.num_examples(),
            cfg.fraction_same,
            seed
        );

        // ── Steps 3-5: sample, log and stack one batch at a time ────────────
        // Only the running counts outlive each batch.
        let mut log         = PairLog::create(&cfg.out_dir)?;
        let mut positives   = 0;
        let mut negatives   = 0;
        let mut tensor_dims = None;

        for i in 0..cfg.num_tuples {
            let batch = dataset.next_batch(cfg.batch_size, cfg.fraction_same, &mut rng)?;
            log.log(&BatchRecord::from_batch(i + 1, &batch, &label_names))?;

            positives += batch.positives();
            negatives += batch.negatives();
            if tensor_dims.is_none() {
                tensor_dims = Some(first_batch_dims(dataset, &batch));
            }
        }

        // ── Step 6: config ───────────────────────────────────────────────────
        let resolved = SampleConfig { seed: Some(seed), ..cfg.clone() };
        let config_path = ConfigStore::new(&cfg.out_dir)?.save(&resolved)?;

        Ok(SampleSummary {
            batches:          cfg.num_tuples,
            positives,
            negatives,
            epochs_completed: dataset.epochs_completed(),
            seed,
            tensor_dims,
            csv_path:         log.csv_path().clone(),
            config_path,
        })
    }
}

fn first_batch_dims(dataset: &PairDataset, batch: &PairBatch) -> [usize; 4] {
    let device  = NdArrayDevice::default();
    let batcher = SiameseBatcher::new(dataset.geometry());
    let tensors: SiameseBatch<NdArray<f32>> = batcher.from_pair_batch(batch, &device);
    tracing::debug!(
        "First batch tensors: anchors {:?}, partners {:?}, targets {:?}",
        tensors.anchors.dims(),
        tensors.partners.dims(),
        tensors.targets.dims()
    );
    tensors.anchors.dims()
}
