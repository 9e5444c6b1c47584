// ============================================================
// Layer 4 — Data Pipeline
// ============================================================
// Everything from raw batch files to sampled pair batches.
//
// The pipeline flows in this order:
//
//   data_batch_{1..5}.bin, test_batch.bin
//       │
//       ▼
//   Cifar10Loader     → raw NHWC float images + dense labels
//       │
//       ▼
//   preprocessor      → mean subtraction, optional one-hot
//       │
//       ▼
//   splitter          → validation carved off the training head
//       │
//       ▼
//   PairDataset       → images + labels, implements Burn's Dataset
//       │
//       ▼
//   sampler           → anchor / partner PairBatches
//       │
//       ▼
//   SiameseBatcher    → Burn tensors
//
// Reference: Burn Book §4 (Datasets and Dataloaders)

/// Reads the binary CIFAR-10 shards
pub mod loader;

/// Mean subtraction and one-hot encoding
pub mod preprocessor;

/// Validation split off the training data
pub mod splitter;

/// Image/label wrapper with epoch counters
pub mod dataset;

/// Anchor/partner pair sampling
pub mod sampler;

/// Implements Burn's Batcher trait for pair items
pub mod batcher;
