// ============================================================
// Layer 3 — Core Traits (Abstractions)
// ============================================================
// The application layer loads raw splits through this trait
// and never touches the batch-file format directly.
//
// Implementations:
//   - Cifar10Loader → reads the binary CIFAR-10 shards
//   - (tests) in-memory sources built from synthetic arrays
//
// Reference: Rust Book §10 (Traits: Defining Shared Behaviour)

use ndarray::{Array1, Array4};

use crate::domain::error::DatasetResult;
use crate::domain::geometry::ImageGeometry;

/// Train and test arrays exactly as they come off disk,
/// before mean subtraction or one-hot encoding.
#[derive(Debug, Clone)]
pub struct RawSplits {
    pub train_images: Array4<f32>,
    pub train_labels: Array1<usize>,
    pub test_images:  Array4<f32>,
    pub test_labels:  Array1<usize>,
}

// ─── ImageSource ──────────────────────────────────────────────────────────────
/// Any component that can produce raw train/test splits.
pub trait ImageSource {
    /// Load both splits.
    fn load_raw(&self) -> DatasetResult<RawSplits>;

    /// Geometry of every image this source yields.
    fn geometry(&self) -> ImageGeometry;

    /// Human-readable class names, indexed by class.
    fn label_names(&self) -> Vec<String>;
}
