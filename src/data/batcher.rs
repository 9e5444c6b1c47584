// ============================================================
// Layer 4 — Siamese Batcher
// ============================================================
// Implements Burn's Batcher trait to turn PairItems into the
// three tensors a siamese model consumes:
//
//   Input:  Vec of N PairItems, each image flattened HWC
//   Output: SiameseBatch
//             anchors  [N, H, W, C]
//             partners [N, H, W, C]
//             targets  [N]          1.0 same class, 0.0 otherwise
//
// The items are flattened into one Vec per tensor and then
// shaped in a single TensorData, so no per-item tensors are
// allocated.
//
// Reference: Burn Book §4 (Batcher)

use burn::{
    data::dataloader::batcher::Batcher,
    prelude::*,
    tensor::TensorData,
};

use crate::domain::geometry::ImageGeometry;
use crate::domain::pair_batch::{PairBatch, PairItem};

// ─── SiameseBatch ─────────────────────────────────────────────────────────────
#[derive(Debug, Clone)]
pub struct SiameseBatch<B: Backend> {
    pub anchors:  Tensor<B, 4>,
    pub partners: Tensor<B, 4>,
    pub targets:  Tensor<B, 1>,
}

// ─── SiameseBatcher ───────────────────────────────────────────────────────────
/// Holds the image geometry so flat items can be reshaped.
#[derive(Clone, Debug)]
pub struct SiameseBatcher {
    pub geometry: ImageGeometry,
}

impl SiameseBatcher {
    pub fn new(geometry: ImageGeometry) -> Self {
        Self { geometry }
    }

    /// Convert a sampled PairBatch directly into tensors.
    pub fn from_pair_batch<B: Backend>(&self, batch: &PairBatch, device: &B::Device) -> SiameseBatch<B> {
        <Self as Batcher<B, PairItem, SiameseBatch<B>>>::batch(self, batch.items(), device)
    }
}

impl<B: Backend> Batcher<B, PairItem, SiameseBatch<B>> for SiameseBatcher {
    fn batch(&self, items: Vec<PairItem>, device: &B::Device) -> SiameseBatch<B> {
        let shape = self.geometry.batch_shape(items.len());

        let anchor_flat: Vec<f32> = items
            .iter()
            .flat_map(|p| p.anchor.iter().copied())
            .collect();

        let partner_flat: Vec<f32> = items
            .iter()
            .flat_map(|p| p.partner.iter().copied())
            .collect();

        let targets: Vec<f32> = items
            .iter()
            .map(|p| if p.same { 1.0 } else { 0.0 })
            .collect();

        let anchors  = Tensor::<B, 4>::from_data(TensorData::new(anchor_flat, shape), device);
        let partners = Tensor::<B, 4>::from_data(TensorData::new(partner_flat, shape), device);
        let targets  = Tensor::<B, 1>::from_floats(targets.as_slice(), device);

        SiameseBatch {
            anchors,
            partners,
            targets,
        }
    }
}
