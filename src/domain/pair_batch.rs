// ============================================================
// Layer 3 — PairBatch Domain Type
// ============================================================
// One siamese minibatch built around a single anchor image:
//
//        anchors          partners          labels
//   | anchor,  same_1   |   -->   | 1 |
//   | anchor,  same_2   |   -->   | 1 |
//   | anchor,  other_1  |   -->   | 0 |
//   | anchor,  other_2  |   -->   | 0 |
//
// `anchors` is the anchor replicated batch_size times so the
// two image arrays line up row for row. Same-class partners
// come first, followed by other-class partners.
//
// Reference: Hadsell, Chopra & LeCun (2006) contrastive loss
//            Rust Book §5 (Structs)

use ndarray::{Array1, Array4, Axis};

#[derive(Debug, Clone, PartialEq)]
pub struct PairBatch {
    /// Anchor image repeated for every row — shape [batch, h, w, c]
    pub anchors: Array4<f32>,

    /// Partner images — shape [batch, h, w, c]
    pub partners: Array4<f32>,

    /// 1.0 when the partner shares the anchor's class, 0.0 otherwise
    pub labels: Array1<f32>,

    /// Index of the anchor inside the source dataset
    pub anchor_index: usize,

    /// Class of the anchor
    pub anchor_class: usize,
}

/// A single anchor/partner pair with its match flag, flattened
/// in NHWC order. This is what a tensor batcher consumes.
#[derive(Debug, Clone, PartialEq)]
pub struct PairItem {
    pub anchor:  Vec<f32>,
    pub partner: Vec<f32>,
    pub same:    bool,
}

impl PairBatch {
    pub fn batch_size(&self) -> usize {
        self.labels.len()
    }

    /// Number of same-class rows.
    pub fn positives(&self) -> usize {
        self.labels.iter().filter(|&&l| l == 1.0).count()
    }

    /// Number of other-class rows.
    pub fn negatives(&self) -> usize {
        self.labels.iter().filter(|&&l| l == 0.0).count()
    }

    /// Split the batch into one `PairItem` per row.
    pub fn items(&self) -> Vec<PairItem> {
        self.anchors
            .axis_iter(Axis(0))
            .zip(self.partners.axis_iter(Axis(0)))
            .zip(self.labels.iter())
            .map(|((a, p), &l)| PairItem {
                anchor:  a.iter().copied().collect(),
                partner: p.iter().copied().collect(),
                same:    l == 1.0,
            })
            .collect()
    }
}
