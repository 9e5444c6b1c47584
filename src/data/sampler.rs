// ============================================================
// Layer 4 — Siamese Pair Sampler
// ============================================================
// Builds one PairBatch around a random anchor:
//
//   1. Pick an anchor index uniformly from the dataset
//   2. Partition every OTHER index by class:
//        same pool  → shares the anchor's class
//        other pool → any other class
//   3. Draw floor(batch_size * fraction_same) indices from the
//      same pool and the remainder from the other pool, both
//      without replacement
//   4. Replicate the anchor image batch_size times, gather the
//      partner images, and emit labels [1,…,1,0,…,0]
//
// If either pool is smaller than what step 3 needs the call
// fails with InsufficientSamples. There is no retry with a
// different anchor and no fallback to sampling with
// replacement; callers choose batch sizes that fit.
//
// Reference: Koch, Zemel & Salakhutdinov (2015) Siamese Neural
//            Networks for One-shot Image Recognition
//            rand crate documentation (SliceRandom)

use ndarray::{Array1, Array4, Axis};
use rand::{seq::SliceRandom, Rng};

use crate::data::dataset::PairDataset;
use crate::domain::error::{DatasetError, DatasetResult, SamplePool};
use crate::domain::pair_batch::PairBatch;

/// Default number of tuples in a fixed evaluation set.
pub const DEFAULT_NUM_TUPLES: usize = 500;

/// Default pair-batch size.
pub const DEFAULT_BATCH_SIZE: usize = 128;

/// Default share of same-class pairs in a batch.
pub const DEFAULT_FRACTION_SAME: f64 = 0.2;

/// Number of same-class rows in a batch: floor(batch_size * fraction_same).
pub fn same_count(batch_size: usize, fraction_same: f64) -> usize {
    (batch_size as f64 * fraction_same).floor() as usize
}

/// Sample one pair-batch from `dataset`.
pub fn sample_pairs<R: Rng + ?Sized>(
    dataset:       &PairDataset,
    batch_size:    usize,
    fraction_same: f64,
    rng:           &mut R,
) -> DatasetResult<PairBatch> {
    if !(0.0..=1.0).contains(&fraction_same) {
        return Err(DatasetError::InvalidFraction(fraction_same));
    }
    if batch_size == 0 {
        return Err(DatasetError::EmptyBatch);
    }
    let n = dataset.num_examples();
    if n == 0 {
        return Err(DatasetError::EmptyDataset);
    }

    // ── Step 1: anchor ────────────────────────────────────────────────────────
    let classes      = dataset.labels().classes();
    let anchor_index = rng.gen_range(0..n);
    let anchor_class = classes[anchor_index];

    // ── Step 2: candidate pools (anchor excluded) ─────────────────────────────
    let (same_pool, other_pool): (Vec<usize>, Vec<usize>) = (0..n)
        .filter(|&i| i != anchor_index)
        .partition(|&i| classes[i] == anchor_class);

    let n_same = same_count(batch_size, fraction_same);
    let n_diff = batch_size - n_same;

    if same_pool.len() < n_same {
        return Err(DatasetError::InsufficientSamples {
            class:     anchor_class,
            needed:    n_same,
            available: same_pool.len(),
            pool:      SamplePool::SameClass,
        });
    }
    if other_pool.len() < n_diff {
        return Err(DatasetError::InsufficientSamples {
            class:     anchor_class,
            needed:    n_diff,
            available: other_pool.len(),
            pool:      SamplePool::OtherClass,
        });
    }

    // ── Step 3: draw without replacement ──────────────────────────────────────
    let mut partner_indices: Vec<usize> = same_pool
        .choose_multiple(rng, n_same)
        .copied()
        .collect();
    partner_indices.extend(other_pool.choose_multiple(rng, n_diff).copied());

    // ── Step 4: assemble arrays ───────────────────────────────────────────────
    let images   = dataset.images();
    let anchor   = images.index_axis(Axis(0), anchor_index);
    let (h, w, c) = anchor.dim();
    let anchors  = Array4::from_shape_fn((batch_size, h, w, c), |(_, y, x, ch)| anchor[[y, x, ch]]);
    let partners = images.select(Axis(0), &partner_indices);

    let labels: Array1<f32> = std::iter::repeat(1.0)
        .take(n_same)
        .chain(std::iter::repeat(0.0).take(n_diff))
        .collect();

    tracing::debug!(
        "Sampled pair batch: anchor {} (class {}), {} same / {} other",
        anchor_index,
        anchor_class,
        n_same,
        n_diff
    );

    Ok(PairBatch {
        anchors,
        partners,
        labels,
        anchor_index,
        anchor_class,
    })
}

/// Sample a fixed list of `num_tuples` pair-batches, e.g. for
/// a validation set that stays constant across evaluations.
pub fn create_dataset<R: Rng + ?Sized>(
    dataset:       &PairDataset,
    num_tuples:    usize,
    batch_size:    usize,
    fraction_same: f64,
    rng:           &mut R,
) -> DatasetResult<Vec<PairBatch>> {
    (0..num_tuples)
        .map(|_| sample_pairs(dataset, batch_size, fraction_same, rng))
        .collect()
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::preprocessor::dense_to_one_hot;
    use crate::domain::labels::Labels;
    use rand::{rngs::StdRng, SeedableRng};

    /// `n` samples, class `i % classes`; every pixel of sample i equals i.
    fn dataset(n: usize, classes: usize, one_hot: bool) -> PairDataset {
        let images = Array4::from_shape_fn((n, 2, 2, 3), |(i, _, _, _)| i as f32);
        let dense  = Array1::from_iter((0..n).map(|i| i % classes));
        let labels = if one_hot {
            Labels::OneHot(dense_to_one_hot(&dense, classes).unwrap())
        } else {
            Labels::Dense(dense)
        };
        PairDataset::new(images, labels).unwrap()
    }

    /// Recover the sample index from an image built by `dataset`.
    fn index_of(images: &Array4<f32>, row: usize) -> usize {
        images[[row, 0, 0, 0]] as usize
    }

    #[test]
    fn test_label_counts_follow_fraction() {
        let ds      = dataset(200, 4, true);
        let mut rng = StdRng::seed_from_u64(7);

        for &(batch_size, fraction) in &[(16, 0.2), (10, 0.5), (7, 0.3), (12, 0.0), (20, 1.0)] {
            let batch  = sample_pairs(&ds, batch_size, fraction, &mut rng).unwrap();
            let n_same = (batch_size as f64 * fraction).floor() as usize;
            assert_eq!(batch.positives(), n_same);
            assert_eq!(batch.negatives(), batch_size - n_same);
            assert_eq!(batch.anchors.shape(), &[batch_size, 2, 2, 3]);
            assert_eq!(batch.partners.shape(), &[batch_size, 2, 2, 3]);
        }
    }

    #[test]
    fn test_partners_match_labels_and_exclude_anchor() {
        let ds      = dataset(60, 3, false);
        let mut rng = StdRng::seed_from_u64(42);
        let batch   = sample_pairs(&ds, 20, 0.4, &mut rng).unwrap();

        let mut seen = std::collections::HashSet::new();
        for row in 0..20 {
            assert_eq!(index_of(&batch.anchors, row), batch.anchor_index);

            let partner = index_of(&batch.partners, row);
            assert_ne!(partner, batch.anchor_index);
            assert!(seen.insert(partner), "partner {partner} drawn twice");

            let same_class = partner % 3 == batch.anchor_class;
            assert_eq!(same_class, batch.labels[row] == 1.0);
        }
    }

    #[test]
    fn test_same_pool_too_small() {
        // 10 samples over 5 classes: the anchor has exactly one classmate
        let ds      = dataset(10, 5, false);
        let mut rng = StdRng::seed_from_u64(3);
        let err     = sample_pairs(&ds, 4, 0.5, &mut rng).unwrap_err();
        assert!(matches!(
            err,
            DatasetError::InsufficientSamples { needed: 2, available: 1, pool: SamplePool::SameClass, .. }
        ));
    }

    #[test]
    fn test_other_pool_too_small() {
        // Single-class dataset has no negatives at all
        let ds      = dataset(10, 1, false);
        let mut rng = StdRng::seed_from_u64(3);
        let err     = sample_pairs(&ds, 4, 0.5, &mut rng).unwrap_err();
        assert!(matches!(
            err,
            DatasetError::InsufficientSamples { needed: 2, available: 0, pool: SamplePool::OtherClass, .. }
        ));
    }

    #[test]
    fn test_invalid_arguments() {
        let ds      = dataset(10, 2, false);
        let mut rng = StdRng::seed_from_u64(0);
        assert!(matches!(
            sample_pairs(&ds, 4, 1.5, &mut rng),
            Err(DatasetError::InvalidFraction(_))
        ));
        assert!(matches!(
            sample_pairs(&ds, 4, f64::NAN, &mut rng),
            Err(DatasetError::InvalidFraction(_))
        ));
        assert!(matches!(sample_pairs(&ds, 0, 0.5, &mut rng), Err(DatasetError::EmptyBatch)));
    }

    #[test]
    fn test_create_dataset_is_seed_reproducible() {
        let ds = dataset(100, 4, true);
        let a  = create_dataset(&ds, 5, 8, 0.25, &mut StdRng::seed_from_u64(9)).unwrap();
        let b  = create_dataset(&ds, 5, 8, 0.25, &mut StdRng::seed_from_u64(9)).unwrap();
        assert_eq!(a.len(), 5);
        assert_eq!(a, b);
    }

    #[test]
    fn test_same_count_floors() {
        assert_eq!(same_count(128, 0.2), 25);
        assert_eq!(same_count(7, 0.3), 2);
        assert_eq!(same_count(10, 1.0), 10);
    }
}
