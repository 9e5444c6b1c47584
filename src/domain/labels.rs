// ============================================================
// Layer 3 — Label Arrays
// ============================================================
// Labels travel alongside an image array, one row per sample.
// They come in two encodings:
//
//   Dense  → [N]            class index per sample
//   OneHot → [N, classes]   1.0 in the class column, 0.0 elsewhere
//
// The pair sampler only needs "which class is sample i", so
// both encodings answer `class_of`. For one-hot rows this is
// the argmax, which makes one-hot → dense lossless.
//
// Reference: Rust Book §6 (Enums and Pattern Matching)

use ndarray::{s, Array1, Array2, ArrayView1, Axis};

#[derive(Debug, Clone, PartialEq)]
pub enum Labels {
    Dense(Array1<usize>),
    OneHot(Array2<f32>),
}

impl Labels {
    /// Number of labelled samples (the leading dimension).
    pub fn len(&self) -> usize {
        match self {
            Labels::Dense(l)  => l.len(),
            Labels::OneHot(l) => l.nrows(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_one_hot(&self) -> bool {
        matches!(self, Labels::OneHot(_))
    }

    /// Class index of sample `i`.
    ///
    /// # Panics
    /// Panics if `i` is out of bounds, like any array index.
    pub fn class_of(&self, i: usize) -> usize {
        match self {
            Labels::Dense(l)  => l[i],
            Labels::OneHot(l) => argmax(l.row(i)),
        }
    }

    /// Class index of every sample, in order.
    pub fn classes(&self) -> Array1<usize> {
        match self {
            Labels::Dense(l)  => l.clone(),
            Labels::OneHot(l) => l.axis_iter(Axis(0)).map(argmax).collect(),
        }
    }

    /// Rows `start..end` as a new label array of the same encoding.
    pub fn slice(&self, start: usize, end: usize) -> Self {
        match self {
            Labels::Dense(l)  => Labels::Dense(l.slice(s![start..end]).to_owned()),
            Labels::OneHot(l) => Labels::OneHot(l.slice(s![start..end, ..]).to_owned()),
        }
    }
}

/// Index of the largest value; first one wins on ties.
pub fn argmax(row: ArrayView1<f32>) -> usize {
    let mut best     = 0;
    let mut best_val = f32::NEG_INFINITY;
    for (i, &v) in row.iter().enumerate() {
        if v > best_val {
            best     = i;
            best_val = v;
        }
    }
    best
}
