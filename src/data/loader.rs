// ============================================================
// Layer 4 — CIFAR-10 Batch Loader
// ============================================================
// Reads the binary CIFAR-10 distribution (cifar-10-batches-bin).
//
// Directory layout:
//   data_batch_1.bin … data_batch_5.bin   (10,000 images each)
//   test_batch.bin                        (10,000 images)
//   batches.meta.txt                      (class names, optional)
//
// Every shard is a headerless run of fixed-size records:
//
//   ┌───────┬──────────────┬──────────────┬──────────────┐
//   │ label │  R  (32×32)  │  G  (32×32)  │  B  (32×32)  │
//   │ 1 byte│  1024 bytes  │  1024 bytes  │  1024 bytes  │
//   └───────┴──────────────┴──────────────┴──────────────┘
//
// Planes are row-major. We read them as [N, C, H, W] and
// permute to [N, H, W, C] so each image is pixel-interleaved.
//
// Reference: Krizhevsky (2009) Learning Multiple Layers of
//            Features from Tiny Images, "binary version"
//            Rust Book §9 (Error Handling)

use ndarray::{concatenate, Array1, Array4, Axis};
use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::domain::error::{DatasetError, DatasetResult};
use crate::domain::geometry::ImageGeometry;
use crate::domain::traits::{ImageSource, RawSplits};

/// Number of training shards in the distribution.
pub const TRAIN_SHARDS: usize = 5;

/// File name of the test shard.
pub const TEST_SHARD: &str = "test_batch.bin";

/// File with one class name per line.
pub const META_FILE: &str = "batches.meta.txt";

/// Class names used when `batches.meta.txt` is absent.
pub const CIFAR10_LABEL_NAMES: [&str; 10] = [
    "airplane", "automobile", "bird", "cat", "deer",
    "dog", "frog", "horse", "ship", "truck",
];

/// File name of training shard `n` (1-based).
pub fn train_shard_name(n: usize) -> String {
    format!("data_batch_{n}.bin")
}

/// Loads CIFAR-10 shards from a directory.
/// Implements the ImageSource trait from Layer 3.
pub struct Cifar10Loader {
    /// Directory holding the shard files
    dir: PathBuf,
    /// Image layout; decides the record size
    geometry: ImageGeometry,
}

impl Cifar10Loader {
    /// Create a loader for the standard 32×32×3 layout.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir:      dir.into(),
            geometry: ImageGeometry::CIFAR10,
        }
    }

    /// Override the image layout (tests use tiny images).
    pub fn with_geometry(mut self, geometry: ImageGeometry) -> Self {
        self.geometry = geometry;
        self
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Load a single shard: images [N, H, W, C] and labels [N].
    pub fn load_batch(&self, path: &Path) -> DatasetResult<(Array4<f32>, Array1<usize>)> {
        if !path.exists() {
            return Err(DatasetError::MissingFile(path.to_path_buf()));
        }

        let bytes = fs::read(path).map_err(|source| DatasetError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let (images, labels) = parse_batch(&bytes, self.geometry)?;
        tracing::debug!("Loaded {} ({} images)", path.display(), labels.len());
        Ok((images, labels))
    }

    /// Load all five training shards (concatenated in order)
    /// and the test shard.
    pub fn load_all(&self) -> DatasetResult<RawSplits> {
        let mut shard_images = Vec::with_capacity(TRAIN_SHARDS);
        let mut shard_labels = Vec::with_capacity(TRAIN_SHARDS);

        for b in 1..=TRAIN_SHARDS {
            let (x, y) = self.load_batch(&self.dir.join(train_shard_name(b)))?;
            shard_images.push(x);
            shard_labels.push(y);
        }

        // concatenate() takes views, so borrow each shard
        let image_views: Vec<_> = shard_images.iter().map(|x| x.view()).collect();
        let label_views: Vec<_> = shard_labels.iter().map(|y| y.view()).collect();
        let train_images = concatenate(Axis(0), &image_views)?;
        let train_labels = concatenate(Axis(0), &label_views)?;

        let (test_images, test_labels) = self.load_batch(&self.dir.join(TEST_SHARD))?;

        tracing::info!(
            "Loaded {} training and {} test images from '{}'",
            train_labels.len(),
            test_labels.len(),
            self.dir.display()
        );

        Ok(RawSplits {
            train_images,
            train_labels,
            test_images,
            test_labels,
        })
    }

    /// Read class names from `batches.meta.txt`.
    /// Falls back to the standard CIFAR-10 names.
    pub fn load_label_names(&self) -> Vec<String> {
        let path = self.dir.join(META_FILE);
        match fs::read_to_string(&path) {
            Ok(text) => text
                .lines()
                .map(str::trim)
                .filter(|l| !l.is_empty())
                .map(String::from)
                .collect(),
            Err(e) => {
                tracing::warn!(
                    "No label names at '{}' ({e}), using CIFAR-10 defaults",
                    path.display()
                );
                CIFAR10_LABEL_NAMES.iter().map(|s| s.to_string()).collect()
            }
        }
    }
}

impl ImageSource for Cifar10Loader {
    fn load_raw(&self) -> DatasetResult<RawSplits> {
        self.load_all()
    }

    fn geometry(&self) -> ImageGeometry {
        self.geometry
    }

    fn label_names(&self) -> Vec<String> {
        self.load_label_names()
    }
}

/// Decode one shard's bytes into NHWC float images and labels.
pub fn parse_batch(
    bytes:    &[u8],
    geometry: ImageGeometry,
) -> DatasetResult<(Array4<f32>, Array1<usize>)> {
    let record_size = geometry.record_size();
    if bytes.is_empty() || bytes.len() % record_size != 0 {
        return Err(DatasetError::MalformedBatch {
            len: bytes.len(),
            record_size,
        });
    }

    let n          = bytes.len() / record_size;
    let mut labels = Vec::with_capacity(n);
    let mut pixels = Vec::with_capacity(n * geometry.pixels());

    for record in bytes.chunks_exact(record_size) {
        labels.push(record[0] as usize);
        pixels.extend(record[1..].iter().map(|&p| p as f32));
    }

    let chw = Array4::from_shape_vec(
        (n, geometry.channels, geometry.height, geometry.width),
        pixels,
    )?;

    // [N, C, H, W] → [N, H, W, C], then make it contiguous again
    let hwc = chw
        .permuted_axes([0, 2, 3, 1])
        .as_standard_layout()
        .into_owned();

    Ok((hwc, Array1::from(labels)))
}

// ─── Test Fixtures ────────────────────────────────────────────────────────────
// Synthetic shards in the on-disk format, shared by tests in
// other modules.
#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;

    /// Encode records given as (label, CHW pixel bytes).
    pub fn encode_batch(records: &[(u8, Vec<u8>)]) -> Vec<u8> {
        let mut buf = Vec::new();
        for (label, pixels) in records {
            buf.push(*label);
            buf.extend_from_slice(pixels);
        }
        buf
    }

    /// Write a full six-shard directory. Sample `i` (counting
    /// across all shards) has label `i % num_classes` and every
    /// pixel of channel `c` set to `(i * 3 + c) % 256`.
    pub fn write_dataset(
        dir:         &Path,
        geometry:    ImageGeometry,
        per_shard:   usize,
        num_classes: usize,
    ) {
        let plane = geometry.height * geometry.width;
        let mut i = 0usize;
        let mut names: Vec<String> = (1..=TRAIN_SHARDS).map(train_shard_name).collect();
        names.push(TEST_SHARD.to_string());

        for name in names {
            let mut records = Vec::with_capacity(per_shard);
            for _ in 0..per_shard {
                let mut pixels = Vec::with_capacity(geometry.pixels());
                for c in 0..geometry.channels {
                    pixels.extend(std::iter::repeat(((i * 3 + c) % 256) as u8).take(plane));
                }
                records.push(((i % num_classes) as u8, pixels));
                i += 1;
            }
            fs::write(dir.join(name), encode_batch(&records)).unwrap();
        }
    }
}
