// ============================================================
// Layer 3 — Image Geometry
// ============================================================
// Describes the shape of one image. The on-disk batch format
// has no header, so the record size (1 label byte + pixels)
// is derived entirely from this struct.
//
// In memory images are laid out NHWC:
//   [sample, row, column, channel]
// On disk each record is channel-planar (CHW):
//   label | R plane | G plane | B plane

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageGeometry {
    pub height:   usize,
    pub width:    usize,
    pub channels: usize,
}

impl ImageGeometry {
    /// CIFAR-10: 32×32 RGB.
    pub const CIFAR10: Self = Self { height: 32, width: 32, channels: 3 };

    pub fn new(height: usize, width: usize, channels: usize) -> Self {
        Self { height, width, channels }
    }

    /// Number of pixel values in one image.
    pub fn pixels(&self) -> usize {
        self.height * self.width * self.channels
    }

    /// Bytes per on-disk record: one label byte followed by the pixels.
    pub fn record_size(&self) -> usize {
        1 + self.pixels()
    }

    /// NHWC shape for `n` images.
    pub fn batch_shape(&self, n: usize) -> [usize; 4] {
        [n, self.height, self.width, self.channels]
    }
}

impl Default for ImageGeometry {
    fn default() -> Self {
        Self::CIFAR10
    }
}
