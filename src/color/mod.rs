pub(crate) mod quantize;
pub(crate) mod space;

use crate::RgbFrame;
use quantize::quantize;

pub use quantize::{CODE_MAX, CODE_MIN};

pub(crate) mod mat_idxs {
    pub(crate) const Y: usize = 0;
    pub(crate) const CB: usize = 1;
    pub(crate) const CR: usize = 2;

    pub(crate) const R: usize = 0;
    pub(crate) const G: usize = 1;
    pub(crate) const B: usize = 2;
}

/// One pixel in limited range 10 bit YCbCr
///
/// Every component lies in `CODE_MIN..=CODE_MAX` when produced by
/// [`YCbCr::from_rgb`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct YCbCr {
    pub y: u16,
    pub cb: u16,
    pub cr: u16,
}

impl YCbCr {
    /// Lowest code on every component
    pub const FLOOR: Self = Self {
        y: CODE_MIN,
        cb: CODE_MIN,
        cr: CODE_MIN,
    };

    pub fn from_rgb([r, g, b]: [u8; 3]) -> Self {
        let (y, cb, cr) = space::rgb_to_ycbcr(r as f32, g as f32, b as f32);

        Self {
            y: quantize(y),
            cb: quantize(cb),
            cr: quantize(cr),
        }
    }
}

/// A frame of [`YCbCr`] samples with the same shape as its source [`RgbFrame`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct YCbCrFrame {
    samples: Vec<YCbCr>,
    width: usize,
    height: usize,
}

impl YCbCrFrame {
    pub(crate) fn new(samples: Vec<YCbCr>, width: usize, height: usize) -> Self {
        debug_assert_eq!(samples.len(), width * height);

        Self {
            samples,
            width,
            height,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// All samples, row by row, left to right
    pub fn samples(&self) -> &[YCbCr] {
        &self.samples
    }

    pub fn get(&self, x: usize, y: usize) -> Option<YCbCr> {
        if x >= self.width || y >= self.height {
            return None;
        }

        Some(self.samples[y * self.width + x])
    }

    pub fn rows(&self) -> std::slice::ChunksExact<'_, YCbCr> {
        self.samples.chunks_exact(self.width)
    }
}

/// Convert a whole frame on the calling thread
pub fn convert(frame: &RgbFrame) -> YCbCrFrame {
    let mut samples = vec![YCbCr::FLOOR; frame.pixel_count()];

    convert_slice(frame.as_bytes(), &mut samples);

    YCbCrFrame::new(samples, frame.width(), frame.height())
}

/// Convert packed RGB bytes into `dst`, one sample per 3 bytes
#[inline(never)]
pub(crate) fn convert_slice(src: &[u8], dst: &mut [YCbCr]) {
    debug_assert_eq!(src.len(), dst.len() * 3);

    for (px, out) in src.chunks_exact(3).zip(dst) {
        *out = YCbCr::from_rgb([px[0], px[1], px[2]]);
    }
}
