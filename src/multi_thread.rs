use crate::color::{YCbCr, YCbCrFrame, convert, convert_slice};
use crate::frame::BYTES_PER_PIXEL;
use crate::RgbFrame;
use rayon::iter::{IndexedParallelIterator, ParallelIterator};
use rayon::slice::{ParallelSlice, ParallelSliceMut};

/// Convert a frame using all available cores.
///
/// The frame is cut into horizontal bands that are written into disjoint
/// parts of one output buffer, so the result is in row-major order and
/// identical to [`convert`].
#[inline(never)]
pub fn convert_multi_thread(frame: &RgbFrame) -> YCbCrFrame {
    let threads = num_cpus::get();

    if threads == 1 || frame.height() == 1 {
        return convert(frame);
    }

    let rows_per_band = frame.height().div_ceil(threads);
    let band_pixels = rows_per_band * frame.width();

    let mut samples = vec![YCbCr::FLOOR; frame.pixel_count()];

    frame
        .as_bytes()
        .par_chunks(band_pixels * BYTES_PER_PIXEL)
        .zip(samples.par_chunks_mut(band_pixels))
        .for_each(|(src, dst)| convert_slice(src, dst));

    YCbCrFrame::new(samples, frame.width(), frame.height())
}
