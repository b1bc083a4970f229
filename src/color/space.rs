use crate::color::mat_idxs::*;

/// BT.601 luma and color difference weights
///
/// Rows are Y, Cb, Cr and columns R, G, B. The chroma rows use the rounded
/// three digit coefficients the display firmware was calibrated against.
pub(crate) const RGB_TO_YCBCR: [[f32; 3]; 3] = [
    [0.299, 0.587, 0.114],
    [-0.169, -0.331, 0.5],
    [0.5, -0.419, -0.081],
];

/// Cb and Cr are centered on the middle of the 8 bit range
pub(crate) const CHROMA_OFFSET: f32 = 128.0;

/// Convert 8 bit scale RGB (0.0..=255.0) into 8 bit scale YCbCr.
///
/// Evaluated strictly left to right in single precision so results match the
/// reference listings bit for bit.
#[inline(always)]
pub(crate) fn rgb_to_ycbcr(r: f32, g: f32, b: f32) -> (f32, f32, f32) {
    let m = &RGB_TO_YCBCR;

    let y = m[Y][R] * r + m[Y][G] * g + m[Y][B] * b;
    let cb = CHROMA_OFFSET + (m[CB][R] * r + m[CB][G] * g + m[CB][B] * b);
    let cr = CHROMA_OFFSET + (m[CR][R] * r + m[CR][G] * g + m[CR][B] * b);

    (y, cb, cr)
}
