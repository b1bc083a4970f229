/// Smallest code a component may take, codes below are reserved by the display
pub const CODE_MIN: u16 = 4;

/// Largest code a component may take, codes above are reserved by the display
pub const CODE_MAX: u16 = 1020;

/// Width of the usable code window
const CODE_SPAN: f32 = (CODE_MAX - CODE_MIN) as f32;

/// Full scale of an 8 bit component
const FULL_SCALE: f32 = 255.0;

/// Map an 8 bit scale component into the 10 bit limited code window.
///
/// Rounds half to even, then saturates into `CODE_MIN..=CODE_MAX`.
#[inline(always)]
pub(crate) fn quantize(v: f32) -> u16 {
    let scaled = v * CODE_SPAN / FULL_SCALE + CODE_MIN as f32;

    scaled
        .round_ties_even()
        .clamp(CODE_MIN as f32, CODE_MAX as f32) as u16
}
