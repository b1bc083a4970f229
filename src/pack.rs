use crate::YCbCr;
use std::fmt;

const COMPONENT_BITS: u32 = 10;
const COMPONENT_MASK: u32 = (1 << COMPONENT_BITS) - 1;

const Y_SHIFT: u32 = 2 * COMPONENT_BITS;
const CB_SHIFT: u32 = COMPONENT_BITS;

/// One pixel as a ROM word: Y in bits 29..=20, Cb in 19..=10, Cr in 9..=0
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PackedWord(u32);

impl PackedWord {
    /// Width of a ROM word in bits
    pub const BITS: u32 = 3 * COMPONENT_BITS;

    /// Pack a sample, components are expected to fit in 10 bits and are not checked
    #[inline(always)]
    pub fn pack(px: YCbCr) -> Self {
        Self(((px.y as u32) << Y_SHIFT) | ((px.cb as u32) << CB_SHIFT) | px.cr as u32)
    }

    pub fn unpack(self) -> YCbCr {
        YCbCr {
            y: ((self.0 >> Y_SHIFT) & COMPONENT_MASK) as u16,
            cb: ((self.0 >> CB_SHIFT) & COMPONENT_MASK) as u16,
            cr: (self.0 & COMPONENT_MASK) as u16,
        }
    }

    pub fn get(self) -> u32 {
        self.0
    }
}

impl From<YCbCr> for PackedWord {
    fn from(px: YCbCr) -> Self {
        Self::pack(px)
    }
}

impl fmt::Display for PackedWord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}
