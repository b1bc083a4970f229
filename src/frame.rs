/// Number of bytes used by one RGB8 pixel
pub const BYTES_PER_PIXEL: usize = 3;

/// One decoded video frame, packed RGB8 in row-major order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RgbFrame {
    buffer: Vec<u8>,
    width: usize,
    height: usize,
}

/// Everything that can go wrong when constructing an [`RgbFrame`]
#[derive(Debug, thiserror::Error)]
pub enum FrameError {
    #[error("width or height must not be zero")]
    InvalidDimensions,

    #[error("frame dimensions {width}x{height} overflow the address space")]
    TooLarge { width: usize, height: usize },

    #[error("buffer holds {got} bytes but a {width}x{height} RGB frame needs {expected}")]
    BufferSize {
        width: usize,
        height: usize,
        expected: usize,
        got: usize,
    },

    #[error("row stride {stride} is smaller than the {minimum} bytes a row needs")]
    InvalidStride { stride: usize, minimum: usize },
}

impl RgbFrame {
    /// Required buffer size of a packed RGB frame with the given dimensions
    pub fn buffer_size(width: usize, height: usize) -> Option<usize> {
        width
            .checked_mul(height)
            .and_then(|pixels| pixels.checked_mul(BYTES_PER_PIXEL))
    }

    /// Frame filled with black pixels
    pub fn blank(width: usize, height: usize) -> Result<Self, FrameError> {
        let size = Self::checked_size(width, height)?;

        Ok(Self {
            buffer: vec![0u8; size],
            width,
            height,
        })
    }

    /// Take ownership of a tightly packed RGB buffer
    pub fn from_buffer(buffer: Vec<u8>, width: usize, height: usize) -> Result<Self, FrameError> {
        let expected = Self::checked_size(width, height)?;

        if buffer.len() != expected {
            return Err(FrameError::BufferSize {
                width,
                height,
                expected,
                got: buffer.len(),
            });
        }

        Ok(Self {
            buffer,
            width,
            height,
        })
    }

    /// Copy a frame out of a buffer whose rows are `stride` bytes apart.
    ///
    /// Decoders commonly pad rows for alignment, the padding is dropped here.
    pub fn from_strided(
        data: &[u8],
        stride: usize,
        width: usize,
        height: usize,
    ) -> Result<Self, FrameError> {
        let size = Self::checked_size(width, height)?;
        let row_len = width * BYTES_PER_PIXEL;

        if stride < row_len {
            return Err(FrameError::InvalidStride {
                stride,
                minimum: row_len,
            });
        }

        // The last row does not need to carry its padding
        let needed = stride
            .checked_mul(height - 1)
            .and_then(|n| n.checked_add(row_len))
            .ok_or(FrameError::TooLarge { width, height })?;

        if data.len() < needed {
            return Err(FrameError::BufferSize {
                width,
                height,
                expected: needed,
                got: data.len(),
            });
        }

        let mut buffer = Vec::with_capacity(size);
        for row in data.chunks(stride).take(height) {
            buffer.extend_from_slice(&row[..row_len]);
        }

        Ok(Self {
            buffer,
            width,
            height,
        })
    }

    fn checked_size(width: usize, height: usize) -> Result<usize, FrameError> {
        if width == 0 || height == 0 {
            return Err(FrameError::InvalidDimensions);
        }

        Self::buffer_size(width, height).ok_or(FrameError::TooLarge { width, height })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn dimensions(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    pub fn pixel_count(&self) -> usize {
        self.width * self.height
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.buffer
    }

    pub fn as_bytes_mut(&mut self) -> &mut [u8] {
        &mut self.buffer
    }

    /// RGB sample at column `x` of row `y`
    pub fn pixel(&self, x: usize, y: usize) -> Option<[u8; 3]> {
        if x >= self.width || y >= self.height {
            return None;
        }

        let offset = (y * self.width + x) * BYTES_PER_PIXEL;
        let px = &self.buffer[offset..offset + BYTES_PER_PIXEL];

        Some([px[0], px[1], px[2]])
    }

    /// All pixels, row by row, left to right
    pub fn pixels(&self) -> impl ExactSizeIterator<Item = [u8; 3]> + '_ {
        self.buffer
            .chunks_exact(BYTES_PER_PIXEL)
            .map(|px| [px[0], px[1], px[2]])
    }
}
