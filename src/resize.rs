use crate::config::{ResizeFilter, Size};
use crate::{FrameError, RgbFrame};
use fir::images::{Image, ImageRef};
use fir::{FilterType, PixelType, ResizeAlg, ResizeOptions};

/// Everything that can go wrong when calling [`Resizer::resize`]
#[derive(Debug, thiserror::Error)]
pub enum ResizeError {
    #[error("frame of {width}x{height} pixels is too large to resample")]
    TooLarge { width: usize, height: usize },

    #[error(transparent)]
    Buffer(#[from] fir::ImageBufferError),

    #[error(transparent)]
    Resample(#[from] fir::ResizeError),

    #[error(transparent)]
    Frame(#[from] FrameError),
}

impl From<ResizeFilter> for ResizeAlg {
    fn from(filter: ResizeFilter) -> Self {
        match filter {
            ResizeFilter::Nearest => ResizeAlg::Nearest,
            ResizeFilter::Bilinear => ResizeAlg::Convolution(FilterType::Bilinear),
            ResizeFilter::Lanczos3 => ResizeAlg::Convolution(FilterType::Lanczos3),
        }
    }
}

/// Wrapper over [`fast_image_resize`](fir) scaling every frame to one fixed size
pub struct Resizer {
    target: Size,
    options: ResizeOptions,
    fir: fir::Resizer,
}

impl Resizer {
    pub fn new(target: Size, filter: ResizeFilter) -> Self {
        Self {
            target,
            options: ResizeOptions::new().resize_alg(filter.into()),
            fir: fir::Resizer::new(),
        }
    }

    /// Resample `frame` to the target size, frames that already match are returned as is
    pub fn resize(&mut self, frame: RgbFrame) -> Result<RgbFrame, ResizeError> {
        let (width, height) = frame.dimensions();

        if width == self.target.width as usize && height == self.target.height as usize {
            return Ok(frame);
        }

        let too_large = || ResizeError::TooLarge { width, height };
        let src_width = u32::try_from(width).map_err(|_| too_large())?;
        let src_height = u32::try_from(height).map_err(|_| too_large())?;

        let src = ImageRef::new(src_width, src_height, frame.as_bytes(), PixelType::U8x3)?;
        let mut dst = Image::new(self.target.width, self.target.height, PixelType::U8x3);

        self.fir.resize(&src, &mut dst, &self.options)?;

        Ok(RgbFrame::from_buffer(
            dst.into_vec(),
            self.target.width as usize,
            self.target.height as usize,
        )?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solid(width: usize, height: usize, rgb: [u8; 3]) -> RgbFrame {
        let buffer = rgb.repeat(width * height);
        RgbFrame::from_buffer(buffer, width, height).unwrap()
    }

    #[test]
    fn same_size_passes_through() {
        let frame = solid(4, 3, [1, 2, 3]);
        let mut resizer = Resizer::new(
            Size {
                width: 4,
                height: 3,
            },
            ResizeFilter::Bilinear,
        );

        assert_eq!(resizer.resize(frame.clone()).unwrap(), frame);
    }

    #[test]
    fn downscale_solid_color() {
        let mut resizer = Resizer::new(
            Size {
                width: 8,
                height: 4,
            },
            ResizeFilter::Bilinear,
        );

        let out = resizer.resize(solid(32, 16, [200, 100, 50])).unwrap();

        assert_eq!(out.dimensions(), (8, 4));
        assert!(out.pixels().all(|px| px == [200, 100, 50]));
    }

    #[test]
    fn nearest_upscale() {
        let mut resizer = Resizer::new(
            Size {
                width: 4,
                height: 2,
            },
            ResizeFilter::Nearest,
        );

        let src = RgbFrame::from_buffer(vec![255, 0, 0, 0, 0, 255], 2, 1).unwrap();
        let out = resizer.resize(src).unwrap();

        assert_eq!(out.dimensions(), (4, 2));
        assert_eq!(out.pixel(0, 0), Some([255, 0, 0]));
        assert_eq!(out.pixel(3, 1), Some([0, 0, 255]));
    }
}
