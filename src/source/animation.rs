use super::{FrameSource, MemorySource};
use crate::{Error, RgbFrame};
use image::codecs::gif::GifDecoder;
use image::codecs::png::PngDecoder;
use image::codecs::webp::WebPDecoder;
use image::{
    AnimationDecoder, DynamicImage, Frame, Frames, ImageError, ImageFormat, ImageReader,
};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Frames of a GIF, APNG or animated WebP, composited onto the full canvas
pub(crate) struct AnimationSource {
    frames: Frames<'static>,
    next_index: usize,
}

impl AnimationSource {
    fn new(frames: Frames<'static>) -> Self {
        Self {
            frames,
            next_index: 0,
        }
    }
}

impl Iterator for AnimationSource {
    type Item = Result<RgbFrame, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        let frame = self.frames.next()?;

        let index = self.next_index;
        self.next_index += 1;

        Some(
            frame
                .map_err(|e| Error::decode_failure(index, e))
                .and_then(|frame| to_rgb(frame).map_err(|e| Error::decode_failure(index, e))),
        )
    }
}

impl FrameSource for AnimationSource {
    fn backend(&self) -> &'static str {
        "image animation"
    }
}

/// Alpha is dropped, the display has no notion of transparency
fn to_rgb(frame: Frame) -> Result<RgbFrame, crate::FrameError> {
    let rgb = DynamicImage::ImageRgba8(frame.into_buffer()).into_rgb8();
    let (width, height) = rgb.dimensions();

    RgbFrame::from_buffer(rgb.into_raw(), width as usize, height as usize)
}

fn reader(path: &Path) -> Result<BufReader<File>, Error> {
    File::open(path)
        .map(BufReader::new)
        .map_err(|e| Error::source_unavailable(path, e))
}

/// Open an image file, animated formats yield every frame, everything else exactly one.
///
/// Returns `None` when the format was recognized but this build has no decoder for it.
pub(super) fn open(
    path: &Path,
    format: ImageFormat,
    frame_rate: f64,
) -> Result<Option<Box<dyn FrameSource>>, Error> {
    let unavailable = |e: ImageError| Error::source_unavailable(path, e);

    let frames = match format {
        ImageFormat::Gif => Some(GifDecoder::new(reader(path)?).map_err(unavailable)?.into_frames()),
        ImageFormat::Png => {
            let decoder = PngDecoder::new(reader(path)?).map_err(unavailable)?;

            if decoder.is_apng().map_err(unavailable)? {
                Some(decoder.apng().map_err(unavailable)?.into_frames())
            } else {
                None
            }
        }
        ImageFormat::WebP => {
            let decoder = WebPDecoder::new(reader(path)?).map_err(unavailable)?;

            if decoder.has_animation() {
                Some(decoder.into_frames())
            } else {
                None
            }
        }
        _ => None,
    };

    match frames {
        Some(frames) => {
            log::debug!(
                "AnimationSource: {format:?} carries its own frame delays, ignoring the {frame_rate} fps hint"
            );

            Ok(Some(Box::new(AnimationSource::new(frames))))
        }
        None => Ok(open_still(path)?.map(|s| Box::new(s) as Box<dyn FrameSource>)),
    }
}

/// Decode a single image as a one frame sequence
fn open_still(path: &Path) -> Result<Option<MemorySource>, Error> {
    let image = ImageReader::open(path)
        .and_then(|reader| reader.with_guessed_format())
        .map_err(|e| Error::source_unavailable(path, e))?
        .decode();

    let rgb = match image {
        Ok(image) => image.into_rgb8(),
        Err(ImageError::Unsupported(e)) => {
            log::debug!("AnimationSource: no image decoder for {}: {e}", path.display());
            return Ok(None);
        }
        Err(e) => return Err(Error::source_unavailable(path, e)),
    };

    let (width, height) = rgb.dimensions();
    let frame = RgbFrame::from_buffer(rgb.into_raw(), width as usize, height as usize)
        .map_err(|e| Error::source_unavailable(path, e))?;

    log::debug!("AnimationSource: {} is a still image", path.display());

    Ok(Some(MemorySource::new(vec![frame])))
}
