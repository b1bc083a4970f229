//! Frame sources, turning media files into a lazy sequence of [`RgbFrame`]s.

use crate::{Error, RgbFrame};
use image::ImageReader;
use std::path::Path;

mod animation;
mod memory;
#[cfg(feature = "ffmpeg")]
mod video;

pub use memory::MemorySource;

/// Forward only sequence of decoded frames in presentation order
///
/// The sequence ends with `None` once the decoder has no more frames, a
/// decode error is yielded as `Some(Err(_))`.
pub trait FrameSource: Iterator<Item = Result<RgbFrame, Error>> {
    /// Short name of the decoding backend
    fn backend(&self) -> &'static str;
}

/// Open `path` with the first backend that recognizes it.
///
/// Image formats are sniffed from the file contents by the `image` crate.
/// Everything else, including image formats this build cannot decode, is
/// handed to FFmpeg when the `ffmpeg` feature is enabled.
/// `frame_rate` is passed to the decoder as a hint and may be ignored.
pub fn open(path: &Path, frame_rate: f64) -> Result<Box<dyn FrameSource>, Error> {
    if !path.is_file() {
        return Err(Error::source_unavailable(path, "no such file"));
    }

    let format = ImageReader::open(path)
        .and_then(|reader| reader.with_guessed_format())
        .map_err(|e| Error::source_unavailable(path, e))?
        .format();

    let image = match format {
        Some(format) => animation::open(path, format, frame_rate)?,
        None => None,
    };

    let source = match image {
        Some(source) => source,
        None => open_video(path, frame_rate)?,
    };

    log::info!(
        "FrameSource: decoding {} with the {} backend",
        path.display(),
        source.backend()
    );

    Ok(source)
}

#[cfg(feature = "ffmpeg")]
fn open_video(path: &Path, frame_rate: f64) -> Result<Box<dyn FrameSource>, Error> {
    video::VideoSource::open(path, frame_rate).map(|s| Box::new(s) as Box<dyn FrameSource>)
}

#[cfg(not(feature = "ffmpeg"))]
fn open_video(path: &Path, _frame_rate: f64) -> Result<Box<dyn FrameSource>, Error> {
    Err(Error::source_unavailable(
        path,
        "not a decodable image, rebuild with `--features ffmpeg` to read video files",
    ))
}
