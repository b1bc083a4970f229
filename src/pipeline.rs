use crate::color::{self, YCbCrFrame};
#[cfg(feature = "resize")]
use crate::resize::Resizer;
use crate::source::{self, FrameSource};
use crate::{Config, Error, ListingWriter, RgbFrame};
use std::fs::File;
use std::io::{self, Write};

/// Where a run currently is, or where it stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Pulling the next frame out of the source
    Decoding,
    Converting(usize),
    Emitting(usize),
    /// Releasing the buffers of a finished frame
    Cleanup(usize),
    Done,
}

/// Outcome of a finished run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub frames: usize,
    /// Lines in the listing, one per pixel
    pub pixels: u64,
    /// Frame size after resizing, zero when no frame was decoded
    pub width: usize,
    pub height: usize,
}

/// Drives frames from a source through conversion into the listing
///
/// Frames are handled strictly one after another, and any failure aborts the
/// run. Lines already written stay in the listing.
pub struct Pipeline {
    config: Config,
    #[cfg(feature = "resize")]
    resizer: Option<Resizer>,
    stage: Stage,
}

impl Pipeline {
    pub fn new(config: Config) -> Result<Self, Error> {
        config.validate()?;

        Ok(Self {
            #[cfg(feature = "resize")]
            resizer: config.size.map(|size| Resizer::new(size, config.filter)),
            config,
            stage: Stage::Decoding,
        })
    }

    /// Last stage entered, [`Stage::Done`] after a successful run
    pub fn stage(&self) -> Stage {
        self.stage
    }

    /// Truncate the listing file, open the configured input and convert it
    pub fn run(&mut self) -> Result<RunSummary, Error> {
        log::info!(
            "Pipeline: converting {} into {}",
            self.config.input.display(),
            self.config.output.display()
        );

        // Truncate first so a failed run never leaves a stale listing behind
        let file = File::create(&self.config.output).map_err(|e| self.io_error(e))?;

        let mut frames = source::open(&self.config.input, self.config.frame_rate)?;
        let (file, summary) = self.run_with(frames.as_mut(), file)?;

        file.sync_all().map_err(|e| self.io_error(e))?;

        Ok(summary)
    }

    /// Convert every frame of `source` into `sink`, returning the flushed sink
    pub fn run_with<W: Write>(
        &mut self,
        source: &mut dyn FrameSource,
        sink: W,
    ) -> Result<(W, RunSummary), Error> {
        let mut listing = ListingWriter::new(sink).with_array_name(self.config.array_name.as_str());

        let mut frames = 0;
        let mut dimensions = None;

        loop {
            self.enter(Stage::Decoding);

            let Some(frame) = source.next() else {
                break;
            };
            let frame = self.prepare(frame?, frames)?;

            match dimensions {
                None => dimensions = Some(frame.dimensions()),
                Some((width, height)) if (width, height) != frame.dimensions() => {
                    return Err(Error::decode_failure(
                        frames,
                        format!(
                            "frame is {}x{} but the first frame was {width}x{height}",
                            frame.width(),
                            frame.height()
                        ),
                    ));
                }
                Some(_) => {}
            }

            self.enter(Stage::Converting(frames));
            let converted = self.convert(&frame);
            drop(frame);

            self.enter(Stage::Emitting(frames));
            let start = listing.count();
            let end = listing
                .emit_frame(&converted)
                .map_err(|e| self.io_error(e))?;

            log::debug!(
                "Pipeline: frame {frames} ({}x{}) -> lines {start}..{end}",
                converted.width(),
                converted.height()
            );

            self.enter(Stage::Cleanup(frames));
            drop(converted);

            frames += 1;
        }

        let (sink, pixels) = listing.finish().map_err(|e| self.io_error(e))?;
        let (width, height) = dimensions.unwrap_or((0, 0));

        self.enter(Stage::Done);
        log::info!("Pipeline: wrote {pixels} words from {frames} frames of {width}x{height}");

        Ok((
            sink,
            RunSummary {
                frames,
                pixels,
                width,
                height,
            },
        ))
    }

    fn enter(&mut self, stage: Stage) {
        log::trace!("Pipeline: {stage:?}");
        self.stage = stage;
    }

    #[cfg(feature = "resize")]
    fn prepare(&mut self, frame: RgbFrame, index: usize) -> Result<RgbFrame, Error> {
        match &mut self.resizer {
            Some(resizer) => resizer
                .resize(frame)
                .map_err(|e| Error::decode_failure(index, e)),
            None => Ok(frame),
        }
    }

    #[cfg(not(feature = "resize"))]
    fn prepare(&mut self, frame: RgbFrame, _index: usize) -> Result<RgbFrame, Error> {
        Ok(frame)
    }

    fn convert(&self, frame: &RgbFrame) -> YCbCrFrame {
        #[cfg(feature = "multi-thread")]
        if self.config.multi_thread {
            return crate::convert_multi_thread(frame);
        }

        color::convert(frame)
    }

    fn io_error(&self, source: io::Error) -> Error {
        Error::Io {
            path: self.config.output.clone(),
            source,
        }
    }
}
