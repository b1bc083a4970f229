use super::FrameSource;
use crate::{Error, RgbFrame};
use ffmpeg_next::codec::context::Context as CodecContext;
use ffmpeg_next::decoder::Video as VideoDecoder;
use ffmpeg_next::format::{Pixel, context::Input};
use ffmpeg_next::frame::Video as VideoFrame;
use ffmpeg_next::media::Type;
use ffmpeg_next::software::scaling::{Context as ScalingContext, Flags as ScalingFlags};
use ffmpeg_next::{Dictionary, util::error::EAGAIN};
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DecodeState {
    /// Packets are still being read from the container
    Reading,
    /// End of input was sent, collecting frames buffered in the decoder
    Draining,
    Finished,
}

/// Frames of the best video stream of any container FFmpeg can demux
pub(crate) struct VideoSource {
    input: Input,
    stream_index: usize,
    decoder: VideoDecoder,
    scaler: ScalingContext,
    decoded: VideoFrame,
    scaled: VideoFrame,
    next_index: usize,
    state: DecodeState,
}

impl VideoSource {
    pub(crate) fn open(path: &Path, frame_rate: f64) -> Result<Self, Error> {
        let unavailable = |e: ffmpeg_next::Error| Error::source_unavailable(path, e);

        ffmpeg_next::init().map_err(unavailable)?;

        // Only honored by demuxers without their own timing (raw streams, image sequences)
        let mut options = Dictionary::new();
        options.set("framerate", &frame_rate.to_string());

        let input = ffmpeg_next::format::input_with_dictionary(path, options).map_err(unavailable)?;

        let (stream_index, decoder) = {
            let stream = input
                .streams()
                .best(Type::Video)
                .ok_or_else(|| Error::source_unavailable(path, "no video stream"))?;

            let context = CodecContext::from_parameters(stream.parameters()).map_err(unavailable)?;

            (stream.index(), context.decoder().video().map_err(unavailable)?)
        };

        let scaler = ScalingContext::get(
            decoder.format(),
            decoder.width(),
            decoder.height(),
            Pixel::RGB24,
            decoder.width(),
            decoder.height(),
            ScalingFlags::BILINEAR,
        )
        .map_err(unavailable)?;

        log::debug!(
            "VideoSource: stream {stream_index}, {}x{} {:?}, requested {frame_rate} fps",
            decoder.width(),
            decoder.height(),
            decoder.format(),
        );

        Ok(Self {
            input,
            stream_index,
            decoder,
            scaler,
            decoded: VideoFrame::empty(),
            scaled: VideoFrame::empty(),
            next_index: 0,
            state: DecodeState::Reading,
        })
    }

    fn to_rgb(&mut self) -> Result<RgbFrame, crate::BoxError> {
        self.scaler.run(&self.decoded, &mut self.scaled)?;

        let frame = RgbFrame::from_strided(
            self.scaled.data(0),
            self.scaled.stride(0),
            self.scaled.width() as usize,
            self.scaled.height() as usize,
        )?;

        Ok(frame)
    }

    /// Hand the next packet of our stream to the decoder, or signal end of input
    fn feed(&mut self) -> Result<(), ffmpeg_next::Error> {
        let stream_index = self.stream_index;
        let packet = self
            .input
            .packets()
            .find_map(|(stream, packet)| (stream.index() == stream_index).then_some(packet));

        match packet {
            Some(packet) => self.decoder.send_packet(&packet),
            None => {
                log::trace!("VideoSource: end of input, draining decoder");
                self.state = DecodeState::Draining;
                self.decoder.send_eof()
            }
        }
    }

    fn fail(&mut self, e: impl Into<crate::BoxError>) -> Option<Result<RgbFrame, Error>> {
        self.state = DecodeState::Finished;
        Some(Err(Error::decode_failure(self.next_index, e)))
    }
}

impl Iterator for VideoSource {
    type Item = Result<RgbFrame, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if self.state == DecodeState::Finished {
                return None;
            }

            match self.decoder.receive_frame(&mut self.decoded) {
                Ok(()) => {
                    let index = self.next_index;
                    self.next_index += 1;

                    return Some(self.to_rgb().map_err(|e| Error::decode_failure(index, e)));
                }
                Err(ffmpeg_next::Error::Eof) => {
                    self.state = DecodeState::Finished;
                    return None;
                }
                Err(ffmpeg_next::Error::Other { errno }) if errno == EAGAIN => {}
                Err(e) => return self.fail(e),
            }

            if self.state == DecodeState::Draining {
                self.state = DecodeState::Finished;
                return None;
            }

            if let Err(e) = self.feed() {
                return self.fail(e);
            }
        }
    }
}

impl FrameSource for VideoSource {
    fn backend(&self) -> &'static str {
        "ffmpeg"
    }
}
