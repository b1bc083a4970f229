use super::FrameSource;
use crate::{Error, RgbFrame};

/// Frames that are already decoded, e.g. still images or generated test patterns
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    frames: std::vec::IntoIter<RgbFrame>,
}

impl MemorySource {
    pub fn new(frames: Vec<RgbFrame>) -> Self {
        Self {
            frames: frames.into_iter(),
        }
    }
}

impl Iterator for MemorySource {
    type Item = Result<RgbFrame, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        self.frames.next().map(Ok)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.frames.size_hint()
    }
}

impl FrameSource for MemorySource {
    fn backend(&self) -> &'static str {
        "memory"
    }
}
