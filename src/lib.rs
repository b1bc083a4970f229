//! Convert videos and animated images into Verilog ROM listings.
//!
//! Every decoded frame is converted from RGB to limited range 10 bit YCbCr
//! (codes 4 to 1020), each pixel is packed into one 30 bit word and written as
//! a `ross[<index>]=30'd<word>;` line. The index runs over all frames without
//! ever being reset, in frame, row and column order.
//!
//! ```no_run
//! use video_rom::{Config, Pipeline};
//!
//! let config = Config::new("intro.gif").with_output("rom_init.txt");
//! let summary = Pipeline::new(config)?.run()?;
//! println!("{} words", summary.pixels);
//! # Ok::<(), video_rom::Error>(())
//! ```
//!
//! # Features
//!
//! - `multi-thread` (default): convert each frame on all cores
//! - `resize` (default): rescale frames to a fixed size before conversion
//! - `ffmpeg`: decode video containers through the system FFmpeg libraries

use std::path::{Path, PathBuf};

pub use color::{CODE_MAX, CODE_MIN, YCbCr, YCbCrFrame, convert};
pub use config::{
    Config, ConfigError, DEFAULT_FRAME_RATE, DEFAULT_OUTPUT, ParseFilterError, ParseSizeError,
    ResizeFilter, Size,
};
pub use frame::{FrameError, RgbFrame};
pub use listing::{DEFAULT_ARRAY_NAME, ListingWriter, is_valid_array_name, write_line};
#[cfg(feature = "multi-thread")]
pub use multi_thread::convert_multi_thread;
pub use pack::PackedWord;
pub use pipeline::{Pipeline, RunSummary, Stage};
#[cfg(feature = "resize")]
pub use resize::{ResizeError, Resizer};
pub use source::{FrameSource, MemorySource};

mod color;
mod config;
mod frame;
mod listing;
#[cfg(feature = "multi-thread")]
mod multi_thread;
mod pack;
mod pipeline;
#[cfg(feature = "resize")]
mod resize;
pub mod source;

/// Type erased cause of a decoding failure
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Everything that can abort a conversion run
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("cannot decode media from `{path}`")]
    SourceUnavailable {
        path: PathBuf,
        #[source]
        source: BoxError,
    },

    #[error("failed to decode frame {frame}")]
    DecodeFailure {
        frame: usize,
        #[source]
        source: BoxError,
    },

    #[error("failed to write listing `{path}`")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl Error {
    pub(crate) fn source_unavailable(path: &Path, source: impl Into<BoxError>) -> Self {
        Self::SourceUnavailable {
            path: path.to_path_buf(),
            source: source.into(),
        }
    }

    pub(crate) fn decode_failure(frame: usize, source: impl Into<BoxError>) -> Self {
        Self::DecodeFailure {
            frame,
            source: source.into(),
        }
    }
}
