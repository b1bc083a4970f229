use crate::listing::{DEFAULT_ARRAY_NAME, is_valid_array_name};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// File name the listing is written to when nothing else is configured
pub const DEFAULT_OUTPUT: &str = "output.txt";

/// Frame rate requested from decoders, the display runs at 59.94 Hz
pub const DEFAULT_FRAME_RATE: f64 = 59.94;

/// Everything that is wrong with a [`Config`]
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("`{0}` is not a valid Verilog identifier for the ROM array")]
    InvalidArrayName(String),

    #[error("frame rate must be a positive number, got {0}")]
    InvalidFrameRate(f64),

    #[error("output size must not be zero, got {0}")]
    ZeroSize(Size),

    #[error("resizing requires the `resize` feature")]
    ResizeUnsupported,
}

/// Settings of one conversion run
#[derive(Debug, Clone)]
pub struct Config {
    /// Video or animated image to convert
    pub input: PathBuf,
    /// Listing file, truncated at the start of the run
    pub output: PathBuf,
    /// Frame rate hint handed to the decoder
    pub frame_rate: f64,
    /// Rescale every frame to this size before conversion
    pub size: Option<Size>,
    pub filter: ResizeFilter,
    /// Convert frames on all cores, only has an effect with the `multi-thread` feature
    pub multi_thread: bool,
    /// Identifier of the ROM array in the listing
    pub array_name: String,
}

impl Config {
    pub fn new(input: impl Into<PathBuf>) -> Self {
        Self {
            input: input.into(),
            output: PathBuf::from(DEFAULT_OUTPUT),
            frame_rate: DEFAULT_FRAME_RATE,
            size: None,
            filter: ResizeFilter::default(),
            multi_thread: true,
            array_name: DEFAULT_ARRAY_NAME.to_owned(),
        }
    }

    pub fn with_output(mut self, output: impl Into<PathBuf>) -> Self {
        self.output = output.into();
        self
    }

    pub fn with_frame_rate(mut self, frame_rate: f64) -> Self {
        self.frame_rate = frame_rate;
        self
    }

    pub fn with_size(mut self, size: Size) -> Self {
        self.size = Some(size);
        self
    }

    pub fn with_filter(mut self, filter: ResizeFilter) -> Self {
        self.filter = filter;
        self
    }

    pub fn with_multi_thread(mut self, multi_thread: bool) -> Self {
        self.multi_thread = multi_thread;
        self
    }

    pub fn with_array_name(mut self, array_name: impl Into<String>) -> Self {
        self.array_name = array_name.into();
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !is_valid_array_name(&self.array_name) {
            return Err(ConfigError::InvalidArrayName(self.array_name.clone()));
        }

        if !self.frame_rate.is_finite() || self.frame_rate <= 0.0 {
            return Err(ConfigError::InvalidFrameRate(self.frame_rate));
        }

        if let Some(size) = self.size {
            if size.width == 0 || size.height == 0 {
                return Err(ConfigError::ZeroSize(size));
            }

            if !cfg!(feature = "resize") {
                return Err(ConfigError::ResizeUnsupported);
            }
        }

        Ok(())
    }
}

/// Output resolution in pixels, parsed from `WIDTHxHEIGHT`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Size {
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, thiserror::Error)]
#[error("expected WIDTHxHEIGHT (e.g. 640x480), got `{0}`")]
pub struct ParseSizeError(String);

impl FromStr for Size {
    type Err = ParseSizeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseSizeError(s.to_owned());

        let (width, height) = s
            .trim()
            .split_once(['x', 'X'])
            .ok_or_else(err)?;

        Ok(Self {
            width: width.trim().parse().map_err(|_| err())?,
            height: height.trim().parse().map_err(|_| err())?,
        })
    }
}

impl fmt::Display for Size {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Sampling filter used when rescaling frames
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ResizeFilter {
    Nearest,
    #[default]
    Bilinear,
    Lanczos3,
}

#[derive(Debug, thiserror::Error)]
#[error("unknown resize filter `{0}`, expected nearest, bilinear or lanczos3")]
pub struct ParseFilterError(String);

impl FromStr for ResizeFilter {
    type Err = ParseFilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "nearest" => Ok(Self::Nearest),
            "bilinear" => Ok(Self::Bilinear),
            "lanczos3" | "lanczos" => Ok(Self::Lanczos3),
            _ => Err(ParseFilterError(s.to_owned())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = Config::new("clip.gif");

        assert_eq!(config.output, PathBuf::from("output.txt"));
        assert_eq!(config.frame_rate, 59.94);
        assert_eq!(config.array_name, "ross");
        assert!(config.size.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn parse_size() {
        assert_eq!(
            "640x480".parse::<Size>().unwrap(),
            Size {
                width: 640,
                height: 480
            }
        );
        assert_eq!(
            " 32X16 ".parse::<Size>().unwrap(),
            Size {
                width: 32,
                height: 16
            }
        );
        assert!("640".parse::<Size>().is_err());
        assert!("640x".parse::<Size>().is_err());
        assert!("-1x2".parse::<Size>().is_err());
    }

    #[test]
    fn parse_filter() {
        assert_eq!("Nearest".parse::<ResizeFilter>().unwrap(), ResizeFilter::Nearest);
        assert_eq!("lanczos".parse::<ResizeFilter>().unwrap(), ResizeFilter::Lanczos3);
        assert!("cubic".parse::<ResizeFilter>().is_err());
    }

    #[test]
    fn rejects_bad_values() {
        let bad_name = Config::new("a.gif").with_array_name("rom data");
        assert!(matches!(
            bad_name.validate(),
            Err(ConfigError::InvalidArrayName(_))
        ));

        for rate in [0.0, -30.0, f64::NAN, f64::INFINITY] {
            let bad_rate = Config::new("a.gif").with_frame_rate(rate);
            assert!(matches!(
                bad_rate.validate(),
                Err(ConfigError::InvalidFrameRate(_))
            ));
        }

        let bad_size = Config::new("a.gif").with_size(Size {
            width: 0,
            height: 10,
        });
        assert!(matches!(bad_size.validate(), Err(ConfigError::ZeroSize(_))));
    }
}
