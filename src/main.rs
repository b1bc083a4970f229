use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use video_rom::{
    Config, DEFAULT_ARRAY_NAME, DEFAULT_FRAME_RATE, DEFAULT_OUTPUT, Pipeline, ResizeFilter, Size,
};

#[derive(Parser, Debug)]
#[command(name = "video-rom", version)]
#[command(about = "Convert a video or animated image into a Verilog ROM listing of packed YCbCr pixels")]
struct Args {
    /// Video or animated image to convert
    #[arg(env = "VIDEO_ROM_INPUT")]
    input: PathBuf,

    /// Listing to write, replaced if it already exists
    #[arg(short, long, default_value = DEFAULT_OUTPUT)]
    output: PathBuf,

    /// Frame rate requested from the decoder (a hint, not enforced)
    #[arg(long, default_value_t = DEFAULT_FRAME_RATE)]
    fps: f64,

    /// Rescale every frame to WIDTHxHEIGHT before conversion
    #[arg(long)]
    size: Option<Size>,

    /// Resampling filter used with --size (nearest, bilinear, lanczos3)
    #[arg(long, default_value = "bilinear")]
    filter: ResizeFilter,

    /// Identifier of the ROM array in the listing
    #[arg(long, default_value = DEFAULT_ARRAY_NAME)]
    array_name: String,

    /// Convert frames on a single core
    #[arg(long)]
    single_thread: bool,

    /// More log output, repeat for trace level
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Only log warnings and errors
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

impl Args {
    fn log_level(&self) -> &'static str {
        match (self.quiet, self.verbose) {
            (true, _) => "warn",
            (false, 0) => "info",
            (false, 1) => "debug",
            (false, _) => "trace",
        }
    }

    fn into_config(self) -> Config {
        let mut config = Config::new(self.input)
            .with_output(self.output)
            .with_frame_rate(self.fps)
            .with_filter(self.filter)
            .with_multi_thread(!self.single_thread)
            .with_array_name(self.array_name);

        if let Some(size) = self.size {
            config = config.with_size(size);
        }

        config
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(args.log_level()))
        .init();

    let config = args.into_config();
    let input = config.input.clone();
    let output = config.output.clone();

    let mut pipeline = Pipeline::new(config).context("invalid configuration")?;

    let summary = pipeline
        .run()
        .with_context(|| format!("failed to convert {}", input.display()))?;

    log::info!(
        "{} frames, {} ROM words written to {}",
        summary.frames,
        summary.pixels,
        output.display()
    );

    Ok(())
}
