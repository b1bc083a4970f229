use image::codecs::gif::GifEncoder;
use image::{Frame, Rgba, RgbaImage, RgbImage};
use std::fs::{self, File};
use std::path::{Path, PathBuf};
use video_rom::{Config, Error, FrameSource, MemorySource, Pipeline, RgbFrame, Stage};

const BLACK: [u8; 3] = [0, 0, 0];
const WHITE: [u8; 3] = [255, 255, 255];
const RED: [u8; 3] = [255, 0, 0];
const BLUE: [u8; 3] = [0, 0, 255];

/// Write an animated GIF where every frame is a row-major list of pixels
fn write_gif(path: &Path, width: u32, frames: &[&[[u8; 3]]]) {
    let file = File::create(path).unwrap();
    let mut encoder = GifEncoder::new(file);

    for pixels in frames {
        let height = pixels.len() as u32 / width;
        let image = RgbaImage::from_fn(width, height, |x, y| {
            let [r, g, b] = pixels[(y * width + x) as usize];
            Rgba([r, g, b, 255])
        });

        encoder.encode_frame(Frame::new(image)).unwrap();
    }
}

fn two_frame_gif(dir: &Path) -> PathBuf {
    let path = dir.join("clip.gif");
    write_gif(&path, 2, &[&[BLACK, WHITE], &[RED, BLUE]]);
    path
}

fn read_lines(path: &Path) -> Vec<String> {
    fs::read_to_string(path)
        .unwrap()
        .lines()
        .map(str::to_owned)
        .collect()
}

#[test]
fn gif_frames_in_order() {
    let dir = tempfile::tempdir().unwrap();
    let input = two_frame_gif(dir.path());
    let output = dir.path().join("output.txt");

    let summary = Pipeline::new(Config::new(&input).with_output(&output))
        .unwrap()
        .run()
        .unwrap();

    assert_eq!(summary.frames, 2);
    assert_eq!(summary.pixels, 4);
    assert_eq!((summary.width, summary.height), (2, 1));

    assert_eq!(
        read_lines(&output),
        vec![
            "ross[0]=30'd4721154;",
            "ross[1]=30'd1070074370;",
            "ross[2]=30'd323312636;",
            "ross[3]=30'd126874032;",
        ]
    );
}

#[test]
fn reruns_replace_previous_listing() {
    let dir = tempfile::tempdir().unwrap();
    let input = two_frame_gif(dir.path());
    let output = dir.path().join("output.txt");
    let config = Config::new(&input).with_output(&output);

    Pipeline::new(config.clone()).unwrap().run().unwrap();
    let first = fs::read(&output).unwrap();

    fs::write(&output, "garbage that must not survive\nross[99]=30'd0;\n").unwrap();

    Pipeline::new(config).unwrap().run().unwrap();
    let second = fs::read(&output).unwrap();

    assert_eq!(first, second);
    assert!(first.ends_with(b"ross[3]=30'd126874032;\n"));
}

#[test]
fn missing_input_leaves_empty_listing() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("output.txt");
    fs::write(&output, "stale").unwrap();

    let err = Pipeline::new(Config::new(dir.path().join("nope.mp4")).with_output(&output))
        .unwrap()
        .run()
        .unwrap_err();

    assert!(matches!(err, Error::SourceUnavailable { .. }));
    assert_eq!(fs::read_to_string(&output).unwrap(), "");
}

#[test]
fn unwritable_listing_is_io_failure() {
    let dir = tempfile::tempdir().unwrap();
    let input = two_frame_gif(dir.path());

    // A directory cannot be opened as the listing file
    let err = Pipeline::new(Config::new(&input).with_output(dir.path()))
        .unwrap()
        .run()
        .unwrap_err();

    assert!(matches!(err, Error::Io { .. }));
}

#[test]
fn still_image_is_one_frame() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("still.png");
    let output = dir.path().join("output.txt");

    RgbImage::from_fn(2, 2, |x, y| image::Rgb(if (x + y) % 2 == 0 { WHITE } else { BLACK }))
        .save(&input)
        .unwrap();

    let summary = Pipeline::new(Config::new(&input).with_output(&output))
        .unwrap()
        .run()
        .unwrap();

    assert_eq!(summary.frames, 1);
    assert_eq!(
        read_lines(&output),
        vec![
            "ross[0]=30'd1070074370;",
            "ross[1]=30'd4721154;",
            "ross[2]=30'd4721154;",
            "ross[3]=30'd1070074370;",
        ]
    );
}

#[test]
fn empty_source_writes_empty_listing() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("output.txt");

    let mut pipeline = Pipeline::new(Config::new("unused").with_output(&output)).unwrap();

    // run_with writes into the sink as given, truncating is up to `run`
    let file = File::create(&output).unwrap();
    let (_, summary) = pipeline
        .run_with(&mut MemorySource::default(), file)
        .unwrap();

    assert_eq!(summary.pixels, 0);
    assert_eq!(pipeline.stage(), Stage::Done);
    assert!(output.exists());
    assert_eq!(fs::read_to_string(&output).unwrap(), "");
}

/// Yields its frames, then a decode error
struct FailingSource {
    frames: MemorySource,
    failed: bool,
}

impl Iterator for FailingSource {
    type Item = Result<RgbFrame, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(frame) = self.frames.next() {
            return Some(frame);
        }

        if self.failed {
            return None;
        }

        self.failed = true;
        Some(Err(Error::DecodeFailure {
            frame: 1,
            source: "corrupt packet".into(),
        }))
    }
}

impl FrameSource for FailingSource {
    fn backend(&self) -> &'static str {
        "failing"
    }
}

#[test]
fn decode_failure_keeps_emitted_frames() {
    let frame = RgbFrame::from_buffer([BLACK, WHITE].concat(), 2, 1).unwrap();
    let mut source = FailingSource {
        frames: MemorySource::new(vec![frame]),
        failed: false,
    };

    let mut pipeline = Pipeline::new(Config::new("unused")).unwrap();
    let mut sink = Vec::new();
    let err = pipeline.run_with(&mut source, &mut sink).unwrap_err();

    assert!(matches!(err, Error::DecodeFailure { frame: 1, .. }));
    assert_eq!(pipeline.stage(), Stage::Decoding);

    // The writer is dropped on the error path, which flushes the first frame
    assert_eq!(
        String::from_utf8(sink).unwrap(),
        "ross[0]=30'd4721154;\nross[1]=30'd1070074370;\n"
    );
}

#[test]
fn custom_array_name_keeps_word_syntax() {
    let dir = tempfile::tempdir().unwrap();
    let input = two_frame_gif(dir.path());
    let output = dir.path().join("rom.txt");

    Pipeline::new(
        Config::new(&input)
            .with_output(&output)
            .with_array_name("pixel_rom"),
    )
    .unwrap()
    .run()
    .unwrap();

    assert_eq!(read_lines(&output)[2], "pixel_rom[2]=30'd323312636;");
}

#[cfg(feature = "resize")]
#[test]
fn resized_frames() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("big.gif");
    let output = dir.path().join("output.txt");

    write_gif(&input, 4, &[&[WHITE; 8], &[BLACK; 8], &[WHITE; 8]]);

    let summary = Pipeline::new(
        Config::new(&input).with_output(&output).with_size(video_rom::Size {
            width: 2,
            height: 1,
        }),
    )
    .unwrap()
    .run()
    .unwrap();

    assert_eq!(summary.frames, 3);
    assert_eq!((summary.width, summary.height), (2, 1));

    let lines = read_lines(&output);
    assert_eq!(lines.len(), 6);
    assert_eq!(lines[0], "ross[0]=30'd1070074370;");
    assert_eq!(lines[3], "ross[3]=30'd4721154;");
    assert_eq!(lines[5], "ross[5]=30'd1070074370;");
}
