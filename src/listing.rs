use crate::{PackedWord, YCbCrFrame};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

/// Name of the ROM array the display HDL declares
pub const DEFAULT_ARRAY_NAME: &str = "ross";

/// Write one `<array>[<index>]=30'd<word>;` line and return the next index
pub fn write_line<W: Write>(
    out: &mut W,
    array_name: &str,
    index: u64,
    word: PackedWord,
) -> io::Result<u64> {
    writeln!(out, "{array_name}[{index}]={}'d{word};", PackedWord::BITS)?;

    Ok(index + 1)
}

/// Check that `name` is a plain Verilog identifier
pub fn is_valid_array_name(name: &str) -> bool {
    let mut chars = name.chars();

    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }

    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
}

/// Append-only ROM listing with a running pixel index
///
/// The index starts at zero and grows by one for every emitted word, it is
/// never reset for the lifetime of the writer.
pub struct ListingWriter<W: Write> {
    out: BufWriter<W>,
    array_name: String,
    next_index: u64,
}

impl ListingWriter<File> {
    /// Create or truncate the listing file at `path`
    pub fn create(path: impl AsRef<Path>) -> io::Result<Self> {
        File::create(path).map(Self::new)
    }
}

impl<W: Write> ListingWriter<W> {
    pub fn new(inner: W) -> Self {
        Self {
            out: BufWriter::new(inner),
            array_name: DEFAULT_ARRAY_NAME.to_owned(),
            next_index: 0,
        }
    }

    /// Use a different array identifier, must be checked with [`is_valid_array_name`] beforehand
    pub fn with_array_name(mut self, name: impl Into<String>) -> Self {
        self.array_name = name.into();
        self
    }

    /// Number of lines written so far, also the index of the next line
    pub fn count(&self) -> u64 {
        self.next_index
    }

    pub fn emit(&mut self, word: PackedWord) -> io::Result<u64> {
        self.next_index = write_line(&mut self.out, &self.array_name, self.next_index, word)?;

        Ok(self.next_index)
    }

    /// Emit every sample of a frame in row-major order
    pub fn emit_frame(&mut self, frame: &YCbCrFrame) -> io::Result<u64> {
        for &px in frame.samples() {
            self.emit(PackedWord::pack(px))?;
        }

        Ok(self.next_index)
    }

    pub fn flush(&mut self) -> io::Result<()> {
        self.out.flush()
    }

    /// Flush everything and hand back the inner writer with the final line count
    pub fn finish(self) -> io::Result<(W, u64)> {
        let count = self.next_index;
        let inner = self.out.into_inner().map_err(|e| e.into_error())?;

        Ok((inner, count))
    }
}
