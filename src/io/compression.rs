//! Transparent decompression of input files.
//!
//! Drivers open files through [`open_reader`], which wraps the file in a
//! decompressor when the path extension or the leading magic bytes identify a
//! known codec. Uncompressed files pass through unchanged.
//!
//! ## Built-in Codecs
//!
//! - **Gzip** (`.gz`) via `flate2` (feature: `compression-gzip`)
//! - **Zstd** (`.zst`) via `zstd` (feature: `compression-zstd`)
//!
//! Extensions are checked first; magic bytes are only peeked when the
//! extension is not recognized.

use anyhow::{Context, Result};
use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

/// A decoded byte stream that can be handed to a worker thread.
pub type FileReader = Box<dyn Read + Send>;

/// A decompression codec for input files.
pub trait Codec: Send + Sync {
    /// Human-readable codec name (e.g., "gzip").
    fn name(&self) -> &str;

    /// Lowercase file extensions with the leading dot.
    fn extensions(&self) -> &[&str];

    /// Signature at the start of a stream, if the format has one.
    fn magic_bytes(&self) -> Option<&[u8]>;

    fn wrap_reader(&self, reader: FileReader) -> std::io::Result<FileReader>;
}

fn builtin_codecs() -> Vec<Box<dyn Codec>> {
    vec![
        #[cfg(feature = "compression-gzip")]
        Box::new(GzipCodec),
        #[cfg(feature = "compression-zstd")]
        Box::new(ZstdCodec),
    ]
}

fn detect_from_extension(path: &Path) -> Option<Box<dyn Codec>> {
    let path_str = path.to_string_lossy().to_lowercase();
    builtin_codecs()
        .into_iter()
        .find(|codec| codec.extensions().iter().any(|ext| path_str.ends_with(ext)))
}

fn detect_from_magic<R: BufRead>(reader: &mut R) -> Option<Box<dyn Codec>> {
    let buf = reader.fill_buf().ok()?;
    if buf.is_empty() {
        return None;
    }
    builtin_codecs().into_iter().find(|codec| {
        codec
            .magic_bytes()
            .is_some_and(|magic| buf.starts_with(magic))
    })
}

/// Wrap `reader` with a decompressor if `path_hint` or the stream header names
/// a known codec.
///
/// # Errors
/// Returns an error if the codec fails to initialize.
pub fn auto_detect_reader<R: Read + Send + 'static>(
    reader: R,
    path_hint: impl AsRef<Path>,
) -> Result<FileReader> {
    if let Some(codec) = detect_from_extension(path_hint.as_ref()) {
        return codec
            .wrap_reader(Box::new(reader))
            .with_context(|| format!("wrap reader with {} codec", codec.name()));
    }

    let mut buf_reader = BufReader::new(reader);
    if let Some(codec) = detect_from_magic(&mut buf_reader) {
        return codec
            .wrap_reader(Box::new(buf_reader))
            .with_context(|| format!("wrap reader with {} codec", codec.name()));
    }

    Ok(Box::new(buf_reader))
}

/// Open `path` for reading, decompressing if needed.
///
/// # Errors
/// Returns an error if the file cannot be opened or its codec fails to start.
pub fn open_reader(path: &Path) -> Result<FileReader> {
    let f = File::open(path).with_context(|| format!("open {}", path.display()))?;
    auto_detect_reader(f, path)
        .with_context(|| format!("setup decompression for {}", path.display()))
}

#[cfg(feature = "compression-gzip")]
struct GzipCodec;

#[cfg(feature = "compression-gzip")]
impl Codec for GzipCodec {
    fn name(&self) -> &str {
        "gzip"
    }

    fn extensions(&self) -> &[&str] {
        &[".gz", ".gzip"]
    }

    fn magic_bytes(&self) -> Option<&[u8]> {
        Some(&[0x1f, 0x8b])
    }

    fn wrap_reader(&self, reader: FileReader) -> std::io::Result<FileReader> {
        use flate2::read::MultiGzDecoder;
        Ok(Box::new(MultiGzDecoder::new(reader)))
    }
}

#[cfg(feature = "compression-zstd")]
struct ZstdCodec;

#[cfg(feature = "compression-zstd")]
impl Codec for ZstdCodec {
    fn name(&self) -> &str {
        "zstd"
    }

    fn extensions(&self) -> &[&str] {
        &[".zst", ".zstd"]
    }

    fn magic_bytes(&self) -> Option<&[u8]> {
        Some(&[0x28, 0xb5, 0x2f, 0xfd])
    }

    fn wrap_reader(&self, reader: FileReader) -> std::io::Result<FileReader> {
        zstd::stream::read::Decoder::new(reader).map(|d| Box::new(d) as FileReader)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn plain_text_passes_through() -> Result<()> {
        let mut r = auto_detect_reader(Cursor::new(b"hello".to_vec()), "notes.txt")?;
        let mut s = String::new();
        r.read_to_string(&mut s)?;
        assert_eq!(s, "hello");
        Ok(())
    }

    #[cfg(feature = "compression-gzip")]
    #[test]
    fn gzip_detected_by_magic_bytes() -> Result<()> {
        use flate2::Compression;
        use flate2::write::GzEncoder;
        use std::io::Write;

        let mut enc = GzEncoder::new(Vec::new(), Compression::default());
        enc.write_all(b"compressed words")?;
        let bytes = enc.finish()?;

        let mut r = auto_detect_reader(Cursor::new(bytes), "no-extension")?;
        let mut s = String::new();
        r.read_to_string(&mut s)?;
        assert_eq!(s, "compressed words");
        Ok(())
    }
}
