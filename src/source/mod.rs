//! Resource drivers: pull-based readers over a file at three granularities.
//!
//! - [`LineSource`] -- one line per pull, terminator stripped.
//! - [`ChunkSource`] -- up to `chunk_size` bytes per pull, decoded as text.
//! - [`CharSource`] -- the same chunks, unpacked one `char` per pull.
//!
//! Each driver implements [`Source`]. The `open_*` functions return
//! [`Action`]s that acquire a driver over a file; [`close`] is the matching
//! release. The [`enumerator`](crate::enumerator) pairs them with
//! [`bracket`](crate::action::bracket).

mod chars;
mod chunks;
mod lines;

pub use chars::CharSource;
pub use chunks::ChunkSource;
pub use lines::LineSource;

use crate::action::Action;
use crate::io::compression::{FileReader, open_reader};
use crate::iteratee::Input;
use anyhow::Result;
use std::io::BufReader;
use std::path::Path;
use tracing::debug;

/// Default number of bytes requested per chunked read.
pub const DEFAULT_CHUNK_SIZE: usize = 4096;

/// A pull-based producer of [`Input`] units.
pub trait Source {
    type Item;

    /// Produce the next unit: an element, `Empty` when a read made no
    /// progress, or `Eof` once the input is exhausted.
    ///
    /// # Errors
    /// Returns the underlying read failure.
    fn pull(&mut self) -> Result<Input<Self::Item>>;
}

/// Settings for chunked drivers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ReadConfig {
    /// Bytes requested from the reader per pull. Values below 1 are treated as 1.
    pub chunk_size: usize,
}

impl Default for ReadConfig {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
        }
    }
}

/// Drivers over an opened (possibly decompressed) file.
pub type FileLines = LineSource<BufReader<FileReader>>;
pub type FileChunks = ChunkSource<FileReader>;
pub type FileChars = CharSource<FileReader>;

/// Open `path` as a line driver.
pub fn open_lines(path: impl AsRef<Path>) -> Action<FileLines> {
    let path = path.as_ref().to_path_buf();
    Action::new(move || {
        let reader = open_reader(&path)?;
        debug!(path = %path.display(), "opened line source");
        Ok(LineSource::new(BufReader::new(reader)))
    })
}

/// Open `path` as a chunk driver.
pub fn open_chunks(path: impl AsRef<Path>, config: &ReadConfig) -> Action<FileChunks> {
    let path = path.as_ref().to_path_buf();
    let chunk_size = config.chunk_size;
    Action::new(move || {
        let reader = open_reader(&path)?;
        debug!(path = %path.display(), chunk_size, "opened chunk source");
        Ok(ChunkSource::new(reader, chunk_size))
    })
}

/// Open `path` as a character driver.
pub fn open_chars(path: impl AsRef<Path>, config: &ReadConfig) -> Action<FileChars> {
    open_chunks(path, config).map(CharSource::from_chunks)
}

/// Release a driver, closing its underlying reader.
pub fn close<S: Source + Send + 'static>(source: S) -> Action<()> {
    Action::new(move || {
        drop(source);
        debug!("closed source");
        Ok(())
    })
}
