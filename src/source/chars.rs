use super::{ChunkSource, Source};
use crate::iteratee::Input;
use anyhow::Result;
use std::io::Read;
use std::vec;

/// Yields one `char` per pull, reading the file in chunks underneath.
#[derive(Debug)]
pub struct CharSource<R> {
    chunks: ChunkSource<R>,
    pending: vec::IntoIter<char>,
}

impl<R: Read> CharSource<R> {
    /// Read `reader` in chunks of `chunk_size` bytes, one `char` per pull.
    pub fn new(reader: R, chunk_size: usize) -> Self {
        Self::from_chunks(ChunkSource::new(reader, chunk_size))
    }

    /// Unpack an existing chunk driver.
    pub fn from_chunks(chunks: ChunkSource<R>) -> Self {
        Self {
            chunks,
            pending: Vec::new().into_iter(),
        }
    }
}

impl<R: Read> Source for CharSource<R> {
    type Item = char;

    fn pull(&mut self) -> Result<Input<char>> {
        loop {
            if let Some(c) = self.pending.next() {
                return Ok(Input::El(c));
            }
            match self.chunks.pull()? {
                Input::El(text) => {
                    self.pending = text.chars().collect::<Vec<_>>().into_iter();
                }
                Input::Empty => return Ok(Input::Empty),
                Input::Eof => return Ok(Input::Eof),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn delivers_characters_in_order_across_chunks() -> Result<()> {
        let mut src = CharSource::new(Cursor::new("añb"), 2);
        let mut got = Vec::new();
        loop {
            match src.pull()? {
                Input::El(c) => got.push(c),
                Input::Empty => {}
                Input::Eof => break,
            }
        }
        assert_eq!(got, vec!['a', 'ñ', 'b']);
        Ok(())
    }
}
