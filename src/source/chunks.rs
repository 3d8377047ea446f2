use super::Source;
use crate::error::Error;
use crate::iteratee::Input;
use anyhow::Result;
use std::io::{ErrorKind, Read};
use std::str;

/// Yields the text of each read as one chunk.
///
/// A read of `chunk_size` bytes may end inside a multi-byte character; those
/// trailing bytes are held back and prefixed to the next read. A read that
/// completes no character at all yields [`Input::Empty`].
#[derive(Debug)]
pub struct ChunkSource<R> {
    reader: R,
    buf: Vec<u8>,
    carry: Vec<u8>,
    offset: u64,
}

impl<R: Read> ChunkSource<R> {
    /// Read `reader` in chunks of up to `chunk_size` bytes (at least 1).
    pub fn new(reader: R, chunk_size: usize) -> Self {
        Self {
            reader,
            buf: vec![0; chunk_size.max(1)],
            carry: Vec::new(),
            offset: 0,
        }
    }

    /// Bytes requested per read.
    pub fn chunk_size(&self) -> usize {
        self.buf.len()
    }

    /// Split off the longest valid UTF-8 prefix of `carry`.
    fn take_decoded(&mut self) -> Result<Option<String>> {
        let valid = match str::from_utf8(&self.carry) {
            Ok(_) => self.carry.len(),
            Err(e) if e.error_len().is_some() => {
                return Err(Error::InvalidUtf8 {
                    offset: self.offset + e.valid_up_to() as u64,
                }
                .into());
            }
            Err(e) => e.valid_up_to(),
        };
        if valid == 0 {
            return Ok(None);
        }
        let rest = self.carry.split_off(valid);
        let bytes = std::mem::replace(&mut self.carry, rest);
        self.offset += valid as u64;
        Ok(Some(String::from_utf8(bytes)?))
    }
}

impl<R: Read> Source for ChunkSource<R> {
    type Item = String;

    fn pull(&mut self) -> Result<Input<String>> {
        let n = match self.reader.read(&mut self.buf) {
            Ok(n) => n,
            Err(e) if e.kind() == ErrorKind::Interrupted => return Ok(Input::Empty),
            Err(e) => return Err(e.into()),
        };
        if n == 0 {
            if self.carry.is_empty() {
                return Ok(Input::Eof);
            }
            return Err(Error::InvalidUtf8 {
                offset: self.offset,
            }
            .into());
        }
        self.carry.extend_from_slice(&self.buf[..n]);
        Ok(match self.take_decoded()? {
            Some(text) => Input::El(text),
            None => Input::Empty,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn short_final_read_is_trimmed() -> Result<()> {
        let mut src = ChunkSource::new(Cursor::new("abcdefg"), 3);
        assert_eq!(src.pull()?, Input::El("abc".to_string()));
        assert_eq!(src.pull()?, Input::El("def".to_string()));
        assert_eq!(src.pull()?, Input::El("g".to_string()));
        assert_eq!(src.pull()?, Input::Eof);
        Ok(())
    }

    #[test]
    fn split_character_is_carried_over() -> Result<()> {
        // "é" is two bytes; a one-byte read cannot complete it.
        let mut src = ChunkSource::new(Cursor::new("é!"), 1);
        assert_eq!(src.pull()?, Input::Empty);
        assert_eq!(src.pull()?, Input::El("é".to_string()));
        assert_eq!(src.pull()?, Input::El("!".to_string()));
        assert_eq!(src.pull()?, Input::Eof);
        Ok(())
    }

    #[test]
    fn invalid_bytes_are_an_error() {
        let mut src = ChunkSource::new(Cursor::new(vec![b'o', b'k', 0xff]), 8);
        let err = src.pull().unwrap_err();
        assert_eq!(
            err.downcast_ref::<Error>(),
            Some(&Error::InvalidUtf8 { offset: 2 })
        );
    }

    #[test]
    fn truncated_character_at_end_is_an_error() -> Result<()> {
        let mut src = ChunkSource::new(Cursor::new(vec![b'a', 0xc3]), 8);
        assert_eq!(src.pull()?, Input::El("a".to_string()));
        let err = src.pull().unwrap_err();
        assert_eq!(
            err.downcast_ref::<Error>(),
            Some(&Error::InvalidUtf8 { offset: 1 })
        );
        Ok(())
    }
}
