use super::Source;
use crate::iteratee::Input;
use anyhow::Result;
use std::io::BufRead;

/// Yields one line per pull with the `\n` / `\r\n` terminator removed.
#[derive(Debug)]
pub struct LineSource<R> {
    reader: R,
}

impl<R: BufRead> LineSource<R> {
    /// Read lines from `reader`.
    pub fn new(reader: R) -> Self {
        Self { reader }
    }
}

impl<R: BufRead> Source for LineSource<R> {
    type Item = String;

    fn pull(&mut self) -> Result<Input<String>> {
        let mut line = String::new();
        if self.reader.read_line(&mut line)? == 0 {
            return Ok(Input::Eof);
        }
        if line.ends_with('\n') {
            line.pop();
            if line.ends_with('\r') {
                line.pop();
            }
        }
        Ok(Input::El(line))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn strips_both_terminator_styles() -> Result<()> {
        let mut src = LineSource::new(Cursor::new("a\r\nb\nc"));
        assert_eq!(src.pull()?, Input::El("a".to_string()));
        assert_eq!(src.pull()?, Input::El("b".to_string()));
        assert_eq!(src.pull()?, Input::El("c".to_string()));
        assert_eq!(src.pull()?, Input::Eof);
        Ok(())
    }

    #[test]
    fn trailing_newline_does_not_add_a_line() -> Result<()> {
        let mut src = LineSource::new(Cursor::new("a\n"));
        assert_eq!(src.pull()?, Input::El("a".to_string()));
        assert_eq!(src.pull()?, Input::Eof);
        Ok(())
    }
}
