//! Driving a [`Source`] into an incremental consumer.
//!
//! [`enumerate`] is the pull loop. The `enum_file_*` functions wrap it in a
//! [`bracket`] so the file is opened, enumerated, and closed inside one
//! [`Action`]:
//!
//! ```no_run
//! use ironfold::enumerator::enum_file_lines;
//! use ironfold::iteratee::length;
//!
//! let lines = enum_file_lines("/tmp/test.txt", length()).run()?.run()?;
//! # anyhow::Result::<()>::Ok(())
//! ```
//!
//! The action yields the consumer's state, not its result: a consumer that
//! is still running when the file ends is returned as `Cont` and the caller
//! decides how to finish it, usually with [`Step::run`].

use crate::action::{Action, bracket};
use crate::iteratee::{Input, Step};
use crate::source::{ReadConfig, Source, close, open_chars, open_chunks, open_lines};
use anyhow::Result;
use std::path::Path;

/// Feed `source` into `step` until the consumer finishes or the source ends.
///
/// A `Done` consumer is returned untouched and never fed again. On end of
/// input the consumer is returned as-is, without being sent `Eof`.
///
/// # Errors
/// Returns the first read failure from `source`.
pub fn enumerate<S, A>(source: &mut S, step: Step<S::Item, A>) -> Result<Step<S::Item, A>>
where
    S: Source,
    S::Item: Send + 'static,
    A: Send + 'static,
{
    let mut step = step;
    loop {
        let k = match step {
            Step::Cont(k) => k,
            done @ Step::Done(..) => return Ok(done),
        };
        match source.pull()? {
            Input::Eof => return Ok(Step::Cont(k)),
            input => step = k(input),
        }
    }
}

/// Enumerate the lines of `path` into `step`.
pub fn enum_file_lines<A>(path: impl AsRef<Path>, step: Step<String, A>) -> Action<Step<String, A>>
where
    A: Send + 'static,
{
    let path = path.as_ref();
    bracket(open_lines(path), close, move |src| enumerate(src, step))
        .context(format!("enumerate lines of {}", path.display()))
}

/// Enumerate `path` in text chunks of up to `config.chunk_size` bytes.
pub fn enum_file_chunks<A>(
    path: impl AsRef<Path>,
    config: &ReadConfig,
    step: Step<String, A>,
) -> Action<Step<String, A>>
where
    A: Send + 'static,
{
    let path = path.as_ref();
    bracket(open_chunks(path, config), close, move |src| {
        enumerate(src, step)
    })
    .context(format!("enumerate chunks of {}", path.display()))
}

/// Enumerate `path` one character at a time.
pub fn enum_file_chars<A>(
    path: impl AsRef<Path>,
    config: &ReadConfig,
    step: Step<char, A>,
) -> Action<Step<char, A>>
where
    A: Send + 'static,
{
    let path = path.as_ref();
    bracket(open_chars(path, config), close, move |src| {
        enumerate(src, step)
    })
    .context(format!("enumerate chars of {}", path.display()))
}
