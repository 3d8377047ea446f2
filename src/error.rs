//! Typed failures that callers may want to match on.
//!
//! Everything else travels as [`anyhow::Error`] with context attached at the
//! point of failure. These variants can be recovered with
//! `err.downcast_ref::<ironfold::Error>()`.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A consumer was still asking for input after it had been sent `Eof`.
    #[error("consumer diverged: still running after end of input")]
    Diverged,

    /// A mapping or merge job panicked on a worker thread.
    #[error("worker panicked: {0}")]
    WorkerPanicked(String),

    /// A worker pool was asked for zero threads.
    #[error("worker pool size must be at least 1 (got {0})")]
    InvalidPoolSize(usize),

    /// The input ended in the middle of a UTF-8 sequence, or contained bytes
    /// that are not UTF-8 at all.
    #[error("input is not valid UTF-8 at byte offset {offset}")]
    InvalidUtf8 { offset: u64 },
}
