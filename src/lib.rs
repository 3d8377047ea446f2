//! # Ironfold
//!
//! Resource-safe incremental file processing and parallel fold-merge
//! aggregation.
//!
//! ## Key Features
//!
//! - **Deferred actions** - build effectful computations first, run them later
//! - **Bracketed resources** - files are closed on every exit path
//! - **Incremental consumers** - pull-based state machines that may stop early
//! - **Three read granularities** - lines, text chunks, or single characters
//! - **Parallel fold-merge** - map inputs on a worker pool, merge with any
//!   associative operator, deterministically
//! - **Transparent decompression** - gzip and zstd inputs (feature flags)
//!
//! ## Quick Start
//!
//! ```no_run
//! use ironfold::*;
//!
//! # fn main() -> anyhow::Result<()> {
//! // Stream a file through a consumer that stops after the third line.
//! let third = enum_file_lines("notes.txt", skip(2).bind(|()| head()))
//!     .run()?
//!     .run()?;
//!
//! // Count words across many files in parallel.
//! let pool = WorkerPool::new(8)?;
//! let files = expand_glob("corpus/*.txt")?;
//! let counts = word_counts_par(&pool, files, ReadConfig::default()).claim()?;
//! pool.shutdown();
//! # Ok(())
//! # }
//! ```
//!
//! ## Core Concepts
//!
//! ### Actions
//!
//! An [`Action<T>`] is a computation that has not run yet. [`Action::map`] and
//! [`Action::and_then`] compose actions without running anything;
//! [`Action::run`] executes the chain. [`bracket`] acquires a resource, uses
//! it, and releases it exactly once.
//!
//! ### Consumers and the enumerator
//!
//! A consumer is a [`Step<E, A>`]: `Cont` while it wants more [`Input<E>`],
//! `Done` with a result and any leftover input once it is finished. The
//! [`enumerator`] pulls units from a [`Source`] and feeds the consumer until
//! either side is exhausted.
//!
//! ### Aggregation
//!
//! [`par_fold_map`] fans a mapping function out over a [`WorkerPool`] and fans
//! the partial results back in with a [`Merge`] operator. The returned
//! [`Promise`] blocks in [`Promise::claim`] until the final value is ready.
//!
//! ## Module Overview
//!
//! - [`action`] - deferred actions and `bracket`
//! - [`iteratee`] - consumer states and reusable consumers
//! - [`source`] - line, chunk, and character drivers
//! - [`enumerator`] - the pull loop and bracketed file enumeration
//! - [`merge`] - merge operators
//! - [`aggregate`] - worker pool, promises, and fold-merge
//! - [`wordcount`] - word counting over files
//! - [`io`] - decompression, glob expansion, JSONL export
//! - [`testing`] - fixtures and assertions for tests

pub mod action;
pub mod aggregate;
pub mod enumerator;
pub mod error;
pub mod io;
pub mod iteratee;
pub mod merge;
pub mod source;
pub mod testing;
pub mod wordcount;

pub use action::{Action, bracket};
pub use aggregate::{Promise, WorkerPool, fold_map, par_fold_map};
pub use enumerator::{enum_file_chars, enum_file_chunks, enum_file_lines, enumerate};
pub use error::Error;
pub use io::glob::{expand_glob, expand_glob_required};
pub use iteratee::{
    Input, Step, collect_chars, collect_chunks, fold, head, join_lines, length, list, peek, skip,
};
pub use merge::{Concat, Merge, MergeFn, Sum, SumByKey};
pub use source::{CharSource, ChunkSource, LineSource, ReadConfig, Source};
pub use wordcount::{WordCounts, word_counts, word_counts_par};
