//! Testing utilities for code built on Ironfold.
//!
//! - **Fixtures**: write scratch text files and the sample word-count corpus
//! - **Assertions**: compare ordered maps with readable failure messages
//!
//! # Quick Start
//!
//! ```no_run
//! use ironfold::*;
//! use ironfold::testing::*;
//!
//! # fn main() -> anyhow::Result<()> {
//! let corpus = sample_corpus(10, 20)?;
//! let counts = word_counts(&corpus.files, &ReadConfig::default())?;
//! assert_counts_equal(&counts, &corpus.expected);
//! # Ok(())
//! # }
//! ```

pub mod assertions;
pub mod fixtures;

pub use assertions::*;
pub use fixtures::*;
