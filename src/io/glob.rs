//! Expanding glob patterns into the input lists fed to the aggregator.
//!
//! ```no_run
//! use ironfold::io::glob::expand_glob;
//!
//! let files = expand_glob("corpus/**/*.txt")?;
//! # anyhow::Result::<()>::Ok(())
//! ```

use anyhow::{Context, Result, bail};
use glob::glob;
use std::path::PathBuf;

/// Expand `pattern` into the regular files it matches, sorted by path.
///
/// Directories are skipped. No matches yields an empty vector.
///
/// # Errors
/// Returns an error if the pattern is invalid or a matched entry cannot be read.
pub fn expand_glob(pattern: &str) -> Result<Vec<PathBuf>> {
    let entries = glob(pattern).with_context(|| format!("bad glob {pattern:?}"))?;
    let mut files = entries
        .filter_map(|entry| match entry {
            Ok(path) if !path.is_file() => None,
            other => Some(other.with_context(|| format!("walk glob {pattern:?}"))),
        })
        .collect::<Result<Vec<_>>>()?;
    files.sort_unstable();
    Ok(files)
}

/// Like [`expand_glob`], but zero matches is an error.
///
/// # Errors
/// Returns an error if the pattern is invalid or matches no files.
pub fn expand_glob_required(pattern: &str) -> Result<Vec<PathBuf>> {
    let files = expand_glob(pattern)?;
    if files.is_empty() {
        bail!("glob {pattern:?} matched no files");
    }
    Ok(files)
}
