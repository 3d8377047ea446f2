//! Scratch files and sample corpora for tests and demos.

use crate::wordcount::WordCounts;
use anyhow::{Context, Result};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Write `content` to `dir/name` and return the path.
///
/// # Errors
/// Returns an error if the file cannot be created or written.
pub fn write_file(dir: &Path, name: &str, content: &str) -> Result<PathBuf> {
    let path = dir.join(name);
    let mut w = BufWriter::new(
        File::create(&path).with_context(|| format!("create {}", path.display()))?,
    );
    w.write_all(content.as_bytes())?;
    w.flush()?;
    Ok(path)
}

/// The decimal numbers `0..n` written back to back (`"0123456789101112..."`).
///
/// Useful for files that span many read chunks without any separators.
#[must_use]
pub fn numbers_text(n: usize) -> String {
    (0..n).map(|i| i.to_string()).collect()
}

/// A generated word-count corpus and the counts it must produce.
pub struct SampleCorpus {
    /// Owns the files; they are removed when this is dropped.
    pub dir: TempDir,
    pub files: Vec<PathBuf>,
    pub expected: WordCounts,
}

/// Write `num_files` files into `dir`. File `i` holds the word `File{i}`
/// followed by `someword0 .. someword{num_shared_words - 1}`, one per line.
///
/// Every `File{i}` is expected once and every shared word `num_files` times.
///
/// # Errors
/// Returns an error if a file cannot be written.
pub fn write_sample_files(
    dir: &Path,
    num_files: usize,
    num_shared_words: usize,
) -> Result<(Vec<PathBuf>, WordCounts)> {
    let mut expected = WordCounts::new();
    let mut files = Vec::with_capacity(num_files);
    for i in 0..num_files {
        let mut content = format!("File{i}\n");
        expected.insert(format!("File{i}"), 1);
        for j in 0..num_shared_words {
            content.push_str(&format!("\nsomeword{j}"));
            expected.insert(format!("someword{j}"), num_files as u64);
        }
        files.push(write_file(dir, &format!("wordcount-{i}.txt"), &content)?);
    }
    Ok((files, expected))
}

/// [`write_sample_files`] into a fresh temporary directory.
///
/// # Errors
/// Returns an error if the directory or a file cannot be created.
pub fn sample_corpus(num_files: usize, num_shared_words: usize) -> Result<SampleCorpus> {
    let dir = tempfile::Builder::new()
        .prefix("ironfold-corpus-")
        .tempdir()
        .context("create corpus directory")?;
    let (files, expected) = write_sample_files(dir.path(), num_files, num_shared_words)?;
    Ok(SampleCorpus {
        dir,
        files,
        expected,
    })
}
