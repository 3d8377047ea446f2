//! JSON Lines export of aggregated counts.
//!
//! One [`CountRecord`] per line, in key order, so two runs over the same
//! inputs produce byte-identical files.

use crate::wordcount::WordCounts;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs::{File, create_dir_all};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

/// A single `word → count` entry as written to disk.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountRecord {
    pub word: String,
    pub count: u64,
}

/// Write `counts` as JSONL. Parent directories are created as needed.
///
/// # Returns
/// The number of records written.
///
/// # Errors
/// Returns an error if the file cannot be created or written.
pub fn write_counts_jsonl(path: impl AsRef<Path>, counts: &WordCounts) -> Result<usize> {
    let path = path.as_ref();
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        create_dir_all(parent).with_context(|| format!("mkdir -p {}", parent.display()))?;
    }
    let f = File::create(path).with_context(|| format!("create {}", path.display()))?;
    let mut w = BufWriter::new(f);
    for (word, &count) in counts {
        let rec = CountRecord {
            word: word.clone(),
            count,
        };
        serde_json::to_writer(&mut w, &rec)
            .with_context(|| format!("serialize {word:?} to {}", path.display()))?;
        w.write_all(b"\n")?;
    }
    w.flush()?;
    Ok(counts.len())
}

/// Read a file written by [`write_counts_jsonl`] back into a count map.
///
/// Blank lines are skipped. A word appearing on several lines has its counts
/// summed.
///
/// # Errors
/// Returns an error if the file cannot be read or a line fails to parse.
pub fn read_counts_jsonl(path: impl AsRef<Path>) -> Result<WordCounts> {
    let path = path.as_ref();
    let f = File::open(path).with_context(|| format!("open {}", path.display()))?;
    let mut out = WordCounts::new();
    for (i, line) in BufReader::new(f).lines().enumerate() {
        let line = line.with_context(|| format!("read line {} in {}", i + 1, path.display()))?;
        if line.trim().is_empty() {
            continue;
        }
        let rec: CountRecord = serde_json::from_str(&line)
            .with_context(|| format!("parse JSONL line {} in {}", i + 1, path.display()))?;
        *out.entry(rec.word).or_insert(0) += rec.count;
    }
    Ok(out)
}
