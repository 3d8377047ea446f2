//! Word counting: the enumerator and the aggregator working together.
//!
//! Each file is streamed through a word-splitting consumer into a
//! [`WordCounts`] map; per-file maps are combined with [`SumByKey`].
//! Words are maximal runs of non-whitespace characters.
//!
//! ```no_run
//! use ironfold::aggregate::WorkerPool;
//! use ironfold::source::ReadConfig;
//! use ironfold::wordcount::word_counts_par;
//!
//! let pool = WorkerPool::new(8)?;
//! let counts = word_counts_par(&pool, vec!["a.txt", "b.txt"], ReadConfig::default()).claim()?;
//! pool.shutdown();
//! for (word, n) in &counts {
//!     println!("{word}: {n}");
//! }
//! # anyhow::Result::<()>::Ok(())
//! ```

use crate::action::Action;
use crate::aggregate::{Promise, WorkerPool, fold_map, par_fold_map};
use crate::enumerator::{enum_file_chunks, enum_file_lines};
use crate::io::glob::expand_glob_required;
use crate::iteratee::{Step, fold};
use crate::merge::{Sum, SumByKey};
use crate::source::ReadConfig;
use anyhow::Result;
use std::collections::BTreeMap;
use std::path::Path;

/// Word → number of occurrences, ordered by word.
pub type WordCounts = BTreeMap<String, u64>;

/// The merge operator for [`WordCounts`].
pub fn merge_counts() -> SumByKey<String, u64> {
    SumByKey::new()
}

fn count_into(counts: &mut WordCounts, text: &str) {
    for word in text.split_whitespace() {
        match counts.get_mut(word) {
            Some(n) => *n += 1,
            None => {
                counts.insert(word.to_string(), 1);
            }
        }
    }
}

/// Count the words of a line stream. Every line ends a word.
pub fn word_counts_lines<E>() -> Step<E, WordCounts>
where
    E: AsRef<str> + Send + 'static,
{
    fold(WordCounts::new(), |mut counts, line: E| {
        count_into(&mut counts, line.as_ref());
        counts
    })
}

/// Count the words of a chunk stream. A word may continue into the next
/// chunk, so the unfinished tail of each chunk is held back until whitespace
/// or end of input closes it.
pub fn word_counts_chunks<E>() -> Step<E, WordCounts>
where
    E: AsRef<str> + Send + 'static,
{
    fold(
        (WordCounts::new(), String::new()),
        |(mut counts, mut tail), chunk: E| {
            let chunk = chunk.as_ref();
            // Only the new text can hold the last separator; the tail has none.
            let Some(i) = chunk.rfind(char::is_whitespace) else {
                tail.push_str(chunk);
                return (counts, tail);
            };
            let ws = chunk[i..].chars().next().map_or(1, char::len_utf8);
            tail.push_str(&chunk[..i + ws]);
            count_into(&mut counts, &tail);
            tail.clear();
            tail.push_str(&chunk[i + ws..]);
            (counts, tail)
        },
    )
    .map(|(mut counts, tail)| {
        count_into(&mut counts, &tail);
        counts
    })
}

/// Count the total number of words in a line stream.
pub fn word_total_lines<E>() -> Step<E, u64>
where
    E: AsRef<str> + Send + 'static,
{
    fold(0u64, |n, line: E| n + line.as_ref().split_whitespace().count() as u64)
}

/// Stream `path` in chunks and count its words.
pub fn count_words_in_file(path: impl AsRef<Path>, config: &ReadConfig) -> Action<WordCounts> {
    enum_file_chunks(path, config, word_counts_chunks()).and_then(|step| Action::new(|| step.run()))
}

/// Count the total number of words in `path`.
pub fn total_words_in_file(path: impl AsRef<Path>) -> Action<u64> {
    enum_file_lines(path, word_total_lines()).and_then(|step| Action::new(|| step.run()))
}

/// Count words across `paths` on the calling thread.
///
/// # Errors
/// The first file that cannot be opened or read.
pub fn word_counts<P>(paths: impl IntoIterator<Item = P>, config: &ReadConfig) -> Result<WordCounts>
where
    P: AsRef<Path>,
{
    fold_map(
        paths,
        |p: &P| count_words_in_file(p, config).run(),
        merge_counts(),
    )
}

/// Count words across `paths`, one job per file on `pool`.
pub fn word_counts_par<P>(pool: &WorkerPool, paths: Vec<P>, config: ReadConfig) -> Promise<WordCounts>
where
    P: AsRef<Path> + Send + 'static,
{
    par_fold_map(
        pool,
        paths,
        move |p: &P| count_words_in_file(p, &config).run(),
        merge_counts(),
    )
}

/// Count words across every file matching `pattern`.
///
/// # Errors
/// Returns an error if the pattern is invalid or matches nothing; read
/// failures surface from [`Promise::claim`].
pub fn word_counts_glob(
    pool: &WorkerPool,
    pattern: &str,
    config: ReadConfig,
) -> Result<Promise<WordCounts>> {
    let files = expand_glob_required(pattern)?;
    Ok(word_counts_par(pool, files, config))
}

/// Total number of words across `paths`, one job per file on `pool`.
pub fn total_words_par<P>(pool: &WorkerPool, paths: Vec<P>) -> Promise<u64>
where
    P: AsRef<Path> + Send + 'static,
{
    par_fold_map(
        pool,
        paths,
        |p: &P| total_words_in_file(p).run(),
        Sum::<u64>::new(),
    )
}
