use anyhow::Result;
use ironfold::aggregate::WorkerPool;
use ironfold::io::jsonl::{read_counts_jsonl, write_counts_jsonl};
use ironfold::source::ReadConfig;
use ironfold::testing::{assert_counts_equal, sample_corpus, write_file};
use ironfold::wordcount::{
    count_words_in_file, total_words_in_file, total_words_par, word_counts, word_counts_glob,
    word_counts_par,
};
use tempfile::tempdir;

#[test]
fn sequential_count_over_corpus() -> Result<()> {
    let corpus = sample_corpus(100, 200)?;
    let counts = word_counts(&corpus.files, &ReadConfig::default())?;

    assert_eq!(counts.len(), 300);
    assert_eq!(counts.get("File0"), Some(&1));
    assert_eq!(counts.get("File99"), Some(&1));
    assert_eq!(counts.get("someword0"), Some(&100));
    assert_eq!(counts.get("someword199"), Some(&100));
    assert_counts_equal(&counts, &corpus.expected);
    Ok(())
}

#[test]
fn parallel_count_matches_sequential() -> Result<()> {
    let corpus = sample_corpus(100, 200)?;
    let sequential = word_counts(&corpus.files, &ReadConfig::default())?;

    let pool = WorkerPool::new(8)?;
    let parallel = word_counts_par(&pool, corpus.files.clone(), ReadConfig::default()).claim()?;
    pool.shutdown();

    assert_counts_equal(&parallel, &sequential);
    assert_counts_equal(&parallel, &corpus.expected);
    Ok(())
}

#[test]
fn pool_size_does_not_change_the_result() -> Result<()> {
    let corpus = sample_corpus(30, 20)?;
    let mut results = Vec::new();
    for threads in [1, 2, 8] {
        let pool = WorkerPool::new(threads)?;
        results.push(word_counts_par(&pool, corpus.files.clone(), ReadConfig::default()).claim()?);
        pool.shutdown();
    }
    for counts in &results {
        assert_counts_equal(counts, &corpus.expected);
    }
    Ok(())
}

#[test]
fn small_chunks_do_not_split_words() -> Result<()> {
    let corpus = sample_corpus(5, 40)?;
    let counts = word_counts(&corpus.files, &ReadConfig { chunk_size: 3 })?;
    assert_counts_equal(&counts, &corpus.expected);
    Ok(())
}

#[test]
fn glob_selects_the_corpus() -> Result<()> {
    let corpus = sample_corpus(10, 5)?;
    let pattern = format!("{}/wordcount-*.txt", corpus.dir.path().display());

    let pool = WorkerPool::new(4)?;
    let counts = word_counts_glob(&pool, &pattern, ReadConfig::default())?.claim()?;
    assert_counts_equal(&counts, &corpus.expected);

    let nothing = format!("{}/*.csv", corpus.dir.path().display());
    assert!(word_counts_glob(&pool, &nothing, ReadConfig::default()).is_err());
    Ok(())
}

#[test]
fn single_file_counts() -> Result<()> {
    let dir = tempdir()?;
    let path = write_file(dir.path(), "one.txt", "the cat\tand the  hat\n\nthe end")?;

    let counts = count_words_in_file(&path, &ReadConfig::default()).run()?;
    assert_eq!(counts.get("the"), Some(&3));
    assert_eq!(counts.get("hat"), Some(&1));
    assert_eq!(counts.len(), 5);
    assert_eq!(total_words_in_file(&path).run()?, 7);
    Ok(())
}

#[test]
fn totals_across_files() -> Result<()> {
    let corpus = sample_corpus(20, 10)?;
    let pool = WorkerPool::new(4)?;
    let total = total_words_par(&pool, corpus.files.clone()).claim()?;
    assert_eq!(total, 20 * 11);
    Ok(())
}

#[test]
fn unreadable_input_fails_the_run() -> Result<()> {
    let corpus = sample_corpus(3, 2)?;
    let mut files = corpus.files.clone();
    files.push(corpus.dir.path().join("missing.txt"));

    assert!(word_counts(&files, &ReadConfig::default()).is_err());

    let pool = WorkerPool::new(2)?;
    let err = word_counts_par(&pool, files, ReadConfig::default())
        .claim()
        .unwrap_err();
    assert!(format!("{err:#}").contains("missing.txt"), "{err:#}");
    Ok(())
}

#[test]
fn counts_survive_a_jsonl_round_trip() -> Result<()> {
    let corpus = sample_corpus(4, 3)?;
    let counts = word_counts(&corpus.files, &ReadConfig::default())?;

    let out = tempdir()?;
    let path = out.path().join("nested/dir/counts.jsonl");
    let written = write_counts_jsonl(&path, &counts)?;
    assert_eq!(written, counts.len());

    let first = std::fs::read_to_string(&path)?
        .lines()
        .next()
        .map(str::to_string);
    assert_eq!(first.as_deref(), Some(r#"{"word":"File0","count":1}"#));

    assert_counts_equal(&read_counts_jsonl(&path)?, &counts);
    Ok(())
}
