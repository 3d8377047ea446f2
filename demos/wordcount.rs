//! Word count over a generated corpus, sequentially and on 8 threads.
//!
//! Run with: `RUST_LOG=debug cargo run --example wordcount`

use anyhow::{Result, ensure};
use ironfold::testing::sample_corpus;
use ironfold::{ReadConfig, WorkerPool, word_counts, word_counts_par};
use std::time::Instant;
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let num_files = 100;
    let num_shared_words = 200;
    let corpus = sample_corpus(num_files, num_shared_words)?;
    let config = ReadConfig::default();

    let start = Instant::now();
    let counts = word_counts(&corpus.files, &config)?;
    info!(elapsed_ms = start.elapsed().as_millis() as u64, "word counts in 1 thread");
    ensure!(counts.len() == num_files + num_shared_words, "unexpected word set size {}", counts.len());
    ensure!(counts == corpus.expected, "sequential counts differ from expected");

    let start = Instant::now();
    let pool = WorkerPool::new(8)?;
    let counts = word_counts_par(&pool, corpus.files.clone(), config).claim()?;
    pool.shutdown();
    info!(elapsed_ms = start.elapsed().as_millis() as u64, "word counts in 8 threads");
    ensure!(counts.len() == num_files + num_shared_words, "unexpected word set size {}", counts.len());
    ensure!(counts == corpus.expected, "parallel counts differ from expected");

    Ok(())
}
