//! Parallel fold-merge aggregation.
//!
//! [`par_fold_map`] runs a mapping function over every input on a
//! [`WorkerPool`] and combines the partial results with a [`Merge`] operator.
//! A coordinator thread merges partial results as they arrive, always pairing
//! *adjacent* input ranges with the earlier range on the left. Because of
//! that, the final value only depends on the operator being associative: the
//! order in which workers finish does not matter, and the operator need not
//! be commutative.
//!
//! ```no_run
//! use ironfold::aggregate::{par_fold_map, WorkerPool};
//! use ironfold::merge::Sum;
//!
//! let pool = WorkerPool::new(4)?;
//! let promise = par_fold_map(&pool, vec![1u64, 2, 3], |n: &u64| Ok(n * 10), Sum::new());
//! assert_eq!(promise.claim()?, 60);
//! pool.shutdown();
//! # anyhow::Result::<()>::Ok(())
//! ```
//!
//! # Failures
//!
//! The first failing mapping (or panicking job) wins: the coordinator stops
//! merging and [`Promise::claim`] returns that error. Jobs already running are
//! not interrupted; their results are discarded.

use crate::error::Error;
use crate::merge::Merge;
use anyhow::{Context, Result, anyhow};
use rayon::{ThreadPool, ThreadPoolBuilder};
use std::any::Any;
use std::collections::BTreeMap;
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread::{self, JoinHandle};
use std::time::Instant;
use tracing::{debug, trace};

/// A fixed-size pool of worker threads.
///
/// The caller owns the pool: create it, hand it to any number of
/// [`par_fold_map`] calls, and [`shutdown`](WorkerPool::shutdown) it when done.
/// Work that was already submitted keeps the threads alive until it finishes.
pub struct WorkerPool {
    pool: Arc<ThreadPool>,
    threads: usize,
}

impl WorkerPool {
    /// Build a pool with exactly `threads` workers.
    ///
    /// # Errors
    /// [`Error::InvalidPoolSize`] for `threads == 0`, or the OS refusing to
    /// spawn threads.
    pub fn new(threads: usize) -> Result<Self> {
        if threads == 0 {
            return Err(Error::InvalidPoolSize(threads).into());
        }
        let pool = ThreadPoolBuilder::new()
            .num_threads(threads)
            .thread_name(|i| format!("ironfold-worker-{i}"))
            .build()
            .context("build worker pool")?;
        debug!(threads, "worker pool started");
        Ok(Self {
            pool: Arc::new(pool),
            threads,
        })
    }

    /// Build a pool with one worker per logical CPU.
    ///
    /// # Errors
    /// See [`WorkerPool::new`].
    pub fn per_cpu() -> Result<Self> {
        Self::new(num_cpus::get().max(1))
    }

    /// Number of worker threads.
    pub fn threads(&self) -> usize {
        self.threads
    }

    /// Release the caller's handle on the pool. Threads exit once all
    /// submitted work has drained.
    pub fn shutdown(self) {
        debug!(threads = self.threads, "worker pool shutting down");
    }
}

/// A handle on a result that is still being computed.
#[must_use = "a promise does nothing unless claimed"]
pub struct Promise<T> {
    inner: Inner<T>,
}

enum Inner<T> {
    Running(JoinHandle<Result<T>>),
    Failed(anyhow::Error),
}

impl<T> Promise<T> {
    /// Block until every partial result is computed and merged, then return
    /// the combined value.
    ///
    /// # Errors
    /// The first failure raised by a mapping job, or [`Error::WorkerPanicked`]
    /// if a job panicked.
    pub fn claim(self) -> Result<T> {
        match self.inner {
            Inner::Running(handle) => match handle.join() {
                Ok(result) => result,
                Err(payload) => Err(Error::WorkerPanicked(panic_message(payload.as_ref())).into()),
            },
            Inner::Failed(err) => Err(err),
        }
    }

    /// Whether [`claim`](Promise::claim) would return without blocking.
    pub fn is_ready(&self) -> bool {
        match &self.inner {
            Inner::Running(handle) => handle.is_finished(),
            Inner::Failed(_) => true,
        }
    }
}

/// A partial result covering inputs `lo..hi`.
struct Partial<T> {
    lo: usize,
    hi: usize,
    value: Result<T>,
}

/// Map every item on `pool` and merge the results with `merge`.
///
/// Each `f(&item)` runs as its own job. Zero items yield `merge.empty()`.
pub fn par_fold_map<I, T, F, M>(pool: &WorkerPool, items: Vec<I>, f: F, merge: M) -> Promise<T>
where
    I: Send + 'static,
    T: Send + 'static,
    F: Fn(&I) -> Result<T> + Send + Sync + 'static,
    M: Merge<T>,
{
    let n = items.len();
    let started = Instant::now();
    let (tx, rx) = mpsc::channel::<Partial<T>>();
    let f = Arc::new(f);

    for (idx, item) in items.into_iter().enumerate() {
        let tx = tx.clone();
        let f = Arc::clone(&f);
        pool.pool.spawn(move || {
            let value = guarded(|| (*f)(&item));
            let _ = tx.send(Partial {
                lo: idx,
                hi: idx + 1,
                value,
            });
        });
    }
    debug!(items = n, threads = pool.threads, "submitted mapping jobs");

    let workers = Arc::clone(&pool.pool);
    let spawned = thread::Builder::new()
        .name("ironfold-merge".to_string())
        .spawn(move || {
            let result = fan_in(&workers, n, &rx, &tx, &Arc::new(merge));
            debug!(
                items = n,
                elapsed_ms = started.elapsed().as_millis() as u64,
                ok = result.is_ok(),
                "aggregation finished"
            );
            result
        });

    let inner = match spawned {
        Ok(handle) => Inner::Running(handle),
        Err(e) => Inner::Failed(anyhow!(e).context("spawn merge coordinator")),
    };
    Promise { inner }
}

/// Fold `items` on the calling thread, merging left to right.
///
/// # Errors
/// The first failure raised by `f`; later items are not mapped.
pub fn fold_map<I, T, F, M>(items: impl IntoIterator<Item = I>, mut f: F, merge: M) -> Result<T>
where
    F: FnMut(&I) -> Result<T>,
    M: Merge<T>,
{
    items
        .into_iter()
        .try_fold(merge.empty(), |acc, item| Ok(merge.merge(acc, f(&item)?)))
}

/// Receive partial results and merge adjacent ranges until one covers `0..n`.
fn fan_in<T, M>(
    pool: &ThreadPool,
    n: usize,
    rx: &Receiver<Partial<T>>,
    tx: &Sender<Partial<T>>,
    merge: &Arc<M>,
) -> Result<T>
where
    T: Send + 'static,
    M: Merge<T>,
{
    if n == 0 {
        return Ok(merge.empty());
    }

    // Ranges waiting for a neighbour, keyed by start: start -> (end, value).
    let mut settled: BTreeMap<usize, (usize, T)> = BTreeMap::new();
    loop {
        let Partial { lo, hi, value } = rx
            .recv()
            .context("worker pool stopped before all partial results arrived")?;
        let value = value.with_context(|| {
            if hi - lo > 1 {
                format!("merging inputs #{lo}..#{}", hi - 1)
            } else {
                format!("aggregating input #{lo}")
            }
        })?;
        if lo == 0 && hi == n {
            return Ok(value);
        }

        let left_start = settled
            .range(..lo)
            .next_back()
            .and_then(|(&start, (end, _))| (*end == lo).then_some(start));

        if let Some((start, (_, left))) = left_start.and_then(|s| settled.remove_entry(&s)) {
            spawn_merge(pool, tx, merge, start, hi, left, value);
        } else if let Some((end, right)) = settled.remove(&hi) {
            spawn_merge(pool, tx, merge, lo, end, value, right);
        } else {
            settled.insert(lo, (hi, value));
        }
    }
}

fn spawn_merge<T, M>(
    pool: &ThreadPool,
    tx: &Sender<Partial<T>>,
    merge: &Arc<M>,
    lo: usize,
    hi: usize,
    left: T,
    right: T,
) where
    T: Send + 'static,
    M: Merge<T>,
{
    trace!(lo, hi, "merging partial results");
    let tx = tx.clone();
    let merge = Arc::clone(merge);
    pool.spawn(move || {
        let value = guarded(|| Ok(merge.merge(left, right)));
        let _ = tx.send(Partial { lo, hi, value });
    });
}

/// Run `job`, turning a panic into [`Error::WorkerPanicked`].
fn guarded<T>(job: impl FnOnce() -> Result<T>) -> Result<T> {
    catch_unwind(AssertUnwindSafe(job))
        .unwrap_or_else(|payload| Err(Error::WorkerPanicked(panic_message(payload.as_ref())).into()))
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "non-string panic payload".to_string()
    }
}
