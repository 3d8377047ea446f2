//! Incremental consumers (iteratees).
//!
//! A consumer is a resumable state machine, [`Step<E, A>`]: either waiting for
//! the next [`Input<E>`] (`Cont`) or finished with a result and whatever input
//! it did not consume (`Done`). `Done` carries no step function, so a finished
//! consumer cannot be fed by construction.
//!
//! The consumers here are reusable building blocks. They are driven by the
//! [`enumerator`](crate::enumerator) or, for in-memory data, by
//! [`Step::feed_all`].
//!
//! ```
//! use ironfold::iteratee::{head, length, skip, Step};
//!
//! let lines = ["foo", "bar", "baz"].map(String::from);
//! assert_eq!(length().feed_all(lines.clone()).run()?, 3);
//!
//! let third = skip(2).bind(|()| head());
//! assert_eq!(third.feed_all(lines).run()?, Some("baz".to_string()));
//! # anyhow::Result::<()>::Ok(())
//! ```

use crate::error::Error;
use anyhow::Result;
use std::fmt;

/// One datum delivered to a consumer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Input<E> {
    /// The next element of the stream.
    El(E),
    /// A pull that produced nothing new but did not reach end of input.
    Empty,
    /// End of input. Delivered at most once per consumer.
    Eof,
}

/// The step function of a running consumer.
pub type Cont<E, A> = Box<dyn FnOnce(Input<E>) -> Step<E, A> + Send>;

/// State of an incremental consumer.
pub enum Step<E, A> {
    /// Waiting for more input.
    Cont(Cont<E, A>),
    /// Finished: the result and any unconsumed input.
    Done(A, Input<E>),
}

impl<E, A> fmt::Debug for Step<E, A>
where
    E: fmt::Debug,
    A: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Step::Cont(_) => f.write_str("Cont(..)"),
            Step::Done(a, rest) => f.debug_tuple("Done").field(a).field(rest).finish(),
        }
    }
}

impl<E, A> Step<E, A>
where
    E: Send + 'static,
    A: Send + 'static,
{
    /// Wrap a step function.
    pub fn cont<F>(f: F) -> Self
    where
        F: FnOnce(Input<E>) -> Step<E, A> + Send + 'static,
    {
        Step::Cont(Box::new(f))
    }

    /// Whether the consumer has finished.
    pub fn is_done(&self) -> bool {
        matches!(self, Step::Done(..))
    }

    /// Feed elements from memory until they run out or the consumer finishes.
    ///
    /// Does not send `Eof`; use [`run`](Step::run) to finalize.
    pub fn feed_all<I>(self, items: I) -> Self
    where
        I: IntoIterator<Item = E>,
    {
        let mut step = self;
        for item in items {
            step = match step {
                Step::Cont(k) => k(Input::El(item)),
                done @ Step::Done(..) => return done,
            };
        }
        step
    }

    /// Extract the result, sending `Eof` first if the consumer is still running.
    ///
    /// # Errors
    /// [`Error::Diverged`] if the consumer does not finish on `Eof`.
    pub fn run(self) -> Result<A> {
        let finished = match self {
            Step::Cont(k) => k(Input::Eof),
            done => done,
        };
        match finished {
            Step::Done(a, _) => Ok(a),
            Step::Cont(_) => Err(Error::Diverged.into()),
        }
    }

    /// Sequence two consumers: when this one finishes, its leftover input is
    /// handed to the consumer built by `f`.
    pub fn bind<B, F>(self, f: F) -> Step<E, B>
    where
        B: Send + 'static,
        F: FnOnce(A) -> Step<E, B> + Send + 'static,
    {
        match self {
            Step::Done(a, rest) => match f(a) {
                Step::Done(b, _) => Step::Done(b, rest),
                Step::Cont(k) => k(rest),
            },
            Step::Cont(k) => Step::cont(move |input| k(input).bind(f)),
        }
    }

    /// Transform the result once the consumer finishes. Leftover input is kept.
    pub fn map<B, F>(self, f: F) -> Step<E, B>
    where
        B: Send + 'static,
        F: FnOnce(A) -> B + Send + 'static,
    {
        self.bind(move |a| Step::Done(f(a), Input::Empty))
    }
}

/// Count the elements of the stream.
pub fn length<E: Send + 'static>() -> Step<E, usize> {
    fn step<E: Send + 'static>(n: usize) -> Step<E, usize> {
        Step::cont(move |input: Input<E>| match input {
            Input::El(_) => step(n + 1),
            Input::Empty => step(n),
            Input::Eof => Step::Done(n, Input::Eof),
        })
    }
    step(0)
}

/// Take the first element, consuming it.
pub fn head<E: Send + 'static>() -> Step<E, Option<E>> {
    Step::cont(|input: Input<E>| match input {
        Input::El(e) => Step::Done(Some(e), Input::Empty),
        Input::Empty => head(),
        Input::Eof => Step::Done(None, Input::Eof),
    })
}

/// Look at the first element without consuming it; it stays as leftover input.
pub fn peek<E: Clone + Send + 'static>() -> Step<E, Option<E>> {
    Step::cont(|input: Input<E>| match input {
        Input::El(e) => Step::Done(Some(e.clone()), Input::El(e)),
        Input::Empty => peek(),
        Input::Eof => Step::Done(None, Input::Eof),
    })
}

/// Drop the first `n` elements.
pub fn skip<E: Send + 'static>(n: usize) -> Step<E, ()> {
    if n == 0 {
        return Step::Done((), Input::Empty);
    }
    Step::cont(move |input: Input<E>| match input {
        Input::El(_) => skip(n - 1),
        Input::Empty => skip(n),
        Input::Eof => Step::Done((), Input::Eof),
    })
}

/// Left fold over every element; finishes on `Eof`.
pub fn fold<E, A, F>(init: A, f: F) -> Step<E, A>
where
    E: Send + 'static,
    A: Send + 'static,
    F: FnMut(A, E) -> A + Send + 'static,
{
    fn step<E, A, F>(acc: A, mut f: F) -> Step<E, A>
    where
        E: Send + 'static,
        A: Send + 'static,
        F: FnMut(A, E) -> A + Send + 'static,
    {
        Step::cont(move |input: Input<E>| match input {
            Input::El(e) => {
                let acc = f(acc, e);
                step(acc, f)
            }
            Input::Empty => step(acc, f),
            Input::Eof => Step::Done(acc, Input::Eof),
        })
    }
    step(init, f)
}

/// Collect every element, in order.
pub fn list<E: Send + 'static>() -> Step<E, Vec<E>> {
    fold(Vec::new(), |mut acc, e| {
        acc.push(e);
        acc
    })
}

/// Re-chunk a stream of text chunks into one growing buffer.
pub fn collect_chunks<E>() -> Step<E, String>
where
    E: AsRef<str> + Send + 'static,
{
    fold(String::new(), |mut buf, chunk: E| {
        buf.push_str(chunk.as_ref());
        buf
    })
}

/// Re-join a stream of lines into one buffer, putting a `\n` between lines.
pub fn join_lines<E>() -> Step<E, String>
where
    E: AsRef<str> + Send + 'static,
{
    fold((String::new(), 0usize), |(mut buf, seen), line: E| {
        if seen > 0 {
            buf.push('\n');
        }
        buf.push_str(line.as_ref());
        (buf, seen + 1)
    })
    .map(|(buf, _)| buf)
}

/// Re-join a stream of characters into one buffer.
pub fn collect_chars() -> Step<char, String> {
    fold(String::new(), |mut buf, c| {
        buf.push(c);
        buf
    })
}
