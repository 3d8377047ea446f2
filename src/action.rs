//! Deferred actions: effectful computations that are built first and run later.
//!
//! An [`Action<T>`] wraps a thunk that, when [`run`](Action::run), either yields
//! a `T` or fails. Building an action never performs I/O; composing actions with
//! [`map`](Action::map) and [`and_then`](Action::and_then) only nests thunks.
//! [`bracket`] adds guaranteed release of an acquired resource.
//!
//! # Example
//! ```
//! use ironfold::action::{bracket, Action};
//!
//! let greeting = Action::unit(String::from("hello"))
//!     .map(|s| s.len())
//!     .and_then(|n| Action::unit(n * 2));
//! assert_eq!(greeting.run()?, 10);
//!
//! let total = bracket(
//!     Action::unit(vec![1u32, 2, 3]),
//!     |_v| Action::unit(()),
//!     |v: &mut Vec<u32>| Ok(v.iter().sum::<u32>()),
//! );
//! assert_eq!(total.run()?, 6);
//! # anyhow::Result::<()>::Ok(())
//! ```

use anyhow::{Context, Result};
use std::fmt;
use std::fmt::Display;
use std::panic::{AssertUnwindSafe, catch_unwind, resume_unwind};
use tracing::warn;

type Thunk<T> = Box<dyn FnOnce() -> Result<T> + Send + 'static>;

/// A not-yet-executed computation producing a `T`.
///
/// Actions are consumed by [`run`](Action::run), so each one executes at most
/// once. Side effects happen only inside `run`.
#[must_use = "actions do nothing until `run` is called"]
pub struct Action<T> {
    thunk: Thunk<T>,
}

impl<T: 'static> Action<T> {
    /// Lift a closure into an action. The closure runs on [`run`](Action::run).
    pub fn new<F>(f: F) -> Self
    where
        F: FnOnce() -> Result<T> + Send + 'static,
    {
        Self { thunk: Box::new(f) }
    }

    /// An action that always succeeds with `value`.
    pub fn unit(value: T) -> Self
    where
        T: Send,
    {
        Self::new(move || Ok(value))
    }

    /// An action that yields an already computed result.
    pub fn from_result(result: Result<T>) -> Self
    where
        T: Send,
    {
        Self::new(move || result)
    }

    /// Execute the action.
    ///
    /// # Errors
    /// Returns whatever failure the underlying computation raised.
    pub fn run(self) -> Result<T> {
        (self.thunk)()
    }

    /// Run this action, then apply `f` to its value.
    pub fn map<U, F>(self, f: F) -> Action<U>
    where
        U: 'static,
        F: FnOnce(T) -> U + Send + 'static,
    {
        Action::new(move || self.run().map(f))
    }

    /// Run this action, build the next one from its value, and run that.
    pub fn and_then<U, F>(self, f: F) -> Action<U>
    where
        U: 'static,
        F: FnOnce(T) -> Action<U> + Send + 'static,
    {
        Action::new(move || f(self.run()?).run())
    }

    /// Attach context to a failure of this action.
    pub fn context<C>(self, context: C) -> Self
    where
        C: Display + Send + Sync + 'static,
    {
        Self::new(move || self.run().context(context))
    }
}

impl<T> fmt::Debug for Action<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Action").finish_non_exhaustive()
    }
}

/// Acquire a resource, use it, and release it on every exit path.
///
/// - If `acquire` fails, neither `body` nor `release` runs.
/// - `release` runs exactly once after `body` returns, fails, or panics.
/// - A panic in `body` resumes unwinding after the release.
///
/// When both `body` and `release` fail, the `body` error is returned with the
/// release failure attached as context, so the body error can still be
/// downcast. A release failure after a successful `body` is returned as is.
pub fn bracket<R, U, Rel, Body>(acquire: Action<R>, release: Rel, body: Body) -> Action<U>
where
    R: 'static,
    U: 'static,
    Rel: FnOnce(R) -> Action<()> + Send + 'static,
    Body: FnOnce(&mut R) -> Result<U> + Send + 'static,
{
    Action::new(move || {
        let mut resource = acquire.run()?;
        let used = catch_unwind(AssertUnwindSafe(|| body(&mut resource)));
        let released = release(resource).run();

        match used {
            Err(payload) => {
                if let Err(e) = released {
                    warn!(error = %format!("{e:#}"), "release failed while unwinding");
                }
                resume_unwind(payload)
            }
            Ok(Ok(value)) => released.map(|()| value),
            Ok(Err(err)) => match released {
                Ok(()) => Err(err),
                Err(rel) => {
                    warn!(error = %format!("{rel:#}"), "release failed after body failure");
                    Err(err.context(format!("release also failed: {rel:#}")))
                }
            },
        }
    })
}
