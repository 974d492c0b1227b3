//! Progress reporting and cooperative cancellation for a run.

use core::fmt;
use core::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Receives a report after every completed iteration.
///
/// `start` and `end` are the first and last iteration indices of the run
/// (inclusive) and `current` is the iteration that just completed. Plain
/// closures implement this trait:
///
/// ```
/// use blastopt::optimizer::Progress;
///
/// let mut seen = Vec::new();
/// let mut progress = |_start: usize, _end: usize, current: usize| seen.push(current);
/// progress.report(1, 3, 1);
/// progress.report(1, 3, 2);
/// assert_eq!(seen, vec![1, 2]);
/// ```
pub trait Progress {
    /// Called once per completed iteration.
    fn report(&mut self, start: usize, end: usize, current: usize);
}

impl<F> Progress for F
where
    F: FnMut(usize, usize, usize),
{
    fn report(&mut self, start: usize, end: usize, current: usize) {
        self(start, end, current);
    }
}

/// Shared flag that stops a run at the next iteration boundary.
///
/// Clones share the flag, so a token handed to another thread can cancel a
/// run in progress.
#[derive(Clone, Debug, Default)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
    /// Creates a token that is not cancelled.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests cancellation.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Relaxed);
    }

    /// Returns `true` once [`cancel`](Self::cancel) has been called on any
    /// clone.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Relaxed)
    }
}

/// Optional hooks for a run: a progress sink and a cancellation token.
///
/// ```
/// use blastopt::optimizer::{CancellationToken, RunControl};
///
/// let token = CancellationToken::new();
/// let control = RunControl::new()
///     .progress(|_, end, current| {
///         if current == end {
///             println!("done");
///         }
///     })
///     .cancellation(token.clone());
/// # drop(control);
/// ```
#[derive(Default)]
pub struct RunControl<'a> {
    progress: Option<Box<dyn Progress + 'a>>,
    cancellation: Option<CancellationToken>,
}

impl<'a> RunControl<'a> {
    /// No progress sink, no cancellation.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a progress closure called as `(start, end, current)`.
    #[must_use]
    pub fn progress(self, progress: impl FnMut(usize, usize, usize) + 'a) -> Self {
        self.reporter(progress)
    }

    /// Sets any [`Progress`] implementation as the progress sink.
    #[must_use]
    pub fn reporter(mut self, progress: impl Progress + 'a) -> Self {
        self.progress = Some(Box::new(progress));
        self
    }

    /// Sets the cancellation token, checked before every iteration.
    #[must_use]
    pub fn cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation = Some(token);
        self
    }

    pub(crate) fn is_cancelled(&self) -> bool {
        self.cancellation
            .as_ref()
            .is_some_and(CancellationToken::is_cancelled)
    }

    pub(crate) fn report(&mut self, start: usize, end: usize, current: usize) {
        if let Some(progress) = self.progress.as_mut() {
            progress.report(start, end, current);
        }
    }
}

impl fmt::Debug for RunControl<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RunControl")
            .field("progress", &self.progress.is_some())
            .field("cancellation", &self.cancellation)
            .finish()
    }
}
